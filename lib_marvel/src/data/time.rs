//! # API Timestamps
//!
//! The API formats dates as `2013-09-18T15:54:04-0400`: ISO-like, but with a
//! numeric zone offset without a colon, which RFC 3339 parsing rejects. Some
//! records also carry placeholder values such as `-0001-11-30T00:00:00-0500`.
//!
//! [`ApiTime`] parses the expected pattern and otherwise keeps the unset value
//! without failing the surrounding record.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// The format used by the API for every timestamp field.
pub const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A point in time as reported by the API, or unset when the payload did not
/// match [`API_TIME_FORMAT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiTime(pub Option<DateTime<FixedOffset>>);

impl ApiTime {
    /// Parses a raw timestamp string. Returns the unset value on mismatch.
    pub fn parse(raw: &str) -> Self {
        // Signed years are placeholders for "no date".
        if raw.starts_with('-') {
            return ApiTime(None);
        }
        // `%z` also accepts `-04:00`; the API never sends a colon in the offset.
        if !has_colon_offset(raw) {
            if let Ok(dt) = DateTime::parse_from_str(raw, API_TIME_FORMAT) {
                return ApiTime(Some(dt));
            }
        }
        // A bare `Z` designates UTC.
        if let Some(naive) = raw.strip_suffix('Z') {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S") {
                return ApiTime(Some(ndt.and_utc().fixed_offset()));
            }
        }
        tracing::trace!(raw, "timestamp did not match the API format, leaving it unset");
        ApiTime(None)
    }

    /// True when the payload held a parsable timestamp.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// The timestamp converted to UTC.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.0.map(|dt| dt.with_timezone(&Utc))
    }
}

/// True for a trailing `±hh:mm` zone offset.
fn has_colon_offset(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 6
        && matches!(bytes[bytes.len() - 6], b'+' | b'-')
        && bytes[bytes.len() - 3] == b':'
}

impl From<DateTime<FixedOffset>> for ApiTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        ApiTime(Some(dt))
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.format(API_TIME_FORMAT)),
            None => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything other than a string (null included) is an unset time.
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(raw) => ApiTime::parse(raw),
            None => ApiTime(None),
        })
    }
}

impl Serialize for ApiTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(dt) => serializer.collect_str(&dt.format(API_TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        #[serde(default)]
        modified: ApiTime,
    }

    #[test]
    fn parses_numeric_offset_without_colon() {
        let h: Holder = serde_json::from_str(r#"{"modified": "2013-09-18T15:54:04-0400"}"#).unwrap();
        let dt = h.modified.0.expect("timestamp should parse");
        assert_eq!((dt.year(), dt.month(), dt.day()), (2013, 9, 18));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (15, 54, 4));
        assert_eq!(dt.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn parses_literal_z_as_utc() {
        let t = ApiTime::parse("2016-08-17T17:46:57Z");
        assert_eq!(t.0.unwrap().offset().local_minus_utc(), 0);
    }

    #[test]
    fn mismatches_stay_unset() {
        for raw in [
            r#"{"modified": "2013-09-18T15:54:04-04:00Z"}"#,
            r#"{"modified": "2013-09-18T15:54:04-04:00"}"#,
            r#"{"modified": "2013-09-18T15:54:04+05:30"}"#,
            r#"{"modified": "not a date"}"#,
            r#"{"modified": "-0001-11-30T00:00:00-0500"}"#,
            r#"{"modified": null}"#,
            r#"{"modified": 1234}"#,
            r#"{}"#,
        ] {
            let h: Holder = serde_json::from_str(raw).unwrap();
            assert!(!h.modified.is_set(), "expected unset for {raw}");
        }
    }

    #[test]
    fn serializes_in_api_format() {
        let t = ApiTime::parse("2013-09-18T15:54:04-0400");
        let out = serde_json::to_value(Holder { modified: t }).unwrap();
        assert_eq!(out["modified"], "2013-09-18T15:54:04-0400");

        let unset = serde_json::to_value(Holder { modified: ApiTime(None) }).unwrap();
        assert!(unset["modified"].is_null());
    }
}
