//! Serde helpers used by the entity parameter structs.
//!
//! The query string encoder only understands flat key/value pairs, while the
//! API expects ID sets as one comma-separated value and dates in ISO form.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serializer;

/// Encodes a set of IDs as a single comma-separated value.
///
/// Pair with `skip_serializing_if = "Vec::is_empty"` so an empty set is omitted.
pub fn comma_joined<S, T>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: ToString,
{
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

/// Encodes an optional instant as RFC 3339 with second precision.
///
/// Pair with `skip_serializing_if = "Option::is_none"`.
pub fn rfc3339<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => serializer.serialize_none(),
    }
}

/// Encodes an inclusive date range as `YYYY-MM-DD,YYYY-MM-DD`.
///
/// Pair with `skip_serializing_if = "Option::is_none"`.
pub fn date_range<S>(value: &Option<(NaiveDate, NaiveDate)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some((from, to)) => serializer.serialize_str(&format!(
            "{},{}",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        )),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Probe {
        #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
        comics: Vec<u64>,
        #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
        since: Option<DateTime<Utc>>,
        #[serde(serialize_with = "date_range", skip_serializing_if = "Option::is_none")]
        range: Option<(NaiveDate, NaiveDate)>,
    }

    #[test]
    fn encodes_each_helper() {
        let probe = Probe {
            comics: vec![11200, 22222],
            since: Some(Utc.with_ymd_and_hms(2016, 8, 17, 17, 46, 57).unwrap()),
            range: NaiveDate::from_ymd_opt(2013, 1, 1).zip(NaiveDate::from_ymd_opt(2013, 1, 2)),
        };
        assert_eq!(
            serde_json::to_value(&probe).unwrap(),
            serde_json::json!({
                "comics": "11200,22222",
                "since": "2016-08-17T17:46:57Z",
                "range": "2013-01-01,2013-01-02"
            })
        );
    }

    #[test]
    fn empty_values_are_omitted() {
        let probe = Probe {
            comics: Vec::new(),
            since: None,
            range: None,
        };
        assert_eq!(serde_json::to_value(&probe).unwrap(), serde_json::json!({}));
    }
}
