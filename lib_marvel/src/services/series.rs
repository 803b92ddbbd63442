//! Series: sequentially numbered runs of comics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::data::{ApiTime, CharacterList, ComicList, CreatorList, EventList, Image, Link, StoryList, Summary};
use crate::retrieve::query::{comma_joined, rfc3339};

/// A comic series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Series {
    /// Unique ID.
    pub id: u64,
    /// Canonical title.
    pub title: String,
    /// Preferred description, often absent.
    pub description: Option<String>,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Public web pages for the series.
    pub urls: Vec<Link>,
    /// First year of publication.
    pub start_year: u32,
    /// Last year of publication; far in the future for ongoing series.
    pub end_year: u32,
    /// Age rating, e.g. `Rated T+`.
    pub rating: String,
    /// Series type, e.g. `ongoing` or `limited`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// Representative image.
    pub thumbnail: Image,
    /// Comics related to the series.
    pub comics: ComicList,
    /// Stories related to the series.
    pub stories: StoryList,
    /// Events related to the series.
    pub events: EventList,
    /// Characters related to the series.
    pub characters: CharacterList,
    /// Creators related to the series.
    pub creators: CreatorList,
    /// The series that follows this one.
    pub next: Option<Summary>,
    /// The series that preceded this one.
    pub previous: Option<Summary>,
}

impl Entity for Series {
    const PATH: &'static str = "series";
    type Params = SeriesParams;
}

/// Filters, ordering and pagination for series lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesParams {
    /// Exact title match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_starts_with: Option<String>,
    /// Year the series started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<u32>,
    /// Only series modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only series linked to any of these comics.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub comics: Vec<u64>,
    /// Only series linked to any of these stories.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<u64>,
    /// Only series linked to any of these events.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<u64>,
    /// Only series with work by any of these creators.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<u64>,
    /// Only series featuring any of these characters.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<u64>,
    /// `collection`, `one shot`, `limited` or `ongoing`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
    /// Comic formats the series must contain, e.g. `comic`, `digital comic`.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<String>,
    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Page size (API maximum 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_series_record() {
        let series: Series = serde_json::from_value(json!({
            "id": 2258,
            "title": "Uncanny X-Men (1963 - 2011)",
            "description": null,
            "startYear": 1963,
            "endYear": 2011,
            "rating": "Marvel Psr",
            "type": "ongoing",
            "modified": "2023-03-17T11:13:07-0400",
            "creators": {
                "available": 1, "returned": 1,
                "items": [{"resourceURI": "http://gateway.marvel.com/v1/public/creators/30", "name": "Stan Lee", "role": "writer"}]
            },
            "next": null
        }))
        .unwrap();

        assert_eq!(series.start_year, 1963);
        assert_eq!(series.kind, "ongoing");
        assert_eq!(series.creators.items[0].role, "writer");
        assert!(series.next.is_none());
    }

    #[test]
    fn params_join_contains_formats() {
        let params = SeriesParams {
            series_type: Some("limited".into()),
            contains: vec!["comic".into(), "digital comic".into()],
            ..SeriesParams::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"seriesType": "limited", "contains": "comic,digital comic"})
        );
    }
}
