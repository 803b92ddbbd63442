//! Events: big, universe-altering storylines spanning many titles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::data::{ApiTime, CharacterList, ComicList, CreatorList, Image, Link, SeriesList, StoryList, Summary};
use crate::retrieve::query::{comma_joined, rfc3339};

/// A crossover event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Unique ID.
    pub id: u64,
    /// Canonical title.
    pub title: String,
    /// Preferred description, often absent.
    pub description: Option<String>,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Public web pages for the event.
    pub urls: Vec<Link>,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// Publication start, as sent by the API (`YYYY-MM-DD hh:mm:ss`).
    pub start: Option<String>,
    /// Publication end, as sent by the API.
    pub end: Option<String>,
    /// Representative image.
    pub thumbnail: Image,
    /// Comics related to the event.
    pub comics: ComicList,
    /// Stories related to the event.
    pub stories: StoryList,
    /// Series related to the event.
    pub series: SeriesList,
    /// Characters related to the event.
    pub characters: CharacterList,
    /// Creators related to the event.
    pub creators: CreatorList,
    /// The event that follows this one.
    pub next: Option<Summary>,
    /// The event that preceded this one.
    pub previous: Option<Summary>,
}

impl Entity for Event {
    const PATH: &'static str = "events";
    type Params = EventParams;
}

/// Filters, ordering and pagination for event lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    /// Exact event name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_starts_with: Option<String>,
    /// Only events modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only events with work by any of these creators.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<u64>,
    /// Only events featuring any of these characters.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<u64>,
    /// Only events linked to any of these series.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<u64>,
    /// Only events linked to any of these comics.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub comics: Vec<u64>,
    /// Only events linked to any of these stories.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<u64>,
    /// Sort order, e.g. `name`, `startDate`, `-modified`.
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
    fn decodes_an_event_with_nullable_links() {
        let event: Event = serde_json::from_value(json!({
            "id": 116,
            "title": "Acts of Vengeance!",
            "description": null,
            "modified": "2013-06-28T16:31:24-0400",
            "start": "1989-12-10 00:00:00",
            "end": "2008-01-04 00:00:00",
            "next": {"resourceURI": "http://gateway.marvel.com/v1/public/events/240", "name": "Days of Future Present"},
            "previous": null
        }))
        .unwrap();

        assert_eq!(event.title, "Acts of Vengeance!");
        assert!(event.description.is_none());
        assert_eq!(event.start.as_deref(), Some("1989-12-10 00:00:00"));
        assert_eq!(event.next.unwrap().name, "Days of Future Present");
        assert!(event.previous.is_none());
    }

    #[test]
    fn empty_params_encode_nothing() {
        assert_eq!(serde_json::to_value(EventParams::default()).unwrap(), json!({}));
    }
}
