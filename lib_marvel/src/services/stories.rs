//! Stories: the indivisible units of comics (a cover, an interior story, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::data::{ApiTime, CharacterList, ComicList, CreatorList, EventList, Image, SeriesList, Summary};
use crate::retrieve::query::{comma_joined, rfc3339};

/// A story within one or more comics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Story {
    /// Unique ID.
    pub id: u64,
    /// Canonical title.
    pub title: String,
    /// Preferred description, often absent.
    pub description: Option<String>,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Story type, e.g. `cover` or `interiorStory`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// Representative image.
    pub thumbnail: Option<Image>,
    /// Comics related to the story.
    pub comics: ComicList,
    /// Series related to the story.
    pub series: SeriesList,
    /// Events related to the story.
    pub events: EventList,
    /// Characters related to the story.
    pub characters: CharacterList,
    /// Creators related to the story.
    pub creators: CreatorList,
    /// The comic in which the story first appeared.
    #[serde(rename = "originalIssue")]
    pub original_issue: Option<Summary>,
}

impl Entity for Story {
    const PATH: &'static str = "stories";
    type Params = StoryParams;
}

/// Filters, ordering and pagination for story lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryParams {
    /// Only stories modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only stories linked to any of these comics.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub comics: Vec<u64>,
    /// Only stories linked to any of these series.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<u64>,
    /// Only stories linked to any of these events.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<u64>,
    /// Only stories with work by any of these creators.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<u64>,
    /// Only stories featuring any of these characters.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<u64>,
    /// `id` or `modified`, optionally `-` prefixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Page size (API maximum 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
