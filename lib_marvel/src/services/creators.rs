//! Creators: writers, artists, colorists and the rest of the credits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::data::{ApiTime, ComicList, EventList, Image, Link, SeriesList, StoryList};
use crate::retrieve::query::{comma_joined, rfc3339};

/// A person credited on comics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Creator {
    /// Unique ID.
    pub id: u64,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Name suffix, e.g. `Jr.`
    pub suffix: String,
    /// Full name as displayed in credits.
    pub full_name: String,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Public web pages for the creator.
    pub urls: Vec<Link>,
    /// Representative image.
    pub thumbnail: Image,
    /// Series related to the creator.
    pub series: SeriesList,
    /// Stories related to the creator.
    pub stories: StoryList,
    /// Comics related to the creator.
    pub comics: ComicList,
    /// Events related to the creator.
    pub events: EventList,
}

impl Entity for Creator {
    const PATH: &'static str = "creators";
    type Params = CreatorParams;
}

/// Filters, ordering and pagination for creator lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorParams {
    /// Exact first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Exact middle name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Exact last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Exact name suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Prefix match on the full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_starts_with: Option<String>,
    /// First name prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_starts_with: Option<String>,
    /// Middle name prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name_starts_with: Option<String>,
    /// Last name prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_starts_with: Option<String>,
    /// Only creators modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only creators linked to any of these comics.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub comics: Vec<u64>,
    /// Only creators linked to any of these series.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<u64>,
    /// Only creators linked to any of these events.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<u64>,
    /// Only creators linked to any of these stories.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<u64>,
    /// Sort order, e.g. `lastName`, `-modified`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Page size (API maximum 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
