//! Characters: the people and beings appearing in comics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Comic, ComicParams, Entity, EntityService, Event, EventParams, Series, SeriesParams, Story, StoryParams,
};
use crate::data::{ApiTime, ComicList, EventList, Image, Link, SeriesList, StoryList};
use crate::errors::MarvelError;
use crate::retrieve::query::{comma_joined, rfc3339};

/// A comic character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    /// Unique ID.
    pub id: u64,
    /// Name of the character.
    pub name: String,
    /// Short biography.
    pub description: String,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Public web pages for the character.
    pub urls: Vec<Link>,
    /// Representative image.
    pub thumbnail: Image,
    /// Comics featuring the character.
    pub comics: ComicList,
    /// Stories featuring the character.
    pub stories: StoryList,
    /// Events featuring the character.
    pub events: EventList,
    /// Series featuring the character.
    pub series: SeriesList,
}

impl Entity for Character {
    const PATH: &'static str = "characters";
    type Params = CharacterParams;
}

/// Filters, ordering and pagination for character lists.
///
/// `orderBy` accepts `name`, `modified` and their `-` prefixed descending forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterParams {
    /// Exact name match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_starts_with: Option<String>,
    /// Only characters modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only characters appearing in any of these comics.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub comics: Vec<u64>,
    /// Only characters appearing in any of these series.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<u64>,
    /// Only characters appearing in any of these events.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<u64>,
    /// Only characters appearing in any of these stories.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<u64>,
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

impl EntityService<Character> {
    /// Comics featuring the character.
    pub async fn comics(&self, character_id: u64, params: &ComicParams) -> Result<Vec<Comic>, MarvelError> {
        self.related::<Comic>(character_id, params).await
    }

    /// Events featuring the character.
    pub async fn events(&self, character_id: u64, params: &EventParams) -> Result<Vec<Event>, MarvelError> {
        self.related::<Event>(character_id, params).await
    }

    /// Series featuring the character.
    pub async fn series(&self, character_id: u64, params: &SeriesParams) -> Result<Vec<Series>, MarvelError> {
        self.related::<Series>(character_id, params).await
    }

    /// Stories featuring the character.
    pub async fn stories(&self, character_id: u64, params: &StoryParams) -> Result<Vec<Story>, MarvelError> {
        self.related::<Story>(character_id, params).await
    }
}
