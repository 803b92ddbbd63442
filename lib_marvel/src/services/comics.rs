//! Comics: single issues, collections and trade paperbacks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Character, CharacterParams, Creator, CreatorParams, Entity, EntityService, Event, EventParams, Story,
    StoryParams,
};
use crate::data::{ApiTime, CharacterList, CreatorList, EventList, Image, Link, StoryList, Summary};
use crate::errors::MarvelError;
use crate::retrieve::query::{comma_joined, date_range, rfc3339};

/// A comic issue or collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comic {
    /// Unique ID.
    pub id: u64,
    /// ID of the digital edition, 0 when there is none.
    pub digital_id: u64,
    /// Canonical title.
    pub title: String,
    /// Issue number within the series.
    pub issue_number: f64,
    /// Description of the variant cover, if this is one.
    pub variant_description: String,
    /// Preferred description, often absent.
    pub description: Option<String>,
    /// Last modification of the record.
    pub modified: ApiTime,
    /// ISBN, for collections.
    pub isbn: String,
    /// UPC barcode.
    pub upc: String,
    /// Diamond distributor code.
    pub diamond_code: String,
    /// EAN barcode.
    pub ean: String,
    /// ISSN barcode.
    pub issn: String,
    /// Publication format, e.g. `Comic` or `Trade Paperback`.
    pub format: String,
    /// Number of story pages.
    pub page_count: u32,
    /// Descriptive texts in various languages.
    pub text_objects: Vec<TextObject>,
    /// Canonical API path of this resource.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Public web pages for the comic.
    pub urls: Vec<Link>,
    /// Series the comic belongs to.
    pub series: Summary,
    /// Variant covers of the comic.
    pub variants: Vec<Summary>,
    /// Collections that include the comic.
    pub collections: Vec<Summary>,
    /// Issues collected in this comic, for collections.
    pub collected_issues: Vec<Summary>,
    /// Key dates (on-sale, FOC, ...).
    pub dates: Vec<ComicDate>,
    /// Prices by edition.
    pub prices: Vec<ComicPrice>,
    /// Representative image.
    pub thumbnail: Image,
    /// Promotional images.
    pub images: Vec<Image>,
    /// Creators who worked on the comic.
    pub creators: CreatorList,
    /// Characters appearing in the comic.
    pub characters: CharacterList,
    /// Stories in the comic.
    pub stories: StoryList,
    /// Events the comic is part of.
    pub events: EventList,
}

/// A descriptive text attached to a comic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextObject {
    /// Kind of text, e.g. `issue_solicit_text`.
    #[serde(rename = "type")]
    pub kind: String,
    /// IETF language tag.
    pub language: String,
    /// The text itself.
    pub text: String,
}

/// A key date in a comic's lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComicDate {
    /// Kind of date, e.g. `onsaleDate`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The date.
    pub date: ApiTime,
}

/// A price for one edition of a comic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComicPrice {
    /// Kind of price, e.g. `printPrice`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Price in US dollars.
    pub price: f64,
}

impl Entity for Comic {
    const PATH: &'static str = "comics";
    type Params = ComicParams;
}

/// Filters, ordering and pagination for comic lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicParams {
    /// Publication format, e.g. `comic`, `hardcover`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `comic` or `collection`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_type: Option<String>,
    /// Exclude variant covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_variants: Option<bool>,
    /// Relative date window: `lastWeek`, `thisWeek`, `nextWeek` or `thisMonth`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_descriptor: Option<String>,
    /// Inclusive on-sale window.
    #[serde(serialize_with = "date_range", skip_serializing_if = "Option::is_none")]
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Exact title match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title prefix match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_starts_with: Option<String>,
    /// Year the series started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<u32>,
    /// Issue number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u32>,
    /// Diamond distributor code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diamond_code: Option<String>,
    /// Digital edition ID.
    #[serde(rename = "digitalId", skip_serializing_if = "Option::is_none")]
    pub digital_id: Option<u64>,
    /// UPC barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    /// ISBN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// EAN barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    /// ISSN barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issn: Option<String>,
    /// Only comics available digitally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_digital_issue: Option<bool>,
    /// Only comics modified after this instant.
    #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<DateTime<Utc>>,
    /// Only comics with work by any of these creators.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<u64>,
    /// Only comics featuring any of these characters.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<u64>,
    /// Only comics in any of these series.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<u64>,
    /// Only comics in any of these events.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<u64>,
    /// Only comics containing any of these stories.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<u64>,
    /// Only comics in which all of these characters appear together.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub shared_appearances: Vec<u64>,
    /// Only comics on which all of these creators worked together.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub collaborators: Vec<u64>,
    /// Sort order, e.g. `focDate`, `-onsaleDate`, `title`, `issueNumber`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Page size (API maximum 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl EntityService<Comic> {
    /// Characters appearing in the comic.
    pub async fn characters(&self, comic_id: u64, params: &CharacterParams) -> Result<Vec<Character>, MarvelError> {
        self.related::<Character>(comic_id, params).await
    }

    /// Creators who worked on the comic.
    pub async fn creators(&self, comic_id: u64, params: &CreatorParams) -> Result<Vec<Creator>, MarvelError> {
        self.related::<Creator>(comic_id, params).await
    }

    /// Events the comic is part of.
    pub async fn events(&self, comic_id: u64, params: &EventParams) -> Result<Vec<Event>, MarvelError> {
        self.related::<Event>(comic_id, params).await
    }

    /// Stories in the comic.
    pub async fn stories(&self, comic_id: u64, params: &StoryParams) -> Result<Vec<Story>, MarvelError> {
        self.related::<Story>(comic_id, params).await
    }
}
