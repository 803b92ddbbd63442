//! # Shared Response Data Model
//!
//! Every response from the API has the same outer shape: an envelope carrying
//! status and attribution metadata, wrapping a paginated container whose
//! `results` hold the requested entities.
//!
//! ```json
//! {
//!   "code": 200, "status": "Ok", "copyright": "...", "attributionText": "...",
//!   "attributionHTML": "...", "etag": "...",
//!   "data": { "offset": 0, "limit": 20, "total": 1562, "count": 20, "results": [] }
//! }
//! ```
//!
//! Error bodies reuse the same object with `code` (integer or string) and
//! `message`/`status`. [`ResponseBody`] is the superset both shapes decode into,
//! so the pipeline parses a body once and then decides which branch it took.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Lenient timestamp decoding for the API's date format.
pub mod time;

use serde::{Deserialize, Serialize};

use crate::errors::{ApiCode, ApiError};

pub use time::{ApiTime, API_TIME_FORMAT};

/// # Data Wrapper
///
/// The envelope around every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataWrapper<T> {
    /// HTTP-like status code reported in the body (200 on success).
    pub code: i64,
    /// Short status description, e.g. `"Ok"`.
    pub status: String,
    /// Copyright notice.
    pub copyright: String,
    /// Plain-text attribution.
    pub attribution_text: String,
    /// HTML attribution snippet.
    #[serde(rename = "attributionHTML")]
    pub attribution_html: String,
    /// Digest of the returned content.
    pub etag: String,
    /// The paginated results.
    pub data: DataContainer<T>,
}

impl<T> Default for DataWrapper<T> {
    fn default() -> Self {
        Self {
            code: 0,
            status: String::new(),
            copyright: String::new(),
            attribution_text: String::new(),
            attribution_html: String::new(),
            etag: String::new(),
            data: DataContainer::default(),
        }
    }
}

/// # Data Container
///
/// Pagination metadata and the results of one page.
///
/// In well-formed responses `count == results.len()` and
/// `offset + count <= total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataContainer<T> {
    /// Requested offset (number of skipped results).
    pub offset: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of results available for the query.
    pub total: u32,
    /// Number of results in this page.
    pub count: u32,
    /// The entities in this page.
    pub results: Vec<T>,
}

impl<T> Default for DataContainer<T> {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 0,
            total: 0,
            count: 0,
            results: Vec::new(),
        }
    }
}

impl<T> DataContainer<T> {
    /// True when `count` agrees with the number of results and the page lies within `total`.
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.results.len()
            && u64::from(self.offset) + u64::from(self.count) <= u64::from(self.total)
    }

    /// True when more results exist past this page.
    pub fn has_more(&self) -> bool {
        u64::from(self.offset) + u64::from(self.count) < u64::from(self.total)
    }

    /// Offset of the page following this one, if any.
    pub fn next_offset(&self) -> Option<u32> {
        self.has_more().then(|| self.offset + self.count)
    }
}

/// # Response Body
///
/// Superset of the success envelope and the error body. Every field is
/// optional so either shape decodes; [`ResponseBody::into_parts`] splits it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody<T> {
    #[serde(default)]
    code: Option<ApiCode>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    copyright: String,
    #[serde(default)]
    attribution_text: String,
    #[serde(default, rename = "attributionHTML")]
    attribution_html: String,
    #[serde(default)]
    etag: String,
    #[serde(default = "Option::default")]
    data: Option<DataContainer<T>>,
}

impl<T> ResponseBody<T> {
    /// Splits the body into the envelope and, when the body reports a failure,
    /// the matching [`ApiError`].
    ///
    /// The envelope is always returned; for error bodies it holds no results.
    pub fn into_parts(self) -> (DataWrapper<T>, Option<ApiError>) {
        let error = match &self.code {
            Some(code) if code.is_failure() => Some(ApiError {
                code: code.clone(),
                message: self
                    .message
                    .clone()
                    .or_else(|| self.status.clone())
                    .unwrap_or_default(),
                http_status: None,
            }),
            _ => None,
        };

        let code = match self.code {
            Some(ApiCode::Int(n)) => n,
            _ => 0,
        };

        let wrapper = DataWrapper {
            code,
            status: self.status.unwrap_or_default(),
            copyright: self.copyright,
            attribution_text: self.attribution_text,
            attribution_html: self.attribution_html,
            etag: self.etag,
            data: self.data.unwrap_or_default(),
        };

        (wrapper, error)
    }
}

/// A public web page related to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    /// Kind of page, e.g. `"detail"` or `"wiki"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The page address.
    pub url: String,
}

/// # Image
///
/// Base path and extension of an image. Concrete renditions are built by
/// inserting a variant name, e.g. `portrait_xlarge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Image path without extension.
    pub path: String,
    /// File extension without the dot.
    pub extension: String,
}

impl Image {
    /// Builds the image URL, optionally for a named variant.
    pub fn url(&self, variant: Option<&str>) -> String {
        match variant {
            Some(v) => format!("{}/{}.{}", self.path, v, self.extension),
            None => format!("{}.{}", self.path, self.extension),
        }
    }
}

/// # Resource List
///
/// A (possibly truncated) list of entities related to a parent entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceList<S> {
    /// Total number of related entities.
    pub available: u32,
    /// Number of entries included in `items`.
    pub returned: u32,
    /// Path of the full related collection.
    #[serde(rename = "collectionURI")]
    pub collection_uri: String,
    /// The included entries.
    pub items: Vec<S>,
}

impl<S> Default for ResourceList<S> {
    fn default() -> Self {
        Self {
            available: 0,
            returned: 0,
            collection_uri: String::new(),
            items: Vec::new(),
        }
    }
}

/// Reference to a related entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    /// Canonical path of the entity.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Display name of the entity.
    pub name: String,
}

/// Reference to a creator, with the creator's role in the parent entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSummary {
    /// Canonical path of the creator.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Full name of the creator.
    pub name: String,
    /// Role, e.g. `"writer"` or `"penciller"`.
    pub role: String,
}

/// Reference to a story, with the story type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedSummary {
    /// Canonical path of the story.
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    /// Title of the story.
    pub name: String,
    /// Story type, e.g. `"cover"` or `"interiorStory"`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Characters related to a parent entity.
pub type CharacterList = ResourceList<Summary>;
/// Comics related to a parent entity.
pub type ComicList = ResourceList<Summary>;
/// Creators related to a parent entity.
pub type CreatorList = ResourceList<RoleSummary>;
/// Events related to a parent entity.
pub type EventList = ResourceList<Summary>;
/// Series related to a parent entity.
pub type SeriesList = ResourceList<Summary>;
/// Stories related to a parent entity.
pub type StoryList = ResourceList<TypedSummary>;
