//! # Entity Services
//!
//! The API exposes six resource kinds (characters, comics, creators, events,
//! series, stories) through identical endpoint shapes:
//!
//! - `GET /{entity}`: filtered, paginated list
//! - `GET /{entity}/{id}`: a single entity, wrapped in a one-element list
//! - `GET /{entity}/{id}/{related}`: entities of another kind linked to it
//!
//! [`EntityService`] implements these once, parameterized by an [`Entity`]
//! type that names its path segment and its query parameter struct.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Character model, filters and shortcuts.
pub mod characters;
/// Comic model, filters and shortcuts.
pub mod comics;
/// Creator model and filters.
pub mod creators;
/// Event model and filters.
pub mod events;
/// Series model and filters.
pub mod series;
/// Story model and filters.
pub mod stories;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::errors::MarvelError;
use crate::retrieve::{ApiClient, ApiResponse};

pub use characters::{Character, CharacterParams};
pub use comics::{Comic, ComicDate, ComicParams, ComicPrice, TextObject};
pub use creators::{Creator, CreatorParams};
pub use events::{Event, EventParams};
pub use series::{Series, SeriesParams};
pub use stories::{Story, StoryParams};

/// A resource kind served by the API.
pub trait Entity: DeserializeOwned + Send + 'static {
    /// Path segment of the collection, e.g. `"characters"`.
    const PATH: &'static str;

    /// Filters accepted by the collection endpoint.
    type Params: Serialize + Default + Send + Sync;
}

/// # Entity Service
///
/// List, get and relationship lookups for one entity kind.
pub struct EntityService<E: Entity> {
    api: Arc<ApiClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.api))
    }
}

impl<E: Entity> fmt::Debug for EntityService<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService")
            .field("path", &E::PATH)
            .field("base_url", &self.api.base_url().as_str())
            .finish()
    }
}

impl<E: Entity> EntityService<E> {
    /// Creates a service sharing the given pipeline.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    /// Lists entities matching `params`, returning the full envelope.
    pub async fn all_wrapped(&self, params: &E::Params) -> Result<ApiResponse<E>, MarvelError> {
        self.api.execute(E::PATH, params).await
    }

    /// Lists entities matching `params`.
    pub async fn all(&self, params: &E::Params) -> Result<Vec<E>, MarvelError> {
        Ok(self.all_wrapped(params).await?.into_results())
    }

    /// Fetches the entity with the given ID, returning the full envelope.
    pub async fn get_wrapped(&self, id: u64) -> Result<ApiResponse<E>, MarvelError> {
        self.api.execute(&format!("{}/{}", E::PATH, id), &()).await
    }

    /// Fetches the entity with the given ID.
    ///
    /// # Errors
    /// [`MarvelError::NotFound`] when the API returns an empty result list.
    pub async fn get(&self, id: u64) -> Result<E, MarvelError> {
        self.get_wrapped(id)
            .await?
            .into_results()
            .into_iter()
            .next()
            .ok_or(MarvelError::NotFound {
                entity: E::PATH,
                id,
            })
    }

    /// Lists entities of kind `R` linked to the entity `id`, returning the
    /// full envelope. E.g. the comics a character appears in.
    pub async fn related_wrapped<R: Entity>(
        &self,
        id: u64,
        params: &R::Params,
    ) -> Result<ApiResponse<R>, MarvelError> {
        self.api
            .execute(&format!("{}/{}/{}", E::PATH, id, R::PATH), params)
            .await
    }

    /// Lists entities of kind `R` linked to the entity `id`.
    pub async fn related<R: Entity>(&self, id: u64, params: &R::Params) -> Result<Vec<R>, MarvelError> {
        Ok(self.related_wrapped::<R>(id, params).await?.into_results())
    }
}
