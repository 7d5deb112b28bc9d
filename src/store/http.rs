use crate::core::config::StoreConfig;
use crate::model::{NewPlace, Place, PlaceId, PlacePatch, SortKey};
use crate::store::PlaceStore;
use crate::{MapError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use std::time::Duration;

const ENTITY_NAME: &str = "Place";

/// Place store backed by the hosted entity REST API
///
/// Layout: `{base_url}/api/apps/{app_id}/entities/Place[/{id}]`, with an
/// optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpPlaceStore {
    client: Client,
    collection_url: String,
    api_token: Option<String>,
}

impl HttpPlaceStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.app_id.trim().is_empty() {
            return Err(MapError::Config("store.app_id must be set".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            collection_url: format!(
                "{}/api/apps/{}/entities/{}",
                config.base_url.trim_end_matches('/'),
                config.app_id,
                ENTITY_NAME
            ),
            api_token: config.api_token.clone(),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &PlaceId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl PlaceStore for HttpPlaceStore {
    async fn list(&self, sort: &SortKey) -> Result<Vec<Place>> {
        let places: Vec<Place> = self
            .request(Method::GET, &self.collection_url)
            .query(&[("sort", sort.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::info!("Fetched {} places from {}", places.len(), self.collection_url);
        Ok(places)
    }

    async fn update(&self, id: &PlaceId, patch: &PlacePatch) -> Result<Place> {
        let response = self
            .request(Method::PUT, &self.item_url(id))
            .json(patch)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MapError::NotFound(id.to_string()));
        }
        let place: Place = response.error_for_status()?.json().await?;
        log::info!("Updated place {}", id);
        Ok(place)
    }

    async fn create(&self, place: &NewPlace) -> Result<Place> {
        let created: Place = self
            .request(Method::POST, &self.collection_url)
            .json(place)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::info!("Created place {} ({})", created.id, created.name);
        Ok(created)
    }
}
