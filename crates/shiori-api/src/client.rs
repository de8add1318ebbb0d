use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use shiori_core::escape::encode_component;
use shiori_core::models::{Envelope, MediaSummary, ScheduleItem, SearchResult};

use crate::error::ApiError;
use crate::traits::{HomeSection, SiteApi, WatchRequest, SCHEDULE_PATH};
use crate::types::WatchResponse;

/// Default suggestion route.
pub const SUGGESTIONS_PATH: &str = "/api/search-suggestions/{query}";

/// Client for the site backend's `/api/...` JSON routes.
pub struct BackendClient {
    base: Url,
    suggestions_path: String,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            suggestions_path: SUGGESTIONS_PATH.into(),
            http: Client::new(),
        })
    }

    /// Override the suggestion route (see [`BackendClient::suggestions_url`]).
    pub fn with_suggestions_path(mut self, path: impl Into<String>) -> Self {
        self.suggestions_path = path.into();
        self
    }

    fn url(&self, path_and_query: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path_and_query)?)
    }

    /// Suggestion URL: `{query}` in the route is replaced by the encoded
    /// query; a route without the placeholder gets `?q=` appended.
    pub fn suggestions_url(&self, query: &str) -> Result<Url, ApiError> {
        let encoded = encode_component(query);
        let path = if self.suggestions_path.contains("{query}") {
            self.suggestions_path.replace("{query}", &encoded)
        } else {
            format!("{}?q={encoded}", self.suggestions_path)
        };
        self.url(&path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "Backend request");

        let resp = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = status_code, "Backend API error");
            return Err(ApiError::Api {
                status: status_code,
                message: body,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        let envelope: Envelope<T> = self.get_json(url).await?;
        Ok(envelope.into_results())
    }
}

impl SiteApi for BackendClient {
    async fn home_section(&self, section: HomeSection) -> Result<Vec<MediaSummary>, ApiError> {
        self.get_list(self.url(section.path())?).await
    }

    async fn schedule(&self) -> Result<Vec<ScheduleItem>, ApiError> {
        self.get_list(self.url(SCHEDULE_PATH)?).await
    }

    async fn search_suggestions(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.get_list(self.suggestions_url(query)?).await
    }

    async fn watch(&self, request: &WatchRequest) -> Result<WatchResponse, ApiError> {
        self.get_json(self.url(&request.path_and_query())?).await
    }
}
