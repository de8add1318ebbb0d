use reqwest::Client;
use url::Url;

use shiori_core::models::Artwork;

use crate::error::ApiError;
use crate::traits::ArtworkSource;
use crate::types::AniZipMappings;

const BASE_URL: &str = "https://api.ani.zip";

/// ani.zip mappings client, used for fan-art and clear-logo imagery.
pub struct AniZipClient {
    base: Url,
    http: Client,
}

impl AniZipClient {
    pub fn new() -> Self {
        Self {
            base: Url::parse(BASE_URL).expect("built-in ani.zip URL is valid"),
            http: Client::new(),
        }
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            http: Client::new(),
        })
    }

    pub fn mappings_url(&self, anilist_id: &str) -> Result<Url, ApiError> {
        let mut url = self.base.join("/mappings")?;
        url.query_pairs_mut().append_pair("anilist_id", anilist_id);
        Ok(url)
    }

    pub async fn mappings(&self, anilist_id: &str) -> Result<AniZipMappings, ApiError> {
        let url = self.mappings_url(anilist_id)?;
        tracing::debug!(anilist_id, "ani.zip mappings request");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl Default for AniZipClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtworkSource for AniZipClient {
    async fn artwork(&self, anilist_id: &str) -> Result<Artwork, ApiError> {
        Ok(self.mappings(anilist_id).await?.into_artwork())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mappings_url() {
        let client = AniZipClient::new();
        assert_eq!(
            client.mappings_url("154587").unwrap().as_str(),
            "https://api.ani.zip/mappings?anilist_id=154587"
        );
    }

    #[test]
    fn test_custom_base() {
        let client = AniZipClient::with_base_url("http://localhost:8080").unwrap();
        assert_eq!(
            client.mappings_url("1").unwrap().as_str(),
            "http://localhost:8080/mappings?anilist_id=1"
        );
    }
}
