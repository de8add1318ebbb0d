use serde::Deserialize;

use shiori_core::models::{Artwork, StreamServers};

// ── Watch ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchResponse {
    #[serde(default)]
    pub ok: bool,
    pub streams: Option<StreamsPayload>,
    pub stream_servers: Option<StreamServers>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamsPayload {
    #[serde(default)]
    pub sources: Vec<StreamSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamSource {
    pub url: String,
}

impl WatchResponse {
    /// The playable URL, present only when the response is ok and carries a source.
    pub fn stream_url(&self) -> Option<&str> {
        if !self.ok {
            return None;
        }
        self.streams
            .as_ref()
            .and_then(|s| s.sources.first())
            .map(|s| s.url.as_str())
    }
}

// ── ani.zip mappings ────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AniZipMappings {
    #[serde(default)]
    pub images: Vec<AniZipImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniZipImage {
    pub cover_type: String,
    pub url: String,
}

impl AniZipMappings {
    /// Last `Fanart` and last `Clearlogo` image win.
    pub fn into_artwork(self) -> Artwork {
        let mut artwork = Artwork::default();
        for image in self.images {
            match image.cover_type.as_str() {
                "Fanart" => artwork.fanart = Some(image.url),
                "Clearlogo" => artwork.clearlogo = Some(image.url),
                _ => {}
            }
        }
        artwork
    }
}
