use serde::{Deserialize, Serialize};

use super::Scalar;

/// A media title: either a bare string or a set of language variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Plain(String),
    Localized(LocalizedTitle),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedTitle {
    pub english: Option<String>,
    pub user_preferred: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl Title {
    /// Returns the display title: english, then user-preferred, then romaji.
    pub fn resolve(&self) -> &str {
        let resolved = match self {
            Self::Plain(text) => Some(text.as_str()),
            Self::Localized(t) => [&t.english, &t.user_preferred, &t.romaji]
                .into_iter()
                .filter_map(|v| v.as_deref())
                .find(|v| !v.is_empty()),
        };
        resolved.filter(|v| !v.is_empty()).unwrap_or("Unknown")
    }

    /// Resolve an optional title, defaulting to `"Unknown"`.
    pub fn resolve_opt(title: Option<&Title>) -> &str {
        title.map(Title::resolve).unwrap_or("Unknown")
    }
}

/// A media item as returned by every home-page section endpoint.
///
/// Every field is optional; the render helpers fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub id: Option<Scalar>,
    pub anilist_id: Option<Scalar>,
    pub title: Option<Title>,
    pub image: Option<String>,
    pub cover: Option<String>,
    pub banner: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub release_date: Option<Scalar>,
    pub season: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub duration: Option<Scalar>,
    pub rating: Option<Scalar>,
    pub episodes: Option<Scalar>,
    pub total_episodes: Option<Scalar>,
    pub episode: Option<Scalar>,
    pub current_episode: Option<Scalar>,
    pub episode_number: Option<Scalar>,
    pub sub: Option<Scalar>,
    pub dub: Option<Scalar>,
}

impl MediaSummary {
    pub fn display_title(&self) -> &str {
        Title::resolve_opt(self.title.as_ref())
    }

    /// `totalEpisodes`, falling back to `episodes`.
    pub fn episode_count(&self) -> Option<&Scalar> {
        Scalar::present(self.total_episodes.as_ref())
            .or_else(|| Scalar::present(self.episodes.as_ref()))
    }

    /// The id used to look up third-party artwork.
    pub fn artwork_id(&self) -> Option<&Scalar> {
        Scalar::present(self.id.as_ref()).or_else(|| Scalar::present(self.anilist_id.as_ref()))
    }
}

/// A search-suggestion entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Option<Scalar>,
    pub title: Option<Title>,
    pub image: Option<String>,
    pub sub: Option<Scalar>,
    pub episodes: Option<Scalar>,
    pub release_date: Option<Scalar>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl SearchResult {
    pub fn display_title(&self) -> &str {
        Title::resolve_opt(self.title.as_ref())
    }
}

/// An airing-schedule entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: Option<Scalar>,
    pub title: Option<Title>,
    pub image: Option<String>,
    pub cover: Option<String>,
    /// Unix seconds.
    pub airing_at: Option<i64>,
    /// `"HH:MM"`, used when `airing_at` is missing.
    pub airing_time: Option<String>,
    pub airing_episode: Option<Scalar>,
    pub episode: Option<Scalar>,
}

impl ScheduleItem {
    pub fn display_title(&self) -> &str {
        Title::resolve_opt(self.title.as_ref())
    }

    pub fn episode_label(&self) -> Option<&Scalar> {
        Scalar::present(self.episode.as_ref())
            .or_else(|| Scalar::present(self.airing_episode.as_ref()))
    }
}

/// Fan-art and clear-logo imagery from the mappings service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artwork {
    pub fanart: Option<String>,
    pub clearlogo: Option<String>,
}
