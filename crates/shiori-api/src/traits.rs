//! Service traits consumed by the page components.
//!
//! The HTTP clients implement these; tests substitute in-memory fakes.

use std::fmt;
use std::future::Future;

use shiori_core::escape::encode_component;
use shiori_core::models::{Artwork, AudioType, MediaSummary, ScheduleItem, SearchResult};

use crate::error::ApiError;
use crate::types::WatchResponse;

/// The site backend's JSON API.
pub trait SiteApi: Send + Sync {
    /// Fetch one home-page section.
    fn home_section(
        &self,
        section: HomeSection,
    ) -> impl Future<Output = Result<Vec<MediaSummary>, ApiError>> + Send;

    /// Fetch the full airing schedule.
    fn schedule(&self) -> impl Future<Output = Result<Vec<ScheduleItem>, ApiError>> + Send;

    /// Fetch search suggestions for a query.
    fn search_suggestions(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ApiError>> + Send;

    /// Resolve the stream for an episode/server/type combination.
    fn watch(
        &self,
        request: &WatchRequest,
    ) -> impl Future<Output = Result<WatchResponse, ApiError>> + Send;
}

/// A source of fan-art and clear-logo imagery keyed by AniList id.
pub trait ArtworkSource: Send + Sync {
    fn artwork(&self, anilist_id: &str) -> impl Future<Output = Result<Artwork, ApiError>> + Send;
}

/// Home-page section endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeSection {
    Spotlight,
    RecentEpisodes,
    NewReleases,
    Favourites,
    Upcoming,
}

impl HomeSection {
    pub const ALL: &[HomeSection] = &[
        Self::Spotlight,
        Self::RecentEpisodes,
        Self::NewReleases,
        Self::Favourites,
        Self::Upcoming,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Spotlight => "/api/home/spotlight",
            Self::RecentEpisodes => "/api/home/recent-episodes",
            Self::NewReleases => "/api/home/new-releases",
            Self::Favourites => "/api/home/favourites",
            Self::Upcoming => "/api/home/upcoming",
        }
    }
}

impl fmt::Display for HomeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Path of the schedule endpoint.
pub const SCHEDULE_PATH: &str = "/api/home/schedule";

/// Parameters of a stream lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRequest {
    pub anime_id: String,
    pub episode: String,
    pub server: String,
    pub audio: AudioType,
}

impl WatchRequest {
    /// `/api/watch/{id}?ep={n}&server={name}&dub={bool}`.
    pub fn path_and_query(&self) -> String {
        format!(
            "/api/watch/{}?ep={}&server={}&dub={}",
            encode_component(&self.anime_id),
            encode_component(&self.episode),
            encode_component(&self.server),
            self.audio.is_dub()
        )
    }
}
