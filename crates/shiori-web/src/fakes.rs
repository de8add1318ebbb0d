//! In-memory service fakes shared by the component tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use shiori_api::types::WatchResponse;
use shiori_api::{ApiError, ArtworkSource, HomeSection, SiteApi, WatchRequest};
use shiori_core::models::{Artwork, MediaSummary, Scalar, ScheduleItem, SearchResult, Title};

use crate::page::lock;

pub fn media(id: i64, title: &str) -> MediaSummary {
    MediaSummary {
        id: Some(Scalar::Int(id)),
        title: Some(Title::Plain(title.into())),
        image: Some(format!("https://img.example/{id}.jpg")),
        ..Default::default()
    }
}

pub fn result(id: i64, title: &str) -> SearchResult {
    SearchResult {
        id: Some(Scalar::Int(id)),
        title: Some(Title::Plain(title.into())),
        ..Default::default()
    }
}

fn api_error(status: u16) -> ApiError {
    ApiError::Api {
        status,
        message: "fake failure".into(),
    }
}

/// A scripted backend recording every request path.
#[derive(Default)]
pub struct FakeApi {
    pub sections: HashMap<HomeSection, Vec<MediaSummary>>,
    pub failing_sections: HashSet<HomeSection>,
    pub schedule: Option<Vec<ScheduleItem>>,
    /// The schedule request never resolves.
    pub schedule_hangs: bool,
    pub suggestions: HashMap<String, Vec<SearchResult>>,
    /// Queries whose request never resolves.
    pub hanging: HashSet<String>,
    pub watch_responses: Mutex<VecDeque<Result<WatchResponse, u16>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn record(&self, call: impl Into<String>) {
        lock(&self.calls).push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn push_watch(&self, response: Result<WatchResponse, u16>) {
        lock(&self.watch_responses).push_back(response);
    }
}

impl SiteApi for FakeApi {
    async fn home_section(&self, section: HomeSection) -> Result<Vec<MediaSummary>, ApiError> {
        self.record(section.path());
        if self.failing_sections.contains(&section) {
            return Err(api_error(500));
        }
        Ok(self.sections.get(&section).cloned().unwrap_or_default())
    }

    async fn schedule(&self) -> Result<Vec<ScheduleItem>, ApiError> {
        self.record(shiori_api::traits::SCHEDULE_PATH);
        if self.schedule_hangs {
            std::future::pending::<()>().await;
        }
        self.schedule.clone().ok_or_else(|| api_error(502))
    }

    async fn search_suggestions(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.record(format!("/api/search-suggestions/{query}"));
        if self.hanging.contains(query) {
            std::future::pending::<()>().await;
        }
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }

    async fn watch(&self, request: &WatchRequest) -> Result<WatchResponse, ApiError> {
        self.record(request.path_and_query());
        let next = lock(&self.watch_responses).pop_front();
        match next {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(status)) => Err(api_error(status)),
            None => Err(api_error(404)),
        }
    }
}

/// Artwork keyed by id; unknown ids fail.
#[derive(Default)]
pub struct FakeArtwork {
    pub artwork: HashMap<String, Artwork>,
    pub requests: AtomicUsize,
}

impl ArtworkSource for FakeArtwork {
    async fn artwork(&self, anilist_id: &str) -> Result<Artwork, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.artwork
            .get(anilist_id)
            .cloned()
            .ok_or_else(|| api_error(404))
    }
}
