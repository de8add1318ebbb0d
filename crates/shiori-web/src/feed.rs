//! Home-page data-fetch layer.
//!
//! Each section fetches one endpoint and renders into its container. Failures
//! are logged and leave the container as it was.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use futures::future::join_all;

use shiori_api::{ArtworkSource, HomeSection, SiteApi};
use shiori_core::config::HomeConfig;
use shiori_core::models::{Artwork, MediaSummary};
use shiori_core::render::{
    render_grid, render_hero, render_sidebar_list, render_vertical_list, HeroSlide,
};

use crate::page::{ids, lock, mount, Document};

/// Tabs of the tabbed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeTab {
    TopAiring,
    MostPopular,
    Favourites,
}

impl HomeTab {
    pub const ALL: &[HomeTab] = &[Self::TopAiring, Self::MostPopular, Self::Favourites];

    pub fn section(self) -> HomeSection {
        match self {
            Self::TopAiring => HomeSection::Spotlight,
            Self::MostPopular => HomeSection::NewReleases,
            Self::Favourites => HomeSection::Favourites,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::TopAiring => "top-airing",
            Self::MostPopular => "most-popular",
            Self::Favourites => "favourites",
        }
    }
}

impl fmt::Display for HomeTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HomeTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tab| tab.key() == s)
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// The home page's sections, rendered into a [`Document`].
pub struct HomeFeed<A, R, D> {
    api: A,
    artwork: R,
    doc: Mutex<D>,
    config: HomeConfig,
    // Never invalidated: a tab shows the same data until the page is rebuilt.
    tab_cache: Mutex<HashMap<HomeTab, Vec<MediaSummary>>>,
}

impl<A, R, D> HomeFeed<A, R, D>
where
    A: SiteApi,
    R: ArtworkSource,
    D: Document,
{
    pub fn new(api: A, artwork: R, doc: D, config: HomeConfig) -> Self {
        Self {
            api,
            artwork,
            doc: Mutex::new(doc),
            config,
            tab_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Consume the feed and return its document.
    pub fn into_document(self) -> D {
        self.doc.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` against the document.
    pub fn with_document<T>(&self, f: impl FnOnce(&D) -> T) -> T {
        f(&lock(&self.doc))
    }

    /// Fetch every section concurrently. Returns the number of hero slides rendered.
    pub async fn load(&self) -> usize {
        let (slides, ..) = futures::join!(
            self.fetch_hero(),
            self.fetch_recent_updates(),
            self.fetch_tabbed_grid(HomeTab::TopAiring),
            self.fetch_trending(),
            self.fetch_upcoming_sidebar(),
            self.fetch_new_releases_list(),
        );
        slides
    }

    async fn fetch_section(&self, section: HomeSection) -> Option<Vec<MediaSummary>> {
        match self.api.home_section(section).await {
            Ok(items) => {
                tracing::debug!(section = %section, count = items.len(), "Section loaded");
                Some(items)
            }
            Err(e) => {
                tracing::error!(section = %section, error = %e, "Failed to fetch section");
                None
            }
        }
    }

    fn render_into(&self, id: &str, html: &str) {
        mount(&mut *lock(&self.doc), id, html);
    }

    async fn artwork_for(&self, media: &MediaSummary) -> Artwork {
        let Some(id) = media.artwork_id() else {
            return Artwork::default();
        };
        let id = id.to_string();
        match self.artwork.artwork(&id).await {
            Ok(artwork) => artwork,
            Err(e) => {
                tracing::warn!(anilist_id = %id, error = %e, "Artwork lookup failed");
                Artwork::default()
            }
        }
    }

    /// Spotlight carousel, enriched with artwork fetched in parallel.
    ///
    /// Returns the number of slides rendered (0 leaves the slider untouched).
    pub async fn fetch_hero(&self) -> usize {
        let Some(items) = self.fetch_section(HomeSection::Spotlight).await else {
            return 0;
        };
        if items.is_empty() {
            return 0;
        }

        let artwork = join_all(items.iter().map(|m| self.artwork_for(m))).await;
        let slides: Vec<HeroSlide> = items
            .into_iter()
            .zip(artwork)
            .map(|(media, artwork)| HeroSlide { media, artwork })
            .collect();

        self.render_into(ids::HERO_SLIDER, &render_hero(&slides));
        slides.len()
    }

    pub async fn fetch_recent_updates(&self) {
        if let Some(mut items) = self.fetch_section(HomeSection::RecentEpisodes).await {
            items.truncate(self.config.recent_limit);
            self.render_into(ids::RECENT_UPDATES, &render_grid(&items));
        }
    }

    /// Render a tab of the tabbed grid, from cache when it was loaded before.
    pub async fn fetch_tabbed_grid(&self, tab: HomeTab) {
        if !lock(&self.doc).has_container(ids::TABBED_GRID) {
            return;
        }

        let cached = lock(&self.tab_cache).get(&tab).cloned();
        if let Some(items) = cached {
            tracing::debug!(tab = %tab, "Tab served from cache");
            self.render_into(ids::TABBED_GRID, &render_grid(&items));
            return;
        }

        if let Some(mut items) = self.fetch_section(tab.section()).await {
            items.truncate(self.config.tab_limit);
            let html = render_grid(&items);
            lock(&self.tab_cache).insert(tab, items);
            self.render_into(ids::TABBED_GRID, &html);
        }
    }

    pub async fn fetch_trending(&self) {
        if let Some(mut items) = self.fetch_section(HomeSection::NewReleases).await {
            items.truncate(self.config.sidebar_limit);
            self.render_into(ids::TOP_TRENDING, &render_sidebar_list(&items));
        }
    }

    pub async fn fetch_upcoming_sidebar(&self) {
        if let Some(mut items) = self.fetch_section(HomeSection::Upcoming).await {
            items.truncate(self.config.sidebar_limit);
            self.render_into(ids::UPCOMING_SIDEBAR, &render_sidebar_list(&items));
        }
    }

    pub async fn fetch_new_releases_list(&self) {
        if let Some(mut items) = self.fetch_section(HomeSection::NewReleases).await {
            items.truncate(self.config.vertical_limit);
            self.render_into(ids::NEW_RELEASES_LIST, &render_vertical_list(&items));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{media, FakeApi, FakeArtwork};
    use crate::page::MemoryDocument;
    use shiori_core::config::SiteConfig;
    use std::sync::atomic::Ordering;

    fn feed(api: FakeApi, artwork: FakeArtwork) -> HomeFeed<FakeApi, FakeArtwork, MemoryDocument> {
        HomeFeed::new(api, artwork, MemoryDocument::home(), SiteConfig::default().home)
    }

    fn html(feed: &HomeFeed<FakeApi, FakeArtwork, MemoryDocument>, id: &str) -> String {
        feed.with_document(|d| d.inner_html(id).unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn test_load_renders_every_section() {
        let mut api = FakeApi::default();
        api.sections.insert(
            HomeSection::Spotlight,
            vec![media(1, "Frieren"), media(2, "Dandadan")],
        );
        api.sections.insert(
            HomeSection::RecentEpisodes,
            (0..20).map(|i| media(i, "Recent")).collect(),
        );
        api.sections.insert(HomeSection::NewReleases, (0..20).map(|i| media(i, "New")).collect());
        api.sections.insert(HomeSection::Upcoming, vec![media(9, "Soon")]);
        let mut artwork = FakeArtwork::default();
        artwork.artwork.insert(
            "1".into(),
            Artwork {
                fanart: Some("https://art.example/1.jpg".into()),
                clearlogo: None,
            },
        );

        let feed = feed(api, artwork);
        assert_eq!(feed.load().await, 2);

        let hero = html(&feed, ids::HERO_SLIDER);
        assert!(hero.contains("https://art.example/1.jpg"));
        assert!(hero.contains("<span>1</span> / 2"));
        assert_eq!(html(&feed, ids::RECENT_UPDATES).matches("anime-card-link").count(), 12);
        assert_eq!(html(&feed, ids::TABBED_GRID).matches("anime-card-link").count(), 2);
        assert_eq!(html(&feed, ids::TOP_TRENDING).matches("release-item").count(), 6);
        assert_eq!(html(&feed, ids::UPCOMING_SIDEBAR).matches("release-item").count(), 1);
        assert_eq!(html(&feed, ids::NEW_RELEASES_LIST).matches("v-item").count(), 10);
        assert_eq!(feed.artwork.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_section_leaves_container() {
        let mut api = FakeApi::default();
        api.failing_sections.insert(HomeSection::Upcoming);
        let mut doc = MemoryDocument::home();
        doc.set_inner_html(ids::UPCOMING_SIDEBAR, "<p>previous</p>");
        let feed = HomeFeed::new(api, FakeArtwork::default(), doc, SiteConfig::default().home);

        feed.fetch_upcoming_sidebar().await;
        assert_eq!(html(&feed, ids::UPCOMING_SIDEBAR), "<p>previous</p>");
    }

    #[tokio::test]
    async fn test_empty_spotlight_renders_nothing() {
        let feed = feed(FakeApi::default(), FakeArtwork::default());
        assert_eq!(feed.fetch_hero().await, 0);
        assert_eq!(html(&feed, ids::HERO_SLIDER), "");
    }

    #[tokio::test]
    async fn test_tab_cache_serves_repeat_clicks() {
        let mut api = FakeApi::default();
        api.sections.insert(HomeSection::Favourites, vec![media(5, "Fav")]);
        api.sections.insert(HomeSection::NewReleases, vec![media(6, "Popular")]);
        let feed = feed(api, FakeArtwork::default());

        feed.fetch_tabbed_grid(HomeTab::Favourites).await;
        feed.fetch_tabbed_grid(HomeTab::MostPopular).await;
        feed.fetch_tabbed_grid(HomeTab::Favourites).await;

        assert_eq!(feed.api.count("/api/home/favourites"), 1);
        assert_eq!(feed.api.count("/api/home/new-releases"), 1);
        assert!(html(&feed, ids::TABBED_GRID).contains("Fav"));
    }

    #[tokio::test]
    async fn test_tabbed_grid_without_container() {
        let feed = HomeFeed::new(
            FakeApi::default(),
            FakeArtwork::default(),
            MemoryDocument::default(),
            SiteConfig::default().home,
        );
        feed.fetch_tabbed_grid(HomeTab::TopAiring).await;
        assert!(feed.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_artwork_failure_degrades() {
        let mut api = FakeApi::default();
        let mut item = media(3, "Blue Lock");
        item.cover = Some("https://img.example/cover3.jpg".into());
        api.sections.insert(HomeSection::Spotlight, vec![item]);
        let feed = feed(api, FakeArtwork::default());

        assert_eq!(feed.fetch_hero().await, 1);
        let hero = html(&feed, ids::HERO_SLIDER);
        assert!(hero.contains("https://img.example/cover3.jpg"));
        assert!(hero.contains(r#"<h1 class="hero-title">Blue Lock</h1>"#));
    }

    #[test]
    fn test_tab_keys() {
        assert_eq!("most-popular".parse::<HomeTab>(), Ok(HomeTab::MostPopular));
        assert!("genres".parse::<HomeTab>().is_err());
        assert_eq!(HomeTab::TopAiring.section(), HomeSection::Spotlight);
    }
}
