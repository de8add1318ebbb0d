//! Watch-page player controller.
//!
//! Holds the `{episode, server, audio}` session, decides whether a settings
//! change needs a new stream, fetches it, and patches the view. A failed fetch
//! rolls the session back to the last state that was shown.

use url::Url;

use shiori_api::types::WatchResponse;
use shiori_api::{ApiError, SiteApi, WatchRequest};
use shiori_core::config::PlayerConfig;
use shiori_core::models::{AudioType, StreamServers};

/// A refreshed catalogue may drop the current server; the fallback costs one
/// more fetch at most.
const MAX_FETCHES: usize = 2;

/// Page data the controller is constructed from.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub anime_id: String,
    pub title: String,
    pub episode: String,
    /// Falls back to the configured default server.
    pub server: Option<String>,
    /// Falls back to the configured default audio type.
    pub audio: Option<AudioType>,
    pub stream_servers: StreamServers,
    /// Current page URL; `ep`, `server` and `dub` are kept in sync with the session.
    pub page_url: Url,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    pub anime_id: String,
    pub episode: String,
    pub server: String,
    pub audio: AudioType,
    pub stream_servers: StreamServers,
}

impl PlayerSession {
    fn request(&self) -> WatchRequest {
        WatchRequest {
            anime_id: self.anime_id.clone(),
            episode: self.episode.clone(),
            server: self.server.clone(),
            audio: self.audio,
        }
    }
}

/// A partial settings change. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub episode: Option<String>,
    pub server: Option<String>,
    pub audio: Option<AudioType>,
}

impl SettingsUpdate {
    pub fn episode(episode: impl Into<String>) -> Self {
        Self {
            episode: Some(episode.into()),
            ..Default::default()
        }
    }

    pub fn server(server: impl Into<String>) -> Self {
        Self {
            server: Some(server.into()),
            ..Default::default()
        }
    }

    pub fn audio(audio: AudioType) -> Self {
        Self {
            audio: Some(audio),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing changed; no request and no view patch.
    Unchanged,
    Updated,
    /// The stream fetch failed and the session was rolled back.
    Failed,
}

/// One entry of the server dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOption {
    pub id: String,
    pub name: String,
    pub active: bool,
}

/// One entry of the rendered episode list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEntry {
    pub number: String,
    pub label: String,
}

/// The watch page's player surface.
pub trait PlayerView: Send {
    fn set_loading(&mut self, loading: bool);
    fn set_stream_source(&mut self, url: &str);
    fn set_server_options(&mut self, options: &[ServerOption]);
    fn set_audio_toggle(&mut self, audio: AudioType, dub_available: bool);
    /// Highlight the playing episode in the episode list.
    fn set_active_episode(&mut self, episode: &str);
    /// Header and breadcrumb text.
    fn set_episode_label(&mut self, label: &str);
    fn set_document_title(&mut self, title: &str);
    /// Replace the current history entry without reloading.
    fn replace_url(&mut self, url: &Url);
    /// The episode list in display order.
    fn episodes(&self) -> Vec<EpisodeEntry>;
    fn set_episode_visibility(&mut self, episode: &str, visible: bool);
    fn set_server_menu_open(&mut self, open: bool);
}

pub struct WatchController<A, V> {
    api: A,
    view: V,
    title: String,
    session: PlayerSession,
    page_url: Url,
    server_menu_open: bool,
}

impl<A, V> WatchController<A, V>
where
    A: SiteApi,
    V: PlayerView,
{
    pub fn new(api: A, view: V, config: WatchConfig, defaults: &PlayerConfig) -> Self {
        let session = PlayerSession {
            anime_id: config.anime_id,
            episode: config.episode,
            server: config
                .server
                .unwrap_or_else(|| defaults.default_server.clone()),
            audio: config.audio.unwrap_or(defaults.default_type),
            stream_servers: config.stream_servers,
        };
        Self {
            api,
            view,
            title: config.title,
            session,
            page_url: config.page_url,
            server_menu_open: false,
        }
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Render the initial controls. A server the catalogue does not offer is
    /// replaced by the first available one, which loads its stream.
    pub async fn init(&mut self) -> UpdateOutcome {
        let selected = self
            .session
            .stream_servers
            .select(self.session.audio, &self.session.server);
        match selected {
            Some(server) if !server.eq_ignore_ascii_case(&self.session.server) => {
                tracing::info!(
                    requested = %self.session.server,
                    selected = %server,
                    "Server not available, falling back"
                );
                self.update_settings(SettingsUpdate::server(server)).await
            }
            _ => {
                self.render_controls();
                UpdateOutcome::Unchanged
            }
        }
    }

    /// Apply a partial settings change, fetching a new stream if anything changed.
    pub async fn update_settings(&mut self, update: SettingsUpdate) -> UpdateOutcome {
        let previous = self.session.clone();
        let mut changed = false;

        if let Some(audio) = update.audio.filter(|a| *a != self.session.audio) {
            self.session.audio = audio;
            if let Some(server) = self
                .session
                .stream_servers
                .select(audio, &self.session.server)
            {
                self.session.server = server;
            }
            changed = true;
        }
        if let Some(server) = update
            .server
            .filter(|s| !s.eq_ignore_ascii_case(&self.session.server))
        {
            self.session.server = server;
            changed = true;
        }
        if let Some(episode) = update.episode.filter(|e| *e != self.session.episode) {
            self.session.episode = episode;
            changed = true;
        }

        if !changed {
            return UpdateOutcome::Unchanged;
        }
        self.load(previous).await
    }

    /// Fetch the stream for the current session without changing it.
    pub async fn reload(&mut self) -> UpdateOutcome {
        let previous = self.session.clone();
        self.load(previous).await
    }

    /// Fetch and show the current session's stream, restoring `previous` on failure.
    async fn load(&mut self, previous: PlayerSession) -> UpdateOutcome {
        self.view.set_loading(true);
        let mut source = String::new();
        for attempt in 1..=MAX_FETCHES {
            self.sync_url();
            let stream = match self.fetch_stream().await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(
                        anime_id = %self.session.anime_id,
                        episode = %self.session.episode,
                        server = %self.session.server,
                        error = %e,
                        "Failed to load stream"
                    );
                    self.session = previous;
                    self.sync_url();
                    self.view.set_loading(false);
                    return UpdateOutcome::Failed;
                }
            };

            source = stream.url;
            if let Some(servers) = stream.servers {
                self.session.stream_servers = servers;
            }

            let fallback = self
                .session
                .stream_servers
                .select(self.session.audio, &self.session.server)
                .filter(|s| !s.eq_ignore_ascii_case(&self.session.server));
            match fallback {
                Some(server) if attempt < MAX_FETCHES => {
                    tracing::info!(
                        previous = %self.session.server,
                        selected = %server,
                        "Refreshed catalogue dropped server"
                    );
                    self.session.server = server;
                }
                _ => break,
            }
        }

        self.view.set_stream_source(&source);
        self.render_controls();
        self.render_episode();
        self.view.set_loading(false);
        UpdateOutcome::Updated
    }

    async fn fetch_stream(&self) -> Result<LoadedStream, ApiError> {
        let request = self.session.request();
        tracing::debug!(path = %request.path_and_query(), "Loading stream");
        let response = self.api.watch(&request).await?;
        LoadedStream::from_response(response)
    }

    /// Step through the rendered episode list by `delta`, clamped at both ends.
    pub async fn navigate_episode(&mut self, delta: isize) -> UpdateOutcome {
        let episodes = self.view.episodes();
        let Some(position) = episodes
            .iter()
            .position(|e| e.number == self.session.episode)
        else {
            return UpdateOutcome::Unchanged;
        };
        let target = position as isize + delta;
        if target < 0 || target as usize >= episodes.len() {
            return UpdateOutcome::Unchanged;
        }
        let episode = episodes[target as usize].number.clone();
        self.update_settings(SettingsUpdate::episode(episode)).await
    }

    /// Hide episodes whose label does not contain `term` (case-insensitive).
    /// Returns the number left visible.
    pub fn filter_episodes(&mut self, term: &str) -> usize {
        let term = term.trim().to_lowercase();
        let mut visible = 0;
        for entry in self.view.episodes() {
            let matches = term.is_empty()
                || entry.label.to_lowercase().contains(&term)
                || entry.number.contains(&term);
            self.view.set_episode_visibility(&entry.number, matches);
            visible += usize::from(matches);
        }
        visible
    }

    pub fn toggle_server_menu(&mut self) {
        self.server_menu_open = !self.server_menu_open;
        self.view.set_server_menu_open(self.server_menu_open);
    }

    pub fn on_document_click(&mut self, inside_menu: bool) {
        if self.server_menu_open && !inside_menu {
            self.server_menu_open = false;
            self.view.set_server_menu_open(false);
        }
    }

    pub async fn select_server(&mut self, server: &str) -> UpdateOutcome {
        if self.server_menu_open {
            self.server_menu_open = false;
            self.view.set_server_menu_open(false);
        }
        self.update_settings(SettingsUpdate::server(server)).await
    }

    pub async fn select_audio(&mut self, audio: AudioType) -> UpdateOutcome {
        self.update_settings(SettingsUpdate::audio(audio)).await
    }

    fn render_controls(&mut self) {
        let options: Vec<ServerOption> = self
            .session
            .stream_servers
            .for_type(self.session.audio)
            .iter()
            .map(|s| ServerOption {
                id: s.id(),
                name: s.name.clone(),
                active: s.matches(&self.session.server),
            })
            .collect();
        self.view.set_server_options(&options);

        let dub_available = !self
            .session
            .stream_servers
            .for_type(AudioType::Dub)
            .is_empty();
        self.view.set_audio_toggle(self.session.audio, dub_available);
    }

    fn render_episode(&mut self) {
        let label = format!("Episode {}", self.session.episode);
        self.view.set_active_episode(&self.session.episode);
        self.view.set_episode_label(&label);
        self.view
            .set_document_title(&format!("Watch {} - {label}", self.title));
    }

    /// Rewrite `ep`, `server` and `dub` in the page URL, keeping other parameters.
    fn sync_url(&mut self) {
        let kept: Vec<(String, String)> = self
            .page_url
            .query_pairs()
            .filter(|(key, _)| !matches!(key.as_ref(), "ep" | "server" | "dub"))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        self.page_url
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("ep", &self.session.episode)
            .append_pair("server", &self.session.server)
            .append_pair("dub", if self.session.audio.is_dub() { "true" } else { "false" });
        self.view.replace_url(&self.page_url);
    }
}

struct LoadedStream {
    url: String,
    servers: Option<StreamServers>,
}

impl LoadedStream {
    fn from_response(response: WatchResponse) -> Result<Self, ApiError> {
        let url = response
            .stream_url()
            .ok_or_else(|| ApiError::Parse("watch response carried no playable source".into()))?
            .to_string();
        Ok(Self {
            url,
            servers: response.stream_servers,
        })
    }
}
