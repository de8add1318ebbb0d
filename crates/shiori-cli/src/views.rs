//! Terminal-side implementations of the component views.

use url::Url;

use shiori_core::models::AudioType;
use shiori_web::player::{EpisodeEntry, ServerOption};
use shiori_web::{MemoryDocument, PlayerView, SuggestionView};

/// Print each container of a document under a comment header.
pub fn print_document(doc: &MemoryDocument) {
    for id in doc.container_ids() {
        println!("<!-- #{id} -->");
        println!("{}", doc.inner_html(id).unwrap_or_default().trim());
    }
}

/// Keeps the last markup shown in the dropdown.
#[derive(Debug, Default)]
pub struct DropdownBuffer {
    pub html: Option<String>,
}

impl SuggestionView for DropdownBuffer {
    fn show(&mut self, html: &str) {
        self.html = Some(html.to_string());
    }

    fn hide(&mut self) {
        self.html = None;
    }

    fn navigate(&mut self, href: &str) {
        println!("{href}");
    }
}

/// Collects the player patches for printing.
#[derive(Debug, Default)]
pub struct PlayerSummary {
    pub source: Option<String>,
    pub servers: Vec<ServerOption>,
    pub audio: Option<AudioType>,
    pub dub_available: bool,
    pub label: Option<String>,
    pub title: Option<String>,
    pub url: Option<Url>,
}

impl PlayerSummary {
    pub fn print(&self) {
        if let Some(title) = &self.title {
            println!("{title}");
        }
        if let Some(source) = &self.source {
            println!("stream: {source}");
        }
        if let Some(audio) = self.audio {
            let dub = if self.dub_available { "available" } else { "unavailable" };
            println!("audio:  {audio} (dub {dub})");
        }
        for server in &self.servers {
            let marker = if server.active { "*" } else { " " };
            println!("  {marker} {} ({})", server.name, server.id);
        }
        if let Some(url) = &self.url {
            println!("page:   {url}");
        }
    }
}

impl PlayerView for PlayerSummary {
    fn set_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "Player loading state");
    }

    fn set_stream_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn set_server_options(&mut self, options: &[ServerOption]) {
        self.servers = options.to_vec();
    }

    fn set_audio_toggle(&mut self, audio: AudioType, dub_available: bool) {
        self.audio = Some(audio);
        self.dub_available = dub_available;
    }

    fn set_active_episode(&mut self, _episode: &str) {}

    fn set_episode_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    fn set_document_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn replace_url(&mut self, url: &Url) {
        self.url = Some(url.clone());
    }

    fn episodes(&self) -> Vec<EpisodeEntry> {
        Vec::new()
    }

    fn set_episode_visibility(&mut self, _episode: &str, _visible: bool) {}

    fn set_server_menu_open(&mut self, _open: bool) {}
}
