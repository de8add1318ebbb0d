use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Container ids used by the home and schedule pages.
pub mod ids {
    pub const HERO_SLIDER: &str = "hero-slider";
    pub const RECENT_UPDATES: &str = "recent-updates";
    pub const TABBED_GRID: &str = "tabbed-grid";
    pub const TOP_TRENDING: &str = "top-trending";
    pub const UPCOMING_SIDEBAR: &str = "top-upcoming-sidebar";
    pub const NEW_RELEASES_LIST: &str = "new-releases-list";
    pub const SCHEDULE_TIMELINE: &str = "schedule-timeline";
    pub const RECENTLY_AIRED: &str = "recently-aired";
    pub const SCHEDULE_DAY_DATE: &str = "schedule-day-date";
}

/// A page whose named containers can have their markup replaced.
pub trait Document: Send {
    fn has_container(&self, id: &str) -> bool;

    /// Replace a container's content. Returns `false` if it does not exist.
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;
}

/// Replace a container's markup; a missing container is a silent no-op.
pub(crate) fn mount<D: Document>(doc: &mut D, id: &str, html: &str) {
    if !doc.set_inner_html(id, html) {
        tracing::debug!(container = id, "Container not on page, skipping render");
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// A document holding container markup in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    containers: HashMap<String, String>,
}

impl MemoryDocument {
    /// A document with the given (empty) containers.
    pub fn with_containers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            containers: ids.into_iter().map(|id| (id.to_string(), String::new())).collect(),
        }
    }

    pub fn home() -> Self {
        Self::with_containers([
            ids::HERO_SLIDER,
            ids::RECENT_UPDATES,
            ids::TABBED_GRID,
            ids::TOP_TRENDING,
            ids::UPCOMING_SIDEBAR,
            ids::NEW_RELEASES_LIST,
        ])
    }

    pub fn schedule() -> Self {
        Self::with_containers([
            ids::SCHEDULE_TIMELINE,
            ids::RECENTLY_AIRED,
            ids::SCHEDULE_DAY_DATE,
        ])
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(String::as_str)
    }

    /// Container ids in sorted order.
    pub fn container_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.containers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Document for MemoryDocument {
    fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.containers.get_mut(id) {
            Some(content) => {
                html.clone_into(content);
                true
            }
            None => false,
        }
    }
}
