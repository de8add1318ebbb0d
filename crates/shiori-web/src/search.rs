//! Search-suggestion dropdown controller.
//!
//! Every qualifying keystroke aborts the previous request before issuing its
//! own, so only the latest request can ever render.

use std::sync::Mutex;

use futures::future::{AbortHandle, Abortable, Aborted};

use shiori_api::SiteApi;
use shiori_core::config::SearchConfig;
use shiori_core::models::SearchResult;
use shiori_core::render::{anime_href, render_search_skeletons, render_suggestions, search_href};

use crate::page::lock;

/// The dropdown surface.
pub trait SuggestionView: Send {
    /// Show the dropdown with the given markup.
    fn show(&mut self, html: &str);
    fn hide(&mut self);
    fn navigate(&mut self, href: &str);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionState {
    #[default]
    Idle,
    Pending {
        query: String,
    },
    Rendered {
        query: String,
        results: Vec<SearchResult>,
    },
    Hidden,
}

struct Inner<V> {
    view: V,
    state: SuggestionState,
    in_flight: Option<AbortHandle>,
}

pub struct SuggestionController<A, V> {
    api: A,
    config: SearchConfig,
    inner: Mutex<Inner<V>>,
}

impl<A, V> SuggestionController<A, V>
where
    A: SiteApi,
    V: SuggestionView,
{
    pub fn new(api: A, view: V, config: SearchConfig) -> Self {
        Self {
            api,
            config,
            inner: Mutex::new(Inner {
                view,
                state: SuggestionState::Idle,
                in_flight: None,
            }),
        }
    }

    pub fn state(&self) -> SuggestionState {
        lock(&self.inner).state.clone()
    }

    pub fn with_view<T>(&self, f: impl FnOnce(&V) -> T) -> T {
        f(&lock(&self.inner).view)
    }

    /// Handle the input's new value.
    pub async fn on_input(&self, raw: &str) {
        let query = raw.trim();
        let (handle, registration) = AbortHandle::new_pair();

        {
            let mut inner = lock(&self.inner);
            if let Some(previous) = inner.in_flight.take() {
                previous.abort();
            }
            if query.chars().count() < self.config.min_query_len {
                inner.view.hide();
                inner.state = SuggestionState::Idle;
                return;
            }
            inner.in_flight = Some(handle.clone());
            inner.state = SuggestionState::Pending {
                query: query.to_string(),
            };
            inner
                .view
                .show(&render_search_skeletons(self.config.skeleton_count));
        }

        let result = Abortable::new(self.api.search_suggestions(query), registration).await;

        let mut inner = lock(&self.inner);
        if handle.is_aborted() {
            tracing::debug!(query, "Suggestion request superseded");
            return;
        }
        inner.in_flight = None;

        match result {
            Err(Aborted) => {
                tracing::debug!(query, "Suggestion request aborted");
            }
            Ok(Ok(results)) if results.is_empty() => {
                inner.view.hide();
                inner.state = SuggestionState::Hidden;
            }
            Ok(Ok(results)) => {
                inner.view.show(&render_suggestions(&results, query));
                inner.state = SuggestionState::Rendered {
                    query: query.to_string(),
                    results,
                };
            }
            Ok(Err(e)) => {
                tracing::warn!(query, error = %e, "Failed to fetch suggestions");
                inner.view.hide();
                inner.state = SuggestionState::Hidden;
            }
        }
    }

    /// Navigate to the detail page of the `index`-th rendered result.
    pub fn on_result_click(&self, index: usize) {
        let mut inner = lock(&self.inner);
        let href = match &inner.state {
            SuggestionState::Rendered { results, .. } => {
                results.get(index).map(|r| anime_href(r.id.as_ref()))
            }
            _ => None,
        };
        if let Some(href) = href {
            inner.view.navigate(&href);
        }
    }

    /// Navigate to the full search page for the rendered query.
    pub fn on_view_all(&self) {
        let mut inner = lock(&self.inner);
        let href = match &inner.state {
            SuggestionState::Rendered { query, .. } => Some(search_href(query)),
            _ => None,
        };
        if let Some(href) = href {
            inner.view.navigate(&href);
        }
    }

    /// Document-level click; clicks outside the search region dismiss the dropdown.
    pub fn on_document_click(&self, inside_search: bool) {
        if inside_search {
            return;
        }
        let mut inner = lock(&self.inner);
        inner.view.hide();
        if matches!(inner.state, SuggestionState::Rendered { .. }) {
            inner.state = SuggestionState::Hidden;
        }
    }
}
