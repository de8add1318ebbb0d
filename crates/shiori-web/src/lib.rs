//! Stateful page components: data-fetch layer, carousel, search suggestions
//! and the watch-page player controller.
//!
//! Components own their view behind a trait so they can drive a browser DOM,
//! an in-memory document, or a test recorder.

pub mod carousel;
pub mod feed;
pub mod page;
pub mod player;
pub mod schedule;
pub mod search;

#[cfg(test)]
mod fakes;

pub use carousel::{Carousel, SlideView, Slider};
pub use feed::{HomeFeed, HomeTab};
pub use page::{Document, MemoryDocument};
pub use player::{PlayerSession, PlayerView, SettingsUpdate, UpdateOutcome, WatchConfig, WatchController};
pub use schedule::SchedulePage;
pub use search::{SuggestionController, SuggestionState, SuggestionView};
