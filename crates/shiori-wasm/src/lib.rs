//! Render helpers exported to JavaScript. Lists are passed as JSON, either a
//! bare array or a `{"results": [...]}` envelope; malformed input renders nothing.

use chrono::{FixedOffset, TimeZone};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use shiori_core::models::{Envelope, MediaSummary, ScheduleItem, SearchResult};
use shiori_core::render;

fn render_list<T: DeserializeOwned>(json: &str, render: impl FnOnce(&[T]) -> String) -> String {
    serde_json::from_str::<Envelope<T>>(json)
        .map(|items| render(&items.into_results()))
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn escape_html(input: &str) -> String {
    shiori_core::escape::escape_html(input)
}

#[wasm_bindgen]
pub fn render_grid(items_json: &str) -> String {
    render_list::<MediaSummary>(items_json, render::render_grid)
}

#[wasm_bindgen]
pub fn render_sidebar_list(items_json: &str) -> String {
    render_list::<MediaSummary>(items_json, render::render_sidebar_list)
}

#[wasm_bindgen]
pub fn render_vertical_list(items_json: &str) -> String {
    render_list::<MediaSummary>(items_json, render::render_vertical_list)
}

#[wasm_bindgen]
pub fn render_suggestions(results_json: &str, query: &str) -> String {
    render_list::<SearchResult>(results_json, |results| {
        render::render_suggestions(results, query)
    })
}

/// Timeline for `now` (unix seconds) in a timezone `offset_minutes` east of UTC,
/// as returned negated by `Date.prototype.getTimezoneOffset`.
#[wasm_bindgen]
pub fn render_timeline(items_json: &str, now_secs: f64, offset_minutes: i32) -> String {
    let Some(offset) = FixedOffset::east_opt(offset_minutes.saturating_mul(60)) else {
        return String::new();
    };
    let Some(now) = offset.timestamp_opt(now_secs as i64, 0).single() else {
        return String::new();
    };
    render_list::<ScheduleItem>(items_json, |items| render::render_timeline(items, &now))
}
