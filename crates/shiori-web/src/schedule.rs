//! Schedule page: weekday timeline plus the recently-aired strip.

use std::sync::Mutex;

use chrono::{DateTime, Datelike, Duration, TimeZone, Weekday};

use shiori_api::{HomeSection, SiteApi};
use shiori_core::models::ScheduleItem;
use shiori_core::render::{
    day_date_label, items_on_day, render_recently_aired, render_timeline, timeline_skeleton,
    SCHEDULE_EMPTY, SCHEDULE_FAILED,
};

use crate::page::{ids, lock, mount, Document};

/// The schedule page. The full schedule is fetched once and filtered per day.
pub struct SchedulePage<A, D, Tz> {
    api: A,
    doc: Mutex<D>,
    tz: Tz,
    recently_aired_limit: usize,
    items: Mutex<Option<Vec<ScheduleItem>>>,
}

impl<A, D, Tz> SchedulePage<A, D, Tz>
where
    A: SiteApi,
    D: Document,
    Tz: TimeZone,
{
    pub fn new(api: A, doc: D, tz: Tz, recently_aired_limit: usize) -> Self {
        Self {
            api,
            doc: Mutex::new(doc),
            tz,
            recently_aired_limit,
            items: Mutex::new(None),
        }
    }

    pub fn into_document(self) -> D {
        self.doc.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_document<T>(&self, f: impl FnOnce(&D) -> T) -> T {
        f(&lock(&self.doc))
    }

    /// Whether the schedule has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        lock(&self.items).is_some()
    }

    fn render_into(&self, id: &str, html: &str) {
        mount(&mut *lock(&self.doc), id, html);
    }

    /// Label today, then load the schedule and the recently-aired strip.
    pub async fn open(&self, now: DateTime<Tz>) {
        self.render_into(ids::SCHEDULE_DAY_DATE, &day_date_label(now.date_naive()));
        futures::join!(self.fetch_schedule(&now), self.fetch_recently_aired());
    }

    /// Fetch the whole schedule and render today's timeline.
    pub async fn fetch_schedule(&self, now: &DateTime<Tz>) {
        self.render_into(ids::SCHEDULE_TIMELINE, &timeline_skeleton());

        match self.api.schedule().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Schedule loaded");
                *lock(&self.items) = Some(items);
                self.render_day(now.weekday(), now);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch schedule");
                self.render_into(ids::SCHEDULE_TIMELINE, SCHEDULE_FAILED);
            }
        }
    }

    /// Show another weekday of the current week without refetching.
    pub fn select_day(&self, day: Weekday, now: &DateTime<Tz>) {
        let offset = i64::from(day.num_days_from_sunday())
            - i64::from(now.weekday().num_days_from_sunday());
        let date = now.date_naive() + Duration::days(offset);
        self.render_into(ids::SCHEDULE_DAY_DATE, &day_date_label(date));
        self.render_day(day, now);
    }

    fn render_day(&self, day: Weekday, now: &DateTime<Tz>) {
        let html = {
            let items = lock(&self.items);
            let Some(items) = items.as_deref() else {
                tracing::debug!(day = %day, "Schedule not loaded yet");
                return;
            };
            let on_day = items_on_day(items, day, &self.tz);
            if on_day.is_empty() {
                SCHEDULE_EMPTY.to_string()
            } else {
                render_timeline(&on_day, &now.with_timezone(&self.tz))
            }
        };
        self.render_into(ids::SCHEDULE_TIMELINE, &html);
    }

    pub async fn fetch_recently_aired(&self) {
        match self.api.home_section(HomeSection::RecentEpisodes).await {
            Ok(items) if items.is_empty() => {
                tracing::debug!("No recently aired episodes");
            }
            Ok(mut items) => {
                items.truncate(self.recently_aired_limit);
                self.render_into(ids::RECENTLY_AIRED, &render_recently_aired(&items));
            }
            Err(e) => tracing::error!(error = %e, "Failed to fetch recently aired"),
        }
    }
}
