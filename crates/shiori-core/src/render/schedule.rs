use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Weekday};

use super::anime_href;
use crate::escape::escape_html;
use crate::models::ScheduleItem;

/// Shown when the selected day has no airings.
pub const SCHEDULE_EMPTY: &str =
    r#"<p class="schedule-message">No scheduled anime for this day.</p>"#;

/// Shown when the schedule request fails.
pub const SCHEDULE_FAILED: &str = r#"<p class="schedule-message">Failed to load schedule.</p>"#;

const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Items airing within one local hour, in input order.
#[derive(Debug, Clone)]
pub struct HourBucket<'a> {
    pub hour: u32,
    pub entries: Vec<(&'a ScheduleItem, NaiveTime)>,
}

/// Local airing time of an item: `airingAt` converted to `tz`, else `airingTime`.
fn local_time<Tz: TimeZone>(item: &ScheduleItem, tz: &Tz) -> Option<NaiveTime> {
    match item.airing_at {
        Some(secs) => tz.timestamp_opt(secs, 0).single().map(|dt| dt.time()),
        None => item
            .airing_time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()),
    }
}

/// Group items into buckets by local hour, sorted ascending.
///
/// Items without any usable airing time are dropped.
pub fn group_by_hour<'a, Tz: TimeZone>(items: &'a [ScheduleItem], tz: &Tz) -> Vec<HourBucket<'a>> {
    let mut groups: BTreeMap<u32, Vec<(&ScheduleItem, NaiveTime)>> = BTreeMap::new();
    for item in items {
        if let Some(time) = local_time(item, tz) {
            groups.entry(time.hour()).or_default().push((item, time));
        }
    }
    groups
        .into_iter()
        .map(|(hour, entries)| HourBucket { hour, entries })
        .collect()
}

/// Items whose `airingAt` falls on `day` in the given timezone.
pub fn items_on_day<Tz: TimeZone>(items: &[ScheduleItem], day: Weekday, tz: &Tz) -> Vec<ScheduleItem> {
    items
        .iter()
        .filter(|item| {
            item.airing_at
                .and_then(|secs| tz.timestamp_opt(secs, 0).single())
                .is_some_and(|dt| dt.weekday() == day)
        })
        .cloned()
        .collect()
}

/// Render the hour-bucketed timeline relative to `now`.
///
/// The bucket for the current hour is marked live; cards later than now read
/// `AIRING`, the rest `AIRED`.
pub fn render_timeline<Tz: TimeZone>(items: &[ScheduleItem], now: &DateTime<Tz>) -> String {
    let now_time = now.time();
    let now_hm = (now_time.hour(), now_time.minute());
    let mut html = String::new();

    for bucket in group_by_hour(items, &now.timezone()) {
        let live = if bucket.hour == now_hm.0 { "live" } else { "" };
        html.push_str(&format!(
            r#"
<div class="timeline-group">
    <div class="timeline-marker">
        <span class="timeline-dot {live}"></span>
        <span class="timeline-chevron"><i class="fa-solid fa-chevron-right"></i></span>
        <span class="timeline-time">{:02}:00</span>
    </div>
    <div class="timeline-cards">"#,
            bucket.hour
        ));

        for (item, time) in &bucket.entries {
            let title = escape_html(item.display_title());
            let episode = item
                .episode_label()
                .map(|v| escape_html(&v.to_string()))
                .unwrap_or_else(|| "?".into());
            let poster = item.image.as_deref().filter(|v| !v.is_empty());
            let cover = item.cover.as_deref().filter(|v| !v.is_empty()).or(poster);
            let href = anime_href(item.id.as_ref());
            let clock = time.format("%H:%M");
            let (status, status_text) = if (time.hour(), time.minute()) > now_hm {
                ("airing", "AIRING")
            } else {
                ("aired", "AIRED")
            };

            let background = match cover {
                Some(cover) => format!(
                    r#"<img src="{}" alt="" class="schedule-card-bg" loading="lazy">"#,
                    escape_html(cover)
                ),
                None => r#"<div class="schedule-card-bg schedule-card-bg-empty"></div>"#.into(),
            };
            let poster = match poster {
                Some(poster) => format!(
                    r#"<img src="{}" alt="{title}" class="schedule-poster" loading="lazy">"#,
                    escape_html(poster)
                ),
                None => String::new(),
            };

            html.push_str(&format!(
                r#"
        <a href="{href}" class="schedule-card">
            {background}
            <div class="schedule-card-content">
                {poster}
                <div class="schedule-info">
                    <div class="schedule-title">{title}</div>
                    <div class="schedule-ep">EP {episode}</div>
                </div>
                <div class="schedule-time-badge">
                    <div class="schedule-airing-time">{clock}</div>
                    <div class="schedule-status {status}">{status_text}</div>
                </div>
            </div>
        </a>"#
            ));
        }
        html.push_str("\n    </div>\n</div>");
    }
    html
}

/// Placeholder timeline shown while the schedule loads.
pub fn timeline_skeleton() -> String {
    let group = r#"
<div class="timeline-group">
    <div class="timeline-marker">
        <span class="timeline-dot"></span>
        <span class="timeline-chevron"><i class="fa-solid fa-chevron-right"></i></span>
        <div class="skeleton timeline-skeleton-time"></div>
    </div>
    <div class="timeline-cards">
        <div class="schedule-card"><div class="skeleton schedule-skeleton-card"></div></div>
    </div>
</div>"#;
    group.repeat(4)
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "TH";
    }
    match day % 10 {
        1 => "ST",
        2 => "ND",
        3 => "RD",
        _ => "TH",
    }
}

/// Day-button date label, e.g. `16TH OCTOBER`.
pub fn day_date_label(date: NaiveDate) -> String {
    let day = date.day();
    format!("{day}{} {}", ordinal_suffix(day), MONTHS[date.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    use crate::models::{Scalar, Title};

    fn item(id: i64, title: &str, airing_at: i64) -> ScheduleItem {
        ScheduleItem {
            id: Some(Scalar::Int(id)),
            title: Some(Title::Plain(title.into())),
            airing_at: Some(airing_at),
            ..Default::default()
        }
    }

    // 2024-01-15 (Monday) 00:00:00 UTC
    const MONDAY: i64 = 1_705_276_800;

    #[test]
    fn test_groups_two_hours_sorted() {
        let items = vec![
            item(1, "Late", MONDAY + 14 * 3600 + 30 * 60),
            item(2, "Early", MONDAY + 9 * 3600 + 5 * 60),
            item(3, "Early too", MONDAY + 9 * 3600 + 45 * 60),
        ];
        let buckets = group_by_hour(&items, &Utc);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].hour, 9);
        assert_eq!(buckets[1].hour, 14);
        let early: Vec<_> = buckets[0].entries.iter().map(|(i, _)| i.display_title()).collect();
        assert_eq!(early, vec!["Early", "Early too"]);
        assert_eq!(buckets[1].entries.len(), 1);
    }

    #[test]
    fn test_grouping_uses_local_offset() {
        let items = vec![item(1, "A", MONDAY + 23 * 3600)];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let buckets = group_by_hour(&items, &tokyo);
        assert_eq!(buckets[0].hour, 8);
        assert_eq!(items_on_day(&items, Weekday::Tue, &tokyo).len(), 1);
        assert!(items_on_day(&items, Weekday::Mon, &tokyo).is_empty());
    }

    #[test]
    fn test_airing_time_fallback() {
        let items = vec![ScheduleItem {
            airing_time: Some("18:30".into()),
            ..Default::default()
        }];
        let buckets = group_by_hour(&items, &Utc);
        assert_eq!(buckets[0].hour, 18);
        assert!(group_by_hour(&[ScheduleItem::default()], &Utc).is_empty());
    }

    #[test]
    fn test_render_timeline_status() {
        let items = vec![
            item(1, "Done", MONDAY + 9 * 3600 + 5 * 60),
            item(2, "Soon", MONDAY + 9 * 3600 + 50 * 60),
            item(3, "Later", MONDAY + 14 * 3600),
        ];
        let now = Utc.timestamp_opt(MONDAY + 9 * 3600 + 30 * 60, 0).unwrap();
        let html = render_timeline(&items, &now);
        assert_eq!(html.matches("timeline-group").count(), 2);
        assert_eq!(html.matches("timeline-dot live").count(), 1);
        assert!(html.contains(r#"<span class="timeline-time">09:00</span>"#));
        assert!(html.contains(r#"<span class="timeline-time">14:00</span>"#));
        assert!(html.contains(">09:05<"));
        assert_eq!(html.matches(">AIRED<").count(), 1);
        assert_eq!(html.matches(">AIRING<").count(), 2);
        assert!(html.find("09:00").unwrap() < html.find("14:00").unwrap());
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(day_date_label(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()), "16TH OCTOBER");
        assert_eq!(day_date_label(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()), "1ST JANUARY");
        assert_eq!(ordinal_suffix(12), "TH");
        assert_eq!(ordinal_suffix(22), "ND");
        assert_eq!(ordinal_suffix(23), "RD");
        assert_eq!(timeline_skeleton().matches("timeline-group").count(), 4);
    }
}
