//! Render helpers: pure functions from media records to markup fragments.
//!
//! Every interpolated string goes through [`escape_html`]; ids placed in
//! `href` attributes are percent-encoded with [`encode_component`] first.

mod schedule;

pub use schedule::{
    day_date_label, group_by_hour, items_on_day, ordinal_suffix, render_timeline,
    timeline_skeleton, HourBucket, SCHEDULE_EMPTY, SCHEDULE_FAILED,
};

use crate::escape::{clean_description, encode_component, escape_html};
use crate::models::{Artwork, MediaSummary, Scalar, SearchResult};

/// A spotlight item paired with its optional third-party artwork.
#[derive(Debug, Clone, Default)]
pub struct HeroSlide {
    pub media: MediaSummary,
    pub artwork: Artwork,
}

/// `/anime/{id}` with the id percent-encoded.
pub fn anime_href(id: Option<&Scalar>) -> String {
    format!("/anime/{}", encode_id(id))
}

/// `/watch/{id}` with the id percent-encoded.
pub fn watch_href(id: Option<&Scalar>) -> String {
    format!("/watch/{}", encode_id(id))
}

/// `/search?q={query}` with the query percent-encoded.
pub fn search_href(query: &str) -> String {
    format!("/search?q={}", encode_component(query))
}

fn encode_id(id: Option<&Scalar>) -> String {
    id.map(|id| encode_component(&id.to_string()))
        .unwrap_or_default()
}

fn esc_opt(value: Option<&str>, default: &str) -> String {
    escape_html(value.filter(|v| !v.is_empty()).unwrap_or(default))
}

fn esc_scalar(value: Option<&Scalar>) -> String {
    Scalar::present(value)
        .map(|v| escape_html(&v.to_string()))
        .unwrap_or_default()
}

/// Year/episodes meta spans shared by the list layouts: `<span>•</span><span>…</span>`.
fn meta_suffix(year: &str, episodes: &str) -> String {
    let mut meta = String::new();
    if !year.is_empty() {
        meta.push_str(&format!("<span>•</span><span>{year}</span>"));
    }
    if !episodes.is_empty() {
        meta.push_str(&format!("<span>•</span><span>{episodes} Eps</span>"));
    }
    meta
}

/// Poster card grid (recent updates, tabbed grid).
pub fn render_grid(items: &[MediaSummary]) -> String {
    let mut html = String::new();
    for anime in items {
        let title = escape_html(anime.display_title());
        let sub = Scalar::present(anime.total_episodes.as_ref())
            .or_else(|| Scalar::present(anime.sub.as_ref()))
            .map(|v| escape_html(&v.to_string()))
            .unwrap_or_else(|| "?".into());
        let dub = match Scalar::present(anime.dub.as_ref()) {
            Some(dub) => format!(
                r#"<span class="badge-sm badge-mic"><i class="fa-solid fa-microphone"></i> {}</span>"#,
                escape_html(&dub.to_string())
            ),
            None => String::new(),
        };
        let media_type = esc_opt(anime.media_type.as_deref(), "TV");
        let year = esc_scalar(anime.release_date.as_ref());
        let year = if year.is_empty() {
            String::new()
        } else {
            format!("<span>•</span><span>{year}</span>")
        };
        let href = anime_href(anime.id.as_ref());
        let image = esc_opt(anime.image.as_deref(), "");

        html.push_str(&format!(
            r#"
<a href="{href}" class="anime-card-link">
    <div class="anime-card">
        <div class="poster-wrapper skeleton">
            <img src="{image}" alt="{title}" loading="lazy">
        </div>
        <div class="card-badges">
            <span class="badge-sm badge-cc"><i class="fa-solid fa-closed-captioning"></i> {sub}</span>
            {dub}
        </div>
        <div class="play-icon"><i class="fa-solid fa-play"></i></div>
    </div>
    <div class="anime-card-info">
        <div class="card-title">{title}</div>
        <div class="card-meta"><span>{media_type}</span>{year}</div>
    </div>
</a>"#
        ));
    }
    html
}

/// Compact vertical list with small posters.
pub fn render_vertical_list(items: &[MediaSummary]) -> String {
    let mut html = String::new();
    for anime in items {
        let title = escape_html(anime.display_title());
        let media_type = esc_opt(anime.media_type.as_deref(), "TV");
        let year = esc_scalar(anime.release_date.as_ref());
        let episodes = esc_scalar(anime.episode_count());
        let meta = meta_suffix(&year, &episodes);
        let href = anime_href(anime.id.as_ref());
        let image = esc_opt(anime.image.as_deref(), "");

        html.push_str(&format!(
            r#"
<a href="{href}" class="v-item">
    <div class="poster-wrapper skeleton v-poster">
        <img src="{image}" alt="{title}" loading="lazy">
    </div>
    <div class="v-info">
        <h4 class="v-title">{title}</h4>
        <div class="v-meta">
            <span class="v-type">{media_type}</span>{meta}
        </div>
    </div>
</a>"#
        ));
    }
    html
}

/// Sidebar ranking list (trending, upcoming).
pub fn render_sidebar_list(items: &[MediaSummary]) -> String {
    let mut html = String::new();
    for anime in items {
        let title = escape_html(anime.display_title());
        let media_type = esc_opt(anime.media_type.as_deref(), "TV");
        let year = esc_scalar(anime.release_date.as_ref());
        let episodes = esc_scalar(anime.episode_count());
        let episodes = if episodes.is_empty() {
            String::new()
        } else {
            format!("<span>•</span><span>{episodes} Eps</span>")
        };
        let href = anime_href(anime.id.as_ref());
        let image = esc_opt(anime.image.as_deref(), "");

        html.push_str(&format!(
            r#"
<a href="{href}" class="release-item">
    <div class="poster-wrapper skeleton release-poster">
        <img src="{image}" alt="{title}" loading="lazy">
    </div>
    <div class="release-info">
        <div class="release-title">{title}</div>
        <div class="release-meta">
            <span>{year}</span>
            <span>•</span>
            <span>{media_type}</span>
            {episodes}
        </div>
    </div>
</a>"#
        ));
    }
    html
}

/// Hero carousel slides followed by a single set of slide controls.
///
/// The first slide is marked active; the counter starts at `1 / n`.
pub fn render_hero(slides: &[HeroSlide]) -> String {
    let mut html = String::new();
    for (index, slide) in slides.iter().enumerate() {
        let anime = &slide.media;
        let active = if index == 0 { "active" } else { "" };
        let banner = slide
            .artwork
            .fanart
            .as_deref()
            .or(anime.cover.as_deref())
            .or(anime.image.as_deref())
            .unwrap_or_default();
        let banner = escape_html(banner);
        let title = escape_html(anime.display_title());
        let media_type = esc_opt(anime.media_type.as_deref(), "TV");
        let release_date = esc_scalar(anime.release_date.as_ref());
        let season = esc_opt(anime.season.as_deref(), "");
        let status = esc_opt(anime.status.as_deref(), "RELEASING");
        let episodes = esc_scalar(anime.episode_count());
        let duration = esc_scalar(anime.duration.as_ref());
        let description = escape_html(&clean_description(
            anime.description.as_deref().unwrap_or_default(),
        ));
        let ep_number = Scalar::present(anime.current_episode.as_ref())
            .or_else(|| Scalar::present(anime.episode_number.as_ref()));

        let mut meta = format!("<span>{media_type}</span>");
        if !season.is_empty() || !release_date.is_empty() {
            let season = if season.is_empty() {
                String::new()
            } else {
                format!("{season} ")
            };
            meta.push_str(&format!(
                r#"<span class="dot"></span><span><i class="fa-regular fa-calendar meta-icon"></i> {season}{release_date}</span>"#
            ));
        }
        meta.push_str(&format!(r#"<span class="dot"></span><span>{status}</span>"#));
        if !episodes.is_empty() {
            meta.push_str(&format!(
                r#"<span class="dot"></span><span>{episodes} Episodes</span>"#
            ));
        }
        if !duration.is_empty() {
            meta.push_str(&format!(r#"<span class="dot"></span><span>{duration}m</span>"#));
        }

        let badge = match ep_number {
            Some(ep) => format!(
                r#"<div class="hero-ep-badge"><span class="ep-dot"></span>EP {}</div>"#,
                escape_html(&ep.to_string())
            ),
            None => String::new(),
        };

        let title_markup = match slide.artwork.clearlogo.as_deref() {
            Some(logo) => format!(
                r#"<img src="{}" alt="{title}" class="hero-clearlogo"><p class="hero-subtitle">{title}</p>"#,
                escape_html(logo)
            ),
            None => format!(r#"<h1 class="hero-title">{title}</h1>"#),
        };

        let watch = watch_href(anime.id.as_ref());
        let details = anime_href(anime.id.as_ref());

        html.push_str(&format!(
            r#"
<div class="hero-slide {active}" data-index="{index}">
    <div class="poster-wrapper hero-skeleton skeleton">
        <img src="{banner}" alt="{title}" class="hero-background">
    </div>
    <div class="hero-gradient"></div>
    {badge}
    <div class="hero-content">
        <div class="hero-text">
            <div class="hero-meta-top">{meta}</div>
            {title_markup}
            <p class="hero-description">{description}</p>
        </div>
        <div class="hero-buttons">
            <a href="{watch}" class="hero-btn hero-btn-primary"><i class="fa-solid fa-play"></i> Watch Now</a>
            <a href="{details}" class="hero-btn hero-btn-secondary"><i class="fa-solid fa-circle-info"></i> Details</a>
        </div>
    </div>
</div>"#
        ));
    }

    html.push_str(&format!(
        r#"
<div class="slide-controls">
    <i class="slide-arrow slide-prev fa-solid fa-chevron-left"></i>
    <div class="slide-counter"><span>1</span> / {}</div>
    <i class="slide-arrow slide-next fa-solid fa-chevron-right"></i>
</div>"#,
        slides.len()
    ));
    html
}

/// Recently-aired banner cards on the schedule page.
pub fn render_recently_aired(items: &[MediaSummary]) -> String {
    let mut html = String::new();
    for anime in items {
        let title = escape_html(anime.display_title());
        let episode = Scalar::present(anime.episode.as_ref())
            .or_else(|| Scalar::present(anime.episodes.as_ref()))
            .or_else(|| Scalar::present(anime.sub.as_ref()))
            .map(|v| escape_html(&v.to_string()))
            .unwrap_or_else(|| "?".into());
        let banner = anime
            .cover
            .as_deref()
            .or(anime.banner.as_deref())
            .or(anime.image.as_deref())
            .unwrap_or_default();
        let banner = escape_html(banner);
        let poster = esc_opt(anime.image.as_deref(), "");
        let href = anime_href(anime.id.as_ref());

        html.push_str(&format!(
            r#"
<a href="{href}" class="recent-card">
    <img src="{banner}" alt="" class="recent-card-bg" loading="lazy">
    <div class="recent-card-content">
        <img src="{poster}" alt="{title}" class="recent-poster" loading="lazy">
        <div class="recent-info">
            <div class="recent-title">{title}</div>
            <div class="recent-ep">EP {episode}</div>
        </div>
    </div>
</a>"#
        ));
    }
    html
}

/// Placeholder rows shown in the search dropdown while a request is pending.
pub fn render_search_skeletons(count: usize) -> String {
    let row = r#"
<div class="search-item">
    <div class="skeleton search-skeleton-poster"></div>
    <div class="search-info">
        <div class="skeleton search-skeleton-title"></div>
        <div class="search-skeleton-badges">
            <div class="skeleton search-skeleton-badge"></div>
            <div class="skeleton search-skeleton-badge"></div>
            <div class="skeleton search-skeleton-badge"></div>
        </div>
    </div>
</div>"#;
    row.repeat(count)
}

/// Suggestion dropdown: one row per result plus a trailing "view all" row.
///
/// Each row carries its navigation target in `data-href`.
pub fn render_suggestions(results: &[SearchResult], query: &str) -> String {
    let mut html = String::new();
    for anime in results {
        let title = escape_html(anime.display_title());
        let image = esc_opt(anime.image.as_deref(), "");
        let href = escape_html(&anime_href(anime.id.as_ref()));

        let mut badges = String::new();
        let sub = esc_scalar(anime.sub.as_ref());
        if !sub.is_empty() {
            badges.push_str(&format!(r#"<span class="badge badge-cc">CC {sub}</span>"#));
        }
        let episodes = esc_scalar(anime.episodes.as_ref());
        if !episodes.is_empty() {
            badges.push_str(&format!(r#"<span class="badge badge-ep">{episodes}</span>"#));
        }
        let year = esc_scalar(anime.release_date.as_ref());
        if !year.is_empty() {
            badges.push_str(&format!(r#"<span class="badge badge-year">{year}</span>"#));
        }
        let media_type = esc_opt(anime.media_type.as_deref(), "");
        if !media_type.is_empty() {
            badges.push_str(&format!(r#"<span class="badge badge-type">{media_type}</span>"#));
        }

        html.push_str(&format!(
            r#"
<div class="search-item" data-href="{href}">
    <div class="poster-wrapper skeleton search-poster-wrapper">
        <img class="search-poster" src="{image}" loading="lazy">
    </div>
    <div class="search-info">
        <div class="search-title">{title}</div>
        <div class="search-meta">{badges}</div>
    </div>
</div>"#
        ));
    }
    html.push_str(&format!(
        r#"
<div class="search-item search-view-all" data-href="{}"><center><p>View all results -&gt;</p></center></div>"#,
        escape_html(&search_href(query))
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Title;

    fn media(id: &str, title: &str) -> MediaSummary {
        MediaSummary {
            id: Some(id.into()),
            title: Some(Title::Plain(title.into())),
            image: Some(format!("https://img.example/{id}.jpg")),
            ..Default::default()
        }
    }

    fn hostile() -> MediaSummary {
        MediaSummary {
            id: Some(r#"1"><script>"#.into()),
            title: Some(Title::Plain(r#"<img src=x onerror="alert(1)">"#.into())),
            image: Some(r#"x" onerror="alert(2)"#.into()),
            media_type: Some("<b>TV</b>".into()),
            release_date: Some("'2024'".into()),
            description: Some("<script>alert(3)</script>".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_grid_defaults_and_badges() {
        let mut item = media("21", "One Piece");
        item.sub = Some(Scalar::Int(1100));
        item.dub = Some(Scalar::Int(0));
        let html = render_grid(&[item]);
        assert!(html.contains(r#"href="/anime/21""#));
        assert!(html.contains("fa-closed-captioning\"></i> 1100"));
        assert!(!html.contains("badge-mic"));
        assert!(html.contains("<span>TV</span>"));
        assert!(!html.contains("<span>•</span>"));

        let html = render_grid(&[MediaSummary::default()]);
        assert!(html.contains("Unknown"));
        assert!(html.contains("fa-closed-captioning\"></i> ?"));
    }

    #[test]
    fn test_grid_dub_badge() {
        let mut item = media("5", "Naruto");
        item.dub = Some(Scalar::Int(220));
        item.release_date = Some(Scalar::Int(2002));
        let html = render_grid(&[item]);
        assert!(html.contains("fa-microphone\"></i> 220"));
        assert!(html.contains("<span>•</span><span>2002</span>"));
    }

    #[test]
    fn test_hostile_fields_are_escaped_everywhere() {
        let items = [hostile()];
        let slides = [HeroSlide {
            media: hostile(),
            artwork: Artwork::default(),
        }];
        let suggestions = [SearchResult {
            id: hostile().id,
            title: hostile().title,
            image: hostile().image,
            ..Default::default()
        }];
        for html in [
            render_grid(&items),
            render_vertical_list(&items),
            render_sidebar_list(&items),
            render_recently_aired(&items),
            render_hero(&slides),
            render_suggestions(&suggestions, r#""><script>"#),
        ] {
            assert!(!html.contains("<script>"), "{html}");
            assert!(!html.contains("<img src=x"), "{html}");
            assert!(!html.contains(r#"x" onerror"#), "{html}");
            assert!(!html.contains("<b>TV</b>"), "{html}");
        }
    }

    #[test]
    fn test_list_meta() {
        let mut item = media("9", "Frieren");
        item.release_date = Some(Scalar::Int(2023));
        item.total_episodes = Some(Scalar::Int(28));
        let html = render_vertical_list(&[item.clone()]);
        assert!(html.contains("<span>•</span><span>2023</span><span>•</span><span>28 Eps</span>"));
        let html = render_sidebar_list(&[item]);
        assert!(html.contains("<span>28 Eps</span>"));
        assert!(html.contains(r#"class="release-item""#));
    }

    #[test]
    fn test_hero_prefers_artwork() {
        let mut item = media("7", "Dandadan");
        item.cover = Some("https://img.example/cover.jpg".into());
        item.current_episode = Some(Scalar::Int(3));
        item.duration = Some(Scalar::Int(24));
        item.description = Some(format!("<p>{}</p>", "x".repeat(300)));

        let plain = render_hero(&[HeroSlide {
            media: item.clone(),
            artwork: Artwork::default(),
        }]);
        assert!(plain.contains(r#"src="https://img.example/cover.jpg""#));
        assert!(plain.contains(r#"<h1 class="hero-title">Dandadan</h1>"#));
        assert!(plain.contains("EP 3"));
        assert!(plain.contains("<span>24m</span>"));
        assert!(plain.contains("<span>RELEASING</span>"));
        assert!(plain.contains(&format!("{}...", "x".repeat(200))));

        let enriched = render_hero(&[
            HeroSlide {
                media: item.clone(),
                artwork: Artwork {
                    fanart: Some("https://art.example/fan.jpg".into()),
                    clearlogo: Some("https://art.example/logo.png".into()),
                },
            },
            HeroSlide {
                media: item,
                artwork: Artwork::default(),
            },
        ]);
        assert!(enriched.contains(r#"src="https://art.example/fan.jpg""#));
        assert!(enriched.contains(r#"class="hero-clearlogo""#));
        assert!(enriched.contains(r#"<p class="hero-subtitle">Dandadan</p>"#));
        assert_eq!(enriched.matches("hero-slide ").count(), 2);
        assert_eq!(enriched.matches("hero-slide active").count(), 1);
        assert!(enriched.contains("<span>1</span> / 2"));
        assert!(enriched.contains(r#"href="/watch/7""#));
    }

    #[test]
    fn test_hero_badge_episode_number_fallback() {
        let mut item = media("8", "Kaiju No. 8");
        item.current_episode = Some(Scalar::Int(0));
        item.episode_number = Some(Scalar::Text("11".into()));
        let html = render_hero(&[HeroSlide {
            media: item.clone(),
            artwork: Artwork::default(),
        }]);
        assert!(html.contains("EP 11</div>"));

        item.episode_number = None;
        let html = render_hero(&[HeroSlide {
            media: item,
            artwork: Artwork::default(),
        }]);
        assert!(!html.contains("hero-ep-badge"));
    }

    #[test]
    fn test_recently_aired_episode_fallback() {
        let mut item = media("3", "Blue Lock");
        item.sub = Some(Scalar::Int(14));
        let html = render_recently_aired(&[item]);
        assert!(html.contains("EP 14"));
        assert!(html.contains(r#"src="https://img.example/3.jpg" alt="" class="recent-card-bg""#));
    }

    #[test]
    fn test_suggestions_with_view_all() {
        let results = [
            SearchResult {
                id: Some(Scalar::Int(20)),
                title: Some(Title::Plain("Naruto".into())),
                sub: Some(Scalar::Int(220)),
                media_type: Some("TV".into()),
                ..Default::default()
            },
            SearchResult {
                id: Some(Scalar::Int(1735)),
                title: Some(Title::Plain("Naruto: Shippuden".into())),
                ..Default::default()
            },
        ];
        let html = render_suggestions(&results, "naruto shippuden");
        assert_eq!(html.matches(r#"class="search-item""#).count(), 2);
        assert_eq!(html.matches("search-view-all").count(), 1);
        assert!(html.contains(r#"data-href="/anime/20""#));
        assert!(html.contains(r#"data-href="/search?q=naruto%20shippuden""#));
        assert!(html.contains("CC 220"));
        assert!(html.contains(r#"<span class="badge badge-type">TV</span>"#));
    }

    #[test]
    fn test_search_skeletons() {
        assert_eq!(render_search_skeletons(5).matches("search-item").count(), 5);
        assert!(render_search_skeletons(0).is_empty());
    }
}
