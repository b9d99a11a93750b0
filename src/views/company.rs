use super::{back_button, image, page_hero, Site};
use crate::media;
use crate::models::company::{AboutCollections, Leader};
use crate::models::non_blank;
use crate::models::pages::{AboutPage, LeadershipPage};
use crate::navigation::back_link::BackParams;
use crate::render::{html_escape, url_encode};
use crate::richtext;

const LEADER_PLACEHOLDER: &str = "/static/images/placeholder.svg";

fn section(class: &str, eyebrow: &str, heading: &str, sub: &str, inner: &str) -> String {
    format!(
        r#"<section class="{class}">
    <div class="container">
        <div class="section-head centered">
            <span class="eyebrow">{eyebrow}</span>
            <h2>{heading}</h2>
            <p class="section-sub">{sub}</p>
        </div>
        {inner}
    </div>
</section>
"#,
        class = class,
        eyebrow = eyebrow,
        heading = heading,
        sub = sub,
        inner = inner,
    )
}

fn bullets(text: Option<&str>) -> String {
    let items: String = richtext::lines(text.unwrap_or(""))
        .iter()
        .map(|line| format!("<li>{}</li>", html_escape(line)))
        .collect();
    if items.is_empty() {
        items
    } else {
        format!(r#"<ul class="check-list">{}</ul>"#, items)
    }
}

// ── About us ───────────────────────────────────────────

pub fn render_about(site: &Site, page: Option<&AboutPage>, lists: &AboutCollections, back: &BackParams) -> String {
    let title = page.and_then(|p| non_blank(&p.title)).unwrap_or("About Datayaan");
    let background = page.and_then(|p| media::first(p.hero_image.as_ref(), &site.media));

    let mut html = page_hero(
        title,
        page.and_then(|p| non_blank(&p.description)),
        Some(&back_button(back)),
        background.as_deref(),
    );

    if !lists.what_we_do.is_empty() {
        let cards: String = lists
            .what_we_do
            .iter()
            .map(|item| {
                let subtitle = non_blank(&item.subtitle)
                    .map(|s| format!(r#"<p class="eyebrow">{}</p>"#, html_escape(s)))
                    .unwrap_or_default();
                format!(
                    r#"<div class="card card-padded"><h3>{}</h3>{}<p>{}</p>{}</div>"#,
                    html_escape(&item.title),
                    subtitle,
                    html_escape(item.description.as_deref().unwrap_or("")),
                    bullets(item.points.as_deref())
                )
            })
            .collect();
        html.push_str(&section(
            "about-what",
            "Our Expertise",
            "What We Do",
            "Empowering businesses with innovative technology solutions",
            &format!(r#"<div class="card-grid">{}</div>"#, cards),
        ));
    }

    if !lists.domains.is_empty() {
        let tiles: String = lists
            .domains
            .iter()
            .filter(|d| !d.name.trim().is_empty())
            .map(|d| {
                format!(
                    r#"<a href="/case-studies?domain={}" class="domain-tile"><h3>{}</h3><p>{}</p></a>"#,
                    url_encode(&d.name),
                    html_escape(&d.name),
                    html_escape(d.description.as_deref().unwrap_or(""))
                )
            })
            .collect();
        html.push_str(&section(
            "about-domains",
            "Industries",
            "Domains We Serve",
            "Deep expertise across the industries that matter to our customers",
            &format!(r#"<div class="domain-grid">{}</div>"#, tiles),
        ));
    }

    if !lists.journey.is_empty() {
        let items: String = lists
            .journey
            .iter()
            .map(|m| {
                format!(
                    r#"<li class="timeline-item"><span class="timeline-year">{}</span><h3>{}</h3><p>{}</p>{}</li>"#,
                    html_escape(m.year_range.as_deref().unwrap_or("")),
                    html_escape(&m.title),
                    html_escape(m.description.as_deref().unwrap_or("")),
                    bullets(m.points.as_deref())
                )
            })
            .collect();
        html.push_str(&section(
            "about-journey",
            "Milestones",
            "Our Journey",
            "How we grew, one milestone at a time",
            &format!(r#"<ol class="timeline">{}</ol>"#, items),
        ));
    }

    if let Some(page) = page {
        let mut blocks = String::new();
        if let Some(mission) = non_blank(&page.mission) {
            blocks.push_str(&format!(
                r#"<div class="card card-padded"><h3>Our Mission</h3><div class="rich-text">{}</div></div>"#,
                richtext::render(mission)
            ));
        }
        if let Some(vision) = non_blank(&page.vision) {
            blocks.push_str(&format!(
                r#"<div class="card card-padded"><h3>Our Vision</h3><div class="rich-text">{}</div></div>"#,
                richtext::render(vision)
            ));
        }
        let values = bullets(page.values.as_deref());
        if !values.is_empty() {
            blocks.push_str(&format!(
                r#"<div class="card card-padded"><h3>Our Values</h3>{}</div>"#,
                values
            ));
        }
        if !blocks.is_empty() {
            html.push_str(&section(
                "about-values",
                "What Drives Us",
                "Vision, Mission &amp; Values",
                "The principles behind everything we build",
                &format!(r#"<div class="card-grid">{}</div>"#, blocks),
            ));
        }
    }

    if !lists.why_us.is_empty() {
        let cards: String = lists
            .why_us
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    r#"<div class="card card-padded"><span class="card-number">{:02}</span><h3>{}</h3><p>{}</p></div>"#,
                    i + 1,
                    html_escape(&item.title),
                    html_escape(item.description.as_deref().unwrap_or(""))
                )
            })
            .collect();
        html.push_str(&section(
            "about-why",
            "Why Choose Us",
            "Why Datayaan",
            "What sets us apart in delivering excellence",
            &format!(r#"<div class="card-grid card-grid-4">{}</div>"#, cards),
        ));
    }

    html
}

// ── Leadership ─────────────────────────────────────────

/// Bio paragraphs are separated by blank lines.
pub fn bio_paragraphs(bio: Option<&str>) -> Vec<&str> {
    bio.unwrap_or("")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn render_leadership(site: &Site, page: Option<&LeadershipPage>, leaders: &[Leader], back: &BackParams) -> String {
    let title = page.and_then(|p| non_blank(&p.title)).unwrap_or("Leadership Team");
    let mut html = page_hero(
        title,
        page.and_then(|p| non_blank(&p.subtitle)),
        Some(&back_button(back)),
        None,
    );

    let cards: String = leaders
        .iter()
        .enumerate()
        .map(|(i, leader)| {
            let photo = media::first(leader.image.as_ref(), &site.media)
                .unwrap_or_else(|| LEADER_PLACEHOLDER.to_string());
            let bio: String = bio_paragraphs(leader.bio.as_deref())
                .into_iter()
                .map(|p| format!("<p>{}</p>", html_escape(p)))
                .collect();
            let linkedin = non_blank(&leader.linkedin)
                .map(|url| {
                    format!(
                        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="link-arrow">LinkedIn</a>"#,
                        html_escape(url)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<article class="leader-card{featured}">
    <div class="leader-photo">{photo}</div>
    <div class="leader-text">
        <h3>{name}</h3>
        <span class="badge">{role}</span>
        <div class="leader-bio">{bio}</div>
        {linkedin}
    </div>
</article>
"#,
                featured = if i == 0 { " featured" } else { "" },
                photo = image(&photo, &leader.name, ""),
                name = html_escape(&leader.name),
                role = html_escape(leader.title.as_deref().unwrap_or("")),
                bio = bio,
                linkedin = linkedin,
            )
        })
        .collect();

    html.push_str(&format!(
        r#"<section class="leaders-section"><div class="container">{}</div></section>
"#,
        cards
    ));
    html
}
