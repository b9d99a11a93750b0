use super::{back_button, cta_section, image, page_hero, Site};
use crate::media;
use crate::models::non_blank;
use crate::models::pages::ServicePage;
use crate::models::service::{Service, Solution};
use crate::navigation::back_link::{self, BackParams};
use crate::render::{html_escape, url_encode};
use crate::richtext;

pub fn render_list(site: &Site, services: &[Service], page: Option<&ServicePage>, back: &BackParams) -> String {
    let title = page
        .and_then(|p| non_blank(&p.title))
        .unwrap_or("Our Services");
    let subtitle = page.and_then(|p| non_blank(&p.subtitle)).unwrap_or(
        "Empowering your business with cutting-edge technology solutions and expert development services",
    );

    let mut html = page_hero(title, Some(subtitle), Some(&back_button(back)), None);

    if services.is_empty() {
        html.push_str(
            r#"<section class="empty-state">
    <h2>No Services Found</h2>
    <p>We are currently updating our service offerings. Please check back soon.</p>
</section>
"#,
        );
    } else {
        let cards: String = services
            .iter()
            .enumerate()
            .map(|(i, s)| service_card(site, s, i))
            .collect();
        html.push_str(&format!(
            r#"<section class="services-section"><div class="container">{}</div></section>
"#,
            cards
        ));
    }

    let cta = ServicePage::cta(page);
    let href = format!("{}?from=services&returnPath=/services", cta.button_link);
    html.push_str(&cta_section(&cta, &href));
    html
}

/// Alternating left/right card; rich-text blocks only when present.
fn service_card(site: &Site, service: &Service, index: usize) -> String {
    let icon = media::first(service.icon.as_ref(), &site.media)
        .map(|url| image(&url, &service.title, "service-icon"))
        .unwrap_or_default();
    let description = non_blank(&service.description)
        .map(|d| format!(r#"<p class="service-description">{}</p>"#, html_escape(d)))
        .unwrap_or_default();

    let mut details = String::new();
    for (heading, text) in [
        ("Capabilities", &service.what_we_deliver),
        ("Business Impact", &service.how_it_helps),
    ] {
        if let Some(text) = non_blank(text) {
            details.push_str(&format!(
                r#"<div class="service-detail"><h4>{}</h4><div class="rich-text">{}</div></div>"#,
                heading,
                richtext::render(text)
            ));
        }
    }

    format!(
        r#"<article class="service-card{reverse}">
    <div class="service-media">{icon}</div>
    <div class="service-text">
        <h3>{title}</h3>
        {description}
        <div class="service-details">{details}</div>
    </div>
</article>
"#,
        reverse = if index % 2 == 0 { "" } else { " reverse" },
        icon = icon,
        title = html_escape(&service.title),
        description = description,
        details = details,
    )
}

fn bullet_list(text: Option<&str>) -> String {
    richtext::lines(text.unwrap_or(""))
        .iter()
        .map(|line| format!("<li>{}</li>", html_escape(line)))
        .collect()
}

pub fn render_solution(site: &Site, solution: &Solution, back: &BackParams) -> String {
    let hero_image = media::first(solution.hero_image.as_ref(), &site.media)
        .or_else(|| media::first(solution.thumbnail.as_ref(), &site.media))
        .map(|url| image(&url, &solution.title, "solution-hero-image"))
        .unwrap_or_default();
    let lead = non_blank(&solution.short_description)
        .or(non_blank(&solution.description))
        .unwrap_or("");

    let mut html = format!(
        r##"<section class="solution-hero">
    <div class="container two-column">
        <div>
            {back}
            <span class="badge">Solution Overview</span>
            <h1>{title}</h1>
            <p class="hero-sub">{lead}</p>
            <div class="button-row">
                <a href="/contact" class="btn btn-primary">Get Started</a>
                <a href="#features" class="btn btn-secondary">Learn More</a>
            </div>
        </div>
        <div>{hero_image}</div>
    </div>
</section>
"##,
        back = back_button(back),
        title = html_escape(&solution.title),
        lead = html_escape(lead),
        hero_image = hero_image,
    );

    if let (Some(_), Some(description)) = (
        non_blank(&solution.short_description),
        non_blank(&solution.description),
    ) {
        html.push_str(&format!(
            r#"<section class="detail-block container"><div class="rich-text">{}</div></section>
"#,
            richtext::render(description)
        ));
    }

    let features = bullet_list(solution.features.as_deref());
    if !features.is_empty() {
        html.push_str(&format!(
            r#"<section class="features-section" id="features">
    <div class="container">
        <h2>Powerful Features</h2>
        <ul class="check-list">{}</ul>
    </div>
</section>
"#,
            features
        ));
    }

    let gallery = media::resolve(solution.images.as_ref(), &site.media);
    if !gallery.is_empty() {
        let items: String = gallery
            .iter()
            .map(|url| image(url, &solution.title, "gallery-image"))
            .collect();
        html.push_str(&format!(
            r#"<section class="gallery-section"><div class="container"><h2>Solution Gallery</h2><div class="gallery">{}</div></div></section>
"#,
            items
        ));
    }

    let highlights = bullet_list(solution.highlights.as_deref());
    if !highlights.is_empty() {
        html.push_str(&format!(
            r#"<section class="benefits-section">
    <div class="container">
        <h2>Key Benefits</h2>
        <ul class="check-list">{}</ul>
    </div>
</section>
"#,
            highlights
        ));
    }

    html.push_str(&format!(
        r#"<section class="cta-section">
    <div class="container">
        <h2>Ready to Transform Your Business?</h2>
        <p>Get in touch with our team to learn how {} can drive growth and efficiency for your organization.</p>
        <a href="{}" class="btn btn-light">Schedule a Demo</a>
        <a href="/contact" class="btn btn-ghost">Contact Sales</a>
    </div>
</section>
"#,
        html_escape(&solution.title),
        html_escape(&back_link::create_back_link(
            "/book-demo",
            Some("solutions"),
            Some(&format!("/solutions/{}", url_encode(&solution.slug))),
            None,
        ))
    ));
    html
}
