use super::{back_button, cta_section, image, page_hero, Site};
use crate::media;
use crate::models::case_study::CaseStudy;
use crate::models::non_blank;
use crate::models::pages::ProductPage;
use crate::models::product::{Feature, Product, UseCase};
use crate::navigation::back_link::{self, BackParams};
use crate::render::{html_escape, url_encode};
use crate::richtext;

pub fn render(site: &Site, product: &Product, page: Option<&ProductPage>, back: &BackParams) -> String {
    let current_path = format!("/products/{}", product.slug);

    let mut html = page_hero(
        product.heading(),
        non_blank(&product.hero_sub_title),
        Some(&back_button(back)),
        None,
    );
    html.push_str(&overview(site, product));
    html.push_str(&features(site, &product.features));
    html.push_str(&use_cases(site, &product.use_cases));
    html.push_str(&success_stories(site, product));

    let cta = ProductPage::cta(page);
    let href = back_link::smart_cta_link(&cta.button_link, back, &current_path);
    html.push_str(&cta_section(&cta, &href));
    html
}

fn overview(site: &Site, product: &Product) -> String {
    let mut buttons = String::new();
    if let Some(text) = non_blank(&product.primary_button_text) {
        buttons.push_str(&format!(
            r#"<a href="{}" class="btn btn-primary">{}</a>"#,
            html_escape(non_blank(&product.primary_button_link).unwrap_or("#")),
            html_escape(text)
        ));
    }
    if let Some(text) = non_blank(&product.secondary_button_text) {
        buttons.push_str(&format!(
            r#"<a href="{}" class="btn btn-secondary">{}</a>"#,
            html_escape(non_blank(&product.secondary_button_link).unwrap_or("#")),
            html_escape(text)
        ));
    }
    if !buttons.is_empty() {
        buttons = format!(r#"<div class="button-row">{}</div>"#, buttons);
    }

    let banner = match media::first(product.hero_banner.as_ref(), &site.media) {
        Some(url) => image(&url, product.display_name(), "product-banner"),
        None => r#"<div class="image-placeholder"><p>No image available</p></div>"#.to_string(),
    };

    format!(
        r#"<section class="product-overview">
    <div class="container two-column">
        <div class="rich-text">{description}{buttons}</div>
        <div class="product-banner-wrap">{banner}</div>
    </div>
</section>
"#,
        description = richtext::render(product.description.as_deref().unwrap_or("")),
        buttons = buttons,
        banner = banner,
    )
}

fn features(site: &Site, features: &[Feature]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let items: String = features
        .iter()
        .map(|feature| {
            let icon = media::first(feature.icon.as_ref(), &site.media)
                .map(|url| image(&url, &feature.title, "feature-icon"))
                .unwrap_or_else(|| r#"<span class="feature-check">&#10003;</span>"#.to_string());
            format!(
                r#"<div class="feature">{}<div><h3>{}</h3><p>{}</p></div></div>"#,
                icon,
                html_escape(&feature.title),
                html_escape(feature.description.as_deref().unwrap_or(""))
            )
        })
        .collect();
    format!(
        r#"<section class="features-section">
    <div class="container">
        <h2>Key Features</h2>
        <div class="feature-grid">{}</div>
    </div>
</section>
"#,
        items
    )
}

fn use_cases(site: &Site, use_cases: &[UseCase]) -> String {
    if use_cases.is_empty() {
        return String::new();
    }
    let cards: String = use_cases
        .iter()
        .map(|uc| {
            let img = media::first(uc.image.as_ref(), &site.media)
                .map(|url| image(&url, &uc.title, "use-case-image"))
                .unwrap_or_default();
            format!(
                r#"<article class="use-case-card">{}<h3>{}</h3><p>{}</p></article>"#,
                img,
                html_escape(&uc.title),
                html_escape(uc.description.as_deref().unwrap_or(""))
            )
        })
        .collect();
    format!(
        r#"<section class="use-cases-section">
    <div class="container">
        <h2>Real-World Applications</h2>
        <p class="section-sub">See how organizations leverage our solutions to drive success</p>
        <div class="card-grid">{}</div>
    </div>
</section>
"#,
        cards
    )
}

fn success_stories(site: &Site, product: &Product) -> String {
    if product.case_studies.is_empty() {
        return String::new();
    }
    let cards: String = product
        .case_studies
        .iter()
        .map(|cs| story_card(site, cs, &product.slug))
        .collect();
    format!(
        r#"<section class="stories-section">
    <div class="container">
        <div class="section-head">
            <div>
                <h2>Success Stories</h2>
                <p>See how companies transform their business with {name}</p>
            </div>
            <a href="/case-studies" class="link-arrow">View all case studies &rarr;</a>
        </div>
        <div class="card-grid">{cards}</div>
    </div>
</section>
"#,
        name = html_escape(product.display_name()),
        cards = cards,
    )
}

fn story_card(site: &Site, cs: &CaseStudy, product_slug: &str) -> String {
    let href = back_link::detail_back_link(
        &format!("/case-studies/{}", url_encode(&cs.slug)),
        "product",
        &format!("/products/{}", url_encode(product_slug)),
        None,
    );
    let thumb = media::first(cs.thumbnail.as_ref(), &site.media)
        .map(|url| image(&url, &cs.title, "card-thumb"))
        .unwrap_or_default();
    let industry = non_blank(&cs.customer_industry)
        .map(|i| format!(r#"<span class="badge">{}</span>"#, html_escape(i)))
        .unwrap_or_default();
    format!(
        r#"<a href="{href}" class="card">{thumb}<div class="card-body">{industry}<h3>{title}</h3><p class="clamp">{description}</p><span class="link-arrow">Read Case Study &rarr;</span></div></a>"#,
        href = html_escape(&href),
        thumb = thumb,
        industry = industry,
        title = html_escape(&cs.title),
        description = html_escape(cs.description.as_deref().unwrap_or("")),
    )
}
