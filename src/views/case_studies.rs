use super::{back_button, cta_section, image, page_hero, Site};
use crate::listing::{self, ListingFilter};
use crate::media;
use crate::models::case_study::CaseStudy;
use crate::models::company::domain_names;
use crate::models::non_blank;
use crate::models::pages::ProductPage;
use crate::navigation::back_link::{self, BackParams};
use crate::render::html_escape;
use crate::richtext;

const LISTING_PATH: &str = "/case-studies";

// ── Listing ────────────────────────────────────────────

pub fn render_list(site: &Site, studies: &[CaseStudy], filter: &ListingFilter, back: &BackParams) -> String {
    let visible = listing::filter_case_studies(studies, filter);

    let cards = if visible.is_empty() {
        r#"<div class="empty-state"><p>No case studies found matching your filters.</p></div>"#.to_string()
    } else {
        let items: String = visible.iter().map(|cs| list_card(site, cs)).collect();
        format!(r#"<div class="card-grid">{}</div>"#, items)
    };

    format!(
        r#"{hero}
<section class="listing-section">
    <div class="container">
        {filters}
        <p class="result-count">{count}</p>
        {cards}
    </div>
</section>
"#,
        hero = page_hero(
            "Case Studies",
            Some("Explore how our solutions have helped businesses succeed"),
            Some(&back_button(back)),
            None,
        ),
        filters = filter_form(site, filter),
        count = html_escape(&listing::result_count_label(visible.len())),
        cards = cards,
    )
}

/// An active value missing from `names` (stale link, CMS list not loaded)
/// still gets a selected option so the bar shows what is applied.
fn options(all_label: &str, names: &[String], selected: Option<&str>) -> String {
    let mut html = format!(r#"<option value="">{}</option>"#, html_escape(all_label));
    if let Some(active) = selected.filter(|s| !names.iter().any(|n| n.as_str() == *s)) {
        html.push_str(&format!(
            r#"<option value="{v}" selected>{v}</option>"#,
            v = html_escape(active)
        ));
    }
    for name in names {
        html.push_str(&format!(
            r#"<option value="{v}"{sel}>{v}</option>"#,
            v = html_escape(name),
            sel = if selected == Some(name.as_str()) { " selected" } else { "" }
        ));
    }
    html
}

/// Filter bar. Each select submits the GET form on change, so the URL is the
/// only filter state.
fn filter_form(site: &Site, filter: &ListingFilter) -> String {
    let products: Vec<String> = site
        .products
        .iter()
        .map(|p| p.name.clone())
        .filter(|n| !n.trim().is_empty())
        .collect();
    let domains = domain_names(&site.domains);

    let pairs = filter.pairs();
    let mut active = String::new();
    for (key, value) in &pairs {
        active.push_str(&format!(
            r#"<a href="{}" class="filter-chip" aria-label="Remove filter {v}">{v} &times;</a>"#,
            html_escape(&listing::with_param(LISTING_PATH, &pairs, key, None)),
            v = html_escape(value)
        ));
    }
    if filter.has_filters() {
        active.push_str(&format!(
            r#"<a href="{}" class="clear-filters">Clear Filters</a>"#,
            html_escape(&listing::clear_href(LISTING_PATH, &pairs))
        ));
    }

    format!(
        r#"<form method="get" action="{action}" class="filter-bar" data-auto-submit>
    <label>Product
        <select name="product">{products}</select>
    </label>
    <label>Domain
        <select name="domain">{domains}</select>
    </label>
    <noscript><button type="submit" class="btn btn-secondary">Apply</button></noscript>
    <div class="active-filters">{active}</div>
</form>"#,
        action = LISTING_PATH,
        products = options("All Products", &products, filter.product.as_deref()),
        domains = options("All Domains", &domains, filter.domain.as_deref()),
        active = active,
    )
}

fn list_card(site: &Site, cs: &CaseStudy) -> String {
    let href = back_link::listing_back_link(&format!("{}/{}", LISTING_PATH, cs.slug), "case-studies");
    let thumb = media::first(cs.thumbnail.as_ref(), &site.media)
        .map(|url| image(&url, &cs.title, "card-thumb"))
        .unwrap_or_default();
    format!(
        r#"<a href="{href}" class="card">{thumb}<div class="card-body"><span class="badge">{industry}</span><h3>{title}</h3><p class="clamp">{summary}</p><span class="link-arrow">Read More &rarr;</span></div></a>"#,
        href = html_escape(&href),
        thumb = thumb,
        industry = html_escape(cs.customer_industry.as_deref().unwrap_or("")),
        title = html_escape(&cs.title),
        summary = html_escape(cs.summary.as_deref().unwrap_or("")),
    )
}

// ── Detail ─────────────────────────────────────────────

pub fn render_detail(site: &Site, cs: &CaseStudy, page: Option<&ProductPage>, back: &BackParams) -> String {
    let current_path = format!("{}/{}", LISTING_PATH, cs.slug);

    let badge = non_blank(&cs.customer_industry)
        .map(|i| format!(r#"<span class="badge">{}</span>"#, html_escape(i)))
        .unwrap_or_default();
    let top = format!(r#"<div class="hero-top">{}{}</div>"#, back_button(back), badge);

    let mut body = String::new();
    if let Some(url) = media::first(cs.thumbnail.as_ref(), &site.media) {
        body.push_str(&format!(
            r#"<div class="detail-thumb">{}</div>"#,
            image(&url, &cs.title, "")
        ));
    }
    if let Some(summary) = non_blank(&cs.summary) {
        body.push_str(&format!(
            r#"<section class="detail-block"><h2>Overview</h2><p>{}</p></section>"#,
            html_escape(summary)
        ));
    }
    for (heading, text) in [
        ("The Challenge", &cs.problem),
        ("Our Solution", &cs.solution),
        ("Impact", &cs.impact),
        ("Outcome", &cs.outcome),
    ] {
        if let Some(text) = non_blank(text) {
            body.push_str(&format!(
                r#"<section class="detail-block"><h2>{}</h2><div class="rich-text">{}</div></section>"#,
                heading,
                richtext::render(text)
            ));
        }
    }

    if !cs.technologies_used.is_empty() {
        let chips: String = cs
            .technologies_used
            .iter()
            .map(|t| format!(r#"<span class="chip">{}</span>"#, html_escape(t)))
            .collect();
        body.push_str(&format!(
            r#"<section class="detail-block"><h2>Technologies Used</h2><div class="chips">{}</div></section>"#,
            chips
        ));
    }

    let gallery = media::resolve(cs.images.as_ref(), &site.media);
    if !gallery.is_empty() {
        let items: String = gallery
            .iter()
            .map(|url| image(url, &cs.title, "gallery-image"))
            .collect();
        body.push_str(&format!(
            r#"<section class="detail-block"><h2>Gallery</h2><div class="gallery">{}</div></section>"#,
            items
        ));
    }

    if !cs.products.is_empty() {
        let links: String = cs
            .products
            .iter()
            .map(|p| {
                let href = back_link::detail_back_link(
                    &format!("/products/{}", p.slug),
                    "case-study",
                    &current_path,
                    None,
                );
                format!(
                    r#"<a href="{}" class="chip chip-link">{}</a>"#,
                    html_escape(&href),
                    html_escape(&p.name)
                )
            })
            .collect();
        body.push_str(&format!(
            r#"<section class="detail-block"><h2>Related Products</h2><div class="chips">{}</div></section>"#,
            links
        ));
    }

    if !cs.domain_tags.is_empty() {
        let chips: String = cs
            .domain_tags
            .iter()
            .map(|t| format!(r#"<span class="chip">{}</span>"#, html_escape(&t.name)))
            .collect();
        body.push_str(&format!(
            r#"<section class="detail-block"><h2>Related Domains</h2><div class="chips">{}</div></section>"#,
            chips
        ));
    }

    let cta = ProductPage::cta(page);
    let href = back_link::smart_cta_link(&cta.button_link, back, &current_path);

    format!(
        r#"{hero}
<div class="container detail-body">
{body}
</div>
{cta}
"#,
        hero = page_hero(&cs.title, non_blank(&cs.description), Some(&top), None),
        body = body,
        cta = cta_section(&cta, &href),
    )
}
