//! Back-navigation context carried between pages in the query string.
//!
//! A page linking to another page appends `from` (the kind of page it is)
//! and optionally `returnPath` (where "Back" should lead). The destination
//! resolves those into a concrete href, or falls back to history-back.

use crate::render::url_encode;

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct BackParams {
    pub from: Option<String>,
    #[field(name = "returnPath")]
    pub return_path: Option<String>,
    #[field(name = "returnLabel")]
    pub return_label: Option<String>,
    #[field(name = "productSlug")]
    pub product_slug: Option<String>,
    #[field(name = "caseStudySlug")]
    pub case_study_slug: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Only site-relative paths are followed; anything else could leave the site.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

/// Where the back control should lead, or `None` for history-back.
///
/// Priority: explicit `returnPath`, then the legacy slug pairs, then the
/// well-known listing names, then `/{from}`.
pub fn resolve(params: &BackParams) -> Option<String> {
    if let Some(path) = present(&params.return_path).filter(|p| is_local_path(p)) {
        return Some(path.to_string());
    }

    let from = present(&params.from)?;

    match (from, present(&params.product_slug), present(&params.case_study_slug)) {
        ("product", Some(slug), _) => return Some(format!("/products/{}", slug)),
        ("case-study", _, Some(slug)) => return Some(format!("/case-studies/{}", slug)),
        _ => {}
    }

    let from = from.to_lowercase();
    let path = match from.as_str() {
        "products" => "/products".to_string(),
        "case-studies" => "/case-studies".to_string(),
        "blog" => "/blog".to_string(),
        "services" => "/services".to_string(),
        "home" => "/".to_string(),
        other => format!("/{}", other.trim_start_matches('/')),
    };
    Some(path)
}

/// Label for the back control. Custom labels only apply when there is a target.
pub fn label(params: &BackParams) -> String {
    present(&params.return_label).unwrap_or("Back").to_string()
}

/// `target` with `from`, `returnPath` and `returnLabel` appended, form-encoded.
pub fn create_back_link(
    target: &str,
    from: Option<&str>,
    return_path: Option<&str>,
    return_label: Option<&str>,
) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in [
        ("from", from),
        ("returnPath", return_path),
        ("returnLabel", return_label),
    ] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
        }
    }
    let query = query.finish();
    if query.is_empty() {
        target.to_string()
    } else {
        format!("{}?{}", target, query)
    }
}

/// Listing page to detail page: `/products/x?from=products`.
pub fn listing_back_link(target: &str, listing: &str) -> String {
    create_back_link(target, Some(listing), None, None)
}

/// Detail page to another detail page, returning to the current one.
pub fn detail_back_link(
    target: &str,
    current_type: &str,
    current_path: &str,
    label: Option<&str>,
) -> String {
    create_back_link(target, Some(current_type), Some(current_path), label)
}

/// A CTA href that keeps the navigation chain: the incoming `returnPath`
/// (or the current page) travels on to the CTA target.
pub fn smart_cta_link(button_link: &str, params: &BackParams, current_path: &str) -> String {
    let return_path = present(&params.return_path).unwrap_or(current_path);
    let from = present(&params.from).unwrap_or("page");
    let sep = if button_link.contains('?') { '&' } else { '?' };
    format!(
        "{}{}from={}&returnPath={}",
        button_link,
        sep,
        url_encode(from),
        url_encode(return_path)
    )
}
