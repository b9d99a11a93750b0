use super::html_escape;

/// Site-wide defaults the per-page meta falls back to.
pub struct SiteMeta<'a> {
    pub site_name: &'a str,
    pub site_origin: &'a str,
    /// Title used on pages that set none (the home page).
    pub default_title: Option<&'a str>,
    pub default_description: Option<&'a str>,
}

const FALLBACK_DESCRIPTION: &str = "AI-driven, cutting-edge solutions across Healthcare, Logistics, Data Analytics, IoT, and Business Management.";

/// Build meta tags HTML string for a page
pub fn build_meta(
    site: &SiteMeta<'_>,
    title: Option<&str>,
    description: Option<&str>,
    path: &str,
) -> String {
    let page_title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => format!("{} | {}", t, site.site_name),
        None => site.default_title.unwrap_or(site.site_name).to_string(),
    };

    let page_desc = description
        .or(site.default_description)
        .unwrap_or(FALLBACK_DESCRIPTION);
    let canonical_path = path.split('?').next().unwrap_or(path);
    let canonical = format!("{}{}", site.site_origin, canonical_path);

    format!(
        r#"<title>{title}</title>
<meta name="description" content="{desc}">
<link rel="canonical" href="{canonical}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{desc}">
<meta property="og:url" content="{canonical}">
<meta property="og:site_name" content="{site_name}">
<meta property="og:type" content="website">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{desc}">"#,
        title = html_escape(&page_title),
        desc = html_escape(page_desc),
        canonical = html_escape(&canonical),
        site_name = html_escape(site.site_name),
    )
}
