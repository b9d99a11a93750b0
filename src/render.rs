use crate::navigation::{is_active, is_parent_active, normalize_href, NavLink};
use crate::security::recaptcha;
use crate::seo;
use crate::typography::{self, Theme};

/// Everything the page chrome needs: branding, menu, theme and footer.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub site_name: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub site_origin: String,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub nav: Vec<NavLink>,
    pub cta_text: String,
    pub cta_link: String,
    pub theme: Theme,
    pub footer: Footer,
    pub footer_videos: Vec<String>,
    pub captcha_site_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Footer {
    pub title: String,
    pub description: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub social: Vec<(&'static str, String)>,
}

/// One rendered page: its meta and the HTML inside `<main>`.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Request path (plus query, when it matters for link highlighting).
    pub path: String,
    pub body: String,
    /// Load the reCAPTCHA script for a form on this page.
    pub captcha: bool,
}

/// Wrap a page body in the site shell.
pub fn render_page(layout: &Layout, page: &Page) -> String {
    let seo_meta = seo::build_meta(
        &seo::SiteMeta {
            site_name: &layout.site_name,
            site_origin: &layout.site_origin,
            default_title: layout.meta_title.as_deref(),
            default_description: layout.meta_description.as_deref(),
        },
        page.title.as_deref(),
        page.description.as_deref(),
        &page.path,
    );

    let favicon_link = layout
        .favicon_url
        .as_deref()
        .map(|url| format!(r#"<link rel="icon" href="{}">"#, html_escape(url)))
        .unwrap_or_default();

    let captcha_script = match (&layout.captcha_site_key, page.captcha) {
        (Some(_), true) => recaptcha::script_tag(),
        _ => String::new(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {seo_meta}
    {favicon_link}
{font_links}    <link rel="stylesheet" href="/static/site.css">
    <style>
        {css_vars}
    </style>
</head>
<body style="background-color:{background}">
    {navbar}
    <main class="site-main">
        {body}
    </main>
    {footer_videos}
    {footer}
    <a href="#" class="scroll-top" aria-label="Scroll to top">&#8593;</a>
    <script src="/static/site.js" defer></script>
    {captcha_script}
</body>
</html>"##,
        seo_meta = seo_meta,
        favicon_link = favicon_link,
        font_links = typography::build_font_links(&layout.theme),
        css_vars = typography::build_css_variables(&layout.theme),
        background = html_escape(&layout.theme.background),
        navbar = build_navbar(layout, &page.path),
        body = page.body,
        footer_videos = build_footer_videos(&layout.footer_videos),
        footer = build_footer(layout),
        captcha_script = captcha_script,
    )
}

fn build_logo_html(layout: &Layout) -> String {
    match &layout.logo_url {
        Some(url) => format!(
            r#"<a href="/" class="site-logo"><img src="{}" alt="{}"></a>"#,
            html_escape(url),
            html_escape(&layout.site_name)
        ),
        None => format!(
            r#"<a href="/" class="site-logo site-logo-text">{}</a>"#,
            html_escape(&layout.site_name)
        ),
    }
}

/// Navbar with dropdowns. The server renders everything closed; `site.js`
/// toggles `data-open` on click.
pub fn build_navbar(layout: &Layout, current: &str) -> String {
    let mut links = String::new();

    for (i, link) in layout.nav.iter().enumerate() {
        let active = if is_parent_active(current, link) { " active" } else { "" };
        if link.has_dropdown() {
            let mut items = String::new();
            for item in &link.dropdown {
                let item_active = if is_active(current, Some(&item.href)) { " active" } else { "" };
                items.push_str(&format!(
                    "<a href=\"{}\" class=\"dropdown-item{}\">{}</a>\n",
                    html_escape(&normalize_href(Some(&item.href))),
                    item_active,
                    html_escape(&item.label)
                ));
            }
            links.push_str(&format!(
                r#"<div class="nav-dropdown{active}" data-dropdown="{i}" data-open="false">
    <button type="button" class="nav-link dropdown-toggle" aria-expanded="false">{label} <span class="chevron">&#9662;</span></button>
    <div class="dropdown-menu">
{items}    </div>
</div>
"#,
                active = active,
                i = i,
                label = html_escape(&link.label),
                items = items,
            ));
        } else {
            links.push_str(&format!(
                "<a href=\"{}\" class=\"nav-link{}\">{}</a>\n",
                html_escape(&normalize_href(link.href.as_deref())),
                active,
                html_escape(&link.label)
            ));
        }
    }

    format!(
        r#"<header class="navbar" data-mobile-open="false">
    <div class="navbar-inner">
        {logo}
        <nav class="nav-links">
{links}        </nav>
        <a href="{cta_link}" class="btn btn-primary nav-cta">{cta_text}</a>
        <button type="button" class="mobile-menu-btn" aria-label="Menu">&#9776;</button>
    </div>
</header>"#,
        logo = build_logo_html(layout),
        links = links,
        cta_link = html_escape(&normalize_href(Some(&layout.cta_link))),
        cta_text = html_escape(&layout.cta_text),
    )
}

fn build_footer_videos(videos: &[String]) -> String {
    if videos.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<section class="footer-videos">"#);
    for url in videos {
        html.push_str(&format!(
            r#"<video src="{}" autoplay muted loop playsinline></video>"#,
            html_escape(url)
        ));
    }
    html.push_str("</section>");
    html
}

fn build_footer(layout: &Layout) -> String {
    let footer = &layout.footer;

    let mut contact = String::new();
    if let Some(phone) = &footer.phone {
        contact.push_str(&format!(
            "<a href=\"tel:{}\" class=\"footer-contact\">{}</a>\n",
            html_escape(phone),
            html_escape(phone)
        ));
    }
    if let Some(email) = &footer.email {
        contact.push_str(&format!(
            "<a href=\"mailto:{}\" class=\"footer-contact\">{}</a>\n",
            html_escape(email),
            html_escape(email)
        ));
    }
    if let Some(address) = &footer.address {
        contact.push_str(&format!(
            "<p class=\"footer-contact\">{}</p>\n",
            html_escape(address).replace('\n', "<br>")
        ));
    }

    let social: String = footer
        .social
        .iter()
        .map(|(label, url)| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"{label}\">{label}</a>",
                html_escape(url),
                label = label
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<footer class="site-footer">
    <div class="footer-inner">
        <div class="footer-brand">
            {logo}
            <h3>{title}</h3>
            <p>{description}</p>
            {contact}
        </div>
        <nav class="footer-links">
            <a href="/company/about-us">About</a>
            <a href="/services">Services</a>
            <a href="/case-studies">Case Studies</a>
            <a href="/contact">Contact</a>
            <a href="/book-demo">Book a Demo</a>
        </nav>
        <div class="footer-social">{social}</div>
    </div>
    <div class="footer-bottom">&copy; {year} {site_name}. All rights reserved.</div>
</footer>"#,
        logo = build_logo_html(layout),
        title = html_escape(&footer.title),
        description = html_escape(&footer.description),
        contact = contact,
        social = social,
        year = chrono::Utc::now().format("%Y"),
        site_name = html_escape(&layout.site_name),
    )
}

/// Percent-encode everything outside the unreserved set (spaces become `%20`).
pub fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
