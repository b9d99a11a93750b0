pub mod case_studies;
pub mod company;
pub mod contact;
pub mod home;
pub mod product;
pub mod services;

use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::media::{self, MediaBase};
use crate::models::company::Domain;
use crate::models::global::{GlobalSettings, HomePage};
use crate::models::non_blank;
use crate::models::pages::Cta;
use crate::models::product::{Product, ProductRef};
use crate::navigation::back_link::{self, BackParams};
use crate::navigation::{self, NavLink};
use crate::render::{self, html_escape, Footer, Layout, Page};
use crate::typography::Theme;

/// Data shared by every page: the chrome plus the product and domain lists
/// that menus, filters and form selects draw from.
pub struct Site {
    pub layout: Layout,
    pub media: MediaBase,
    pub home: Option<HomePage>,
    pub products: Vec<ProductRef>,
    pub domains: Vec<Domain>,
}

impl Site {
    pub async fn load(cms: &CmsClient, config: &SiteConfig) -> Site {
        let (global, home, products, domains) = rocket::tokio::join!(
            GlobalSettings::fetch(cms),
            HomePage::fetch(cms),
            Product::nav_list(cms),
            Domain::nav_list(cms),
        );

        Site::assemble(config, global, home, products, domains)
    }

    /// Chrome built from configuration alone, for error pages.
    pub fn offline(config: &SiteConfig) -> Site {
        Site::assemble(config, None, None, None, None)
    }

    fn assemble(
        config: &SiteConfig,
        global: Option<GlobalSettings>,
        home: Option<HomePage>,
        products: Option<Vec<ProductRef>>,
        domains: Option<Vec<Domain>>,
    ) -> Site {
        let media = config.media_base();
        let global = global.unwrap_or_default();

        let nav: Vec<NavLink> = match &global.navbar_links {
            Some(links) if !links.is_empty() => {
                navigation::compose(links, products.as_deref(), domains.as_deref())
            }
            _ => navigation::default_links(),
        };

        let layout = Layout {
            site_name: non_blank(&global.site_title)
                .unwrap_or(config.site_name.as_str())
                .to_string(),
            meta_title: non_blank(&global.meta_title)
                .or(non_blank(&global.site_title))
                .map(str::to_string),
            meta_description: non_blank(&global.meta_description).map(str::to_string),
            site_origin: config.site_origin().to_string(),
            logo_url: media::first(global.company_logo.as_ref(), &media),
            favicon_url: media::first(global.favicon.as_ref(), &media),
            nav,
            cta_text: non_blank(&global.navbar_cta_text)
                .unwrap_or("Book a Demo")
                .to_string(),
            cta_link: non_blank(&global.navbar_cta_link)
                .unwrap_or("/book-demo")
                .to_string(),
            theme: theme_from(&global),
            footer: footer_from(home.as_ref()),
            footer_videos: media::resolve(global.footer_videos.as_ref(), &media),
            captcha_site_key: config.captcha_site_key().map(str::to_string),
        };

        Site {
            layout,
            media,
            home,
            products: products.unwrap_or_default(),
            domains: domains.unwrap_or_default(),
        }
    }

    /// Wrap a page body in the site chrome.
    pub fn render(&self, page: &Page) -> String {
        render::render_page(&self.layout, page)
    }
}

fn theme_from(global: &GlobalSettings) -> Theme {
    let defaults = Theme::default();
    Theme {
        primary: non_blank(&global.theme_color).map(str::to_string),
        background: non_blank(&global.site_background_color)
            .map(str::to_string)
            .unwrap_or(defaults.background),
        heading_font: non_blank(&global.heading_font)
            .map(str::to_string)
            .unwrap_or(defaults.heading_font),
        body_font: non_blank(&global.body_font)
            .map(str::to_string)
            .unwrap_or(defaults.body_font),
    }
}

fn footer_from(home: Option<&HomePage>) -> Footer {
    let Some(home) = home else {
        return Footer {
            title: "Contact Information".to_string(),
            description: String::new(),
            ..Default::default()
        };
    };
    Footer {
        title: non_blank(&home.contact_section_title)
            .unwrap_or("Contact Information")
            .to_string(),
        description: non_blank(&home.contact_section_description)
            .unwrap_or_default()
            .to_string(),
        email: non_blank(&home.contact_email).map(str::to_string),
        phone: non_blank(&home.contact_phone).map(str::to_string),
        address: non_blank(&home.contact_address).map(str::to_string),
        social: home
            .social_links()
            .into_iter()
            .map(|(label, url)| (label, url.to_string()))
            .collect(),
    }
}

// ── Shared components ──────────────────────────────────

/// The smart back control: a link when the query names a target, otherwise
/// a history-back button.
pub fn back_button(params: &BackParams) -> String {
    let label = html_escape(&back_link::label(params));
    match back_link::resolve(params) {
        Some(href) => format!(
            r#"<a href="{}" class="back-button">&larr; {}</a>"#,
            html_escape(&href),
            label
        ),
        None => format!(
            r#"<button type="button" class="back-button" data-history-back data-fallback="/">&larr; {}</button>"#,
            label
        ),
    }
}

/// Page header band with title, subtitle and an optional back control.
pub fn page_hero(title: &str, subtitle: Option<&str>, back: Option<&str>, background: Option<&str>) -> String {
    let style = background
        .map(|url| format!(r#" style="background-image:url('{}')""#, html_escape(url)))
        .unwrap_or_default();
    let subtitle = subtitle
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("<p class=\"page-hero-subtitle\">{}</p>", html_escape(s)))
        .unwrap_or_default();
    format!(
        r#"<section class="page-hero"{style}>
    <div class="container">
        {back}
        <h1>{title}</h1>
        {subtitle}
    </div>
</section>"#,
        style = style,
        back = back.unwrap_or(""),
        title = html_escape(title),
        subtitle = subtitle,
    )
}

/// Closing call-to-action band.
pub fn cta_section(cta: &Cta, href: &str) -> String {
    let description = cta
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", html_escape(d)))
        .unwrap_or_default();
    format!(
        r#"<section class="cta-section">
    <div class="container">
        <h2>{}</h2>
        {}
        <a href="{}" class="btn btn-light">{}</a>
    </div>
</section>"#,
        html_escape(&cta.title),
        description,
        html_escape(href),
        html_escape(&cta.button_text)
    )
}

pub fn image(url: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="{}" loading="lazy">"#,
        html_escape(url),
        html_escape(alt),
        class
    )
}

/// Body of the styled 404 page.
pub fn not_found_body() -> String {
    r#"<section class="error-page">
    <div class="container">
        <h1>404</h1>
        <p>The page you are looking for could not be found.</p>
        <a href="/" class="btn btn-primary">&larr; Back to home</a>
    </div>
</section>"#
        .to_string()
}

pub fn server_error_body() -> String {
    r#"<section class="error-page">
    <div class="container">
        <h1>500</h1>
        <p>Something went wrong on our side. Please try again.</p>
        <a href="/" class="btn btn-primary">&larr; Back to home</a>
    </div>
</section>"#
        .to_string()
}
