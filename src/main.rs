#[macro_use]
extern crate rocket;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::fs::{relative, FileServer};
use rocket::http::{Header, Method};
use rocket::response::content::RawHtml;
use rocket::{Build, Request, Rocket};

mod cms;
mod config;
mod forms;
mod listing;
mod media;
mod models;
mod navigation;
mod rate_limit;
mod render;
mod richtext;
mod routes;
mod security;
mod seo;
mod typography;
mod views;
mod widgets;

#[cfg(test)]
mod tests;

use cms::CmsClient;
use config::SiteConfig;
use rate_limit::RateLimiter;
use render::Page;
use views::Site;

/// Short shared caching for rendered pages; form responses are never cached.
pub struct PageCacheHeaders;

#[rocket::async_trait]
impl Fairing for PageCacheHeaders {
    fn info(&self) -> Info {
        Info { name: "Page Cache-Control", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut rocket::Response<'r>) {
        if !res.content_type().map_or(false, |ct| ct.is_html()) {
            return;
        }
        if req.method() == Method::Post || res.status().code >= 400 {
            res.set_header(Header::new("Cache-Control", "no-store"));
        } else {
            res.set_header(Header::new(
                "Cache-Control",
                "public, max-age=60, stale-while-revalidate=300",
            ));
        }
    }
}

fn error_page(req: &Request<'_>, title: &str, body: String) -> RawHtml<String> {
    let config = req
        .rocket()
        .state::<SiteConfig>()
        .cloned()
        .unwrap_or_default();
    let site = Site::offline(&config);
    RawHtml(site.render(&Page {
        title: Some(title.to_string()),
        description: None,
        path: req.uri().path().to_string(),
        body,
        captcha: false,
    }))
}

#[catch(404)]
fn not_found(req: &Request<'_>) -> RawHtml<String> {
    error_page(req, "Page Not Found", views::not_found_body())
}

#[catch(500)]
fn server_error(req: &Request<'_>) -> RawHtml<String> {
    error_page(req, "Error", views::server_error_body())
}

/// Assemble the application from a figment: config, CMS client, limiter,
/// routes, static files and catchers.
pub fn app(figment: Figment) -> Rocket<Build> {
    let config: SiteConfig = figment.extract().unwrap_or_else(|e| {
        log::warn!("Invalid site configuration, using defaults: {}", e);
        SiteConfig::default()
    });
    let cms = CmsClient::new(&config).expect("Failed to build CMS client");

    log::info!("Serving content from {}", config.cms_base());
    if config.captcha_site_key().is_none() {
        log::warn!("No recaptcha_site_key configured; forms accept submissions without a token");
    }

    rocket::custom(figment)
        .manage(cms)
        .manage(config)
        .manage(RateLimiter::new())
        .attach(PageCacheHeaders)
        .mount("/static", FileServer::from(relative!("static")))
        .mount("/", routes::public::routes())
        .mount("/", routes::forms::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();
    app(rocket::Config::figment())
}
