use rocket::form::Form;
use rocket::http::uri::Origin;
use rocket::response::content::RawHtml;
use rocket::State;
use std::time::Duration;

use super::public::page;
use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::forms::submit::{self, FormOutcome};
use crate::forms::{DemoBookingForm, LeadForm, ServiceRequestForm, Submission};
use crate::models::company::Office;
use crate::models::pages::ContactPage;
use crate::models::service::Service;
use crate::navigation::back_link::BackParams;
use crate::rate_limit::RateLimiter;
use crate::security::client::ClientIp;
use crate::views::contact::ReferencePrefill;
use crate::views::{self, Site};

const WINDOW: Duration = Duration::from_secs(60 * 60);

/// Rate-limit, validate and forward one submission.
async fn handle<F: Submission>(
    form: F,
    bucket: &str,
    client: &ClientIp,
    cms: &CmsClient,
    config: &SiteConfig,
    limiter: &RateLimiter,
) -> FormOutcome<F> {
    let key = format!("{}:{}", bucket, client.0);
    if !limiter.check_and_record(&key, config.submissions_per_hour.max(1), WINDOW) {
        log::warn!("Rate limit hit for {} from {}", bucket, client.0);
        return FormOutcome::refused(form);
    }
    limiter.cleanup(WINDOW);
    submit::process(&form, config.captcha_site_key(), cms).await
}

#[post("/contact", data = "<form>")]
pub async fn contact_submit(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    client: ClientIp,
    uri: &Origin<'_>,
    form: Form<LeadForm>,
) -> RawHtml<String> {
    let (site, contact_page, offices) = rocket::tokio::join!(
        Site::load(cms, config),
        ContactPage::fetch(cms),
        Office::list(cms),
    );
    let outcome = handle(form.into_inner(), "lead", &client, cms, config, limiter).await;
    let body = views::contact::render_contact(
        &site,
        contact_page.as_ref(),
        &offices,
        &outcome,
        &ReferencePrefill::default(),
        &BackParams::default(),
    );
    page(&site, uri, Some("Contact Us"), None, body, true)
}

#[post("/book-demo", data = "<form>")]
pub async fn book_demo_submit(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    client: ClientIp,
    uri: &Origin<'_>,
    form: Form<DemoBookingForm>,
) -> RawHtml<String> {
    let site = Site::load(cms, config).await;
    let outcome = handle(form.into_inner(), "demo", &client, cms, config, limiter).await;
    let body = views::contact::render_book_demo(
        &site,
        &outcome,
        &ReferencePrefill::default(),
        &BackParams::default(),
    );
    page(&site, uri, Some("Book a Demo"), None, body, true)
}

#[post("/request-services", data = "<form>")]
pub async fn request_services_submit(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    client: ClientIp,
    uri: &Origin<'_>,
    form: Form<ServiceRequestForm>,
) -> RawHtml<String> {
    let (site, services) = rocket::tokio::join!(Site::load(cms, config), Service::list(cms));
    let outcome = handle(form.into_inner(), "service", &client, cms, config, limiter).await;
    let body = views::contact::render_request_services(
        &site,
        &services,
        &outcome,
        &ReferencePrefill::default(),
        &BackParams::default(),
    );
    page(&site, uri, Some("Request for Services"), None, body, true)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![contact_submit, book_demo_submit, request_services_submit]
}
