use rocket::http::uri::Origin;
use rocket::response::content::RawHtml;
use rocket::State;

use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::forms::submit::FormOutcome;
use crate::forms::{detect_reference, DemoBookingForm, LeadForm, ServiceRequestForm};
use crate::listing::ListingFilter;
use crate::models::case_study::CaseStudy;
use crate::models::company::{AboutCollections, Leader, Office};
use crate::models::pages::{AboutPage, ContactPage, LeadershipPage, ProductPage, ServicePage};
use crate::models::product::Product;
use crate::models::service::{Service, Solution};
use crate::navigation::back_link::BackParams;
use crate::render::Page;
use crate::security::client::Attribution;
use crate::views::contact::ReferencePrefill;
use crate::views::{self, Site};

/// Build the page shell around `body`.
pub(crate) fn page(
    site: &Site,
    uri: &Origin<'_>,
    title: Option<&str>,
    description: Option<&str>,
    body: String,
    captcha: bool,
) -> RawHtml<String> {
    RawHtml(site.render(&Page {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        path: uri.to_string(),
        body,
        captcha,
    }))
}

/// The "how did you hear about us" value detected for this visit.
pub(crate) fn reference_prefill(attribution: &Attribution, config: &SiteConfig) -> ReferencePrefill {
    ReferencePrefill {
        value: detect_reference(
            attribution.utm_source.as_deref(),
            attribution.ref_param.as_deref(),
            attribution.referer.as_deref(),
            config.site_host().as_deref(),
        ),
    }
}

// ── Home ───────────────────────────────────────────────

#[get("/")]
pub async fn homepage(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    attribution: Attribution,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let site = Site::load(cms, config).await;
    let prefill = reference_prefill(&attribution, config);
    let mut lead = LeadForm::default();
    if let Some(source) = &prefill.value {
        lead.reference = source.clone();
    }
    let body = views::home::render(&site, &FormOutcome::idle(lead), &prefill);
    page(&site, uri, None, None, body, true)
}

// ── Products ───────────────────────────────────────────

#[get("/products/<slug>?<back..>")]
pub async fn product_detail(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    slug: &str,
    back: BackParams,
    uri: &Origin<'_>,
) -> Option<RawHtml<String>> {
    let (site, product, product_page) = rocket::tokio::join!(
        Site::load(cms, config),
        Product::find_by_slug(cms, slug),
        ProductPage::fetch(cms),
    );
    let product = product?;
    let body = views::product::render(&site, &product, product_page.as_ref(), &back);
    let description = product
        .short_description
        .as_deref()
        .or(product.hero_sub_title.as_deref());
    Some(page(&site, uri, Some(product.heading()), description, body, false))
}

// ── Case studies ───────────────────────────────────────

#[get("/case-studies?<product>&<domain>&<back..>")]
pub async fn case_study_list(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    product: Option<&str>,
    domain: Option<&str>,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, studies) = rocket::tokio::join!(Site::load(cms, config), CaseStudy::list(cms));
    let filter = ListingFilter::from_query(product, domain);
    let body = views::case_studies::render_list(&site, &studies, &filter, &back);
    page(
        &site,
        uri,
        Some("Case Studies"),
        Some("Explore our success stories and customer case studies"),
        body,
        false,
    )
}

#[get("/case-studies/<slug>?<back..>")]
pub async fn case_study_detail(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    slug: &str,
    back: BackParams,
    uri: &Origin<'_>,
) -> Option<RawHtml<String>> {
    let (site, study, product_page) = rocket::tokio::join!(
        Site::load(cms, config),
        CaseStudy::find_by_slug(cms, slug),
        ProductPage::fetch(cms),
    );
    let study = study?;
    let body = views::case_studies::render_detail(&site, &study, product_page.as_ref(), &back);
    let description = study.summary.as_deref().or(study.description.as_deref());
    Some(page(&site, uri, Some(&study.title), description, body, false))
}

// ── Services & solutions ───────────────────────────────

#[get("/services?<back..>")]
pub async fn services(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, services, service_page) = rocket::tokio::join!(
        Site::load(cms, config),
        Service::list(cms),
        ServicePage::fetch(cms),
    );
    let body = views::services::render_list(&site, &services, service_page.as_ref(), &back);
    page(
        &site,
        uri,
        Some("Services"),
        Some("Technology solutions and expert development services"),
        body,
        false,
    )
}

#[get("/solutions/<slug>?<back..>")]
pub async fn solution_detail(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    slug: &str,
    back: BackParams,
    uri: &Origin<'_>,
) -> Option<RawHtml<String>> {
    let (site, solution) = rocket::tokio::join!(
        Site::load(cms, config),
        Solution::find_by_slug(cms, slug),
    );
    let solution = solution.or_else(|| Solution::builtin(slug))?;
    let body = views::services::render_solution(&site, &solution, &back);
    Some(page(
        &site,
        uri,
        Some(&solution.title),
        solution.short_description.as_deref(),
        body,
        false,
    ))
}

// ── Company ────────────────────────────────────────────

#[get("/company/about-us?<back..>")]
pub async fn about_us(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, about, lists) = rocket::tokio::join!(
        Site::load(cms, config),
        AboutPage::fetch(cms),
        AboutCollections::fetch(cms),
    );
    let body = views::company::render_about(&site, about.as_ref(), &lists, &back);
    page(
        &site,
        uri,
        Some("About Us"),
        about.as_ref().and_then(|a| a.description.as_deref()),
        body,
        false,
    )
}

#[get("/company/leadership?<back..>")]
pub async fn leadership(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, leadership_page, leaders) = rocket::tokio::join!(
        Site::load(cms, config),
        LeadershipPage::fetch(cms),
        Leader::list(cms),
    );
    let body = views::company::render_leadership(&site, leadership_page.as_ref(), &leaders, &back);
    page(&site, uri, Some("Leadership"), None, body, false)
}

// ── Contact & forms ────────────────────────────────────

#[get("/contact?<back..>")]
pub async fn contact(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    attribution: Attribution,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, contact_page, offices) = rocket::tokio::join!(
        Site::load(cms, config),
        ContactPage::fetch(cms),
        Office::list(cms),
    );
    let prefill = reference_prefill(&attribution, config);
    let mut lead = LeadForm::default();
    if let Some(source) = &prefill.value {
        lead.reference = source.clone();
    }
    let body = views::contact::render_contact(
        &site,
        contact_page.as_ref(),
        &offices,
        &FormOutcome::idle(lead),
        &prefill,
        &back,
    );
    page(&site, uri, Some("Contact Us"), None, body, true)
}

#[get("/book-demo?<back..>")]
pub async fn book_demo(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    attribution: Attribution,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let site = Site::load(cms, config).await;
    let prefill = reference_prefill(&attribution, config);
    let mut booking = DemoBookingForm::default();
    if let Some(source) = &prefill.value {
        booking.reference = source.clone();
    }
    let body = views::contact::render_book_demo(&site, &FormOutcome::idle(booking), &prefill, &back);
    page(
        &site,
        uri,
        Some("Book a Demo"),
        Some("Schedule a personalized demo of our products. See our solutions in action."),
        body,
        true,
    )
}

#[get("/request-services?<back..>")]
pub async fn request_services(
    cms: &State<CmsClient>,
    config: &State<SiteConfig>,
    attribution: Attribution,
    back: BackParams,
    uri: &Origin<'_>,
) -> RawHtml<String> {
    let (site, services) = rocket::tokio::join!(Site::load(cms, config), Service::list(cms));
    let prefill = reference_prefill(&attribution, config);
    let mut request = ServiceRequestForm::default();
    if let Some(source) = &prefill.value {
        request.reference = source.clone();
    }
    let body = views::contact::render_request_services(
        &site,
        &services,
        &FormOutcome::idle(request),
        &prefill,
        &back,
    );
    page(
        &site,
        uri,
        Some("Request for Services"),
        Some("Tell us about your project needs and we'll get back to you."),
        body,
        true,
    )
}

// ── Robots.txt ─────────────────────────────────────────

#[get("/robots.txt")]
pub fn robots() -> &'static str {
    "User-agent: *\nAllow: /\n"
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        homepage,
        product_detail,
        case_study_list,
        case_study_detail,
        services,
        solution_detail,
        about_us,
        leadership,
        contact,
        book_demo,
        request_services,
        robots,
    ]
}
