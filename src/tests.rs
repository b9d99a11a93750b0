#![cfg(test)]

use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cms::{self, decode_list, decode_one, Envelope, Query, ResponseCache};
use crate::config::SiteConfig;
use crate::forms::submit::{self, FormOutcome, SubmissionSink};
use crate::forms::{
    detect_reference, is_valid_email, require_captcha, DemoBookingForm, FieldErrors, FormEvent,
    FormMachine, FormStatus, LeadForm, RevertPolicy, ServiceRequestForm, Submission,
};
use crate::listing::{clear_href, filter_case_studies, result_count_label, with_param, ListingFilter};
use crate::media::{self, MediaBase, MediaRef};
use crate::models::case_study::CaseStudy;
use crate::models::company::{domain_names, Domain};
use crate::models::global::{HomePage, Testimonial};
use crate::models::pages::{ContactPage, ProductPage, ServicePage};
use crate::models::product::{Product, ProductRef};
use crate::models::service::Solution;
use crate::navigation::back_link::{self, BackParams};
use crate::navigation::{self, is_active, is_parent_active, normalize_href, NavItem, NavLink};
use crate::rate_limit::RateLimiter;
use crate::render::{html_escape, url_encode, Page};
use crate::richtext;
use crate::seo::{build_meta, SiteMeta};
use crate::typography::{build_css_variables, Theme};
use crate::views::{self, Site};
use crate::widgets::{marquee_track, Carousel};

fn local_base() -> MediaBase {
    MediaBase {
        base_url: "http://localhost:1337".to_string(),
        local: true,
    }
}

/// Decode a media field the way a model field would, then resolve it.
fn resolve_json(value: Value, base: &MediaBase) -> Vec<String> {
    let media = serde_json::from_value::<Option<MediaRef>>(value).ok().flatten();
    media::resolve(media.as_ref(), base)
}

fn hosted_base() -> MediaBase {
    MediaBase {
        base_url: "https://cms.example.com".to_string(),
        local: false,
    }
}

fn study(json: Value) -> CaseStudy {
    serde_json::from_value(json).unwrap()
}

fn product_ref(name: &str, slug: &str) -> ProductRef {
    ProductRef {
        id: None,
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

fn domain(name: &str) -> Domain {
    Domain {
        name: name.to_string(),
        ..Default::default()
    }
}

fn valid_lead() -> LeadForm {
    LeadForm {
        name: "Asha".into(),
        email: "asha@example.com".into(),
        domain_of_interest: "Healthcare".into(),
        reason: "Pricing".into(),
        ..Default::default()
    }
}

fn valid_demo() -> DemoBookingForm {
    DemoBookingForm {
        first_name: "Ravi".into(),
        last_name: "Kumar".into(),
        email: "ravi@example.com".into(),
        company: "Acme".into(),
        product: "Fleet Tracking".into(),
        ..Default::default()
    }
}

/// Records every submission instead of calling the CMS.
struct RecordingSink {
    calls: Mutex<Vec<(String, Value, Option<String>)>>,
    fail: bool,
}

impl RecordingSink {
    fn new(fail: bool) -> Self {
        RecordingSink {
            calls: Mutex::new(Vec::new()),
            fail,
        }
    }

    fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[rocket::async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(
        &self,
        collection: &str,
        payload: &Value,
        captcha_token: Option<&str>,
    ) -> Result<(), String> {
        self.calls.lock().unwrap().push((
            collection.to_string(),
            payload.clone(),
            captcha_token.map(str::to_string),
        ));
        if self.fail {
            Err("CMS returned 500".to_string())
        } else {
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Envelope normalization
// ═══════════════════════════════════════════════════════════

#[test]
fn envelope_flat_single_type() {
    let body = json!({ "data": { "id": 1, "siteName": "Datayaan" }, "meta": {} });
    let content = cms::normalize(body).unwrap();
    assert_eq!(content["siteName"], "Datayaan");
    assert_eq!(content["id"], 1);
}

#[test]
fn envelope_wrapped_single_type() {
    let body = json!({ "data": { "id": 7, "attributes": { "siteName": "Datayaan" } } });
    assert!(matches!(
        Envelope::from_json(body.clone()),
        Some(Envelope::Wrapped(_))
    ));
    let content = cms::normalize(body).unwrap();
    assert_eq!(content["siteName"], "Datayaan");
}

#[test]
fn envelope_flat_and_wrapped_normalize_alike() {
    let flat = json!({ "data": {
        "id": 7,
        "siteName": "Datayaan",
        "logo": { "id": 2, "url": "/uploads/logo.png" },
        "socialLinks": [{ "id": 1, "platform": "LinkedIn" }]
    }});
    let wrapped = json!({ "data": { "id": 7, "attributes": {
        "siteName": "Datayaan",
        "logo": { "data": { "id": 2, "attributes": { "url": "/uploads/logo.png" } } },
        "socialLinks": [{ "id": 1, "platform": "LinkedIn" }]
    }}});
    assert_eq!(cms::normalize(flat), cms::normalize(wrapped));
}

#[test]
fn envelope_collection() {
    let body = json!({ "data": [
        { "id": 1, "attributes": { "name": "Fleet" } },
        { "id": 2, "name": "Clinic" }
    ]});
    let content = cms::normalize(body).unwrap();
    let items = content.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Fleet");
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[1]["name"], "Clinic");
}

#[test]
fn envelope_flattens_nested_relations() {
    let body = json!({ "data": { "id": 1, "attributes": {
        "title": "Route optimisation",
        "products": { "data": [ { "id": 3, "attributes": { "name": "Fleet", "slug": "fleet" } } ] },
        "thumbnail": { "data": null }
    }}});
    let content = cms::normalize(body).unwrap();
    assert_eq!(content["products"][0]["slug"], "fleet");
    assert_eq!(content["products"][0]["id"], 3);
    assert!(content["thumbnail"].is_null());
}

#[test]
fn envelope_without_data_is_none() {
    assert!(cms::normalize(json!({ "error": { "status": 404 } })).is_none());
    assert!(cms::normalize(json!({ "data": null })).is_none());
    assert!(cms::normalize(json!([1, 2])).is_none());
}

#[test]
fn decode_one_takes_first_of_list() {
    let content = Some(json!([{ "name": "A", "slug": "a" }, { "name": "B", "slug": "b" }]));
    let first: ProductRef = decode_one(content).unwrap();
    assert_eq!(first.slug, "a");
    assert!(decode_one::<ProductRef>(Some(json!([]))).is_none());
    assert!(decode_one::<ProductRef>(None).is_none());
}

#[test]
fn decode_list_skips_bad_records() {
    let content = Some(json!([{ "name": "A", "slug": "a" }, 42, { "name": "B" }]));
    let items: Vec<ProductRef> = decode_list(content);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "B");
    assert!(decode_list::<ProductRef>(None).is_empty());
}

// ═══════════════════════════════════════════════════════════
// CMS query builder and cache
// ═══════════════════════════════════════════════════════════

#[test]
fn query_builds_filters_and_populate() {
    let path = Query::new("products")
        .filter_eq("slug", "fleet tracking")
        .populate(&["heroBanner", "features.icon"])
        .build();
    assert_eq!(
        path,
        "/products?filters[slug][$eq]=fleet+tracking&populate[0]=heroBanner&populate[1]=features.icon"
    );
}

#[test]
fn query_keeps_star_and_colon() {
    let path = Query::new("/case-studies")
        .populate_all()
        .sort_asc("order")
        .build();
    assert_eq!(path, "/case-studies?populate=*&sort[0]=order:asc");
}

#[test]
fn query_without_params() {
    assert_eq!(Query::new("global").build(), "/global");
    assert_eq!(
        Query::new("domains").fields(&["name", "slug"]).build(),
        "/domains?fields[0]=name&fields[1]=slug"
    );
}

#[test]
fn cache_serves_fresh_and_drops_stale() {
    let cache = ResponseCache::new();
    let start = Instant::now();
    cache.put_at("/global", json!({"a": 1}), Duration::from_secs(60), start);
    assert_eq!(
        cache.get_at("/global", start + Duration::from_secs(30)),
        Some(json!({"a": 1}))
    );
    assert!(cache
        .get_at("/global", start + Duration::from_secs(61))
        .is_none());
}

#[test]
fn cache_evicts_oldest_at_capacity() {
    let cache = ResponseCache::with_capacity(2);
    let start = Instant::now();
    let ttl = Duration::from_secs(600);
    cache.put_at("/products?filters[slug][$eq]=a", json!([1]), ttl, start);
    cache.put_at("/products?filters[slug][$eq]=b", json!([2]), ttl, start + Duration::from_secs(1));
    cache.put_at("/products?filters[slug][$eq]=c", json!([3]), ttl, start + Duration::from_secs(2));

    let now = start + Duration::from_secs(3);
    assert!(cache.get_at("/products?filters[slug][$eq]=a", now).is_none());
    assert_eq!(cache.get_at("/products?filters[slug][$eq]=b", now), Some(json!([2])));
    assert_eq!(cache.get_at("/products?filters[slug][$eq]=c", now), Some(json!([3])));
}

#[test]
fn cache_prefers_dropping_expired_entries() {
    let cache = ResponseCache::with_capacity(2);
    let start = Instant::now();
    cache.put_at("/global", json!({"a": 1}), Duration::from_secs(3600), start);
    cache.put_at("/home-page", json!({"b": 2}), Duration::from_secs(5), start + Duration::from_secs(1));
    cache.put_at("/domains", json!([3]), Duration::from_secs(60), start + Duration::from_secs(10));

    let now = start + Duration::from_secs(11);
    assert_eq!(cache.get_at("/global", now), Some(json!({"a": 1})));
    assert!(cache.get_at("/home-page", now).is_none());
    assert_eq!(cache.get_at("/domains", now), Some(json!([3])));
}

#[test]
fn empty_collections_are_not_cached() {
    assert!(!cms::is_cacheable(&json!([])));
    assert!(cms::is_cacheable(&json!([{ "slug": "fleet" }])));
    assert!(cms::is_cacheable(&json!({ "siteName": "Datayaan" })));
}

#[test]
fn cms_client_api_url() {
    let config = SiteConfig {
        cms_url: "https://cms.example.com/".into(),
        ..Default::default()
    };
    let client = cms::CmsClient::new(&config).unwrap();
    assert_eq!(client.api_url("/products"), "https://cms.example.com/api/products");
    assert_eq!(client.api_url("global"), "https://cms.example.com/api/global");
}

/// Answer a single HTTP request with a canned response. Returns the base URL.
fn one_shot_cms(status: &'static str, body: &'static str) -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{}", addr)
}

fn cms_at(base: String) -> cms::CmsClient {
    let config = SiteConfig {
        cms_url: base,
        cms_timeout_secs: 2,
        ..Default::default()
    };
    cms::CmsClient::new(&config).unwrap()
}

#[rocket::async_test]
async fn cms_fetch_normalizes_success() {
    let client = cms_at(one_shot_cms("200 OK", r#"{"data":{"id":1,"attributes":{"siteName":"Datayaan"}}}"#));
    let content = client.fetch("/global").await.unwrap();
    assert_eq!(content["siteName"], "Datayaan");
}

#[rocket::async_test]
async fn cms_fetch_server_error_is_none() {
    let client = cms_at(one_shot_cms("500 Internal Server Error", r#"{"error":{"status":500}}"#));
    assert!(client.fetch("/global").await.is_none());
}

#[rocket::async_test]
async fn cms_fetch_bad_json_is_none() {
    let client = cms_at(one_shot_cms("200 OK", "{\"data\": [oops"));
    assert!(client.fetch("/products").await.is_none());
}

// ═══════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════

#[test]
fn config_local_detection_and_captcha_key() {
    let mut config = SiteConfig::default();
    assert!(config.is_local());
    assert!(config.captcha_site_key().is_none());

    config.cms_url = "https://cms.datayaan.com".into();
    config.recaptcha_site_key = Some("  ".into());
    assert!(!config.is_local());
    assert!(config.captcha_site_key().is_none());

    config.recaptcha_site_key = Some("site-key".into());
    assert_eq!(config.captcha_site_key(), Some("site-key"));
}

#[test]
fn config_site_host() {
    let config = SiteConfig {
        site_url: Some("https://www.datayaan.com/".into()),
        ..Default::default()
    };
    assert_eq!(config.site_origin(), "https://www.datayaan.com");
    assert_eq!(config.site_host().as_deref(), Some("www.datayaan.com"));
}

// ═══════════════════════════════════════════════════════════
// Media
// ═══════════════════════════════════════════════════════════

#[test]
fn media_single_object() {
    let v = json!({ "url": "/uploads/logo.png", "alternativeText": "Logo" });
    assert_eq!(
        resolve_json(v, &local_base()),
        vec!["http://localhost:1337/uploads/logo.png"]
    );
}

#[test]
fn media_array() {
    let v = json!([{ "url": "/uploads/a.png" }, { "url": null }, { "url": "https://cdn.example.com/b.png" }]);
    assert_eq!(
        resolve_json(v, &local_base()),
        vec![
            "http://localhost:1337/uploads/a.png",
            "https://cdn.example.com/b.png"
        ]
    );
}

#[test]
fn media_wrapped_data() {
    let one = json!({ "data": { "attributes": { "url": "/uploads/x.png" } } });
    let many = json!({ "data": [ { "attributes": { "url": "/a.png" } }, { "attributes": { "url": "/b.png" } } ] });
    assert_eq!(resolve_json(one, &hosted_base()), vec!["/uploads/x.png"]);
    assert_eq!(resolve_json(many, &hosted_base()).len(), 2);
}

#[test]
fn media_null_and_garbage() {
    assert!(resolve_json(Value::Null, &local_base()).is_empty());
    assert!(resolve_json(json!(12), &local_base()).is_empty());
    assert!(media::resolve(None, &local_base()).is_empty());
}

#[test]
fn media_first_keeps_order() {
    let media: MediaRef = serde_json::from_value(json!([{ "url": "/1.png" }, { "url": "/2.png" }])).unwrap();
    assert_eq!(
        media::first(Some(&media), &local_base()).as_deref(),
        Some("http://localhost:1337/1.png")
    );
}

// ═══════════════════════════════════════════════════════════
// Rich text
// ═══════════════════════════════════════════════════════════

#[test]
fn richtext_passes_block_html_through() {
    let html = "<p>Already <strong>HTML</strong></p>";
    assert_eq!(richtext::render(html), html);
    assert_eq!(richtext::render("  <ul><li>a</li></ul>"), "  <ul><li>a</li></ul>");
}

#[test]
fn richtext_renders_markdown_with_line_breaks() {
    let html = richtext::render("**Bold** line\nnext line");
    assert!(html.contains("<strong>Bold</strong>"));
    assert!(html.contains("<br />"));
}

#[test]
fn richtext_renders_markdown_lists() {
    let html = richtext::render("- item one\n- item two");
    assert!(html.contains("<ul>"));
    assert_eq!(html.matches("<li>").count(), 2);
    assert!(html.contains("<li>item one</li>"));
    assert!(html.contains("<li>item two</li>"));
}

#[test]
fn richtext_empty() {
    assert_eq!(richtext::render(""), "");
}

#[test]
fn richtext_paragraphs_and_lines() {
    assert_eq!(
        richtext::paragraphs("One\n\n\n\nTwo\n\n  "),
        vec!["One".to_string(), "Two".to_string()]
    );
    assert_eq!(
        richtext::lines("GPS\n\n  Routing \n"),
        vec!["GPS".to_string(), "Routing".to_string()]
    );
}

// ═══════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════

fn cms_links() -> Vec<NavLink> {
    vec![
        NavLink {
            label: "Products".into(),
            is_drop_down: true,
            dropdown: vec![NavItem::new("Old", "/old")],
            ..Default::default()
        },
        NavLink {
            label: "Domains".into(),
            is_drop_down: true,
            ..Default::default()
        },
        NavLink {
            label: "Services".into(),
            href: Some("/services".into()),
            ..Default::default()
        },
    ]
}

#[test]
fn nav_compose_fills_products_and_domains() {
    let products = vec![product_ref("Fleet Tracking", "fleet")];
    let domains = vec![domain("Health & Care")];
    let nav = navigation::compose(&cms_links(), Some(&products), Some(&domains));

    assert_eq!(nav[0].dropdown, vec![NavItem::new("Fleet Tracking", "/products/fleet")]);
    assert_eq!(nav[1].dropdown[0].href, "/case-studies?domain=Health%20%26%20Care");
}

#[test]
fn nav_compose_keeps_dropdowns_when_lists_missing() {
    let nav = navigation::compose(&cms_links(), None, None);
    assert_eq!(nav[0].dropdown, vec![NavItem::new("Old", "/old")]);
}

#[test]
fn nav_compose_adds_company() {
    let nav = navigation::compose(&cms_links(), None, None);
    let company = nav.iter().find(|l| l.label == "Company").unwrap();
    assert!(company.has_dropdown());
    assert_eq!(company.dropdown.first().unwrap().href, "/company/about-us");
    assert_eq!(company.dropdown.last().unwrap().href, "/company/leadership");
}

#[test]
fn nav_compose_orders_existing_company() {
    let mut links = cms_links();
    links.push(NavLink {
        label: "Company".into(),
        dropdown: vec![
            NavItem::new("Leadership", "/company/leadership"),
            NavItem::new("Careers", "/careers"),
            NavItem::new("Leadership", "/dup"),
        ],
        ..Default::default()
    });
    let nav = navigation::compose(&links, None, None);
    let company = nav.iter().find(|l| l.label == "Company").unwrap();
    let labels: Vec<&str> = company.dropdown.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["About Us", "Careers", "Leadership"]);
}

#[test]
fn nav_compose_is_idempotent() {
    let products = vec![product_ref("Fleet", "fleet")];
    let domains = vec![domain("Logistics")];
    let once = navigation::compose(&cms_links(), Some(&products), Some(&domains));
    let twice = navigation::compose(&once, Some(&products), Some(&domains));
    assert_eq!(once, twice);
}

#[test]
fn nav_is_active() {
    assert!(is_active("/products/fleet", Some("/products/fleet")));
    assert!(is_active("/company/about-us", Some("/company")));
    assert!(!is_active("/companyx", Some("/company")));
    assert!(is_active("/", Some("/")));
    assert!(!is_active("/services", Some("/")));
    assert!(!is_active("/", Some("#solutions")));
    assert!(is_active(
        "/case-studies?domain=Logistics",
        Some("/case-studies?domain=Logistics")
    ));
    assert!(!is_active("/case-studies", Some("/case-studies?domain=Logistics")));
}

#[test]
fn nav_parent_active_through_dropdown() {
    let link = NavLink {
        label: "Products".into(),
        href: Some("#".into()),
        dropdown: vec![NavItem::new("Fleet", "/products/fleet")],
        ..Default::default()
    };
    assert!(is_parent_active("/products/fleet", &link));
    assert!(!is_parent_active("/", &link));
}

#[test]
fn nav_normalize_href() {
    assert_eq!(normalize_href(None), "#");
    assert_eq!(normalize_href(Some("  ")), "#");
    assert_eq!(normalize_href(Some("services")), "/services");
    assert_eq!(normalize_href(Some("https://x.com")), "https://x.com");
    assert_eq!(normalize_href(Some("#top")), "#top");
}

#[test]
fn nav_deserializes_null_fields() {
    let link: NavLink =
        serde_json::from_value(json!({ "label": "Home", "href": "/", "isDropDown": null, "dropdown": null }))
            .unwrap();
    assert!(!link.has_dropdown());
}

// ═══════════════════════════════════════════════════════════
// Back links
// ═══════════════════════════════════════════════════════════

#[test]
fn back_resolve_prefers_return_path() {
    let params = BackParams {
        from: Some("products".into()),
        return_path: Some("/case-studies?domain=Health".into()),
        ..Default::default()
    };
    assert_eq!(
        back_link::resolve(&params).as_deref(),
        Some("/case-studies?domain=Health")
    );
}

#[test]
fn back_resolve_ignores_offsite_return_path() {
    let params = BackParams {
        return_path: Some("//evil.example.com".into()),
        ..Default::default()
    };
    assert_eq!(back_link::resolve(&params), None);
}

#[test]
fn back_resolve_legacy_and_named() {
    let product = BackParams {
        from: Some("product".into()),
        product_slug: Some("fleet".into()),
        ..Default::default()
    };
    assert_eq!(back_link::resolve(&product).as_deref(), Some("/products/fleet"));

    let home = BackParams {
        from: Some("home".into()),
        ..Default::default()
    };
    assert_eq!(back_link::resolve(&home).as_deref(), Some("/"));

    let other = BackParams {
        from: Some("Solutions".into()),
        ..Default::default()
    };
    assert_eq!(back_link::resolve(&other).as_deref(), Some("/solutions"));

    assert_eq!(back_link::resolve(&BackParams::default()), None);
}

#[test]
fn back_label_defaults() {
    assert_eq!(back_link::label(&BackParams::default()), "Back");
    let params = BackParams {
        return_label: Some("Fleet".into()),
        ..Default::default()
    };
    assert_eq!(back_link::label(&params), "Fleet");
}

#[test]
fn back_link_builders() {
    assert_eq!(
        back_link::listing_back_link("/case-studies/x", "case-studies"),
        "/case-studies/x?from=case-studies"
    );
    assert_eq!(
        back_link::detail_back_link("/products/fleet", "case-study", "/case-studies/x", None),
        "/products/fleet?from=case-study&returnPath=%2Fcase-studies%2Fx"
    );
    assert_eq!(back_link::create_back_link("/a", None, Some(""), None), "/a");
}

#[test]
fn smart_cta_keeps_chain() {
    let incoming = BackParams {
        from: Some("products".into()),
        return_path: Some("/products".into()),
        ..Default::default()
    };
    assert_eq!(
        back_link::smart_cta_link("/book-demo", &incoming, "/products/fleet"),
        "/book-demo?from=products&returnPath=%2Fproducts"
    );
    assert_eq!(
        back_link::smart_cta_link("/book-demo?x=1", &BackParams::default(), "/products/fleet"),
        "/book-demo?x=1&from=page&returnPath=%2Fproducts%2Ffleet"
    );
}

#[test]
fn back_button_history_fallback() {
    let html = views::back_button(&BackParams::default());
    assert!(html.contains("data-history-back"));
    assert!(html.contains(r#"data-fallback="/""#));

    let html = views::back_button(&BackParams {
        from: Some("services".into()),
        ..Default::default()
    });
    assert!(html.contains(r#"href="/services""#));
}

// ═══════════════════════════════════════════════════════════
// Case study filtering
// ═══════════════════════════════════════════════════════════

fn studies() -> Vec<CaseStudy> {
    vec![
        study(json!({ "title": "A", "slug": "a",
            "products": [{ "name": "Fleet", "slug": "fleet" }],
            "domainTags": [{ "name": "Logistics" }] })),
        study(json!({ "title": "B", "slug": "b",
            "products": [{ "name": "Clinic", "slug": "clinic" }],
            "domains": ["Healthcare"] })),
        study(json!({ "title": "C", "slug": "c",
            "products": [{ "name": "Fleet", "slug": "fleet" }],
            "domainTags": [{ "name": "Healthcare" }], "domains": ["Healthcare", " "] })),
    ]
}

#[test]
fn case_study_folds_legacy_domains() {
    let all = studies();
    assert!(all[1].has_domain("Healthcare"));
    assert_eq!(all[2].domain_tags.len(), 1);
}

#[test]
fn filter_and_logic() {
    let all = studies();
    let by_product = ListingFilter::from_query(Some("Fleet"), None);
    assert_eq!(filter_case_studies(&all, &by_product).len(), 2);

    let both = ListingFilter::from_query(Some("Fleet"), Some("Healthcare"));
    let hits = filter_case_studies(&all, &both);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "c");

    let none = ListingFilter::from_query(Some(""), Some("  "));
    assert!(!none.has_filters());
    assert_eq!(filter_case_studies(&all, &none).len(), 3);
}

#[test]
fn filter_with_param() {
    let current = [("product", "Fleet"), ("domain", "Health")];
    assert_eq!(
        with_param("/case-studies", &current, "product", None),
        "/case-studies?domain=Health"
    );
    assert_eq!(
        with_param("/case-studies", &current, "domain", Some("Logistics & Ops")),
        "/case-studies?product=Fleet&domain=Logistics+%26+Ops"
    );
    assert_eq!(with_param("/case-studies", &[], "product", Some("")), "/case-studies");
}

#[test]
fn filter_clear_keeps_other_params() {
    let current = [("product", "Fleet"), ("from", "products"), ("domain", "Health")];
    assert_eq!(clear_href("/case-studies", &current), "/case-studies?from=products");
    let filter = ListingFilter::from_query(Some("Fleet"), Some("Health"));
    assert_eq!(clear_href("/case-studies", &filter.pairs()), "/case-studies");
}

#[test]
fn filter_result_count() {
    assert_eq!(result_count_label(1), "Showing 1 case study");
    assert_eq!(result_count_label(0), "Showing 0 case studies");
}

// ═══════════════════════════════════════════════════════════
// Form state machine
// ═══════════════════════════════════════════════════════════

#[test]
fn machine_contact_reverts_after_delay() {
    let mut m = FormMachine::new(RevertPolicy::CONTACT);
    assert_eq!(m.on(FormEvent::Submit), FormStatus::Submitting);
    assert_eq!(m.on(FormEvent::Succeeded), FormStatus::Success);
    assert_eq!(m.revert_after_ms(), Some(3000));

    let mut failed = FormMachine::new(RevertPolicy::CONTACT);
    failed.on(FormEvent::Submit);
    failed.on(FormEvent::Failed);
    assert_eq!(failed.revert_after_ms(), Some(3000));
}

#[test]
fn machine_demo_waits_for_user() {
    let mut m = FormMachine::new(RevertPolicy::OnUserAction);
    m.on(FormEvent::Submit);
    m.on(FormEvent::Succeeded);
    assert_eq!(m.status(), FormStatus::Success);
    assert_eq!(m.revert_after_ms(), None);
}

#[test]
fn machine_ignores_illegal_events() {
    let mut m = FormMachine::new(RevertPolicy::CONTACT);
    assert_eq!(m.on(FormEvent::Succeeded), FormStatus::Idle);
    assert_eq!(m.on(FormEvent::Failed), FormStatus::Idle);
    assert_eq!(m.revert_after_ms(), None);
    m.on(FormEvent::Submit);
    assert_eq!(m.on(FormEvent::Submit), FormStatus::Submitting);
    assert_eq!(m.on(FormEvent::Failed), FormStatus::Error);
    assert_eq!(m.on(FormEvent::Submit), FormStatus::Submitting);
}

#[test]
fn refused_outcome_is_error() {
    let outcome = FormOutcome::refused(valid_lead());
    assert_eq!(outcome.status(), FormStatus::Error);
    assert_eq!(outcome.values, valid_lead());
}

// ═══════════════════════════════════════════════════════════
// Form validation
// ═══════════════════════════════════════════════════════════

#[test]
fn email_pattern() {
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn lead_requires_phone_or_email() {
    let form = LeadForm {
        email: String::new(),
        ..valid_lead()
    };
    assert!(form.validate().has("contact"));

    let form = LeadForm {
        email: String::new(),
        phone: "+91 98400 00000".into(),
        ..valid_lead()
    };
    assert!(form.validate().is_empty());
}

#[test]
fn lead_validation_messages() {
    let errors = LeadForm {
        email: "nope".into(),
        domain_of_interest: "Others".into(),
        ..Default::default()
    }
    .validate();
    assert_eq!(errors.get("name"), Some("Name is required"));
    assert_eq!(errors.get("email"), Some("Please enter a valid email"));
    assert!(errors.has("reason"));
    assert!(errors.has("otherDomain"));
}

#[test]
fn lead_payload_uses_other_domain() {
    let form = LeadForm {
        domain_of_interest: "Others".into(),
        other_domain: "Agritech".into(),
        ..valid_lead()
    };
    let payload = form.payload();
    assert_eq!(payload["domainOfInterest"], "Agritech");
    assert_eq!(payload["otherDomain"], "Agritech");
    assert_eq!(payload["status"], "new");
    assert!(payload["phone"].is_null());
}

#[test]
fn demo_validation() {
    assert!(valid_demo().validate().is_empty());

    let errors = DemoBookingForm::default().validate();
    for field in ["firstName", "lastName", "email", "company", "product"] {
        assert!(errors.has(field), "missing error for {}", field);
    }

    let form = DemoBookingForm {
        preferred_date: "31/12/2026".into(),
        reference: "Other".into(),
        ..valid_demo()
    };
    let errors = form.validate();
    assert!(errors.has("preferredDate"));
    assert!(errors.has("referenceOther"));
}

#[test]
fn demo_payload_reference_other() {
    let form = DemoBookingForm {
        reference: "Other".into(),
        reference_other: "Conference".into(),
        preferred_date: "2026-11-02".into(),
        ..valid_demo()
    };
    assert!(form.validate().is_empty());
    let payload = form.payload();
    assert_eq!(payload["reference"], "Conference");
    assert_eq!(payload["preferredDate"], "2026-11-02");
}

#[test]
fn service_request_validation_and_payload() {
    let errors = ServiceRequestForm::default().validate();
    assert_eq!(errors.len(), 4);

    let form = ServiceRequestForm {
        name: "Meera".into(),
        email: "meera@example.com".into(),
        company: "Acme".into(),
        service: "Cloud Migration".into(),
        project_details: "Move to the cloud".into(),
        ..Default::default()
    };
    assert!(form.validate().is_empty());
    let payload = form.payload();
    assert_eq!(payload["domainOfInterest"], "Cloud Migration");
    assert_eq!(payload["reason"], "Company: Acme\n\nMove to the cloud");
    assert_eq!(ServiceRequestForm::COLLECTION, "/leads");
}

#[test]
fn captcha_only_required_with_site_key() {
    let mut errors = FieldErrors::new();
    require_captcha(&mut errors, None, None);
    assert!(errors.is_empty());

    require_captcha(&mut errors, Some("key"), Some(" "));
    assert_eq!(errors.get("recaptcha"), Some("Please complete the reCAPTCHA"));

    let mut errors = FieldErrors::new();
    require_captcha(&mut errors, Some("key"), Some("token"));
    assert!(errors.is_empty());
}

// ═══════════════════════════════════════════════════════════
// Submission pipeline
// ═══════════════════════════════════════════════════════════

#[rocket::async_test]
async fn process_never_posts_invalid_input() {
    let sink = RecordingSink::new(false);
    let outcome = submit::process(&LeadForm::default(), None, &sink).await;
    assert_eq!(sink.count(), 0);
    assert_eq!(outcome.status(), FormStatus::Idle);
    assert!(outcome.errors.has("name"));
}

#[rocket::async_test]
async fn process_blocks_missing_captcha() {
    let sink = RecordingSink::new(false);
    let outcome = submit::process(&valid_lead(), Some("key"), &sink).await;
    assert_eq!(sink.count(), 0);
    assert!(outcome.errors.has("recaptcha"));
}

#[rocket::async_test]
async fn process_success_clears_values() {
    let sink = RecordingSink::new(false);
    let form = LeadForm {
        recaptcha_token: Some("tok".into()),
        ..valid_lead()
    };
    let outcome = submit::process(&form, Some("key"), &sink).await;
    assert_eq!(outcome.status(), FormStatus::Success);
    assert_eq!(outcome.values, LeadForm::default());

    let calls = sink.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/leads");
    assert_eq!(calls[0].1["name"], "Asha");
    assert_eq!(calls[0].2.as_deref(), Some("tok"));
}

#[rocket::async_test]
async fn process_failure_keeps_values() {
    let sink = RecordingSink::new(true);
    let outcome = submit::process(&valid_demo(), None, &sink).await;
    assert_eq!(sink.count(), 1);
    assert_eq!(outcome.status(), FormStatus::Error);
    assert_eq!(outcome.values, valid_demo());
    assert_eq!(sink.calls.lock().unwrap()[0].0, "/demo-bookings");
}

// ═══════════════════════════════════════════════════════════
// Referrer auto-fill
// ═══════════════════════════════════════════════════════════

#[test]
fn reference_priority() {
    assert_eq!(
        detect_reference(Some("newsletter"), Some("partner"), Some("https://google.com/"), None).as_deref(),
        Some("newsletter")
    );
    assert_eq!(
        detect_reference(Some(" "), Some("partner"), None, None).as_deref(),
        Some("partner")
    );
    assert_eq!(
        detect_reference(None, None, Some("https://www.linkedin.com/feed"), None).as_deref(),
        Some("linkedin.com")
    );
}

#[test]
fn reference_ignores_own_site_and_garbage() {
    assert_eq!(
        detect_reference(None, None, Some("https://www.datayaan.com/products"), Some("www.datayaan.com")),
        None
    );
    assert_eq!(detect_reference(None, None, Some("not a url"), None), None);
    assert_eq!(detect_reference(None, None, None, None), None);
}

// ═══════════════════════════════════════════════════════════
// Rate limiting
// ═══════════════════════════════════════════════════════════

#[test]
fn rate_limiter_allows_up_to_max() {
    let limiter = RateLimiter::new();
    let window = Duration::from_secs(3600);
    for _ in 0..3 {
        assert!(limiter.check_and_record("lead:1.2.3.4", 3, window));
    }
    assert!(!limiter.check_and_record("lead:1.2.3.4", 3, window));
    assert!(limiter.check_and_record("demo:1.2.3.4", 3, window));
}

#[test]
fn rate_limiter_cleanup_keeps_recent() {
    let limiter = RateLimiter::new();
    limiter.check_and_record("lead:a", 1, Duration::from_secs(60));
    limiter.cleanup(Duration::from_secs(60));
    assert!(!limiter.check_and_record("lead:a", 1, Duration::from_secs(60)));
}

// ═══════════════════════════════════════════════════════════
// Models and page copy
// ═══════════════════════════════════════════════════════════

#[test]
fn product_names_and_slugs() {
    let p: Product = serde_json::from_value(json!({ "name": null, "title": "Pet Clinic", "slug": null })).unwrap();
    assert_eq!(p.display_name(), "Pet Clinic");
    assert_eq!(p.link_slug(), "pet-clinic");
    assert_eq!(p.heading(), "Pet Clinic");
}

#[test]
fn cta_defaults_and_overrides() {
    let cta = ServicePage::cta(None);
    assert_eq!(cta.title, "Ready to Innovate?");
    assert_eq!(cta.button_link, "/request-services");

    let page: ProductPage = serde_json::from_value(json!({ "ctaTitle": "Talk to us", "ctaButtonLink": " " })).unwrap();
    let cta = ProductPage::cta(Some(&page));
    assert_eq!(cta.title, "Talk to us");
    assert_eq!(cta.button_link, "/book-demo");
}

#[test]
fn contact_copy_fallbacks() {
    let copy = ContactPage::copy(None);
    assert_eq!(copy.page_title, "Let's Connect");
    assert_eq!(copy.form_heading, "Get in Touch");
}

#[test]
fn home_stats_and_rating() {
    let home: HomePage = serde_json::from_value(json!({ "statsProjectsCount": 200, "statsSupportText": "" })).unwrap();
    let stats = home.stats();
    assert_eq!(stats[0].value, "200");
    assert_eq!(stats[3].value, "24\u{d7}7");

    let t: Testimonial = serde_json::from_value(json!({ "rating": "9" })).unwrap();
    assert_eq!(t.stars(), 5);
    let t: Testimonial = serde_json::from_value(json!({ "rating": true })).unwrap();
    assert_eq!(t.stars(), 0);
}

#[test]
fn domain_names_sorted_unique() {
    let names = domain_names(&[domain("Logistics"), domain(" Healthcare "), domain("Logistics"), domain("")]);
    assert_eq!(names, vec!["Healthcare".to_string(), "Logistics".to_string()]);
}

#[test]
fn solution_builtin_copy() {
    let s = Solution::builtin("healthcare").unwrap();
    assert_eq!(s.title, "Healthcare");
    assert_eq!(richtext::lines(s.features.as_deref().unwrap()).len(), 6);
    assert!(Solution::builtin("unknown").is_none());
}

#[test]
fn leader_bio_paragraphs() {
    assert_eq!(
        views::company::bio_paragraphs(Some("First.\n\nSecond.\n\n\n")),
        vec!["First.", "Second."]
    );
    assert!(views::company::bio_paragraphs(None).is_empty());
}

// ═══════════════════════════════════════════════════════════
// Rendering helpers
// ═══════════════════════════════════════════════════════════

#[test]
fn escaping_helpers() {
    assert_eq!(html_escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    assert_eq!(url_encode("a b&c"), "a%20b%26c");
}

#[test]
fn meta_canonical_drops_query() {
    let site = SiteMeta {
        site_name: "Datayaan",
        site_origin: "https://www.datayaan.com",
        default_title: None,
        default_description: None,
    };
    let html = build_meta(&site, Some("Services"), None, "/services?from=home");
    assert!(html.contains("<title>Services | Datayaan</title>"));
    assert!(html.contains(r#"href="https://www.datayaan.com/services""#));
}

#[test]
fn theme_variables_are_sanitized() {
    let theme = Theme {
        primary: Some("#ff6600;}</style><script>".into()),
        ..Default::default()
    };
    let css = build_css_variables(&theme);
    assert!(css.contains("--primary: #ff6600"));
    assert!(!css.contains("</style>"));
    assert!(!css.contains("<script>"));

    let plain = build_css_variables(&Theme::default());
    assert!(!plain.contains("--primary"));
    assert!(plain.contains("--font-heading: 'Outfit'"));
}

#[test]
fn carousel_starts_on_first_slide() {
    let c = Carousel::new(3);
    assert_eq!(c.current(), 0);
    assert!(c.has_controls());
    assert!(!Carousel::new(1).has_controls());
    assert!(!Carousel::new(0).has_controls());
}

#[test]
fn marquee_doubles_logos() {
    let logos = vec!["a".to_string(), "b".to_string()];
    assert_eq!(marquee_track(&logos).len(), 4);
}

#[test]
fn offline_site_renders_shell() {
    let site = Site::offline(&SiteConfig::default());
    let html = site.render(&Page {
        title: Some("Page Not Found".into()),
        path: "/missing".into(),
        body: views::not_found_body(),
        ..Default::default()
    });
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Page Not Found | Datayaan Solutions"));
    assert!(html.contains("/static/site.js"));
    assert!(html.contains(r#"href="/book-demo""#));
    assert!(html.contains(r##"<a href="#" class="scroll-top""##));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn solution_page_links_to_features() {
    let site = Site::offline(&SiteConfig::default());
    let solution = Solution::builtin("healthcare").unwrap();
    let html = views::services::render_solution(&site, &solution, &BackParams::default());
    assert!(html.contains(r##"<a href="#features" class="btn btn-secondary">Learn More</a>"##));
    assert!(html.contains(r#"id="features""#));
    assert!(html.contains(
        r#"href="/book-demo?from=solutions&amp;returnPath=%2Fsolutions%2Fhealthcare""#
    ));
}

#[test]
fn product_story_links_carry_return_path() {
    let site = Site::offline(&SiteConfig::default());
    let product: Product = serde_json::from_value(json!({
        "name": "Fleet Tracker",
        "slug": "fleet tracker",
        "caseStudies": [{ "title": "Routes", "slug": "route-optimisation" }]
    }))
    .unwrap();
    let html = views::product::render(&site, &product, None, &BackParams::default());
    assert!(html.contains(
        r#"href="/case-studies/route-optimisation?from=product&amp;returnPath=%2Fproducts%2Ffleet%2520tracker""#
    ));
}

#[test]
fn case_study_filters_show_unlisted_active_values() {
    let mut site = Site::offline(&SiteConfig::default());
    site.products = vec![product_ref("Clinic", "clinic")];
    let filter = ListingFilter::from_query(Some("Fleet"), Some("Logistics & Ops"));
    let html = views::case_studies::render_list(&site, &[], &filter, &BackParams::default());

    assert!(html.contains(r#"<option value="Fleet" selected>Fleet</option>"#));
    assert!(html.contains(r#"<option value="Clinic">Clinic</option>"#));
    assert!(html.contains(
        r#"<option value="Logistics &amp; Ops" selected>Logistics &amp; Ops</option>"#
    ));
    assert!(html.contains(r#"<option value="">All Products</option>"#));
    assert!(html.contains(r#"href="/case-studies?domain=Logistics+%26+Ops" class="filter-chip""#));
    assert!(html.contains(r#"href="/case-studies?product=Fleet" class="filter-chip""#));
    assert!(html.contains(r#"href="/case-studies" class="clear-filters""#));
}

#[test]
fn case_study_filters_do_not_duplicate_listed_values() {
    let mut site = Site::offline(&SiteConfig::default());
    site.products = vec![product_ref("Fleet", "fleet")];
    let filter = ListingFilter::from_query(Some("Fleet"), None);
    let html = views::case_studies::render_list(&site, &[], &filter, &BackParams::default());
    assert_eq!(html.matches(r#"value="Fleet""#).count(), 1);
    assert!(html.contains(r#"<option value="Fleet" selected>Fleet</option>"#));
}

// ═══════════════════════════════════════════════════════════
// Routes (CMS unreachable)
// ═══════════════════════════════════════════════════════════

fn client() -> rocket::local::blocking::Client {
    let figment = rocket::Config::figment()
        .merge(("cms_url", "http://127.0.0.1:9"))
        .merge(("cms_timeout_secs", 1))
        .merge(("recaptcha_site_key", ""));
    rocket::local::blocking::Client::tracked(crate::app(figment)).unwrap()
}

#[test]
fn route_home_renders_without_cms() {
    use rocket::http::Status;
    let client = client();
    let res = client.get("/").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body = res.into_string().unwrap();
    assert!(body.contains(r#"id="contact""#));
}

#[test]
fn route_unknown_product_is_styled_404() {
    use rocket::http::Status;
    let client = client();
    let res = client.get("/products/does-not-exist").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    assert_eq!(res.headers().get_one("Cache-Control"), Some("no-store"));
    let body = res.into_string().unwrap();
    assert!(body.contains("<!DOCTYPE html>"));
}

#[test]
fn route_builtin_solution() {
    use rocket::http::Status;
    let client = client();
    let res = client.get("/solutions/healthcare").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert!(res.into_string().unwrap().contains("Telemedicine platform"));
    assert_eq!(client.get("/solutions/nope").dispatch().status(), Status::NotFound);
}

#[test]
fn route_case_studies_empty() {
    use rocket::http::Status;
    let client = client();
    let res = client.get("/case-studies?product=Fleet").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert!(res
        .into_string()
        .unwrap()
        .contains("No case studies found matching your filters."));
}

#[test]
fn route_robots() {
    let client = client();
    let body = client.get("/robots.txt").dispatch().into_string().unwrap();
    assert!(body.starts_with("User-agent: *"));
}

#[test]
fn route_contact_post_shows_errors() {
    use rocket::http::{ContentType, Status};
    let client = client();
    let res = client
        .post("/contact")
        .header(ContentType::Form)
        .body("name=&email=bad&reason=")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.headers().get_one("Cache-Control"), Some("no-store"));
    let body = res.into_string().unwrap();
    assert!(body.contains("Name is required"));
    assert!(body.contains("Please enter a valid email"));
}

#[test]
fn route_book_demo_prefills_reference() {
    let client = client();
    let body = client
        .get("/book-demo?utm_source=newsletter")
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains(r#"value="newsletter""#));
}
