pub mod back_link;

use serde::{Deserialize, Serialize};

use crate::models::company::Domain;
use crate::models::null_default;
use crate::models::product::ProductRef;
use crate::render::url_encode;

/// A leaf entry inside a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    #[serde(default, deserialize_with = "null_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_default")]
    pub href: String,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        NavItem {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// A top-level navbar entry. Only these carry a dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavLink {
    #[serde(deserialize_with = "null_default")]
    pub label: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub is_drop_down: bool,
    #[serde(deserialize_with = "null_default")]
    pub dropdown: Vec<NavItem>,
}

impl NavLink {
    pub fn has_dropdown(&self) -> bool {
        self.is_drop_down || !self.dropdown.is_empty()
    }
}

const ABOUT_LABEL: &str = "About Us";
const ABOUT_HREF: &str = "/company/about-us";
const LEADERSHIP_LABEL: &str = "Leadership";
const LEADERSHIP_HREF: &str = "/company/leadership";

/// Fill the CMS navbar with live data.
///
/// * `Product`/`Products` gets one entry per product.
/// * `Domains`/`Domain` gets one entry per domain, linking to the filtered
///   case-study listing.
/// * `Company` is created when missing and always lists `About Us` first and
///   `Leadership` last, exactly once each.
///
/// Product and domain dropdowns are only replaced when that list was fetched.
/// Applying `compose` to its own output changes nothing.
pub fn compose(
    links: &[NavLink],
    products: Option<&[ProductRef]>,
    domains: Option<&[Domain]>,
) -> Vec<NavLink> {
    let mut links = links.to_vec();

    if let Some(products) = products {
        if let Some(link) = links
            .iter_mut()
            .find(|l| l.label == "Product" || l.label == "Products")
        {
            link.dropdown = products
                .iter()
                .map(|p| NavItem::new(&p.name, &format!("/products/{}", p.slug)))
                .collect();
        }
    }

    if let Some(domains) = domains {
        if let Some(link) = links
            .iter_mut()
            .find(|l| l.label == "Domains" || l.label == "Domain")
        {
            link.dropdown = domains
                .iter()
                .map(|d| {
                    NavItem::new(
                        &d.name,
                        &format!("/case-studies?domain={}", url_encode(&d.name)),
                    )
                })
                .collect();
        }
    }

    match links.iter_mut().find(|l| l.label == "Company") {
        Some(company) => {
            company.is_drop_down = true;
            let about = take_item(&mut company.dropdown, ABOUT_LABEL, ABOUT_HREF);
            let leadership = take_item(&mut company.dropdown, LEADERSHIP_LABEL, LEADERSHIP_HREF);
            company.dropdown.insert(0, about);
            company.dropdown.push(leadership);
        }
        None => links.push(NavLink {
            label: "Company".to_string(),
            href: Some("#".to_string()),
            is_drop_down: true,
            dropdown: vec![
                NavItem::new(ABOUT_LABEL, ABOUT_HREF),
                NavItem::new(LEADERSHIP_LABEL, LEADERSHIP_HREF),
            ],
        }),
    }

    links
}

/// Remove every entry labelled `label`, returning the first one (or a fresh
/// entry when there was none).
fn take_item(items: &mut Vec<NavItem>, label: &str, href: &str) -> NavItem {
    let mut found: Option<NavItem> = None;
    items.retain(|item| {
        if item.label != label {
            return true;
        }
        if found.is_none() {
            found = Some(item.clone());
        }
        false
    });
    match found {
        Some(item) if !item.href.trim().is_empty() => item,
        _ => NavItem::new(label, href),
    }
}

/// Menu used when the CMS sent no navigation at all.
pub fn default_links() -> Vec<NavLink> {
    vec![
        NavLink {
            label: "Products".to_string(),
            href: None,
            is_drop_down: true,
            dropdown: vec![
                NavItem::new("Fleet Tracking", "/fleet"),
                NavItem::new("Pet Clinic", "/petclinic"),
            ],
        },
        NavLink {
            label: "Solutions".to_string(),
            href: Some("#solutions".to_string()),
            ..Default::default()
        },
        NavLink {
            label: "Resources".to_string(),
            href: Some("#".to_string()),
            ..Default::default()
        },
    ]
}

/// Links without a scheme, anchor or leading slash are made root-relative.
pub fn normalize_href(href: Option<&str>) -> String {
    match href.map(str::trim) {
        None | Some("") => "#".to_string(),
        Some(h) if h.starts_with("http") || h.starts_with('#') || h.starts_with('/') => {
            h.to_string()
        }
        Some(h) => format!("/{}", h),
    }
}

/// Whether `href` points at the page being rendered.
///
/// `current` is the request path, optionally with its query string. Hrefs
/// that carry a query only match the full URI; plain paths also match their
/// sub-pages.
pub fn is_active(current: &str, href: Option<&str>) -> bool {
    let href = normalize_href(href);
    if href.starts_with('#') || href.starts_with("http") {
        return false;
    }
    if href.contains('?') {
        return current == href;
    }
    let path = current.split('?').next().unwrap_or(current);
    path == href || (href != "/" && path.starts_with(&format!("{}/", href)))
}

/// A top-level link is highlighted when it or any dropdown item is active.
pub fn is_parent_active(current: &str, link: &NavLink) -> bool {
    if link.href.as_deref() != Some("#") && is_active(current, link.href.as_deref()) {
        return true;
    }
    link.dropdown
        .iter()
        .any(|item| is_active(current, Some(&item.href)))
}
