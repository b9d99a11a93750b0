//! Case-study filtering driven entirely by the query string.

use crate::models::case_study::CaseStudy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub product: Option<String>,
    pub domain: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ListingFilter {
    /// Empty values mean "no filter".
    pub fn from_query(product: Option<&str>, domain: Option<&str>) -> Self {
        ListingFilter {
            product: non_empty(product),
            domain: non_empty(domain),
        }
    }

    pub fn has_filters(&self) -> bool {
        self.product.is_some() || self.domain.is_some()
    }

    /// Both filters must hold when both are set.
    pub fn matches(&self, study: &CaseStudy) -> bool {
        let product_ok = self
            .product
            .as_deref()
            .map_or(true, |p| study.has_product(p));
        let domain_ok = self
            .domain
            .as_deref()
            .map_or(true, |d| study.has_domain(d));
        product_ok && domain_ok
    }

    /// Query pairs for the active filters, in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(p) = &self.product {
            pairs.push(("product", p.as_str()));
        }
        if let Some(d) = &self.domain {
            pairs.push(("domain", d.as_str()));
        }
        pairs
    }
}

pub fn filter_case_studies<'a>(items: &'a [CaseStudy], filter: &ListingFilter) -> Vec<&'a CaseStudy> {
    items.iter().filter(|cs| filter.matches(cs)).collect()
}

/// Query keys owned by the filter bar.
const FILTER_KEYS: [&str; 2] = ["product", "domain"];

/// `path` with `key` set to `value` (or removed when `None`/empty), keeping
/// every other parameter of `current`. The bare path when nothing is left.
pub fn with_param(path: &str, current: &[(&str, &str)], key: &str, value: Option<&str>) -> String {
    let value = value.filter(|v| !v.is_empty());
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(current.len() + 1);
    let mut replaced = false;
    for &(k, v) in current {
        if k != key {
            pairs.push((k, v));
        } else if let (Some(value), false) = (value, replaced) {
            pairs.push((key, value));
            replaced = true;
        }
    }
    if let (Some(value), false) = (value, replaced) {
        pairs.push((key, value));
    }
    href_with_query(path, &pairs)
}

/// `path` with the filter parameters dropped and anything else kept.
pub fn clear_href(path: &str, current: &[(&str, &str)]) -> String {
    let kept: Vec<(&str, &str)> = current
        .iter()
        .copied()
        .filter(|(k, _)| !FILTER_KEYS.contains(k))
        .collect();
    href_with_query(path, &kept)
}

fn href_with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", path, query)
}

/// "Showing 1 case study" / "Showing 3 case studies".
pub fn result_count_label(count: usize) -> String {
    format!(
        "Showing {} case {}",
        count,
        if count == 1 { "study" } else { "studies" }
    )
}
