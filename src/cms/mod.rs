pub mod cache;
pub mod query;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::time::Duration;

use crate::config::SiteConfig;

pub use cache::ResponseCache;
pub use query::Query;

/// How long a fetched response may be served before it is fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness(pub Duration);

impl Freshness {
    /// Global settings and navigation.
    pub const NAVIGATION: Freshness = Freshness(Duration::from_secs(3600));
    /// Page singletons and slow-moving collections.
    pub const PAGE: Freshness = Freshness(Duration::from_secs(1800));
    /// Product records.
    pub const PRODUCTS: Freshness = Freshness(Duration::from_secs(600));
    /// Home, contact and booking-relevant lists.
    pub const VOLATILE: Freshness = Freshness(Duration::from_secs(300));
}

/// The two response envelopes the CMS produces, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `data` is an array (collection type).
    Collection(Vec<Value>),
    /// `data` is a plain object (single type, flat shape).
    Flat(Value),
    /// `data` is `{ id, attributes: {...} }` (single type, wrapped shape).
    Wrapped(Value),
}

impl Envelope {
    /// Classify a response body. `None` when there is no usable `data`.
    pub fn from_json(json: Value) -> Option<Envelope> {
        let Value::Object(mut body) = json else {
            return None;
        };
        match body.remove("data")? {
            Value::Array(items) => Some(Envelope::Collection(items)),
            Value::Object(mut obj) => match obj.remove("attributes") {
                Some(attrs) if !attrs.is_null() => Some(Envelope::Wrapped(attrs)),
                _ => Some(Envelope::Flat(Value::Object(obj))),
            },
            _ => None,
        }
    }

    /// Canonical content: a flat object or an array of flat objects.
    pub fn into_content(self) -> Value {
        match self {
            Envelope::Collection(items) => {
                Value::Array(items.into_iter().map(flatten).collect())
            }
            Envelope::Flat(obj) | Envelope::Wrapped(obj) => flatten(obj),
        }
    }
}

/// Normalize a full response body into canonical content.
pub fn normalize(json: Value) -> Option<Value> {
    Envelope::from_json(json).map(Envelope::into_content)
}

/// Recursively strip the wrapped shape from nested relations:
/// `{ id, attributes: {...} }` becomes the attributes (keeping `id`), and a
/// relation object holding only `data` (plus optional `meta`) becomes its data.
fn flatten(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(flatten).collect()),
        Value::Object(mut obj) => {
            if is_relation_wrapper(&obj) {
                return match obj.remove("data") {
                    Some(data) => flatten(data),
                    None => Value::Null,
                };
            }
            if matches!(obj.get("attributes"), Some(Value::Object(_))) {
                let id = obj.remove("id");
                if let Some(Value::Object(mut attrs)) = obj.remove("attributes") {
                    if let Some(id) = id {
                        attrs.entry("id").or_insert(id);
                    }
                    return flatten(Value::Object(attrs));
                }
            }
            Value::Object(obj.into_iter().map(|(k, v)| (k, flatten(v))).collect())
        }
        other => other,
    }
}

fn is_relation_wrapper(obj: &Map<String, Value>) -> bool {
    obj.contains_key("data") && obj.keys().all(|k| k == "data" || k == "meta")
}

/// Content worth keeping: anything but an empty collection.
pub fn is_cacheable(content: &Value) -> bool {
    !matches!(content, Value::Array(items) if items.is_empty())
}

/// Decode a single record. A list yields its first element.
pub fn decode_one<T: DeserializeOwned>(content: Option<Value>) -> Option<T> {
    let value = match content? {
        Value::Array(items) => items.into_iter().next()?,
        other => other,
    };
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("CMS record did not match expected shape: {}", e);
            None
        }
    }
}

/// Decode a collection. Absent content and `[]` are both "nothing"; records
/// that fail to decode are skipped.
pub fn decode_list<T: DeserializeOwned>(content: Option<Value>) -> Vec<T> {
    let items = match content {
        Some(Value::Array(items)) => items,
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping CMS record: {}", e);
                None
            }
        })
        .collect()
}

/// HTTP adapter for the CMS REST API.
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
}

impl CmsClient {
    pub fn new(config: &SiteConfig) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cms_timeout_secs.max(1)))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(CmsClient {
            http,
            base_url: config.cms_base().to_string(),
            cache: ResponseCache::new(),
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/api{}", self.base_url, path)
        } else {
            format!("{}/api/{}", self.base_url, path)
        }
    }

    /// GET a resource and normalize its envelope. Every failure is logged and
    /// turned into `None`; callers render their fallbacks.
    pub async fn fetch(&self, path: &str) -> Option<Value> {
        let url = self.api_url(path);

        let resp = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("CMS fetch failed: {} ({})", url, e);
                return None;
            }
        };

        if !resp.status().is_success() {
            log::error!("CMS fetch error: {} returned {}", url, resp.status());
            return None;
        }

        let json: Value = match resp.json().await {
            Ok(json) => json,
            Err(e) => {
                log::error!("CMS JSON parse error: {} ({})", url, e);
                return None;
            }
        };

        let content = normalize(json);
        if content.is_none() {
            log::debug!("CMS response without data: {}", url);
        }
        content
    }

    /// Like [`fetch`](Self::fetch), but serves a cached copy while it is fresh.
    /// Failed fetches and empty collections (a slug that matched nothing) are
    /// not cached.
    pub async fn fetch_with(&self, path: &str, freshness: Freshness) -> Option<Value> {
        if let Some(hit) = self.cache.get(path) {
            log::debug!("CMS cache hit: {}", path);
            return Some(hit);
        }

        let content = self.fetch(path).await?;
        if is_cacheable(&content) {
            self.cache.put(path, content.clone(), freshness.0);
        }
        Some(content)
    }

    pub async fn one<T: DeserializeOwned>(&self, path: &str, freshness: Freshness) -> Option<T> {
        decode_one(self.fetch_with(path, freshness).await)
    }

    pub async fn list<T: DeserializeOwned>(&self, path: &str, freshness: Freshness) -> Vec<T> {
        decode_list(self.fetch_with(path, freshness).await)
    }

    /// Like [`list`](Self::list) but keeps "not fetched" distinct from "empty".
    pub async fn list_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        freshness: Freshness,
    ) -> Option<Vec<T>> {
        let content = self.fetch_with(path, freshness).await?;
        Some(decode_list(Some(content)))
    }

    /// POST `{data: body}` to a collection, carrying the bot-verification token.
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        captcha_token: Option<&str>,
    ) -> Result<Value, String> {
        let url = self.api_url(path);

        let resp = self
            .http
            .post(&url)
            .header("x-recaptcha-token", captcha_token.unwrap_or(""))
            .json(&json!({ "data": body }))
            .send()
            .await
            .map_err(|e| format!("CMS request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            log::error!("CMS POST error: {} returned {}", url, status);
            return Err(format!("CMS returned {}: {}", status, text));
        }

        // Some endpoints answer 204 with an empty body
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}
