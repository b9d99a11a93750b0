use serde::Deserialize;

use crate::media::MediaBase;

/// Site configuration, extracted from Rocket's figment at launch.
/// Every key can be set in `Rocket.toml` or overridden with a `ROCKET_` env var
/// (e.g. `ROCKET_CMS_URL=https://cms.example.com`).
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_cms_url")]
    pub cms_url: String,
    /// Substring of `cms_url` that marks a local deployment.
    /// Local CMS instances serve relative media URLs that need the base prefixed.
    #[serde(default = "default_local_marker")]
    pub local_marker: String,
    #[serde(default)]
    pub recaptcha_site_key: Option<String>,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub cms_timeout_secs: u64,
    #[serde(default = "default_submissions_per_hour")]
    pub submissions_per_hour: u64,
}

fn default_cms_url() -> String {
    "http://localhost:1337".to_string()
}

fn default_local_marker() -> String {
    "localhost".to_string()
}

fn default_site_name() -> String {
    "Datayaan Solutions".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_submissions_per_hour() -> u64 {
    20
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            cms_url: default_cms_url(),
            local_marker: default_local_marker(),
            recaptcha_site_key: None,
            site_name: default_site_name(),
            site_url: None,
            cms_timeout_secs: default_timeout(),
            submissions_per_hour: default_submissions_per_hour(),
        }
    }
}

impl SiteConfig {
    /// CMS base URL without a trailing slash.
    pub fn cms_base(&self) -> &str {
        self.cms_url.trim_end_matches('/')
    }

    pub fn is_local(&self) -> bool {
        !self.local_marker.is_empty() && self.cms_url.contains(&self.local_marker)
    }

    /// The reCAPTCHA site key, if one is configured and non-blank.
    pub fn captcha_site_key(&self) -> Option<&str> {
        self.recaptcha_site_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn media_base(&self) -> MediaBase {
        MediaBase {
            base_url: self.cms_base().to_string(),
            local: self.is_local(),
        }
    }

    /// Public site origin used for canonical links.
    pub fn site_origin(&self) -> &str {
        self.site_url
            .as_deref()
            .unwrap_or("http://localhost:8000")
            .trim_end_matches('/')
    }

    /// Hostname of the public site, used to ignore same-site referrers.
    pub fn site_host(&self) -> Option<String> {
        url::Url::parse(self.site_origin())
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }
}
