//! Single-type page records. Every field is optional; views fall back to
//! built-in copy when the CMS has nothing.

use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;

/// Closing call-to-action block shared by the product and service pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaCopy {
    pub cta_title: Option<String>,
    pub cta_description: Option<String>,
    pub cta_button_text: Option<String>,
    pub cta_button_link: Option<String>,
}

/// A CTA block after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cta {
    pub title: String,
    pub description: Option<String>,
    pub button_text: String,
    pub button_link: String,
}

impl CtaCopy {
    /// Fill every blank field from `defaults`.
    pub fn resolve(&self, defaults: Cta) -> Cta {
        let pick = |field: &Option<String>, fallback: String| {
            non_blank(field).map(str::to_string).unwrap_or(fallback)
        };
        Cta {
            title: pick(&self.cta_title, defaults.title),
            description: non_blank(&self.cta_description)
                .map(str::to_string)
                .or(defaults.description),
            button_text: pick(&self.cta_button_text, defaults.button_text),
            button_link: pick(&self.cta_button_link, defaults.button_link),
        }
    }
}

impl Cta {
    pub fn new(title: &str, description: Option<&str>, button_text: &str, button_link: &str) -> Self {
        Cta {
            title: title.to_string(),
            description: description.map(str::to_string),
            button_text: button_text.to_string(),
            button_link: button_link.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPage {
    #[serde(flatten)]
    pub cta: CtaCopy,
}

impl ProductPage {
    pub fn cta(page: Option<&ProductPage>) -> Cta {
        let defaults = Cta::new(
            "Ready to get started?",
            Some("Book a demo to see how our product can help you."),
            "Book a Demo",
            "/book-demo",
        );
        match page {
            Some(page) => page.cta.resolve(defaults),
            None => defaults,
        }
    }

    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        cms.one("/product-page", Freshness::PAGE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePage {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(flatten)]
    pub cta: CtaCopy,
}

impl ServicePage {
    pub fn cta(page: Option<&ServicePage>) -> Cta {
        let defaults = Cta::new(
            "Ready to Innovate?",
            Some("Let's discuss how our services can be tailored to meet your strategic goals."),
            "Start Your Project",
            "/request-services",
        );
        match page {
            Some(page) => page.cta.resolve(defaults),
            None => defaults,
        }
    }

    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        cms.one("/service-page", Freshness::PAGE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutPage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub values: Option<String>,
    pub hero_image: Option<MediaRef>,
}

impl AboutPage {
    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        let path = Query::new("about-page").populate_all().build();
        cms.one(&path, Freshness::PAGE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipPage {
    pub title: Option<String>,
    #[serde(alias = "description")]
    pub subtitle: Option<String>,
}

impl LeadershipPage {
    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        cms.one("/leadership-page", Freshness::PAGE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPage {
    pub page_title: Option<String>,
    pub page_subtitle: Option<String>,
    pub locations_heading: Option<String>,
    pub locations_description: Option<String>,
    pub contact_form_heading: Option<String>,
    pub contact_form_description: Option<String>,
}

/// Contact page copy with fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCopy {
    pub page_title: String,
    pub page_subtitle: String,
    pub locations_heading: String,
    pub locations_description: String,
    pub form_heading: String,
    pub form_description: String,
}

impl ContactPage {
    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        cms.one("/contact-page", Freshness::VOLATILE).await
    }

    pub fn copy(page: Option<&ContactPage>) -> ContactCopy {
        let pick = |field: Option<&Option<String>>, fallback: &str| {
            field
                .and_then(non_blank)
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string())
        };
        ContactCopy {
            page_title: pick(page.map(|p| &p.page_title), "Let's Connect"),
            page_subtitle: pick(
                page.map(|p| &p.page_subtitle),
                "We're here to help! Tell us what you're looking for and we'll get you connected to the right people.",
            ),
            locations_heading: pick(page.map(|p| &p.locations_heading), "Our Global Presence"),
            locations_description: pick(
                page.map(|p| &p.locations_description),
                "Explore our offices across the globe",
            ),
            form_heading: pick(page.map(|p| &p.contact_form_heading), "Get in Touch"),
            form_description: pick(
                page.map(|p| &p.contact_form_description),
                "Fill out the form and our team will get back to you within 24 hours.",
            ),
        }
    }
}
