use serde::{Deserialize, Serialize};

use super::{lenient_string, non_blank};
use super::product::Product;
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;
use crate::navigation::NavLink;

/// Site-wide settings: branding, theme, navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub site_title: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub theme_color: Option<String>,
    pub site_background_color: Option<String>,
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
    /// `None` when the CMS sent no navigation at all.
    pub navbar_links: Option<Vec<NavLink>>,
    pub navbar_cta_text: Option<String>,
    pub navbar_cta_link: Option<String>,
    pub company_logo: Option<MediaRef>,
    pub favicon: Option<MediaRef>,
    pub footer_videos: Option<MediaRef>,
}

impl GlobalSettings {
    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        let path = Query::new("global").populate_all().build();
        cms.one(&path, Freshness::NAVIGATION).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub customer_name: Option<String>,
    pub role: Option<String>,
    pub customer_photo: Option<MediaRef>,
    pub review: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub rating: Option<String>,
}

impl Testimonial {
    /// Star count clamped to 0..=5; unparseable ratings show none.
    pub fn stars(&self) -> usize {
        self.rating
            .as_deref()
            .and_then(|r| r.trim().parse::<f64>().ok())
            .map(|r| r.round().clamp(0.0, 5.0) as usize)
            .unwrap_or(0)
    }
}

/// One number on the home page stats strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomePage {
    pub hero_headline: Option<String>,
    pub hero_subheadline: Option<String>,
    pub hero_button_text: Option<String>,
    pub hero_button_link: Option<String>,
    pub hero_secondary_button_text: Option<String>,
    pub hero_secondary_button_link: Option<String>,
    pub hero_background_color: Option<String>,
    pub hero_background_images: Option<MediaRef>,

    pub products: Option<Vec<Product>>,

    #[serde(deserialize_with = "lenient_string")]
    pub stats_projects_count: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub stats_employees_count: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub stats_countries_count: Option<String>,
    pub stats_support_text: Option<String>,

    pub tech_partner_logos: Option<MediaRef>,
    pub clients_title: Option<String>,
    pub client_logos: Option<MediaRef>,

    pub testimonials_title: Option<String>,
    pub testimonials_subtitle: Option<String>,
    pub testimonials: Option<Vec<Testimonial>>,

    pub contact_section_title: Option<String>,
    pub contact_section_description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,

    pub social_instagram: Option<String>,
    pub social_linked_in: Option<String>,
    pub social_facebook: Option<String>,

    pub theme_color: Option<String>,
}

impl HomePage {
    pub async fn fetch(cms: &CmsClient) -> Option<Self> {
        let path = Query::new("home-page")
            .populate(&[
                "heroBackgroundImages",
                "clientLogos",
                "techPartnerLogos",
                "products.icon",
                "products.image",
                "testimonials.customerPhoto",
            ])
            .build();
        cms.one(&path, Freshness::VOLATILE).await
    }

    /// The outcomes strip. Missing counts fall back to the published figures.
    pub fn stats(&self) -> Vec<Stat> {
        let pick = |v: &Option<String>, fallback: &str| {
            non_blank(v)
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string())
        };
        vec![
            Stat {
                value: pick(&self.stats_projects_count, "150+"),
                label: "projects delivered with precision and excellence",
            },
            Stat {
                value: pick(&self.stats_countries_count, "10+"),
                label: "countries and territories trust our solutions",
            },
            Stat {
                value: pick(&self.stats_employees_count, "150"),
                label: "skilled professionals driving innovation every day",
            },
            Stat {
                value: pick(&self.stats_support_text, "24\u{d7}7"),
                label: "support always available to help you succeed",
            },
        ]
    }

    /// `(label, url)` for each configured social profile.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Instagram", &self.social_instagram),
            ("LinkedIn", &self.social_linked_in),
            ("Facebook", &self.social_facebook),
        ]
        .into_iter()
        .filter_map(|(label, url)| non_blank(url).map(|u| (label, u)))
        .collect()
    }
}
