use serde::{Deserialize, Serialize};

use super::case_study::CaseStudy;
use super::null_default;
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub slug: String,
    /// Older home-page product entries carry `title` instead of `name`.
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub hero_title: Option<String>,
    pub hero_sub_title: Option<String>,
    pub primary_button_text: Option<String>,
    pub primary_button_link: Option<String>,
    pub secondary_button_text: Option<String>,
    pub secondary_button_link: Option<String>,
    pub hero_banner: Option<MediaRef>,
    pub icon: Option<MediaRef>,
    pub image: Option<MediaRef>,
    #[serde(deserialize_with = "null_default")]
    pub features: Vec<Feature>,
    #[serde(deserialize_with = "null_default")]
    pub use_cases: Vec<UseCase>,
    #[serde(deserialize_with = "null_default")]
    pub case_studies: Vec<CaseStudy>,
}

/// A product as referenced from another record (name + slug only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRef {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<MediaRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UseCase {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub image: Option<MediaRef>,
}

impl Product {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.title.as_deref().unwrap_or_default()
        } else {
            &self.name
        }
    }

    /// The product's own slug, or one derived from its title.
    pub fn link_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            self.display_name()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
        } else {
            self.slug.clone()
        }
    }

    pub fn heading(&self) -> &str {
        self.hero_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(self.display_name())
    }

    /// Full product record with its hero, features, use cases and related case studies.
    pub async fn find_by_slug(cms: &CmsClient, slug: &str) -> Option<Self> {
        let path = Query::new("products")
            .filter_eq("slug", slug)
            .populate(&[
                "heroBanner",
                "icon",
                "features.icon",
                "useCases.image",
                "caseStudies.thumbnail",
            ])
            .build();
        cms.list::<Product>(&path, Freshness::PRODUCTS)
            .await
            .into_iter()
            .next()
    }

    /// Name + slug of every product, for menus and form selects.
    /// `None` when the CMS could not be reached.
    pub async fn nav_list(cms: &CmsClient) -> Option<Vec<ProductRef>> {
        let path = Query::new("products").fields(&["name", "slug"]).build();
        cms.list_opt(&path, Freshness::PRODUCTS).await
    }
}
