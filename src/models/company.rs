use serde::{Deserialize, Serialize};

use super::{lenient_string, null_default};
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub slug: String,
    pub description: Option<String>,
}

impl Domain {
    /// Name + slug of every domain. `None` when the CMS could not be reached.
    pub async fn nav_list(cms: &CmsClient) -> Option<Vec<Domain>> {
        let path = Query::new("domains").fields(&["name", "slug"]).build();
        cms.list_opt(&path, Freshness::PRODUCTS).await
    }

    pub async fn list(cms: &CmsClient) -> Vec<Domain> {
        let path = Query::new("domains").sort_asc("name").build();
        cms.list(&path, Freshness::PRODUCTS).await
    }
}

/// Domain names, sorted, for filters and the contact form subject list.
pub fn domain_names(domains: &[Domain]) -> Vec<String> {
    let mut names: Vec<String> = domains
        .iter()
        .map(|d| d.name.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leader {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image: Option<MediaRef>,
    pub linkedin: Option<String>,
}

impl Leader {
    pub async fn list(cms: &CmsClient) -> Vec<Leader> {
        let path = Query::new("leaders")
            .populate_all()
            .sort_asc("order")
            .build();
        cms.list(&path, Freshness::PAGE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Office {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub country: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Office {
    pub async fn list(cms: &CmsClient) -> Vec<Office> {
        let path = Query::new("offices").sort_asc("order").build();
        cms.list(&path, Freshness::VOLATILE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyMilestone {
    #[serde(deserialize_with = "lenient_string")]
    pub year_range: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    /// Newline-separated bullet points.
    pub points: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatWeDo {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub points: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhyUs {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
}

/// Everything the about page lists, fetched together.
#[derive(Debug, Default)]
pub struct AboutCollections {
    pub what_we_do: Vec<WhatWeDo>,
    pub domains: Vec<Domain>,
    pub journey: Vec<JourneyMilestone>,
    pub why_us: Vec<WhyUs>,
}

impl AboutCollections {
    pub async fn fetch(cms: &CmsClient) -> Self {
        let what_path = Query::new("what-we-dos").sort_asc("order").build();
        let journey_path = Query::new("journey-milestones")
            .sort_asc("order")
            .build();
        let why_path = Query::new("why-datayaans").sort_asc("order").build();

        let (what_we_do, domains, journey, why_us) = rocket::tokio::join!(
            cms.list(&what_path, Freshness::PAGE),
            Domain::list(cms),
            cms.list(&journey_path, Freshness::PAGE),
            cms.list(&why_path, Freshness::PAGE),
        );

        AboutCollections {
            what_we_do,
            domains,
            journey,
            why_us,
        }
    }
}
