use serde::{Deserialize, Serialize};

use super::null_default;
use super::product::ProductRef;
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainTag {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub slug: String,
}

/// A customer case study.
///
/// Domain tagging is canonical in `domain_tags`. Older records carry a plain
/// `domains: [String]` list instead; it is folded into `domain_tags` while
/// deserializing so nothing downstream has to look at both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawCaseStudy")]
pub struct CaseStudy {
    pub id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub customer_industry: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub impact: Option<String>,
    pub outcome: Option<String>,
    pub technologies_used: Vec<String>,
    pub thumbnail: Option<MediaRef>,
    pub images: Option<MediaRef>,
    pub products: Vec<ProductRef>,
    pub domain_tags: Vec<DomainTag>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCaseStudy {
    id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    title: String,
    #[serde(deserialize_with = "null_default")]
    slug: String,
    customer_industry: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    problem: Option<String>,
    solution: Option<String>,
    impact: Option<String>,
    outcome: Option<String>,
    #[serde(deserialize_with = "null_default")]
    technologies_used: Vec<String>,
    thumbnail: Option<MediaRef>,
    images: Option<MediaRef>,
    #[serde(deserialize_with = "null_default")]
    products: Vec<ProductRef>,
    #[serde(deserialize_with = "null_default")]
    domain_tags: Vec<DomainTag>,
    #[serde(deserialize_with = "null_default")]
    domains: Vec<String>,
}

impl From<RawCaseStudy> for CaseStudy {
    fn from(raw: RawCaseStudy) -> Self {
        let mut domain_tags = raw.domain_tags;
        for legacy in raw.domains {
            let name = legacy.trim();
            if name.is_empty() || domain_tags.iter().any(|t| t.name == name) {
                continue;
            }
            domain_tags.push(DomainTag {
                id: None,
                name: name.to_string(),
                slug: String::new(),
            });
        }

        CaseStudy {
            id: raw.id,
            title: raw.title,
            slug: raw.slug,
            customer_industry: raw.customer_industry,
            summary: raw.summary,
            description: raw.description,
            problem: raw.problem,
            solution: raw.solution,
            impact: raw.impact,
            outcome: raw.outcome,
            technologies_used: raw.technologies_used,
            thumbnail: raw.thumbnail,
            images: raw.images,
            products: raw.products,
            domain_tags,
        }
    }
}

impl CaseStudy {
    pub fn has_product(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name == name)
    }

    pub fn has_domain(&self, name: &str) -> bool {
        self.domain_tags.iter().any(|t| t.name == name)
    }

    pub async fn list(cms: &CmsClient) -> Vec<Self> {
        let path = Query::new("case-studies").populate_all().build();
        cms.list(&path, Freshness::VOLATILE).await
    }

    pub async fn find_by_slug(cms: &CmsClient, slug: &str) -> Option<Self> {
        let path = Query::new("case-studies")
            .filter_eq("slug", slug)
            .populate_all()
            .build();
        cms.list::<CaseStudy>(&path, Freshness::VOLATILE)
            .await
            .into_iter()
            .next()
    }
}
