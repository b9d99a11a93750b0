use serde::{Deserialize, Serialize};

use super::null_default;
use crate::cms::{CmsClient, Freshness, Query};
use crate::media::MediaRef;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<MediaRef>,
    pub what_we_deliver: Option<String>,
    pub how_it_helps: Option<String>,
}

impl Service {
    /// Services in display order, with icons.
    pub async fn list(cms: &CmsClient) -> Vec<Service> {
        let path = Query::new("services")
            .populate_all()
            .sort_asc("order")
            .build();
        cms.list(&path, Freshness::VOLATILE).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Solution {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    /// Newline-separated feature list.
    pub features: Option<String>,
    /// Newline-separated highlight list.
    pub highlights: Option<String>,
    pub hero_image: Option<MediaRef>,
    pub thumbnail: Option<MediaRef>,
    pub images: Option<MediaRef>,
}

impl Solution {
    pub async fn find_by_slug(cms: &CmsClient, slug: &str) -> Option<Solution> {
        let path = Query::new("solutions")
            .filter_eq("slug", slug)
            .populate_all()
            .build();
        cms.list::<Solution>(&path, Freshness::PAGE)
            .await
            .into_iter()
            .next()
    }

    /// Built-in copy for the core solution areas, served when the CMS has no record.
    pub fn builtin(slug: &str) -> Option<Solution> {
        let (title, short, description, features, highlights) = match slug {
            "transport-logistics" => (
                "Transport & Logistics",
                "Optimizing supply chains with AI-driven tracking and real-time visibility.",
                "Transform your supply chain operations with our comprehensive Transport & Logistics solution. Leveraging cutting-edge AI and real-time tracking technologies, we help you optimize routes, reduce costs, and improve delivery times while maintaining complete visibility across your entire logistics network.",
                "Real-time GPS tracking\nAI-powered route optimization\nAutomated dispatch management\nPredictive maintenance alerts\nCustomer delivery notifications\nAnalytics dashboard",
                "Reduce operational costs by up to 30%\nImprove on-time delivery rates to 98%+\nGain complete supply chain visibility\nEnhance customer satisfaction",
            ),
            "travel-ticketing" => (
                "Travel & Ticketing",
                "Seamless booking experiences for modern travelers.",
                "Revolutionize the travel booking experience with our advanced Travel & Ticketing platform. From airlines to hotels, our solution provides seamless integration, real-time availability, and intelligent pricing to help you serve modern travelers better.",
                "Multi-channel booking\nDynamic pricing engine\nReal-time inventory\nMobile-first design\nPayment gateway integration\nLoyalty program management",
                "Increase booking conversion by 40%\nReduce booking time by 60%\nSupport 50+ payment methods\n24/7 customer support",
            ),
            "healthcare" => (
                "Healthcare",
                "Advanced digital solutions for patient care.",
                "Empower healthcare providers with our comprehensive digital health platform. From patient management to telemedicine, our solution streamlines operations, improves patient outcomes, and ensures regulatory compliance.",
                "Electronic health records\nTelemedicine platform\nAppointment scheduling\nPrescription management\nPatient portal\nCompliance tracking",
                "Improve patient satisfaction by 45%\nReduce administrative time by 50%\nHIPAA compliant\nIntegrate with existing systems",
            ),
            "bfsi" => (
                "BFSI",
                "Secure and scalable financial technologies.",
                "Drive digital transformation in banking and financial services with our secure, scalable platform. From core banking to wealth management, we provide the technology infrastructure you need to compete in the digital age.",
                "Core banking system\nMobile banking app\nRisk management\nFraud detection\nRegulatory reporting\nCustomer analytics",
                "Process 10M+ transactions daily\nBank-grade security\nReduce fraud by 70%\nCompliant with global standards",
            ),
            "construction" => (
                "Construction",
                "Smart management for complex infrastructure.",
                "Streamline construction project management with our intelligent platform. From planning to execution, track progress, manage resources, and ensure safety compliance across all your projects.",
                "Project planning tools\nResource allocation\nSafety compliance tracking\nProgress monitoring\nBudget management\nCollaboration platform",
                "Complete projects 20% faster\nReduce cost overruns by 35%\nImprove safety compliance\nReal-time project visibility",
            ),
            _ => return None,
        };

        Some(Solution {
            id: None,
            title: title.to_string(),
            slug: slug.to_string(),
            short_description: Some(short.to_string()),
            description: Some(description.to_string()),
            features: Some(features.to_string()),
            highlights: Some(highlights.to_string()),
            hero_image: None,
            thumbnail: None,
            images: None,
        })
    }
}
