use serde::{Deserialize, Serialize};

/// Where media URLs get resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBase {
    pub base_url: String,
    /// Local CMS deployments serve relative upload paths; hosted ones serve CDN URLs.
    pub local: bool,
}

impl MediaBase {
    pub fn absolute(&self, url: &str) -> String {
        let is_absolute =
            url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//");
        if self.local && !is_absolute {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub url: Option<String>,
    pub alternative_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedEntry {
    pub attributes: MediaItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrappedData {
    One(WrappedEntry),
    Many(Vec<WrappedEntry>),
}

/// A media field as the CMS may return it.
///
/// Variant order matters for untagged deserialization: an array is `Many`,
/// an object carrying `data` is `Wrapped`, any other object is `Single`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Many(Vec<MediaItem>),
    Wrapped { data: WrappedData },
    Single(MediaItem),
}

impl MediaRef {
    /// Underlying media items, in CMS order.
    pub fn items(&self) -> Vec<&MediaItem> {
        match self {
            MediaRef::Many(items) => items.iter().collect(),
            MediaRef::Single(item) => vec![item],
            MediaRef::Wrapped { data: WrappedData::One(entry) } => vec![&entry.attributes],
            MediaRef::Wrapped { data: WrappedData::Many(entries) } => {
                entries.iter().map(|e| &e.attributes).collect()
            }
        }
    }
}

/// Resolve a media reference into absolute URLs. Items without a URL are dropped.
pub fn resolve(media: Option<&MediaRef>, base: &MediaBase) -> Vec<String> {
    resolve_assets(media, base)
        .into_iter()
        .map(|(url, _)| url)
        .collect()
}

/// Like [`resolve`] but keeps each item's alternative text.
pub fn resolve_assets(media: Option<&MediaRef>, base: &MediaBase) -> Vec<(String, String)> {
    let Some(media) = media else {
        return Vec::new();
    };
    media
        .items()
        .into_iter()
        .filter_map(|item| {
            let url = item.url.as_deref().filter(|u| !u.is_empty())?;
            Some((
                base.absolute(url),
                item.alternative_text.clone().unwrap_or_default(),
            ))
        })
        .collect()
}

pub fn first(media: Option<&MediaRef>, base: &MediaBase) -> Option<String> {
    resolve(media, base).into_iter().next()
}
