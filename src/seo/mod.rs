pub mod meta;

pub use meta::{build_meta, SiteMeta};

use crate::render::html_escape;
