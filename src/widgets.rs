//! Initial state for the interactive pieces of a page. The server renders it;
//! `static/site.js` moves slides, dropdowns and the mobile drawer from there.

/// The visible slide of a carousel when the page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Carousel { len, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Controls are only shown when there is something to move between.
    pub fn has_controls(&self) -> bool {
        self.len > 1
    }
}

/// Logos repeated so a CSS marquee can scroll without a visible seam.
pub fn marquee_track(logos: &[String]) -> Vec<&String> {
    logos.iter().chain(logos.iter()).collect()
}
