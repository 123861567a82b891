//! Scroll-driven header appearance.
//!
//! Two states, one threshold. The controller owns its scroll listener for as
//! long as it lives, and reports a change only when the derived state flips so
//! that repeated scroll events above (or below) the threshold cost nothing.

use crate::document::{Document, ListenerHandle, ListenerKind};

/// Visual treatment of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    /// Transparent over the top of the page.
    #[default]
    AtTop,
    /// Solid background once the page has scrolled past the threshold.
    Elevated,
}

impl Appearance {
    fn for_offset(offset: f64, threshold: u32) -> Self {
        if offset > f64::from(threshold) {
            Appearance::Elevated
        } else {
            Appearance::AtTop
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Appearance::AtTop => "at-top",
            Appearance::Elevated => "elevated",
        }
    }
}

#[derive(Debug)]
pub struct ScrollAppearanceController {
    threshold: u32,
    appearance: Appearance,
    _subscription: ListenerHandle,
}

impl ScrollAppearanceController {
    /// Subscribe to scroll changes. Always starts at the top; the first scroll
    /// event derives the real state.
    pub fn mount(document: &Document, threshold: u32) -> Self {
        Self {
            threshold,
            appearance: Appearance::AtTop,
            _subscription: document.add_listener(ListenerKind::Scroll),
        }
    }

    /// Feed a scroll offset. Returns the new appearance only on a transition.
    pub fn on_scroll(&mut self, offset: f64) -> Option<Appearance> {
        let next = Appearance::for_offset(offset, self.threshold);
        if next == self.appearance {
            return None;
        }
        tracing::debug!(offset, ?next, "header appearance changed");
        self.appearance = next;
        Some(next)
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn is_elevated(&self) -> bool {
        self.appearance == Appearance::Elevated
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
