//! Hover-driven dropdown for desktop navigation entries.
//!
//! The entry link and its panel form a single [`HoverRegion`]: crossing the
//! gap between them never counts as leaving. Leaving the region schedules a
//! close after a short grace period; re-entering before the deadline cancels
//! it, and [`DropdownDisclosure::poll`] closes deterministically once the
//! deadline has passed.
//!
//! Each dropdown owns its state. There is no shared "which dropdown is open"
//! cell, so two dropdowns can be open at once while one is inside its grace
//! period and the pointer has already reached the other.

use crate::types::{NavigationChild, NavigationEntry};
use maud::{Markup, html};
use std::time::{Duration, Instant};

/// Pointer presence over one logical hit area.
#[derive(Debug, Clone)]
pub struct HoverRegion {
    hovered: bool,
    close_delay: Duration,
    close_at: Option<Instant>,
}

impl HoverRegion {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            hovered: false,
            close_delay,
            close_at: None,
        }
    }

    pub fn enter(&mut self) {
        self.hovered = true;
        self.close_at = None;
    }

    pub fn leave(&mut self, now: Instant) {
        self.hovered = false;
        self.close_at = Some(now + self.close_delay);
    }

    /// True once the pointer has left and the grace period has run out.
    pub fn should_close(&self, now: Instant) -> bool {
        !self.hovered && self.close_at.is_some_and(|deadline| now >= deadline)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pending_close(&self) -> Option<Instant> {
        self.close_at
    }

    fn settle(&mut self) {
        self.close_at = None;
    }
}

#[derive(Debug, Clone)]
pub struct DropdownDisclosure {
    /// Index of the entry in the navigation tree.
    position: usize,
    label: String,
    href: String,
    children: Vec<NavigationChild>,
    region: HoverRegion,
    is_open: bool,
}

impl DropdownDisclosure {
    /// Build a dropdown for the entry at `position`. Plain entries get `None`:
    /// they render as links and never carry disclosure state.
    pub fn for_entry(
        position: usize,
        entry: &NavigationEntry,
        close_delay: Duration,
    ) -> Option<Self> {
        if !entry.has_children() {
            return None;
        }
        Some(Self {
            position,
            label: entry.label.clone(),
            href: entry.href.clone(),
            children: entry.children().to_vec(),
            region: HoverRegion::new(close_delay),
            is_open: false,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn children(&self) -> &[NavigationChild] {
        &self.children
    }

    pub fn region(&self) -> &HoverRegion {
        &self.region
    }

    /// Pointer entered the link or the panel. Opens with no delay.
    pub fn pointer_enter(&mut self) {
        self.region.enter();
        if !self.is_open {
            tracing::debug!(label = %self.label, "dropdown opened");
            self.is_open = true;
        }
    }

    /// Pointer left the combined region.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.region.leave(now);
        self.poll(now);
    }

    /// Apply a pending close whose deadline has passed. Returns true if this
    /// call closed the dropdown.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.region.should_close(now) {
            return false;
        }
        self.region.settle();
        if !self.is_open {
            return false;
        }
        tracing::debug!(label = %self.label, "dropdown closed");
        self.is_open = false;
        true
    }

    /// Close immediately, dropping any pending deadline. Used when the
    /// desktop bar stops being visible and no pointer-leave will arrive.
    pub fn dismiss(&mut self) {
        self.region = HoverRegion::new(self.region.close_delay);
        if self.is_open {
            tracing::debug!(label = %self.label, "dropdown dismissed");
            self.is_open = false;
        }
    }

    pub fn panel_id(&self) -> String {
        dom_id("dropdown", self.position, &self.label)
    }

    /// Render the entry link and its panel. The panel stays in the markup
    /// while closed but carries `hidden`, which removes it from layout and
    /// from the tab order.
    pub fn render(&self) -> Markup {
        let panel_id = self.panel_id();
        html! {
            li.nav-item.has-dropdown.open[self.is_open] data-dropdown=(self.label) {
                a.nav-link href=(self.href)
                    aria-haspopup="true"
                    aria-expanded=(aria_bool(self.is_open))
                    aria-controls=(panel_id) {
                    (self.label)
                }
                div.dropdown-panel id=(panel_id) hidden[!self.is_open] {
                    ul {
                        @for child in &self.children {
                            li {
                                a.dropdown-link href=(child.href) {
                                    span.dropdown-label { (child.label) }
                                    @if let Some(description) = &child.description {
                                        span.dropdown-description { (description) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(crate) fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Element id for the entry at `position`. The position keeps ids unique
/// across labels that slug identically; the slug of lowercase ASCII
/// alphanumerics only makes them readable.
pub(crate) fn dom_id(prefix: &str, position: usize, label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    match slug.trim_end_matches('-') {
        "" => format!("{prefix}-{position}"),
        slug => format!("{prefix}-{position}-{slug}"),
    }
}
