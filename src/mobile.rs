//! Off-canvas navigation panel for narrow viewports.
//!
//! ```text
//!            trigger
//!   Closed ───────────▶ Open { expanded_group_label }
//!     ▲                   │
//!     └───────────────────┘  close button | link | Escape | backdrop
//!                            | primary action | breakpoint crossing
//! ```
//!
//! Opening acquires the body scroll lock and an Escape listener and stores
//! both in one [`Option`]. Every closing path goes through
//! [`MobileDisclosurePanel::close`], which takes that option, so release
//! happens in exactly one place. Dropping the panel releases them as well.
//!
//! Unlike the desktop dropdowns, the accordion has one shared
//! `expanded_group_label`: expanding a group collapses any other.

use crate::document::{Document, DocumentError, ListenerHandle, ListenerKind, ScrollLock};
use crate::dropdown::{aria_bool, dom_id};
use crate::types::{Navigation, NavigationTree, PrimaryAction};
use maud::{Markup, html};
use std::fmt;
use std::rc::Rc;

/// Element id of the panel, referenced by the trigger's `aria-controls`.
pub const PANEL_ID: &str = "mobile-panel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

/// Why the panel closed. All reasons share the same side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Trigger,
    LinkSelected,
    EscapeKey,
    Backdrop,
    PrimaryAction,
    Breakpoint,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CloseReason::CloseButton => "close button",
            CloseReason::Trigger => "trigger",
            CloseReason::LinkSelected => "link selected",
            CloseReason::EscapeKey => "escape",
            CloseReason::Backdrop => "backdrop",
            CloseReason::PrimaryAction => "primary action",
            CloseReason::Breakpoint => "breakpoint",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub is_open: bool,
    /// `None`, or the label of an entry that has children.
    pub expanded_group_label: Option<String>,
}

/// Page-global resources held only while open.
#[derive(Debug)]
struct OpenResources {
    _scroll_lock: ScrollLock,
    _escape_listener: ListenerHandle,
}

#[derive(Debug)]
pub struct MobileDisclosurePanel {
    document: Document,
    tree: Rc<NavigationTree>,
    state: PanelState,
    resources: Option<OpenResources>,
}

impl MobileDisclosurePanel {
    pub fn new(document: Document, tree: Rc<NavigationTree>) -> Self {
        Self {
            document,
            tree,
            state: PanelState::default(),
            resources: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn expanded_group(&self) -> Option<&str> {
        self.state.expanded_group_label.as_deref()
    }

    /// Open the panel. Returns `Ok(false)` if it was already open.
    ///
    /// The scroll lock is taken first; if it cannot be taken nothing else
    /// changes.
    pub fn open(&mut self) -> Result<bool, DocumentError> {
        if self.state.is_open {
            return Ok(false);
        }
        let scroll_lock = self.document.lock_scroll()?;
        let escape_listener = self.document.add_listener(ListenerKind::EscapeKey);
        self.resources = Some(OpenResources {
            _scroll_lock: scroll_lock,
            _escape_listener: escape_listener,
        });
        self.state = PanelState {
            is_open: true,
            expanded_group_label: None,
        };
        tracing::debug!("mobile panel opened");
        Ok(true)
    }

    /// Close the panel. Returns false if it was already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.state.is_open {
            return false;
        }
        self.resources = None;
        self.state = PanelState::default();
        tracing::debug!(%reason, "mobile panel closed");
        true
    }

    /// Expand `label`, or collapse it if it is already expanded. Any other
    /// expanded group collapses in the same assignment.
    ///
    /// Ignored while closed and for labels that are not groups.
    pub fn toggle_group(&mut self, label: &str) -> bool {
        if !self.state.is_open {
            tracing::warn!(label, "group toggled while panel closed; ignoring");
            return false;
        }
        if !self.tree.find(label).is_some_and(|e| e.has_children()) {
            tracing::warn!(label, "not an expandable group; ignoring");
            return false;
        }
        let next = match self.state.expanded_group_label.as_deref() {
            Some(current) if current == label => None,
            _ => Some(label.to_string()),
        };
        tracing::debug!(?next, "accordion group toggled");
        self.state.expanded_group_label = next;
        true
    }

    /// A leaf link was chosen. Closes the panel and hands the href back.
    pub fn select_link(&mut self, href: &str) -> Navigation {
        self.close(CloseReason::LinkSelected);
        Navigation::to(href)
    }

    /// Keyboard input while the Escape listener is registered.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if self.resources.is_none() || key != Key::Escape {
            return false;
        }
        self.close(CloseReason::EscapeKey)
    }

    pub fn render(&self, action: &PrimaryAction) -> Markup {
        let open = self.state.is_open;
        html! {
            div.panel-backdrop.mobile-only data-panel-backdrop hidden[!open] {}
            div.mobile-panel.mobile-only.open[open]
                id=(PANEL_ID)
                role="dialog"
                aria-modal="true"
                aria-label="Site menu"
                hidden[!open] {
                button.panel-close type="button" aria-label="Close menu" data-panel-close { "×" }
                ul.accordion {
                    @for (position, entry) in self.tree.entries().iter().enumerate() {
                        @if entry.has_children() {
                            @let expanded = self.expanded_group() == Some(entry.label.as_str());
                            @let group_id = dom_id("group", position, &entry.label);
                            li.accordion-group.expanded[expanded] {
                                button.accordion-toggle type="button"
                                    aria-expanded=(aria_bool(expanded))
                                    aria-controls=(group_id)
                                    data-group=(entry.label) {
                                    (entry.label)
                                }
                                ul.accordion-children id=(group_id) hidden[!expanded] {
                                    @for child in entry.children() {
                                        li {
                                            a.panel-link href=(child.href) data-panel-link { (child.label) }
                                        }
                                    }
                                }
                            }
                        } @else {
                            li {
                                a.panel-link href=(entry.href) data-panel-link { (entry.label) }
                            }
                        }
                    }
                }
                a.primary-action href=(action.href) data-primary-action { (action.label) }
            }
        }
    }
}
