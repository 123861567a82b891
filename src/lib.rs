//! # Waymark
//!
//! The adaptive site header for destination marketing sites: a fixed header
//! that turns solid on scroll, hover dropdowns on wide viewports, and an
//! off-canvas accordion panel on narrow ones.
//!
//! # Architecture: State Machines Behind Markup
//!
//! Every component is a plain Rust value that owns its state and renders
//! itself to [`maud::Markup`]. UI events enter through one door,
//! [`shell::NavigationShell::handle`], and leave as an optional
//! [`types::Navigation`] the caller's router resolves.
//!
//! ```text
//! site.toml ─▶ SiteConfig ─▶ NavigationShell ─┬─ ScrollAppearanceController
//!                 (validated)                 ├─ DesktopNavigationBar ── DropdownDisclosure × n
//!                                             └─ MobileDisclosurePanel (PanelState)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Navigation tree (`NavigationEntry`, `NavigationChild`), primary action, outbound navigation |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation, CSS generation |
//! | [`document`] | Page-global resources (listeners, body scroll lock) as RAII handles |
//! | [`scroll`] | Transparent/solid header state from the scroll offset |
//! | [`dropdown`] | Per-entry hover disclosure with a single hit region |
//! | [`desktop`] | Wide-viewport bar composing brand, entries and primary action |
//! | [`mobile`] | Off-canvas panel with a single-expansion accordion |
//! | [`shell`] | The header itself: event dispatch, breakpoint tracking, spacer |
//! | [`generate`] | Renders markdown content pages inside the header layout |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Resources Are Values
//!
//! The scroll lock and document listeners are page-global. Rather than
//! flipping flags from several call sites, acquiring one returns a handle
//! whose `Drop` releases it. The mobile panel keeps its lock and Escape
//! listener together in one `Option` and every closing path clears that
//! option, so "closed but still locked" cannot be expressed.
//!
//! ## Independent Dropdowns, Shared Accordion
//!
//! Desktop dropdowns each own their open flag; nothing forces only one open.
//! The mobile accordion is the opposite: one `expanded_group_label` for the
//! whole panel, so expanding a group replaces the previous one in a single
//! assignment.
//!
//! ## One Breakpoint
//!
//! The breakpoint lives in `site.toml`. It drives the generated media queries
//! that hide one layout or the other and the shell's own [`shell::Viewport`],
//! so markup, CSS and event handling agree.

pub mod config;
pub mod desktop;
pub mod document;
pub mod dropdown;
pub mod generate;
pub mod mobile;
pub mod output;
pub mod scroll;
pub mod shell;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
