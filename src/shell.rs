//! The site header: single owner of the mobile panel state and the scroll
//! controller, and the one place UI events enter the navigation system.
//!
//! The desktop bar and the mobile trigger + panel are both always present in
//! the markup; the breakpoint media queries decide which is visible. The shell
//! mirrors that decision in [`Viewport`] so it can ignore events aimed at the
//! hidden half.

use crate::config::{HeaderConfig, SiteConfig, SiteIdentity};
use crate::desktop::DesktopNavigationBar;
use crate::document::Document;
use crate::dropdown::{DropdownDisclosure, aria_bool};
use crate::mobile::{CloseReason, Key, MobileDisclosurePanel, PANEL_ID};
use crate::scroll::{Appearance, ScrollAppearanceController};
use crate::types::{Navigation, NavigationTree, PrimaryAction};
use maud::{Markup, html};
use std::rc::Rc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width >= breakpoint {
            Viewport::Desktop
        } else {
            Viewport::Mobile
        }
    }
}

/// Everything the page can tell the header.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Scrolled(f64),
    Resized { width: u32 },
    /// The header's rendered height in the current layout.
    HeaderMeasured { height: u32 },
    PointerEntered(String),
    PointerLeft(String, Instant),
    /// Timer tick for pending dropdown closes.
    Tick(Instant),
    TriggerClicked,
    CloseClicked,
    BackdropClicked,
    KeyPressed(Key),
    GroupToggled(String),
    LinkSelected(String),
    PrimaryActionInvoked,
}

#[derive(Debug)]
pub struct NavigationShell {
    document: Document,
    site: SiteIdentity,
    header: HeaderConfig,
    primary_action: PrimaryAction,
    tree: Rc<NavigationTree>,
    scroll: ScrollAppearanceController,
    desktop: DesktopNavigationBar,
    panel: MobileDisclosurePanel,
    viewport: Viewport,
    desktop_height: Option<u32>,
    mobile_height: Option<u32>,
}

impl NavigationShell {
    /// Mount the header for a validated config at the given viewport width.
    pub fn mount(document: &Document, config: &SiteConfig, viewport_width: u32) -> Self {
        let tree = Rc::new(config.navigation.clone());
        let viewport = Viewport::for_width(viewport_width, config.header.breakpoint);
        tracing::debug!(?viewport, entries = tree.len(), "navigation shell mounted");
        Self {
            document: document.clone(),
            site: config.site.clone(),
            header: config.header.clone(),
            primary_action: config.primary_action.clone(),
            scroll: ScrollAppearanceController::mount(document, config.header.scroll_threshold),
            desktop: DesktopNavigationBar::new(&tree, config.header.close_delay()),
            panel: MobileDisclosurePanel::new(document.clone(), Rc::clone(&tree)),
            tree,
            viewport,
            desktop_height: None,
            mobile_height: None,
        }
    }

    /// Dispatch one event. Returns a navigation when a link or the primary
    /// action was activated; resolving it is up to the caller.
    pub fn handle(&mut self, event: ShellEvent) -> Option<Navigation> {
        match event {
            ShellEvent::Scrolled(offset) => {
                let offset = self.document.scroll_to(offset);
                self.scroll.on_scroll(offset);
                None
            }
            ShellEvent::Resized { width } => {
                self.resize(width);
                None
            }
            ShellEvent::HeaderMeasured { height } => {
                match self.viewport {
                    Viewport::Desktop => self.desktop_height = Some(height),
                    Viewport::Mobile => self.mobile_height = Some(height),
                }
                None
            }
            ShellEvent::PointerEntered(label) => {
                if let Some(dropdown) = self.desktop_dropdown(&label) {
                    dropdown.pointer_enter();
                }
                None
            }
            ShellEvent::PointerLeft(label, now) => {
                if let Some(dropdown) = self.desktop_dropdown(&label) {
                    dropdown.pointer_leave(now);
                }
                None
            }
            ShellEvent::Tick(now) => {
                self.desktop.poll(now);
                None
            }
            ShellEvent::TriggerClicked => {
                self.toggle_panel();
                None
            }
            ShellEvent::CloseClicked => {
                self.panel.close(CloseReason::CloseButton);
                None
            }
            ShellEvent::BackdropClicked => {
                self.panel.close(CloseReason::Backdrop);
                None
            }
            ShellEvent::KeyPressed(key) => {
                self.panel.key_pressed(key);
                None
            }
            ShellEvent::GroupToggled(label) => {
                self.panel.toggle_group(&label);
                None
            }
            ShellEvent::LinkSelected(href) => {
                if self.panel.is_open() {
                    Some(self.panel.select_link(&href))
                } else {
                    Some(Navigation::to(href))
                }
            }
            ShellEvent::PrimaryActionInvoked => {
                self.panel.close(CloseReason::PrimaryAction);
                Some(Navigation::to(self.primary_action.href.clone()))
            }
        }
    }

    fn resize(&mut self, width: u32) {
        let next = Viewport::for_width(width, self.header.breakpoint);
        if next == self.viewport {
            return;
        }
        tracing::debug!(width, ?next, "viewport crossed breakpoint");
        self.viewport = next;
        match next {
            // The panel is invisible above the breakpoint; it must not keep
            // the page locked.
            Viewport::Desktop => {
                self.panel.close(CloseReason::Breakpoint);
            }
            Viewport::Mobile => self.desktop.dismiss_all(),
        }
    }

    fn toggle_panel(&mut self) {
        if self.viewport != Viewport::Mobile {
            return;
        }
        if self.panel.is_open() {
            self.panel.close(CloseReason::Trigger);
        } else if let Err(err) = self.panel.open() {
            tracing::warn!(%err, "mobile panel could not open");
        }
    }

    fn desktop_dropdown(&mut self, label: &str) -> Option<&mut DropdownDisclosure> {
        if self.viewport != Viewport::Desktop {
            return None;
        }
        let dropdown = self.desktop.dropdown_mut(label);
        if dropdown.is_none() {
            tracing::trace!(label, "pointer event for entry without dropdown");
        }
        dropdown
    }

    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn appearance(&self) -> Appearance {
        self.scroll.appearance()
    }

    pub fn is_elevated(&self) -> bool {
        self.scroll.is_elevated()
    }

    pub fn desktop(&self) -> &DesktopNavigationBar {
        &self.desktop
    }

    pub fn panel(&self) -> &MobileDisclosurePanel {
        &self.panel
    }

    /// Height reserved below the fixed header: the last measurement taken in
    /// the current layout, if any.
    pub fn spacer_height(&self) -> Option<u32> {
        match self.viewport {
            Viewport::Desktop => self.desktop_height,
            Viewport::Mobile => self.mobile_height,
        }
    }

    pub fn render(&self) -> Markup {
        let panel_open = self.panel.is_open();
        let spacer_style = self.spacer_height().map(|h| format!("height: {h}px;"));
        html! {
            header class={ "site-header " (self.appearance().css_class()) }
                data-scroll-threshold=(self.header.scroll_threshold)
                data-breakpoint=(self.header.breakpoint)
                data-close-delay=(self.header.close_delay_ms) {
                (self.desktop.render(&self.site, &self.primary_action))
                div.mobile-bar.mobile-only {
                    a.brand href=(self.site.home) { (self.site.name) }
                    button.panel-trigger type="button"
                        aria-controls=(PANEL_ID)
                        aria-expanded=(aria_bool(panel_open))
                        aria-label="Open menu"
                        data-panel-trigger {
                        span.trigger-line {}
                        span.trigger-line {}
                        span.trigger-line {}
                    }
                }
                (self.panel.render(&self.primary_action))
            }
            div.header-spacer aria-hidden="true" style=[spacer_style] {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ListenerKind;
    use crate::test_helpers::sample_config;
    use crate::types::{NavigationChild, NavigationEntry};

    const DESKTOP: u32 = 1280;
    const MOBILE: u32 = 390;

    fn mounted(width: u32) -> (Document, NavigationShell) {
        let doc = Document::new();
        let shell = NavigationShell::mount(&doc, &sample_config(), width);
        (doc, shell)
    }

    #[test]
    fn viewport_follows_breakpoint() {
        assert_eq!(Viewport::for_width(1024, 1024), Viewport::Desktop);
        assert_eq!(Viewport::for_width(1023, 1024), Viewport::Mobile);
    }

    #[test]
    fn scroll_events_toggle_elevation() {
        let (_doc, mut shell) = mounted(DESKTOP);
        shell.handle(ShellEvent::Scrolled(21.0));
        assert!(shell.is_elevated());
        shell.handle(ShellEvent::Scrolled(0.0));
        assert!(!shell.is_elevated());
    }

    #[test]
    fn remount_after_scrolling_starts_at_top() {
        let (doc, mut shell) = mounted(DESKTOP);
        shell.handle(ShellEvent::Scrolled(300.0));
        assert!(shell.is_elevated());
        drop(shell);

        let mut shell = NavigationShell::mount(&doc, &sample_config(), DESKTOP);
        assert_eq!(shell.appearance(), Appearance::AtTop);
        shell.handle(ShellEvent::Scrolled(300.0));
        assert!(shell.is_elevated());
    }

    #[test]
    fn non_ascii_group_labels_get_distinct_ids() {
        let config = SiteConfig {
            navigation: NavigationTree::new(vec![
                NavigationEntry::group("住宿", "/stay", vec![NavigationChild::new("酒店", "/stay/hotels")]),
                NavigationEntry::group("観光", "/see", vec![NavigationChild::new("寺", "/see/temples")]),
            ]),
            ..SiteConfig::default()
        };
        config.validate().unwrap();
        let shell = NavigationShell::mount(&Document::new(), &config, DESKTOP);
        let html = shell.render().into_string();
        for id in ["dropdown-0", "dropdown-1", "group-0", "group-1"] {
            assert_eq!(html.matches(&format!(r#"id="{id}""#)).count(), 1, "{id}");
            assert_eq!(html.matches(&format!(r#"aria-controls="{id}""#)).count(), 1, "{id}");
        }
    }

    #[test]
    fn pointer_events_ignored_on_mobile() {
        let (_doc, mut shell) = mounted(MOBILE);
        shell.handle(ShellEvent::PointerEntered("Explore".into()));
        assert!(shell.desktop().open_dropdowns().is_empty());
    }

    #[test]
    fn trigger_ignored_on_desktop() {
        let (doc, mut shell) = mounted(DESKTOP);
        shell.handle(ShellEvent::TriggerClicked);
        assert!(!shell.panel().is_open());
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn trigger_toggles_panel() {
        let (doc, mut shell) = mounted(MOBILE);
        shell.handle(ShellEvent::TriggerClicked);
        assert!(shell.panel().is_open());
        assert!(doc.is_scroll_locked());
        shell.handle(ShellEvent::TriggerClicked);
        assert!(!shell.panel().is_open());
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn widening_past_breakpoint_closes_panel() {
        let (doc, mut shell) = mounted(MOBILE);
        shell.handle(ShellEvent::TriggerClicked);
        shell.handle(ShellEvent::Resized { width: DESKTOP });
        assert_eq!(shell.viewport(), Viewport::Desktop);
        assert!(!shell.panel().is_open());
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.active_listeners(ListenerKind::EscapeKey), 0);
    }

    #[test]
    fn narrowing_past_breakpoint_dismisses_dropdowns() {
        let (_doc, mut shell) = mounted(DESKTOP);
        shell.handle(ShellEvent::PointerEntered("Stay".into()));
        shell.handle(ShellEvent::Resized { width: MOBILE });
        assert!(shell.desktop().open_dropdowns().is_empty());
    }

    #[test]
    fn primary_action_closes_panel_and_navigates() {
        let (doc, mut shell) = mounted(MOBILE);
        shell.handle(ShellEvent::TriggerClicked);
        let nav = shell.handle(ShellEvent::PrimaryActionInvoked);
        assert_eq!(nav, Some(Navigation::to("/plan")));
        assert!(!shell.panel().is_open());
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn desktop_link_navigates_without_touching_panel() {
        let (_doc, mut shell) = mounted(DESKTOP);
        let nav = shell.handle(ShellEvent::LinkSelected("/events".into()));
        assert_eq!(nav, Some(Navigation::to("/events")));
    }

    #[test]
    fn spacer_tracks_height_per_layout() {
        let (_doc, mut shell) = mounted(DESKTOP);
        assert_eq!(shell.spacer_height(), None);
        shell.handle(ShellEvent::HeaderMeasured { height: 88 });
        assert_eq!(shell.spacer_height(), Some(88));

        shell.handle(ShellEvent::Resized { width: MOBILE });
        assert_eq!(shell.spacer_height(), None);
        shell.handle(ShellEvent::HeaderMeasured { height: 64 });
        assert_eq!(shell.spacer_height(), Some(64));

        shell.handle(ShellEvent::Resized { width: DESKTOP });
        assert_eq!(shell.spacer_height(), Some(88));
    }

    #[test]
    fn render_includes_both_layouts_and_spacer() {
        let (_doc, mut shell) = mounted(DESKTOP);
        shell.handle(ShellEvent::HeaderMeasured { height: 88 });
        let html = shell.render().into_string();
        assert!(html.contains("desktop-nav"));
        assert!(html.contains("data-panel-trigger"));
        assert!(html.contains(r#"id="mobile-panel""#));
        assert!(html.contains(r#"style="height: 88px;""#));
        assert!(html.contains(r#"class="site-header at-top""#));
        assert!(html.contains(r#"data-breakpoint="1024""#));
    }

    #[test]
    fn render_unmeasured_spacer_has_no_fixed_height() {
        let (_doc, shell) = mounted(MOBILE);
        let html = shell.render().into_string();
        assert!(html.contains("header-spacer"));
        assert!(!html.contains("height:"));
    }

    #[test]
    fn unmount_releases_everything() {
        let (doc, mut shell) = mounted(MOBILE);
        shell.handle(ShellEvent::TriggerClicked);
        drop(shell);
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.active_listeners(ListenerKind::Scroll), 0);
        assert_eq!(doc.active_listeners(ListenerKind::EscapeKey), 0);
    }
}
