//! End-to-end behavior of the header through `NavigationShell::handle`:
//! accordion exclusivity, resource release on every closing path, listener
//! lifecycle across repeated cycles, dropdown independence, the elevation
//! threshold, and panel reset on reopen.

use std::time::{Duration, Instant};
use waymark::config::SiteConfig;
use waymark::document::{Document, ListenerKind};
use waymark::mobile::Key;
use waymark::shell::{NavigationShell, ShellEvent};
use waymark::types::{Navigation, NavigationChild, NavigationEntry, NavigationTree};

const DESKTOP: u32 = 1440;
const MOBILE: u32 = 375;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

/// `A` is a plain link; `B` and `C` are groups.
fn config() -> SiteConfig {
    let tree = NavigationTree::new(vec![
        NavigationEntry::link("A", "/a"),
        NavigationEntry::group(
            "B",
            "/b",
            vec![
                NavigationChild::new("B1", "/b/1"),
                NavigationChild::new("B2", "/b/2").with_description("Second"),
            ],
        ),
        NavigationEntry::group("C", "/c", vec![NavigationChild::new("C1", "/c/1")]),
    ]);
    let config = SiteConfig {
        navigation: tree,
        ..SiteConfig::default()
    };
    config.validate().expect("fixture config must be valid");
    config
}

fn mount(width: u32) -> (Document, NavigationShell) {
    let doc = Document::new();
    let shell = NavigationShell::mount(&doc, &config(), width);
    (doc, shell)
}

fn assert_released(doc: &Document) {
    assert!(!doc.is_scroll_locked(), "scroll lock still held");
    assert_eq!(
        doc.active_listeners(ListenerKind::EscapeKey),
        0,
        "escape listener still registered"
    );
}

// ---------------------------------------------------------------------------
// Mobile accordion
// ---------------------------------------------------------------------------

#[test]
fn at_most_one_group_expanded() {
    let (_doc, mut shell) = mount(MOBILE);
    shell.handle(ShellEvent::TriggerClicked);

    let script = ["B", "C", "C", "B", "A", "B", "B", "C", "missing", "C"];
    let mut expected: Option<&str> = None;
    for label in script {
        shell.handle(ShellEvent::GroupToggled(label.to_string()));
        if label == "B" || label == "C" {
            expected = if expected == Some(label) { None } else { Some(label) };
        }
        assert_eq!(shell.panel().expanded_group(), expected, "after toggling {label}");
        let html = shell.render().into_string();
        assert!(html.matches(r#"class="accordion-group expanded""#).count() <= 1);
    }
}

#[test]
fn every_closing_path_releases_the_lock() {
    let closers = [
        ShellEvent::CloseClicked,
        ShellEvent::LinkSelected("/b/1".into()),
        ShellEvent::KeyPressed(Key::Escape),
        ShellEvent::BackdropClicked,
        ShellEvent::PrimaryActionInvoked,
        ShellEvent::TriggerClicked,
        ShellEvent::Resized { width: DESKTOP },
    ];
    for closer in closers {
        let (doc, mut shell) = mount(MOBILE);
        shell.handle(ShellEvent::TriggerClicked);
        assert!(doc.is_scroll_locked());
        shell.handle(closer.clone());
        assert!(!shell.panel().is_open(), "{closer:?} did not close the panel");
        assert_released(&doc);
    }
}

#[test]
fn repeated_cycles_leave_no_resources() {
    let (doc, mut shell) = mount(MOBILE);
    let closers = [
        ShellEvent::CloseClicked,
        ShellEvent::KeyPressed(Key::Escape),
        ShellEvent::BackdropClicked,
        ShellEvent::LinkSelected("/a".into()),
    ];
    for i in 0..40 {
        shell.handle(ShellEvent::TriggerClicked);
        shell.handle(ShellEvent::GroupToggled("B".into()));
        assert_eq!(doc.active_listeners(ListenerKind::EscapeKey), 1);
        shell.handle(closers[i % closers.len()].clone());
    }
    assert_released(&doc);
    // The scroll listener belongs to the mounted shell, not the panel
    assert_eq!(doc.active_listeners(ListenerKind::Scroll), 1);
}

#[test]
fn reopened_panel_starts_collapsed() {
    let (_doc, mut shell) = mount(MOBILE);
    shell.handle(ShellEvent::TriggerClicked);
    shell.handle(ShellEvent::GroupToggled("B".into()));
    assert_eq!(shell.panel().expanded_group(), Some("B"));

    shell.handle(ShellEvent::CloseClicked);
    shell.handle(ShellEvent::TriggerClicked);
    assert!(shell.panel().is_open());
    assert_eq!(shell.panel().expanded_group(), None);
}

#[test]
fn escape_closes_and_second_escape_is_inert() {
    let (doc, mut shell) = mount(MOBILE);
    shell.handle(ShellEvent::TriggerClicked);
    shell.handle(ShellEvent::GroupToggled("B".into()));

    shell.handle(ShellEvent::KeyPressed(Key::Escape));
    assert!(!shell.panel().is_open());
    assert_eq!(shell.panel().expanded_group(), None);
    assert_released(&doc);

    let before = shell.panel().state().clone();
    shell.handle(ShellEvent::KeyPressed(Key::Escape));
    assert_eq!(shell.panel().state(), &before);
    assert_released(&doc);
}

#[test]
fn clicking_plain_link_on_mobile_navigates_and_closes() {
    let (doc, mut shell) = mount(MOBILE);
    shell.handle(ShellEvent::TriggerClicked);
    let nav = shell.handle(ShellEvent::LinkSelected("/a".into()));
    assert_eq!(nav, Some(Navigation::to("/a")));
    assert!(!shell.panel().is_open());
    assert_released(&doc);
}

// ---------------------------------------------------------------------------
// Desktop dropdowns
// ---------------------------------------------------------------------------

#[test]
fn dropdowns_do_not_affect_each_other() {
    let (_doc, mut shell) = mount(DESKTOP);
    let t0 = Instant::now();

    shell.handle(ShellEvent::PointerEntered("B".into()));
    assert_eq!(shell.desktop().open_dropdowns(), vec!["B"]);

    // B is still in its grace period when C opens
    shell.handle(ShellEvent::PointerLeft("B".into(), t0));
    shell.handle(ShellEvent::PointerEntered("C".into()));
    assert_eq!(shell.desktop().open_dropdowns(), vec!["B", "C"]);

    // B's close fires; C is untouched
    shell.handle(ShellEvent::Tick(t0 + Duration::from_secs(1)));
    assert_eq!(shell.desktop().open_dropdowns(), vec!["C"]);

    // Closing C leaves B closed
    shell.handle(ShellEvent::PointerLeft("C".into(), t0 + Duration::from_secs(1)));
    shell.handle(ShellEvent::Tick(t0 + Duration::from_secs(2)));
    assert!(shell.desktop().open_dropdowns().is_empty());
}

#[test]
fn hover_scenario_opens_and_closes_dropdown() {
    let (_doc, mut shell) = mount(DESKTOP);
    let t0 = Instant::now();

    shell.handle(ShellEvent::PointerEntered("B".into()));
    let html = shell.render().into_string();
    assert!(html.contains(r#"href="/b/1""#));
    assert!(html.contains(r#"href="/b/2""#));
    assert!(html.contains(r#"aria-expanded="true""#));

    // Pointer moves to A and away from B entirely
    shell.handle(ShellEvent::PointerLeft("B".into(), t0));
    shell.handle(ShellEvent::PointerEntered("A".into()));
    shell.handle(ShellEvent::Tick(t0 + Duration::from_millis(200)));
    assert!(shell.desktop().open_dropdowns().is_empty());

    let nav = shell.handle(ShellEvent::LinkSelected("/a".into()));
    assert_eq!(nav, Some(Navigation::to("/a")));
}

// ---------------------------------------------------------------------------
// Elevation
// ---------------------------------------------------------------------------

#[test]
fn elevation_threshold() {
    let (_doc, mut shell) = mount(DESKTOP);
    let threshold = f64::from(SiteConfig::default().header.scroll_threshold);

    shell.handle(ShellEvent::Scrolled(threshold - 1.0));
    assert!(!shell.is_elevated());
    shell.handle(ShellEvent::Scrolled(threshold + 1.0));
    assert!(shell.is_elevated());
    shell.handle(ShellEvent::Scrolled(threshold - 1.0));
    assert!(!shell.is_elevated());
}

#[test]
fn page_does_not_scroll_under_open_panel() {
    let (doc, mut shell) = mount(MOBILE);
    shell.handle(ShellEvent::TriggerClicked);
    shell.handle(ShellEvent::Scrolled(500.0));
    assert_eq!(doc.scroll_offset(), 0.0);
    assert!(!shell.is_elevated());
}
