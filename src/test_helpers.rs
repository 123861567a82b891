//! Shared fixtures for the waymark test suite.
//!
//! The sample tree mirrors a small destination site:
//!
//! ```text
//! Explore  (group: Areas, Itineraries)
//! Events   (plain link)
//! Stay     (group: Hotels, Campsites)
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{CONFIG_FILE, SiteConfig};
use crate::types::{NavigationChild, NavigationEntry, NavigationTree};

pub fn sample_tree() -> NavigationTree {
    NavigationTree::new(vec![
        NavigationEntry::group(
            "Explore",
            "/explore",
            vec![
                NavigationChild::new("Areas", "/explore/areas")
                    .with_description("Villages, beaches and the old town"),
                NavigationChild::new("Itineraries", "/explore/itineraries"),
            ],
        ),
        NavigationEntry::link("Events", "/events"),
        NavigationEntry::group(
            "Stay",
            "/stay",
            vec![
                NavigationChild::new("Hotels", "/stay/hotels"),
                NavigationChild::new("Campsites", "/stay/campsites"),
            ],
        ),
    ])
}

pub fn sample_config() -> SiteConfig {
    SiteConfig {
        navigation: sample_tree(),
        ..SiteConfig::default()
    }
}

pub const SAMPLE_SITE_TOML: &str = r#"
[site]
name = "Visit Lakeside"

[header]
close_delay_ms = 0

[[navigation]]
label = "Explore"
href = "/explore"

[[navigation.children]]
label = "Areas"
href = "/explore/areas"
description = "Villages, beaches and the old town"

[[navigation]]
label = "Events"
href = "/events"
"#;

/// Content directory with `site.toml` and two markdown pages.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), CONFIG_FILE, SAMPLE_SITE_TOML);
    write(
        tmp.path(),
        "index.md",
        "# Welcome to Lakeside\n\nSwim, hike and eat **well**.",
    );
    write(
        tmp.path(),
        "events.md",
        "# Events\n\nThe summer regatta runs in July.",
    );
    tmp
}

pub fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
