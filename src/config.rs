//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. User values are
//! layered over stock defaults, so a config file only needs the keys it wants
//! to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── site.toml        # Site config (optional; stock defaults otherwise)
//! ├── index.md
//! └── events.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! name = "Visit Lakeside"   # Brand mark text
//! home = "/"                # Brand mark link
//!
//! [header]
//! scroll_threshold = 20     # px scrolled before the header turns solid
//! breakpoint = 1024         # px; viewports at least this wide use the desktop bar
//! close_delay_ms = 150      # grace period before a desktop dropdown closes
//!
//! [primary_action]
//! label = "Plan your visit"
//! href = "/plan"
//!
//! [colors]
//! header_solid = "#ffffff"
//! header_text = "#1b2a34"
//! header_text_inverse = "#ffffff"
//! accent = "#0b7a75"
//! panel_background = "#ffffff"
//! backdrop = "rgba(10, 20, 30, 0.45)"
//!
//! [[navigation]]
//! label = "Explore"
//! href = "/explore"
//!
//! [[navigation.children]]
//! label = "Areas"
//! href = "/explore/areas"
//! description = "Villages, beaches and the old town"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Navigation problems
//! (empty `children`, empty `href`, duplicate labels) are rejected here at
//! load time, never at render time.

use crate::types::{NavigationTree, PrimaryAction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("navigation entry '{entry}' declares an empty children list; omit the field instead")]
    EmptyChildren { entry: String },
    #[error("navigation entry '{entry}' has child '{child}' with an empty href")]
    EmptyHref { entry: String, child: String },
    #[error("navigation entry '{entry}' has an empty href")]
    EmptyEntryHref { entry: String },
    #[error("navigation label '{label}' is used by more than one entry")]
    DuplicateLabel { label: String },
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand mark shown at the start of the header.
    pub site: SiteIdentity,
    /// Scroll threshold, layout breakpoint and dropdown timing.
    pub header: HeaderConfig,
    /// Call to action rendered in both layouts.
    pub primary_action: PrimaryAction,
    /// Header colors, emitted as CSS custom properties.
    pub colors: ColorConfig,
    /// Top-level navigation entries, in display order.
    pub navigation: NavigationTree,
}

impl SiteConfig {
    /// Validate values are within acceptable ranges and the navigation tree
    /// is well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.header.validate()?;
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.primary_action.label.trim().is_empty()
            || self.primary_action.href.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "primary_action.label and primary_action.href must not be empty".into(),
            ));
        }
        self.navigation.validate()
    }
}

/// Brand mark settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    pub name: String,
    pub home: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "Visit Lakeside".to_string(),
            home: "/".to_string(),
        }
    }
}

/// Header behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Offset in px the page must scroll past before the header is elevated.
    pub scroll_threshold: u32,
    /// Viewport width in px at which the desktop bar replaces the mobile panel.
    pub breakpoint: u32,
    /// Delay before a desktop dropdown closes after the pointer leaves it.
    pub close_delay_ms: u64,
}

/// Upper bound for `close_delay_ms`; longer delays read as a stuck menu.
const MAX_CLOSE_DELAY_MS: u64 = 1000;

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 20,
            breakpoint: 1024,
            close_delay_ms: 150,
        }
    }
}

impl HeaderConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint == 0 {
            return Err(ConfigError::Validation(
                "header.breakpoint must be non-zero".into(),
            ));
        }
        if self.close_delay_ms > MAX_CLOSE_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "header.close_delay_ms must be at most {MAX_CLOSE_DELAY_MS}"
            )));
        }
        Ok(())
    }

    pub fn close_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.close_delay_ms)
    }
}

/// Header color settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Header background once elevated.
    pub header_solid: String,
    /// Link color on the solid header and inside panels.
    pub header_text: String,
    /// Link color while the header is transparent over the hero image.
    pub header_text_inverse: String,
    /// Primary action and focus ring color.
    pub accent: String,
    /// Dropdown and mobile panel background.
    pub panel_background: String,
    /// Dimmed layer behind the mobile panel.
    pub backdrop: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            header_solid: "#ffffff".to_string(),
            header_text: "#1b2a34".to_string(),
            header_text_inverse: "#ffffff".to_string(),
            accent: "#0b7a75".to_string(),
            panel_background: "#ffffff".to_string(),
            backdrop: "rgba(10, 20, 30, 0.45)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `[[navigation]]` list in the overlay replaces the stock list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(
        entries = config.navigation.len(),
        breakpoint = config.header.breakpoint,
        "loaded site config"
    );
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Waymark Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Brand mark
# ---------------------------------------------------------------------------
[site]
name = "Visit Lakeside"
home = "/"

# ---------------------------------------------------------------------------
# Header behavior
# ---------------------------------------------------------------------------
[header]
# Pixels the page must scroll before the header switches from transparent
# to solid.
scroll_threshold = 20

# Viewport width (px) at which the desktop bar is shown. Narrower viewports
# get the menu button and slide-in panel instead.
breakpoint = 1024

# Grace period (ms) before a desktop dropdown closes once the pointer leaves
# it. 0 closes immediately. Maximum 1000.
close_delay_ms = 150

# ---------------------------------------------------------------------------
# Call to action (shown in both layouts)
# ---------------------------------------------------------------------------
[primary_action]
label = "Plan your visit"
href = "/plan"

# ---------------------------------------------------------------------------
# Header colors
# ---------------------------------------------------------------------------
[colors]
header_solid = "#ffffff"
header_text = "#1b2a34"
header_text_inverse = "#ffffff"
accent = "#0b7a75"
panel_background = "#ffffff"
backdrop = "rgba(10, 20, 30, 0.45)"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
# Entries appear in the order listed. An entry with children becomes a
# dropdown on desktop and an accordion group on mobile. Omit `children`
# for a plain link; an empty `children = []` is rejected.
#
# [[navigation]]
# label = "Explore"
# href = "/explore"
#
# [[navigation.children]]
# label = "Areas"
# href = "/explore/areas"
# description = "Villages, beaches and the old town"
#
# [[navigation]]
# label = "Events"
# href = "/events"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --header-solid: {header_solid};
    --header-text: {header_text};
    --header-text-inverse: {header_text_inverse};
    --accent: {accent};
    --panel-bg: {panel_background};
    --backdrop: {backdrop};
}}"#,
        header_solid = colors.header_solid,
        header_text = colors.header_text,
        header_text_inverse = colors.header_text_inverse,
        accent = colors.accent,
        panel_background = colors.panel_background,
        backdrop = colors.backdrop,
    )
}

/// Generate the breakpoint media queries that keep the desktop bar and the
/// mobile path mutually exclusive.
///
/// Media queries cannot read custom properties, so the breakpoint is written
/// out here once and nowhere else.
pub fn generate_layout_css(header: &HeaderConfig) -> String {
    format!(
        r#"@media (min-width: {bp}px) {{
    .mobile-only {{ display: none !important; }}
}}

@media (max-width: {below}px) {{
    .desktop-only {{ display: none !important; }}
}}"#,
        bp = header.breakpoint,
        below = header.breakpoint.saturating_sub(1),
    )
}
