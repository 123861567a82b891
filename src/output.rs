//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Navigation
//!
//! ```text
//! Navigation
//! 001 Explore → /explore (dropdown, 2 links)
//!     001 Areas → /explore/areas
//!         Villages, beaches and the old town
//!     002 Itineraries → /explore/itineraries
//! 002 Events → /events
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Events → events/index.html
//!     Source: events.md
//!
//! Generated 2 pages, 3 navigation entries
//! ```

use crate::config::SiteConfig;
use crate::generate::GenerateReport;
use crate::types::NavigationTree;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Navigation tree
// ============================================================================

pub fn format_navigation_tree(tree: &NavigationTree) -> Vec<String> {
    let mut lines = vec!["Navigation".to_string()];
    if tree.is_empty() {
        lines.push(format!("{}(no entries)", indent(1)));
        return lines;
    }
    for (i, entry) in tree.entries().iter().enumerate() {
        let mut header = format!("{} {} → {}", format_index(i + 1), entry.label, entry.href);
        if entry.has_children() {
            header.push_str(&format!(
                " (dropdown, {})",
                plural(entry.children().len(), "link", "links")
            ));
        }
        lines.push(header);
        for (j, child) in entry.children().iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(j + 1),
                child.label,
                child.href
            ));
            if let Some(desc) = &child.description {
                lines.push(format!("{}{}", indent(2), truncate_desc(desc.trim(), 60)));
            }
        }
    }
    lines
}

pub fn print_navigation_tree(tree: &NavigationTree) {
    for line in format_navigation_tree(tree) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary of a validated config: header behavior, then the tree.
pub fn format_check_output(config: &SiteConfig) -> Vec<String> {
    let groups = config.navigation.group_labels().count();
    let mut lines = vec![
        format!("Site: {} ({})", config.site.name, config.site.home),
        format!(
            "{}Header: elevated past {}px, desktop at {}px and wider, dropdown close delay {}ms",
            indent(1),
            config.header.scroll_threshold,
            config.header.breakpoint,
            config.header.close_delay_ms
        ),
        format!(
            "{}Primary action: {} → {}",
            indent(1),
            config.primary_action.label,
            config.primary_action.href
        ),
        format!(
            "{}Entries: {}, {}",
            indent(1),
            config.navigation.len(),
            plural(groups, "group", "groups")
        ),
        String::new(),
    ];
    lines.extend(format_navigation_tree(&config.navigation));
    lines
}

pub fn print_check_output(config: &SiteConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for page in &report.pages {
        let output = page.output_path();
        if page.slug.is_empty() {
            lines.push(format!("Home → {}", output.display()));
            continue;
        }
        position += 1;
        lines.push(format!(
            "{} {} → {}",
            format_index(position),
            page.title,
            output.display()
        ));
        let source = page.source.strip_prefix(source_root).unwrap_or(&page.source);
        lines.push(format!("{}Source: {}", indent(1), source.display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(
            report.navigation_entries,
            "navigation entry",
            "navigation entries"
        )
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, source_root: &Path) {
    for line in format_generate_output(report, source_root) {
        println!("{}", line);
    }
}
