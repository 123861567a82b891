//! Navigation tree types shared by every renderer.
//!
//! The tree is built once from configuration and never mutated afterwards.
//! Desktop and mobile renderers receive the same `Rc<NavigationTree>`.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A leaf link inside a dropdown or accordion group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationChild {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One top-level menu item.
///
/// `children` is `None` for a plain link. `Some(vec![])` is a configuration
/// error: the field must be omitted rather than left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationEntry {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationChild>>,
}

impl NavigationEntry {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            children: None,
        }
    }

    pub fn group(
        label: impl Into<String>,
        href: impl Into<String>,
        children: Vec<NavigationChild>,
    ) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            children: Some(children),
        }
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Child links, empty for plain entries.
    pub fn children(&self) -> &[NavigationChild] {
        self.children.as_deref().unwrap_or(&[])
    }
}

impl NavigationChild {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered top-level entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationTree(Vec<NavigationEntry>);

impl NavigationTree {
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, label: &str) -> Option<&NavigationEntry> {
        self.0.iter().find(|e| e.label == label)
    }

    /// Labels of entries that expand into a group.
    pub fn group_labels(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|e| e.has_children())
            .map(|e| e.label.as_str())
    }

    /// Reject trees that would render a broken disclosure affordance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.0 {
            if !seen.insert(entry.label.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    label: entry.label.clone(),
                });
            }
            if entry.href.trim().is_empty() {
                return Err(ConfigError::EmptyEntryHref {
                    entry: entry.label.clone(),
                });
            }
            if let Some(children) = &entry.children {
                if children.is_empty() {
                    return Err(ConfigError::EmptyChildren {
                        entry: entry.label.clone(),
                    });
                }
                if let Some(child) = children.iter().find(|c| c.href.trim().is_empty()) {
                    return Err(ConfigError::EmptyHref {
                        entry: entry.label.clone(),
                        child: child.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<NavigationEntry>> for NavigationTree {
    fn from(entries: Vec<NavigationEntry>) -> Self {
        Self(entries)
    }
}

/// The caller-supplied call to action shown in both layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryAction {
    pub label: String,
    pub href: String,
}

impl Default for PrimaryAction {
    fn default() -> Self {
        Self {
            label: "Plan your visit".to_string(),
            href: "/plan".to_string(),
        }
    }
}

/// An outbound navigation handed back to the caller's router unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
}

impl Navigation {
    pub fn to(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}
