//! Wide-viewport navigation bar: brand mark, one item per entry, and the
//! primary action. Pure composition over [`DropdownDisclosure`].

use crate::config::SiteIdentity;
use crate::dropdown::DropdownDisclosure;
use crate::types::{NavigationEntry, NavigationTree, PrimaryAction};
use maud::{Markup, html};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum DesktopItem {
    Link(NavigationEntry),
    Dropdown(DropdownDisclosure),
}

impl DesktopItem {
    pub fn label(&self) -> &str {
        match self {
            DesktopItem::Link(entry) => &entry.label,
            DesktopItem::Dropdown(dropdown) => dropdown.label(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DesktopNavigationBar {
    items: Vec<DesktopItem>,
}

impl DesktopNavigationBar {
    pub fn new(tree: &NavigationTree, close_delay: Duration) -> Self {
        let items = tree
            .entries()
            .iter()
            .enumerate()
            .map(
                |(position, entry)| match DropdownDisclosure::for_entry(position, entry, close_delay) {
                    Some(dropdown) => DesktopItem::Dropdown(dropdown),
                    None => DesktopItem::Link(entry.clone()),
                },
            )
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[DesktopItem] {
        &self.items
    }

    pub fn dropdown(&self, label: &str) -> Option<&DropdownDisclosure> {
        self.items.iter().find_map(|item| match item {
            DesktopItem::Dropdown(d) if d.label() == label => Some(d),
            _ => None,
        })
    }

    pub fn dropdown_mut(&mut self, label: &str) -> Option<&mut DropdownDisclosure> {
        self.items.iter_mut().find_map(|item| match item {
            DesktopItem::Dropdown(d) if d.label() == label => Some(d),
            _ => None,
        })
    }

    pub fn dropdowns_mut(&mut self) -> impl Iterator<Item = &mut DropdownDisclosure> {
        self.items.iter_mut().filter_map(|item| match item {
            DesktopItem::Dropdown(d) => Some(d),
            DesktopItem::Link(_) => None,
        })
    }

    /// Labels of dropdowns currently open, in display order.
    pub fn open_dropdowns(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DesktopItem::Dropdown(d) if d.is_open() => Some(d.label()),
                _ => None,
            })
            .collect()
    }

    /// Close every dropdown whose grace period has expired.
    pub fn poll(&mut self, now: Instant) {
        for dropdown in self.dropdowns_mut() {
            dropdown.poll(now);
        }
    }

    pub fn dismiss_all(&mut self) {
        for dropdown in self.dropdowns_mut() {
            dropdown.dismiss();
        }
    }

    pub fn render(&self, site: &SiteIdentity, action: &PrimaryAction) -> Markup {
        html! {
            nav.desktop-nav.desktop-only aria-label="Main navigation" {
                a.brand href=(site.home) { (site.name) }
                ul.nav-items {
                    @for item in &self.items {
                        @match item {
                            DesktopItem::Link(entry) => {
                                li.nav-item {
                                    a.nav-link href=(entry.href) { (entry.label) }
                                }
                            },
                            DesktopItem::Dropdown(dropdown) => {
                                (dropdown.render())
                            },
                        }
                    }
                }
                a.primary-action href=(action.href) data-primary-action { (action.label) }
            }
        }
    }
}
