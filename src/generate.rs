//! Static page generation.
//!
//! Content pages are markdown files; each one is rendered inside the shared
//! layout (header, spacer, main) and written as `index.html` under a
//! directory named after its slug:
//!
//! ```text
//! content/                     dist/
//! ├── site.toml                ├── index.html
//! ├── index.md          →      ├── events/index.html
//! ├── events.md                ├── explore/areas/index.html
//! └── explore/                 └── navigation.json
//!     └── areas.md
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into every page:
//! - `static/style.css`: header, dropdown and panel styles
//! - `static/nav.js`: the client side of the header state machine
//!
//! The generated CSS (colors and breakpoint media queries) comes first so the
//! breakpoint has a single source: `site.toml`.

use crate::config::{self, SiteConfig};
use crate::document::Document;
use crate::shell::NavigationShell;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

/// A markdown page found in the content directory.
#[derive(Debug, Clone)]
pub struct ContentPage {
    /// First `# heading`, or the slug when there is none.
    pub title: String,
    /// Path relative to the content root, without extension (`explore/areas`).
    /// Empty for the home page.
    pub slug: String,
    pub body: String,
    pub source: PathBuf,
}

impl ContentPage {
    /// Output path relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        if self.slug.is_empty() {
            PathBuf::from("index.html")
        } else {
            Path::new(&self.slug).join("index.html")
        }
    }
}

/// What a generate run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub pages: Vec<ContentPage>,
    pub navigation_entries: usize,
}

/// Generate the site from `source` into `output_dir`.
pub fn generate(source: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let config = config::load_config(source)?;
    let pages = scan_pages(source)?;
    let css = site_css(&config);

    fs::create_dir_all(output_dir)?;
    for page in &pages {
        let out = output_dir.join(page.output_path());
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out, render_page(page, &config, &css).into_string())?;
        tracing::debug!(path = %out.display(), "page written");
    }

    let json = serde_json::to_string_pretty(&config.navigation)?;
    fs::write(output_dir.join("navigation.json"), json)?;

    Ok(GenerateReport {
        pages,
        navigation_entries: config.navigation.len(),
    })
}

/// Collect markdown pages, sorted by slug with the home page first.
pub fn scan_pages(source: &Path) -> Result<Vec<ContentPage>, GenerateError> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "md") {
            continue;
        }
        let relative = path.strip_prefix(source).unwrap_or(path).with_extension("");
        let mut segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        // `explore/index.md` is the page for `/explore`
        if segments.last().is_some_and(|s| s == "index") {
            segments.pop();
        }
        let slug = segments.join("/");
        let body = fs::read_to_string(path)?;
        let title = first_heading(&body).unwrap_or_else(|| fallback_title(&slug));
        pages.push(ContentPage {
            title,
            slug,
            body,
            source: path.to_path_buf(),
        });
    }
    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(pages)
}

fn first_heading(markdown: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return Some(title.trim().to_string()).filter(|t| !t.is_empty());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }
    None
}

fn fallback_title(slug: &str) -> String {
    match slug.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.replace('-', " "),
        _ => "Home".to_string(),
    }
}

/// Generated custom properties and media queries, then the static sheet.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_layout_css(&config.header),
        CSS_STATIC
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders one content page inside the header layout.
pub fn render_page(page: &ContentPage, config: &SiteConfig, css: &str) -> Markup {
    // Markup is the same for either layout; the width only picks the
    // initial viewport, which CSS overrides on load.
    let document = Document::new();
    let shell = NavigationShell::mount(&document, config, config.header.breakpoint);

    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(&page.body));

    let content = html! {
        (shell.render())
        main.page {
            article.page-content {
                (PreEscaped(body_html))
            }
        }
    };

    let title = if page.slug.is_empty() {
        config.site.name.clone()
    } else {
        format!("{} · {}", page.title, config.site.name)
    };
    base_document(&title, css, content)
}

// ============================================================================
// Tests
// ============================================================================
