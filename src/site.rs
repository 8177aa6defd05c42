//! Site manifest: the input contract with the host site generator.
//!
//! The host renders every page to HTML, then hands this tool a single JSON
//! snapshot of the navigation tree. The snapshot is read once per build and
//! never mutated; composition is a pure transformation over it.
//!
//! ```json
//! {
//!   "site_name": "My Docs",
//!   "site_url": "https://docs.example.com",
//!   "use_directory_urls": true,
//!   "nav": [
//!     { "type": "page", "title": "Home", "src_path": "index.md",
//!       "url": "", "html": "<h1 id=\"home\">Home</h1>..." },
//!     { "type": "section", "title": "Chapter 1", "children": [
//!       { "type": "page", "title": "Setup", "src_path": "ch1/setup.md",
//!         "url": "ch1/setup/", "html": "...", "meta": { "tags": ["install"] } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! `html` may be absent: a page listed twice in the navigation is rendered
//! once by the host, so later occurrences carry no fragment. `meta` is
//! arbitrary front-matter; `tags` is the only key this tool interprets.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("failed to read site manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One node of the navigation tree: either a leaf page or a titled section
/// grouping child nodes. Serialized with an explicit `type` tag so the
/// manifest stays self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavNode {
    Page(PageNode),
    Section(SectionNode),
}

/// A rendered page in the navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageNode {
    /// Display title, used in the table of contents and synthesized headings.
    pub title: String,
    /// Original source path (e.g. `"chapter1/setup.md"`), matched against
    /// exclusion globs.
    pub src_path: String,
    /// Site-relative output URL, e.g. `"chapter1/setup/"` with directory
    /// URLs or `"chapter1/setup.html"` without.
    pub url: String,
    /// Rendered HTML body fragment. Absent when the page appears more than
    /// once in the navigation (render-once semantics).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Arbitrary front-matter metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl PageNode {
    /// Front-matter `tags`, if present and a list of strings.
    pub fn tags(&self) -> Vec<&str> {
        self.meta
            .get("tags")
            .and_then(|v| v.as_array())
            .map(|tags| tags.iter().filter_map(|t| t.as_str()).collect())
            .unwrap_or_default()
    }
}

/// A titled grouping of pages and nested sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionNode {
    pub title: String,
    #[serde(default)]
    pub children: Vec<NavNode>,
}

/// The full site snapshot supplied by the host generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Site {
    /// Site title, exposed to cover page / banner templates.
    #[serde(default)]
    pub site_name: Option<String>,
    /// Canonical site URL, exposed to cover page / banner templates.
    #[serde(default)]
    pub site_url: Option<String>,
    /// Whether pages are addressed as `page/` rather than `page.html`.
    #[serde(default = "default_directory_urls")]
    pub use_directory_urls: bool,
    /// Navigation tree, in rendering order.
    pub nav: Vec<NavNode>,
}

fn default_directory_urls() -> bool {
    true
}

/// Load and parse a site manifest from disk.
pub fn load_site(path: &Path) -> Result<Site, SiteError> {
    let content = fs::read_to_string(path).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SiteError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_round_trip() {
        let json = r#"{
            "site_name": "Docs",
            "use_directory_urls": true,
            "nav": [
                {"type": "page", "title": "Home", "src_path": "index.md", "url": "", "html": "<h1 id=\"h\">Home</h1>"},
                {"type": "section", "title": "Ch 1", "children": [
                    {"type": "page", "title": "A", "src_path": "a.md", "url": "a/", "html": "<h1 id=\"a\">A</h1>", "meta": {"tags": ["x", "y"]}}
                ]}
            ]
        }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.site_name.as_deref(), Some("Docs"));
        assert!(site.use_directory_urls);
        assert_eq!(site.nav.len(), 2);

        match &site.nav[1] {
            NavNode::Section(s) => {
                assert_eq!(s.title, "Ch 1");
                match &s.children[0] {
                    NavNode::Page(p) => assert_eq!(p.tags(), vec!["x", "y"]),
                    NavNode::Section(_) => panic!("expected page"),
                }
            }
            NavNode::Page(_) => panic!("expected section"),
        }
    }

    #[test]
    fn html_and_meta_are_optional() {
        let json = r#"{"type": "page", "title": "Dup", "src_path": "dup.md", "url": "dup/"}"#;
        let node: NavNode = serde_json::from_str(json).unwrap();
        match node {
            NavNode::Page(p) => {
                assert!(p.html.is_none());
                assert!(p.tags().is_empty());
            }
            NavNode::Section(_) => panic!("expected page"),
        }
    }

    #[test]
    fn directory_urls_default_on() {
        let json = r#"{"nav": []}"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert!(site.use_directory_urls);
    }

    #[test]
    fn load_site_missing_file_names_path() {
        let err = load_site(Path::new("/nonexistent/site.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/site.json"));
    }
}
