//! Navigation walker and print page composer.
//!
//! Walks the site's navigation tree in order, applies the link rewriter to
//! every included page, assigns each page and section its hierarchical
//! number (`2.3`), and emits one concatenated HTML body plus a parallel
//! table-of-contents tree.
//!
//! The walk is a pure fold over the tree: table-of-contents entries, heading
//! styles, warnings and exclusions accumulate on the walker and come back as
//! data in [`Composed`]. Recoverable page problems (empty HTML, missing h1)
//! warn and continue; anchor collisions are fatal because they would silently
//! cross-link unrelated pages.

use std::collections::HashMap;
use std::sync::LazyLock;

use maud::{html, Markup, PreEscaped};
use regex::Regex;
use thiserror::Error;

use crate::config::PrintConfig;
use crate::exclude::exclude;
use crate::numbering::{heading_number_style, inner_heading_styles, section_id};
use crate::rewrite::rewrite_page;
use crate::site::{NavNode, SectionNode, Site};
use crate::templates::Templates;
use crate::urls::page_key;

// Deliberately case-sensitive and h0-inclusive: only a well-formed lowercase
// heading counts as "the page already starts with one".
static FIRST_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h[0-6]").expect("valid regex"));

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(
        "pages '{first}' and '{second}' both map to anchor id '{key}'; \
         rename one so links stay unambiguous"
    )]
    DuplicatePageKey {
        key: String,
        first: String,
        second: String,
    },
    #[error("failed to render {what} template: {source}")]
    Template {
        what: &'static str,
        #[source]
        source: tera::Error,
    },
}

/// One table-of-contents entry; sections carry their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Display title, already number-prefixed when enumeration is on.
    pub title: String,
    /// Anchor id of the page or section container.
    pub id: String,
    /// Nesting depth in the navigation tree (0 = top level).
    pub level: usize,
    pub children: Vec<TocEntry>,
}

/// The composed print page: body HTML plus everything the walk learned.
#[derive(Debug)]
pub struct Composed {
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Recoverable problems, already logged, kept for build reporting.
    pub warnings: Vec<String>,
    /// Source paths of pages left out by the exclude patterns.
    pub excluded: Vec<String>,
}

/// Compose the full print page body from the site snapshot.
pub fn write_combined(
    site: &Site,
    config: &PrintConfig,
    templates: &Templates,
) -> Result<Composed, ComposeError> {
    let mut walk = Walk {
        directory_urls: site.use_directory_urls,
        exclude_patterns: &config.exclude,
        enumerate: config.enumerate_headings,
        numbering_depth: config.toc_depth.min(config.enumerate_headings_depth),
        heading_styles: Vec::new(),
        warnings: Vec::new(),
        excluded: Vec::new(),
        seen_keys: HashMap::new(),
    };
    let (items_html, toc) = walk.render_items(&site.nav, 0, "")?;

    let mut classes = Vec::new();
    if config.add_full_urls {
        classes.push("print-site-add-full-url");
    }
    if config.enumerate_headings {
        classes.push("print-site-enumerate-headings");
    }
    if config.enumerate_figures {
        classes.push("print-site-enumerate-figures");
    }

    // Scope div: lets print styles target only the combined page
    let mut html = format!(r#"<div id="print-site-page" class="{}">"#, classes.join(" "));

    if let Some(cover) = templates
        .render_cover_page(site, config)
        .map_err(|source| ComposeError::Template {
            what: "cover page",
            source,
        })?
    {
        html.push_str(&format!(
            r#"<section id="print-site-cover-page">{cover}</section>"#
        ));
    }

    if let Some(banner) = templates
        .render_banner(site, config)
        .map_err(|source| ComposeError::Template {
            what: "banner",
            source,
        })?
    {
        html.push_str(&format!(r#"<div id="print-site-banner">{banner}</div>"#));
    }

    if config.add_table_of_contents {
        html.push_str(&toc_section(config, &toc).into_string());
    }

    html.push_str(&items_html);
    html.push_str("</div>");
    html.push_str(&format!(
        "<style>{}</style>",
        walk.heading_styles.join("\n")
    ));

    Ok(Composed {
        html,
        toc,
        warnings: walk.warnings,
        excluded: walk.excluded,
    })
}

struct Walk<'a> {
    directory_urls: bool,
    exclude_patterns: &'a [String],
    enumerate: bool,
    numbering_depth: u8,
    heading_styles: Vec<String>,
    warnings: Vec<String>,
    excluded: Vec<String>,
    // page key → url, for collision detection
    seen_keys: HashMap<String, String>,
}

impl Walk<'_> {
    /// Render a sibling list at `level`, numbering the included items
    /// `{prefix}1`, `{prefix}2`, ... Excluded items are dropped before
    /// numbering, so they never consume a position.
    fn render_items(
        &mut self,
        nodes: &[NavNode],
        level: usize,
        prefix: &str,
    ) -> Result<(String, Vec<TocEntry>), ComposeError> {
        let included = self.filter_excluded(nodes);

        let mut items_html = String::new();
        let mut toc = Vec::new();

        for (i, node) in included.into_iter().enumerate() {
            let my_prefix = format!("{prefix}{}", i + 1);

            match node {
                NavNode::Page(page) => {
                    let key = page_key(&page.url);

                    // The same page listed twice is fine (rendered once by
                    // the host); two different pages on one key are not.
                    match self.seen_keys.get(&key) {
                        Some(first) if *first != page.url => {
                            return Err(ComposeError::DuplicatePageKey {
                                key,
                                first: first.clone(),
                                second: page.url.clone(),
                            });
                        }
                        Some(_) => {}
                        None => {
                            self.seen_keys.insert(key.clone(), page.url.clone());
                        }
                    }

                    toc.push(TocEntry {
                        title: self.entry_title(&page.title, &my_prefix),
                        id: key.clone(),
                        level,
                        children: Vec::new(),
                    });
                    self.heading_styles
                        .push(heading_number_style(&key, &my_prefix));

                    let Some(content) = page.html.as_deref().filter(|h| !h.is_empty()) else {
                        self.warn(format!(
                            "'{}' has no content and will appear in the table of contents only",
                            page.src_path
                        ));
                        continue;
                    };
                    let mut content = content.to_string();

                    // Pages starting at h2 or deeper get a stand-in h1 so the
                    // page number has something to attach to
                    if let Some(first) = FIRST_HEADING_RE.find(&content) {
                        if first.as_str() != "<h1" {
                            let h1 = html! { h1 id=(key) { (page.title) } };
                            content = format!("{}{content}", h1.into_string());
                            self.warn(format!(
                                "'{}' is missing a leading h1; added one titled '{}'",
                                page.src_path, page.title
                            ));
                        }
                    }

                    let inner =
                        inner_heading_styles(&key, &my_prefix, level, self.numbering_depth);
                    if !inner.is_empty() {
                        self.heading_styles.push(inner);
                    }

                    // Front-matter tags become a small inline tag list
                    let tags = page.tags();
                    if !tags.is_empty() {
                        let nav = html! {
                            nav class="md-tags" {
                                @for tag in &tags {
                                    span class="md-tag" { (tag) }
                                }
                            }
                        };
                        content = format!("{}{content}", nav.into_string());
                    }

                    items_html.push_str(&rewrite_page(
                        &content,
                        &page.url,
                        self.directory_urls,
                        &my_prefix,
                    ));
                }
                NavNode::Section(section) => {
                    let id = section_id(&my_prefix);
                    self.heading_styles
                        .push(heading_number_style(&id, &my_prefix));

                    let (children_html, children_toc) =
                        self.render_items(&section.children, level + 1, &format!("{my_prefix}."))?;

                    let markup = html! {
                        section class="print-page md-section" id=(id) heading-number=(my_prefix) {
                            h1 {
                                (section.title)
                                a class="headerlink" href={ "#" (id) } title="Permanent link" {}
                            }
                            (PreEscaped(children_html))
                        }
                    };
                    items_html.push_str(&markup.into_string());

                    toc.push(TocEntry {
                        title: self.entry_title(&section.title, &my_prefix),
                        id,
                        level,
                        children: children_toc,
                    });
                }
            }
        }

        Ok((items_html, toc))
    }

    /// Drop excluded pages and sections whose pages are all excluded,
    /// recording what was left out.
    fn filter_excluded<'n>(&mut self, nodes: &'n [NavNode]) -> Vec<&'n NavNode> {
        let mut included = Vec::new();
        for node in nodes {
            match node {
                NavNode::Page(page) => {
                    if exclude(&page.src_path, self.exclude_patterns) {
                        log::debug!("excluding page '{}'", page.src_path);
                        self.excluded.push(page.src_path.clone());
                    } else {
                        included.push(node);
                    }
                }
                NavNode::Section(section) => {
                    if self.has_included_page(section) {
                        included.push(node);
                    } else {
                        log::debug!("excluding section '{}'", section.title);
                        self.record_excluded_pages(&section.children);
                    }
                }
            }
        }
        included
    }

    fn has_included_page(&self, section: &SectionNode) -> bool {
        section.children.iter().any(|child| match child {
            NavNode::Page(page) => !exclude(&page.src_path, self.exclude_patterns),
            NavNode::Section(nested) => self.has_included_page(nested),
        })
    }

    fn record_excluded_pages(&mut self, nodes: &[NavNode]) {
        for node in nodes {
            match node {
                NavNode::Page(page) => self.excluded.push(page.src_path.clone()),
                NavNode::Section(nested) => self.record_excluded_pages(&nested.children),
            }
        }
    }

    fn entry_title(&self, title: &str, prefix: &str) -> String {
        if self.enumerate {
            format!("{prefix} {title}")
        } else {
            title.to_string()
        }
    }

    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }
}

/// The table-of-contents block, rendered as a nested list mirroring the
/// navigation tree.
fn toc_section(config: &PrintConfig, toc: &[TocEntry]) -> Markup {
    html! {
        section class="print-page" {
            div id="print-page-toc" data-toc-depth=(config.toc_depth) {
                nav role="navigation" class="print-page-toc-nav" {
                    h1 class="print-page-toc-title" { (config.toc_title) }
                    @if !toc.is_empty() {
                        (toc_list(toc, 1, config.toc_depth))
                    }
                }
            }
        }
    }
}

fn toc_list(entries: &[TocEntry], depth: u8, max_depth: u8) -> Markup {
    html! {
        ul class=(format!("print-site-toc-level-{depth}")) {
            @for entry in entries {
                li {
                    a href={ "#" (entry.id) } { (entry.title) }
                    @if !entry.children.is_empty() && depth < max_depth {
                        (toc_list(&entry.children, depth + 1, max_depth))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::PageNode;

    fn page(title: &str, src_path: &str, url: &str, html: Option<&str>) -> NavNode {
        NavNode::Page(PageNode {
            title: title.to_string(),
            src_path: src_path.to_string(),
            url: url.to_string(),
            html: html.map(String::from),
            meta: serde_json::Map::new(),
        })
    }

    fn section(title: &str, children: Vec<NavNode>) -> NavNode {
        NavNode::Section(SectionNode {
            title: title.to_string(),
            children,
        })
    }

    fn site(nav: Vec<NavNode>) -> Site {
        Site {
            site_name: Some("Test".to_string()),
            site_url: None,
            use_directory_urls: true,
            nav,
        }
    }

    fn compose(site: &Site, config: &PrintConfig) -> Composed {
        write_combined(site, config, &Templates::default()).unwrap()
    }

    #[test]
    fn pages_appear_in_nav_order() {
        let site = site(vec![
            page("Homepage", "index.md", "", Some(r#"<h1 id="home">Homepage</h1>"#)),
            page("A", "a.md", "a/", Some(r#"<h1 id="a">A</h1>"#)),
            page("Z", "z.md", "z/", Some(r#"<h1 id="z">Z</h1>"#)),
        ]);
        let composed = compose(&site, &PrintConfig::default());

        let index = composed.html.find(r#"id="index""#).unwrap();
        let a = composed.html.find(r#"<section class="print-page" id="a""#).unwrap();
        let z = composed.html.find(r#"<section class="print-page" id="z""#).unwrap();
        assert!(index < a && a < z);

        let titles: Vec<&str> = composed.toc.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["1 Homepage", "2 A", "3 Z"]);
        assert!(composed.warnings.is_empty());
    }

    #[test]
    fn sections_wrap_and_number_their_children() {
        let site = site(vec![
            page("Home", "index.md", "", Some(r#"<h1 id="h">Home</h1>"#)),
            section(
                "Chapter 1",
                vec![page("Setup", "ch1/setup.md", "ch1/setup/", Some(r#"<h1 id="s">Setup</h1>"#))],
            ),
        ]);
        let composed = compose(&site, &PrintConfig::default());

        assert!(composed.html.contains(
            r#"<section class="print-page md-section" id="section-2" heading-number="2">"#
        ));
        assert!(composed.html.contains(r#"heading-number="2.1""#));

        assert_eq!(composed.toc[1].title, "2 Chapter 1");
        assert_eq!(composed.toc[1].children[0].title, "2.1 Setup");
        assert_eq!(composed.toc[1].children[0].id, "ch1-setup");

        // Section number rule lands in the style block
        assert!(composed.html.contains(
            ".print-site-enumerate-headings #section-2 > h1:before { content: '2 ' }"
        ));
    }

    #[test]
    fn excluded_pages_consume_no_number() {
        let site = site(vec![
            page("Draft", "drafts/wip.md", "drafts/wip/", Some("<h1 id=\"d\">D</h1>")),
            page("Real", "real.md", "real/", Some("<h1 id=\"r\">R</h1>")),
        ]);
        let config = PrintConfig {
            exclude: vec!["drafts/*".to_string()],
            ..Default::default()
        };
        let composed = compose(&site, &config);

        assert_eq!(composed.excluded, vec!["drafts/wip.md"]);
        assert!(!composed.html.contains("drafts-wip"));
        // The surviving page is numbered 1, not 2
        assert_eq!(composed.toc.len(), 1);
        assert_eq!(composed.toc[0].title, "1 Real");
    }

    #[test]
    fn fully_excluded_section_is_dropped() {
        let site = site(vec![
            section(
                "Internal",
                vec![page("Secret", "internal/secret.md", "internal/secret/", Some("<h1 id=\"s\">S</h1>"))],
            ),
            page("Public", "public.md", "public/", Some("<h1 id=\"p\">P</h1>")),
        ]);
        let config = PrintConfig {
            exclude: vec!["internal/*".to_string()],
            ..Default::default()
        };
        let composed = compose(&site, &config);

        assert!(!composed.html.contains("md-section"));
        assert_eq!(composed.excluded, vec!["internal/secret.md"]);
        assert_eq!(composed.toc.len(), 1);
        assert_eq!(composed.toc[0].title, "1 Public");
    }

    #[test]
    fn empty_page_keeps_toc_entry_but_emits_nothing() {
        let site = site(vec![
            page("Empty", "empty.md", "empty/", None),
            page("Full", "full.md", "full/", Some("<h1 id=\"f\">F</h1>")),
        ]);
        let composed = compose(&site, &PrintConfig::default());

        assert_eq!(composed.toc.len(), 2);
        assert_eq!(composed.toc[0].title, "1 Empty");
        assert!(!composed.html.contains(r#"id="empty""#));
        assert_eq!(composed.warnings.len(), 1);
        assert!(composed.warnings[0].contains("empty.md"));
        // The empty page still consumed number 1
        assert_eq!(composed.toc[1].title, "2 Full");
    }

    #[test]
    fn missing_h1_is_synthesized() {
        let site = site(vec![page(
            "Notes",
            "notes.md",
            "notes/",
            Some(r#"<h2 id="first">First</h2>"#),
        )]);
        let composed = compose(&site, &PrintConfig::default());

        // The stand-in h1 goes through anchor rewriting like any other id
        assert!(composed.html.contains(r#"<h1 id="notes-notes">Notes</h1>"#));
        assert_eq!(composed.warnings.len(), 1);
        assert!(composed.warnings[0].contains("missing a leading h1"));
    }

    #[test]
    fn page_without_any_heading_is_left_alone() {
        let site = site(vec![page("Plain", "plain.md", "plain/", Some("<p>text</p>"))]);
        // no ToC: its title heading would drown out the assertion below
        let config = PrintConfig {
            add_table_of_contents: false,
            ..Default::default()
        };
        let composed = compose(&site, &config);
        assert!(!composed.html.contains("<h1"));
        assert!(composed.warnings.is_empty());
    }

    #[test]
    fn duplicate_nav_entries_for_one_page_are_allowed() {
        let site = site(vec![
            page("Home", "index.md", "", Some("<h1 id=\"h\">H</h1>")),
            // second occurrence: host rendered it once, so no html
            page("Home again", "index.md", "", None),
        ]);
        let composed = compose(&site, &PrintConfig::default());
        assert_eq!(composed.toc.len(), 2);
    }

    #[test]
    fn colliding_page_keys_are_fatal() {
        let site = site(vec![
            page("A", "a.md", "sub/page/", Some("<h1 id=\"a\">A</h1>")),
            page("B", "b.md", "sub/page.html", Some("<h1 id=\"b\">B</h1>")),
        ]);
        let err = write_combined(&site, &PrintConfig::default(), &Templates::default())
            .unwrap_err();
        match err {
            ComposeError::DuplicatePageKey { key, .. } => assert_eq!(key, "sub-page"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tags_render_before_page_content() {
        let mut meta = serde_json::Map::new();
        meta.insert(
            "tags".to_string(),
            serde_json::json!(["install", "linux"]),
        );
        let site = site(vec![NavNode::Page(PageNode {
            title: "Setup".to_string(),
            src_path: "setup.md".to_string(),
            url: "setup/".to_string(),
            html: Some(r#"<h1 id="s">Setup</h1>"#.to_string()),
            meta,
        })]);
        let composed = compose(&site, &PrintConfig::default());

        // both markers live inside the page's own section, after the ToC
        let tags = composed.html.find(r#"<span class="md-tag">install</span>"#).unwrap();
        let h1 = composed.html.find(r#"<h1 id="setup-s">"#).unwrap();
        assert!(tags < h1);
    }

    #[test]
    fn toc_nesting_respects_depth() {
        let nav = vec![section(
            "Ch",
            vec![page("Deep", "d.md", "d/", Some("<h1 id=\"d\">D</h1>"))],
        )];
        let shallow = PrintConfig {
            toc_depth: 1,
            ..Default::default()
        };
        let composed = compose(&site(nav.clone()), &shallow);
        assert!(composed.html.contains("print-site-toc-level-1"));
        assert!(!composed.html.contains("print-site-toc-level-2"));

        let composed = compose(&site(nav), &PrintConfig::default());
        assert!(composed.html.contains("print-site-toc-level-2"));
    }

    #[test]
    fn feature_classes_follow_config() {
        let site = site(vec![]);
        let config = PrintConfig {
            add_full_urls: true,
            enumerate_headings: false,
            enumerate_figures: false,
            add_table_of_contents: false,
            ..Default::default()
        };
        let composed = compose(&site, &config);
        assert!(composed
            .html
            .starts_with(r#"<div id="print-site-page" class="print-site-add-full-url">"#));
        assert!(!composed.html.contains("print-page-toc"));
    }

    #[test]
    fn unenumerated_toc_titles_have_no_prefix() {
        let site = site(vec![page("Home", "index.md", "", Some("<h1 id=\"h\">H</h1>"))]);
        let config = PrintConfig {
            enumerate_headings: false,
            ..Default::default()
        };
        let composed = compose(&site, &config);
        assert_eq!(composed.toc[0].title, "Home");
    }
}
