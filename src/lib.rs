//! # print-site
//!
//! Combines a rendered multi-page documentation site into a single
//! printer-friendly HTML page. Feed it a JSON snapshot of the site's
//! navigation tree (with each page's rendered HTML fragment) and it emits one
//! document with working internal links, namespaced anchors, hierarchical
//! heading numbers, and a table of contents — ready for the browser's print
//! dialog or a PDF converter.
//!
//! # Architecture: Pure Composition Pipeline
//!
//! The build is a pure function from a site snapshot to an HTML document:
//!
//! ```text
//! site.json  →  compose (walk nav, rewrite each page)  →  print_page.html
//! ```
//!
//! Nothing is fetched and nothing is rendered from markdown here — the host
//! site generator has already done that. This separation exists for three
//! reasons:
//!
//! - **Host independence**: any generator that can dump its nav tree and
//!   rendered fragments to JSON can use this tool.
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Testability**: composition is a pure function from manifest to HTML,
//!   so tests exercise the whole pipeline without a site build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Site manifest types (`NavNode`, `Site`) and JSON loading |
//! | [`urls`] | URL classification and page-key derivation — the anchor namespace |
//! | [`rewrite`] | Per-page rewriting of `href`, `id`, form `name`/`for`, `img src` |
//! | [`exclude`] | Glob-based page exclusion |
//! | [`compose`] | Navigation walk: numbering, ToC tree, concatenated body |
//! | [`numbering`] | CSS counter and `::before` rule generation for heading numbers |
//! | [`templates`] | Tera cover page / banner templates |
//! | [`document`] | Standalone HTML document wrapper with embedded print CSS |
//! | [`config`] | `print-site.toml` loading and validation |
//! | [`output`] | CLI build report — numbered contents, exclusions, warnings |
//!
//! # Design Decisions
//!
//! ## Anchor Namespacing Over DOM Rewriting
//!
//! Merging pages breaks every relative link and duplicates every `id`. Rather
//! than parse each fragment into a DOM, the rewriter works with targeted
//! regular expressions over attribute boundaries: each page's anchors get
//! prefixed with a stable **page key** derived from its URL, and each link is
//! resolved against the site root and redirected to the matching key. The
//! fragments come from a markdown renderer, so the HTML is regular enough for
//! this to be exact — and it preserves the input byte-for-byte everywhere
//! else, which a parse/serialize round trip would not.
//!
//! ## Numbering Via CSS Counters
//!
//! Heading numbers (`2.3.1`) are never written into heading text. Each page
//! gets `::before` rules scoped to its container id, generated from its
//! position in the navigation tree. Copy-pasting from the print page yields
//! clean text, and disabling numbering is a single class toggle.
//!
//! ## Maud For Structure, Tera For User Templates
//!
//! Generated structure (section wrappers, ToC) uses
//! [Maud](https://maud.lambda.xyz/) — compile-time checked, auto-escaped.
//! User-overridable cover pages and banners use Tera, because users need
//! runtime template files, not Rust code.

pub mod compose;
pub mod config;
pub mod document;
pub mod exclude;
pub mod numbering;
pub mod output;
pub mod rewrite;
pub mod site;
pub mod templates;
pub mod urls;
