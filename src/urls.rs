//! URL classification and page-key derivation.
//!
//! Everything in here is a pure, total function over strings. The rest of the
//! pipeline builds on two ideas:
//!
//! - A **page key**: a canonical, anchor-safe identifier derived from a page's
//!   site-relative URL. When all pages are flattened into one document, the
//!   page key namespaces every anchor so ids stay unique. The derivation is a
//!   stable contract — print stylesheets and any injected scripts address
//!   sections by these exact ids.
//! - **Root-relative resolution**: a link found inside a page is relative to
//!   that page's directory; the merged document lives at the site root, so
//!   relative paths must be rebased before they can be turned into anchors or
//!   kept as file paths.
//!
//! ## Page Key Examples
//!
//! | URL | key |
//! |-----|-----|
//! | `""`, `"/"`, `"index.html"` | `index` |
//! | `"abc/"`, `"abc.html"` | `abc` |
//! | `"chapter1/section2/"` | `chapter1-section2` |

/// Test whether a URL points outside the site.
///
/// Prefix match is case-sensitive, mirroring how site generators emit these
/// schemes in lowercase.
pub fn is_external(url: &str) -> bool {
    const PREFIXES: [&str; 6] = ["http", "www", "mailto:", "tel:", "skype:", "ftp:"];
    PREFIXES.iter().any(|p| url.starts_with(p))
}

/// Test whether a URL is an inline base64-encoded image.
pub fn is_base64_image(url: &str) -> bool {
    url.starts_with("data:image")
}

/// Test whether a URL points to a downloadable attachment (PDF, spreadsheet,
/// script, ...) rather than a site page.
///
/// The path component (query and fragment stripped) must have a file
/// extension that is neither `.html` nor `.md`.
pub fn is_attachment(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or("");
    match name.rfind('.') {
        // A leading dot (".bashrc") is a hidden file, not an extension
        Some(pos) if pos > 0 => {
            let ext = &name[pos..];
            ext != ".html" && ext != ".md"
        }
        _ => false,
    }
}

/// Derive the page key from a page's site-relative URL.
///
/// Lower-case, trim whitespace, strip trailing slashes, remove `.html`,
/// replace `/` with `-`, strip leading dashes. An empty result maps to
/// `"index"` (the site root).
pub fn page_key(url: &str) -> String {
    let key = url.to_lowercase();
    let key = key
        .trim()
        .trim_end_matches('/')
        .replace(".html", "")
        .replace('/', "-");
    let key = key.trim_start_matches('-');
    if key.is_empty() {
        "index".to_string()
    } else {
        key.to_string()
    }
}

/// Rebase a link found inside the page at `page_url` so it is relative to the
/// site root, where the merged print page lives.
///
/// This is ordinary relative-URL resolution against the directory of
/// `page_url`, followed by segment normalization (`.` dropped, `..` collapsed
/// where possible, preserved where not).
pub fn url_from_root(target: &str, page_url: &str) -> String {
    normpath(&join(dirname(page_url), target))
}

/// Directory part of a URL path: everything before the last `/`.
fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}

/// Join two URL path segments. An absolute `tail` replaces `base` entirely.
fn join<'a>(base: &str, tail: &'a str) -> std::borrow::Cow<'a, str> {
    if tail.starts_with('/') || base.is_empty() {
        return tail.into();
    }
    if base.ends_with('/') {
        format!("{base}{tail}").into()
    } else {
        format!("{base}/{tail}").into()
    }
}

/// Normalize a URL path: drop empty and `.` segments, collapse `..` against a
/// preceding real segment. Leading `..` segments on a relative path are
/// preserved (the merged page sits at the site root, so they address files
/// above the rendered fragment's directory). `..` at the root of an absolute
/// path is dropped.
fn normpath(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&"..") => parts.push(".."),
                Some(_) => {
                    parts.pop();
                }
                None => {
                    if !absolute {
                        parts.push("..");
                    }
                }
            },
            _ => parts.push(seg),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
