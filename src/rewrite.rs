//! Link and anchor rewriting for a single page.
//!
//! When a rendered page is inlined into the print page, everything that used
//! to be document-global becomes document-local: heading ids collide across
//! pages, relative links point at files that no longer exist next to the
//! output, and anchors on other pages become anchors in the same document.
//! This module rewrites one page's HTML fragment so all of those references
//! resolve inside the merged document.
//!
//! Four passes run in order, then the fragment is wrapped:
//!
//! 1. [`fix_href_links`] — `<a href>` targets become in-document anchors
//!    (external links and attachments excepted)
//! 2. [`update_anchor_ids`] — ids on h1-h6/sup/li gain the page-key prefix
//! 3. [`fix_tabbed_content`] — `<input>` name/id and `<label for>` gain the
//!    page-key prefix so tabbed-content radio groups stay independent
//! 4. [`fix_image_src`] — relative `<img src>` paths are rebased to the root
//!
//! The passes are text-level regex transforms anchored to attribute
//! boundaries, tolerant of attribute order and unrelated attributes. They are
//! total: classification never fails, and unmatched markup passes through
//! untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::urls::{is_attachment, is_base64_image, is_external, page_key, url_from_root};

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+([^>]*?\s+)?href="([^"]*)""#).expect("valid href regex")
});

static HEADING_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(h[1-6]|sup|li)\b([^>]*?)\sid="([^"]*)""#).expect("valid id regex")
});

static INPUT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<input[^>]*?\sname=")([^"]*)(")"#).expect("valid input name regex")
});

static INPUT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<input[^>]*?\sid=")([^"]*)(")"#).expect("valid input id regex")
});

static LABEL_FOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<label[^>]*?\sfor=")([^"]*)(")"#).expect("valid label for regex")
});

static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src="([^">]+)""#).expect("valid img src regex")
});

/// Rewrite one page's HTML fragment so every internal reference resolves
/// inside the merged document, and wrap it in its identifying section.
///
/// `heading_number` is the page's dot-joined position prefix (possibly
/// empty), recorded on the wrapper for stylesheets and tooling.
pub fn rewrite_page(
    html: &str,
    page_url: &str,
    directory_urls: bool,
    heading_number: &str,
) -> String {
    let key = page_key(page_url);
    let html = fix_href_links(html, &key, page_url, directory_urls);
    let html = update_anchor_ids(&html, &key);
    let html = fix_tabbed_content(&html, &key);
    let html = fix_image_src(&html, page_url, directory_urls);
    format!(
        r#"<section class="print-page" id="{key}" heading-number="{heading_number}">{html}</section>"#
    )
}

/// Rebase a relative file reference (attachment, image) to resolve from the
/// print page's location. With directory URLs the print page lives one
/// directory below the site root, so relative paths need an extra `../`;
/// absolute paths already resolve from the root and are left as-is.
fn rebase_file_path(url: &str, page_url: &str, directory_urls: bool) -> String {
    let rebased = url_from_root(url, page_url);
    if directory_urls && !rebased.starts_with('/') {
        format!("../{rebased}")
    } else {
        rebased
    }
}

/// Rewrite `<a href>` targets to resolve inside the print page.
///
/// - external → untouched
/// - attachment → rebased file path (extra `../` when `directory_urls`,
///   since the print page then lives one directory down; absolute paths
///   stay rooted)
/// - `#frag` → `#{key}-frag`
/// - another page, optionally with `#frag` → `#{target_key}` or
///   `#{target_key}-frag`
///
/// The raw attribute value is entity-unescaped before classification so
/// `&amp;` in query strings does not defeat the prefix checks.
pub fn fix_href_links(html: &str, key: &str, page_url: &str, directory_urls: bool) -> String {
    HREF_RE
        .replace_all(html, |caps: &Captures| {
            let url = html_escape::decode_html_entities(&caps[2]).into_owned();

            if is_external(&url) {
                return caps[0].to_string();
            }

            let url = if is_attachment(&url) {
                rebase_file_path(&url, page_url, directory_urls)
            } else if let Some(frag) = url.strip_prefix('#') {
                // Anchor within this same page
                format!("#{key}-{frag}")
            } else {
                // Link to another page, possibly with an anchor appended
                let from_root = url_from_root(&url, page_url);
                match from_root.split_once('#') {
                    Some((path, frag)) => format!("#{}-{frag}", page_key(path)),
                    None => format!("#{}", page_key(&from_root)),
                }
            };

            // Reinsert any attributes that sat between '<a' and 'href='
            match caps.get(1) {
                Some(other) => format!(r#"<a {} href="{url}""#, other.as_str().trim_end()),
                None => format!(r#"<a href="{url}""#),
            }
        })
        .into_owned()
}

/// Prefix `id` attributes with the page key, on the heading allow-list only
/// (h1-h6, sup, li). Ids on other elements are left alone so unrelated
/// markup is not corrupted; form controls are handled separately by
/// [`fix_tabbed_content`].
pub fn update_anchor_ids(html: &str, key: &str) -> String {
    HEADING_ID_RE
        .replace_all(html, |caps: &Captures| {
            format!(r#"<{}{} id="{key}-{}""#, &caps[1], &caps[2], &caps[3])
        })
        .into_owned()
}

/// Namespace `<input>` name/id and `<label for>` attributes with the page
/// key.
///
/// Tabbed content is driven by radio groups: identically named inputs from
/// different pages would merge into one group on the print page, so both the
/// grouping attribute (`name`) and the label linkage (`id`/`for`) need the
/// prefix.
pub fn fix_tabbed_content(html: &str, key: &str) -> String {
    let html = INPUT_NAME_RE.replace_all(html, |caps: &Captures| {
        format!("{}{key}-{}{}", &caps[1], &caps[2], &caps[3])
    });
    let html = INPUT_ID_RE.replace_all(&html, |caps: &Captures| {
        format!("{}{key}-{}{}", &caps[1], &caps[2], &caps[3])
    });
    LABEL_FOR_RE
        .replace_all(&html, |caps: &Captures| {
            format!("{}{key}-{}{}", &caps[1], &caps[2], &caps[3])
        })
        .into_owned()
}

/// Rebase relative `<img src>` paths to the site root. External and inline
/// base64 images are never modified.
pub fn fix_image_src(html: &str, page_url: &str, directory_urls: bool) -> String {
    IMG_SRC_RE
        .replace_all(html, |caps: &Captures| {
            let src = &caps[1];
            if is_external(src) || is_base64_image(src) {
                return caps[0].to_string();
            }
            let rebased = rebase_file_path(src, page_url, directory_urls);
            caps[0].replace(src, &rebased)
        })
        .into_owned()
}
