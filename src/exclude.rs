//! Glob-based page exclusion.
//!
//! Pages whose source path matches an exclude pattern are left out of the
//! print page entirely: no HTML, no table-of-contents entry, no number.
//!
//! Matching is fnmatch-style over `/`-normalized paths:
//!
//! - `index.md` — exact file
//! - `*.md` — any matching file at any depth (`*` crosses separators)
//! - `drafts/*` or `drafts/` — everything under a directory
//! - `drafts` — the directory itself, matched against any ancestor

use glob::Pattern;

/// Check whether `path` matches any of the exclude patterns.
pub fn exclude(path: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    // Normalize separators so Windows-style paths match Unix-style patterns
    let path = path.replace('\\', "/");

    for pattern in patterns {
        let pattern = pattern.replace('\\', "/");

        // Directory pattern: "drafts/" matches everything under drafts
        if let Some(dir) = pattern.strip_suffix('/') {
            if path.starts_with(&pattern) || path.starts_with(&format!("{dir}/")) {
                return true;
            }
            continue;
        }

        if matches(&path, &pattern) {
            return true;
        }

        // Ancestor match: "drafts" excludes "drafts/wip/page.md"
        if path.contains('/') {
            let parts: Vec<&str> = path.split('/').collect();
            for i in 1..parts.len() {
                let partial = parts[..i].join("/");
                if partial == pattern || matches(&partial, &pattern) {
                    return true;
                }
            }
        }
    }

    false
}

/// fnmatch-style single-pattern match. An invalid pattern matches nothing.
fn matches(path: &str, pattern: &str) -> bool {
    Pattern::new(pattern).map(|p| p.matches(path)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_patterns_exclude_nothing() {
        assert!(!exclude("index.md", &[]));
    }

    #[test]
    fn exact_file() {
        assert!(exclude("index.md", &globs(&["index.md"])));
        assert!(!exclude("other.md", &globs(&["index.md"])));
    }

    #[test]
    fn wildcard_crosses_directories() {
        let patterns = globs(&["*.md"]);
        assert!(exclude("index.md", &patterns));
        assert!(exclude("folder/index.md", &patterns));
        assert!(exclude("folder\\index.md", &patterns));
    }

    #[test]
    fn directory_glob() {
        let patterns = globs(&["folder/*"]);
        assert!(exclude("folder/index.md", &patterns));
        assert!(!exclude("subfolder/index.md", &patterns));
        assert!(!exclude("subfolder", &patterns));
    }

    #[test]
    fn bare_directory_name_matches_ancestors() {
        assert!(exclude("folder/index.md", &globs(&["folder"])));
        assert!(exclude("folder/nested/deep.md", &globs(&["folder"])));
        assert!(!exclude("folderish/index.md", &globs(&["folder"])));
    }

    #[test]
    fn trailing_slash_directory_pattern() {
        let patterns = globs(&["drafts/"]);
        assert!(exclude("drafts/wip.md", &patterns));
        assert!(!exclude("published/wip.md", &patterns));
    }
}
