//! Heading-numbering CSS generation.
//!
//! Visual enumeration never mutates heading text. Each page (or section
//! header) gets a `::before` rule carrying its dot-joined position prefix,
//! and nested CSS counters continue the numbering for sub-headings inside the
//! page, scoped by the page's container id. Counter names embed the
//! container id, so numbering can never leak between pages.
//!
//! All functions here are pure string generation; no HTML is inspected.

/// Section container id from a position prefix: `"2.3"` → `"section-2-3"`.
pub fn section_id(prefix: &str) -> String {
    format!("section-{}", prefix.replace('.', "-"))
}

/// Rule putting the position prefix before a container's own `<h1>`.
pub fn heading_number_style(id: &str, prefix: &str) -> String {
    format!(".print-site-enumerate-headings #{id} > h1:before {{ content: '{prefix} ' }}")
}

/// Counter rules numbering h2..h`toc_depth` inside the page with container
/// `id`, continuing from the page's `prefix` at nesting `level`.
///
/// A heading at level `h` increments its own counter and resets every deeper
/// counter, so sub-numbering restarts whenever a higher-level heading
/// appears. Produces the empty string when the page sits too deep for any
/// sub-heading to fall within `toc_depth`.
pub fn inner_heading_styles(id: &str, prefix: &str, level: usize, toc_depth: u8) -> String {
    let toc_depth = usize::from(toc_depth);
    let start = level + 2;

    let counter = |h: usize| format!("counter-{id}-{h}");

    let mut result = String::new();
    for h in start..=toc_depth {
        let resets: Vec<String> = (h + 1..=toc_depth).map(|d| format!("{} 1", counter(d))).collect();
        let displays: Vec<String> = (start..=h).map(|d| format!("counter({})", counter(d))).collect();

        result.push_str(&format!(
            ".print-site-enumerate-headings #{id} h{h} {{ "
        ));
        if !resets.is_empty() {
            result.push_str(&format!("counter-reset: {}; ", resets.join(" ")));
        }
        result.push_str(&format!("counter-increment: {} }}\n", counter(h)));

        result.push_str(&format!(
            ".print-site-enumerate-headings #{id} h{h}:before {{ content: '{prefix}.' {} ' ' }}\n",
            displays.join(" '.' ")
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids_replace_dots() {
        assert_eq!(section_id("2"), "section-2");
        assert_eq!(section_id("2.3.1"), "section-2-3-1");
    }

    #[test]
    fn page_number_rule() {
        assert_eq!(
            heading_number_style("guide", "2.3"),
            ".print-site-enumerate-headings #guide > h1:before { content: '2.3 ' }"
        );
    }

    #[test]
    fn inner_styles_number_subheadings() {
        let css = inner_heading_styles("guide", "2", 0, 3);

        // h2 increments its counter and resets the h3 counter
        assert!(css.contains(
            "#guide h2 { counter-reset: counter-guide-3 1; counter-increment: counter-guide-2 }"
        ));
        assert!(css.contains("#guide h2:before { content: '2.' counter(counter-guide-2) ' ' }"));

        // deepest level has nothing left to reset
        assert!(css.contains("#guide h3 { counter-increment: counter-guide-3 }"));
        assert!(css.contains(
            "#guide h3:before { content: '2.' counter(counter-guide-2) '.' counter(counter-guide-3) ' ' }"
        ));
    }

    #[test]
    fn inner_styles_respect_nesting_level() {
        // A page nested one level deep starts numbering at h3
        let css = inner_heading_styles("deep", "1.2", 1, 3);
        assert!(!css.contains("#deep h2"));
        assert!(css.contains("#deep h3:before { content: '1.2.' counter(counter-deep-3) ' ' }"));
    }

    #[test]
    fn inner_styles_empty_when_too_deep() {
        assert_eq!(inner_heading_styles("p", "1.1.1", 2, 3), "");
        assert_eq!(inner_heading_styles("p", "1", 0, 1), "");
    }
}
