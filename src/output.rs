//! CLI output formatting for the build report.
//!
//! Output is **information-centric, not file-centric**: the primary display
//! is the numbered table of contents exactly as it appears in the print page,
//! followed by what was left out (excluded pages) and what went wrong
//! (warnings). This makes the report readable as a content inventory for the
//! combined document.
//!
//! ```text
//! 1 Homepage
//! 2 Chapter 1
//!     2.1 Setup
//!     2.2 Usage
//!
//! Excluded
//!     drafts/wip.md
//!
//! Warnings
//!     'appendix.md' is missing a leading h1; added one titled 'Appendix'
//!
//! Combined 3 pages, 1 section (1 excluded, 1 warning)
//! ```
//!
//! The `format_*` function returns `Vec<String>` for testability; the
//! `print_*` wrapper writes to stdout. Format functions are pure — no I/O,
//! no side effects.

use crate::compose::{Composed, TocEntry};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn walk_toc(entries: &[TocEntry], depth: usize, lines: &mut Vec<String>, counts: &mut (usize, usize)) {
    for entry in entries {
        lines.push(format!("{}{}", indent(depth), entry.title));
        if entry.children.is_empty() {
            counts.0 += 1;
        } else {
            counts.1 += 1;
            walk_toc(&entry.children, depth + 1, lines, counts);
        }
    }
}

/// Format the build report: numbered contents, exclusions, warnings, summary.
pub fn format_build_output(composed: &Composed) -> Vec<String> {
    let mut lines = Vec::new();

    let mut counts = (0usize, 0usize);
    walk_toc(&composed.toc, 0, &mut lines, &mut counts);
    let (pages, sections) = counts;

    if !composed.excluded.is_empty() {
        lines.push(String::new());
        lines.push("Excluded".to_string());
        for src_path in &composed.excluded {
            lines.push(format!("    {}", src_path));
        }
    }

    if !composed.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &composed.warnings {
            lines.push(format!("    {}", warning));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Combined {} page{}, {} section{} ({} excluded, {} warning{})",
        pages,
        plural(pages),
        sections,
        plural(sections),
        composed.excluded.len(),
        composed.warnings.len(),
        plural(composed.warnings.len()),
    ));

    lines
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Print the build report to stdout.
pub fn print_build_output(composed: &Composed) {
    for line in format_build_output(composed) {
        println!("{}", line);
    }
}
