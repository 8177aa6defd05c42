//! Standalone HTML document assembly.
//!
//! Wraps the composed print page body in a minimal self-contained document:
//! no theme, no scripts, just the embedded print stylesheet. Hosts that want
//! the page inside their own theme can take [`Composed::html`] directly and
//! skip this wrapper.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//!
//! [`Composed::html`]: crate::compose::Composed

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Print stylesheet embedded at compile time.
pub const PRINT_CSS: &str = include_str!("../static/print-site.css");

/// Renders the base HTML document around the composed body.
///
/// The body already carries its own trailing `<style>` block with the
/// generated numbering rules; only the static print stylesheet goes in the
/// head.
pub fn base_document(title: &str, body: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(PRINT_CSS)) }
            }
            body {
                (PreEscaped(body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_structure() {
        let html = base_document("My Docs", "<div id=\"print-site-page\"></div>").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My Docs</title>"));
        assert!(html.contains(r#"<div id="print-site-page"></div>"#));
    }

    #[test]
    fn title_is_escaped_but_body_is_not() {
        let html = base_document("a < b", "<p>kept</p>").into_string();
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(html.contains("<p>kept</p>"));
    }

    #[test]
    fn print_css_survives_embedding() {
        let html = base_document("t", "").into_string();
        // selectors with combinators must not be entity-escaped
        assert!(html.contains("page-break-after: avoid"));
        assert!(!html.contains("&gt;"));
    }
}
