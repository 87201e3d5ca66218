//! Server-rendered assessment page.
//!
//! The page is a static template with a single `{{prediction}}` slot. The slot is either
//! empty or filled with the HTML-escaped assessment message.

use cardio_core::Assessment;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const PREDICTION_SLOT: &str = "{{prediction}}";

/// Render the assessment page, optionally with an outcome.
pub fn render_page(assessment: Option<&Assessment>) -> String {
    let block = match assessment {
        None => String::new(),
        Some(outcome) => {
            let class = if outcome.is_error() {
                "result result-error"
            } else {
                "result"
            };
            format!(
                r#"<section class="{class}" id="prediction"><p>{}</p></section>"#,
                escape_html(&outcome.message())
            )
        }
    };
    INDEX_TEMPLATE.replace(PREDICTION_SLOT, &block)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_no_result_block() {
        let html = render_page(None);
        assert!(!html.contains("id=\"prediction\""));
        assert!(!html.contains(PREDICTION_SLOT));
        assert!(html.contains("name=\"highbp\""));
    }

    #[test]
    fn error_message_is_escaped() {
        let outcome = Assessment::InputError("<script>alert(1)</script>".into());
        let html = render_page(Some(&outcome));
        assert!(html.contains("result-error"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }
}
