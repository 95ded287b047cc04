//! Protecting text regions from substitution
//!
//! Some regions of an article (typically template transclusions between
//! `{{` and `}}`) must not have their contents rewritten. This module masks
//! every span delimited by a configurable pair behind placeholder tokens,
//! lets the caller transform the remaining text, and restores the spans
//! afterwards.
//!
//! Matching is nesting-aware, so `{{outer|{{inner}}}}` is one span. An
//! opening delimiter without a matching close is left unmasked. The
//! placeholder tokens are built from control characters that never occur in
//! wiki markup, so substitution passes cannot touch them.

/// Text with its protected spans lifted out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    text: String,
    spans: Vec<String>,
}

impl MaskedText {
    /// The text with every protected span replaced by a placeholder token
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The number of protected spans
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Restore the protected spans into a transformed text
    ///
    /// `text` is typically the output of a substitution pass over
    /// [`text()`](Self::text); any placeholder tokens it still carries are
    /// replaced by the original spans.
    pub fn unmask(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (index, span) in self.spans.iter().enumerate() {
            result = result.replacen(&span_token(index), span, 1);
        }
        result
    }
}

fn span_token(index: usize) -> String {
    format!("\u{1}{}\u{2}", index)
}

/// Mask every span delimited by the given pair
pub fn mask_spans(text: &str, open: &str, close: &str) -> MaskedText {
    let mut out = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        match find_span_end(rest, start, open, close) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(&span_token(spans.len()));
                spans.push(rest[start..end].to_string());
                rest = &rest[end..];
            }
            // Unbalanced opening delimiter: nothing more to protect
            None => break,
        }
    }
    out.push_str(rest);

    MaskedText { text: out, spans }
}

/// Find the end of the span opening at `start`, honoring nesting
fn find_span_end(text: &str, start: usize, open: &str, close: &str) -> Option<usize> {
    let mut depth = 1;
    let mut pos = start + open.len();

    while depth > 0 {
        let next_close = text[pos..].find(close)?;
        match text[pos..].find(open) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos += next_open + open.len();
            }
            _ => {
                depth -= 1;
                pos += next_close + close.len();
            }
        }
    }
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let text = "Before {{Infobox|param=1}} after.";
        let masked = mask_spans(text, "{{", "}}");

        assert_eq!(masked.span_count(), 1);
        assert!(!masked.text().contains("Infobox"));
        assert_eq!(masked.unmask(masked.text()), text);
    }

    #[test]
    fn test_no_delimiters_is_a_no_op() {
        let text = "Plain text with [[links]] only.";
        let masked = mask_spans(text, "{{", "}}");
        assert_eq!(masked.text(), text);
        assert_eq!(masked.span_count(), 0);
    }

    #[test]
    fn test_multiple_spans() {
        let text = "{{a}} middle {{b}} end";
        let masked = mask_spans(text, "{{", "}}");
        assert_eq!(masked.span_count(), 2);
        assert!(masked.text().contains(" middle "));
        assert_eq!(masked.unmask(masked.text()), text);
    }

    #[test]
    fn test_nested_templates_are_one_span() {
        let text = "x {{outer|{{inner}}|p}} y";
        let masked = mask_spans(text, "{{", "}}");
        assert_eq!(masked.span_count(), 1);
        assert_eq!(masked.unmask(masked.text()), text);
    }

    #[test]
    fn test_unbalanced_open_left_unmasked() {
        let text = "a {{broken and [[Foobar]] text";
        let masked = mask_spans(text, "{{", "}}");
        assert_eq!(masked.span_count(), 0);
        assert_eq!(masked.text(), text);
    }

    #[test]
    fn test_substitution_between_mask_and_unmask() {
        let text = "{{cite|title=Foobar}} and [[Foobar]].";
        let masked = mask_spans(text, "{{", "}}");

        // A link substitution over the masked text cannot reach the template
        let substituted = masked.text().replace("[[Foobar]]", "[[Toto]]");
        let result = masked.unmask(&substituted);
        assert_eq!(result, "{{cite|title=Foobar}} and [[Toto]].");
    }

    #[test]
    fn test_custom_delimiter_pair() {
        let text = "keep <nowiki>[[raw]]</nowiki> here";
        let masked = mask_spans(text, "<nowiki>", "</nowiki>");
        assert_eq!(masked.span_count(), 1);
        assert_eq!(masked.unmask(masked.text()), text);
    }
}
