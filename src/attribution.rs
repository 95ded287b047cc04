//! Per-locale "translated from" attribution templates
//!
//! Each target wiki has its own convention for crediting the source article
//! of a translation. The formats are data: one pattern per locale, with
//! `{source}`, `{title}` and `{oldid}` interpolated, so adding a locale is a
//! table entry and not new logic. An unrecognized target code falls back to
//! a plain-text attribution line.

/// Attribution template patterns, keyed by target project code
const TEMPLATES: &[(&str, &str)] = &[
    ("af", "{{Vertaling/Verwysing|{source}|{title}}}"),
    ("el", "{{Ενσωμάτωση κειμένου|{source}|{title}|oldid={oldid}}}"),
    (
        "es",
        "{{Traducido ref|{source}|{title}|oldid={oldid}|trad=total}}<br />{{Traducido ref|{source}|{title}|oldid={oldid}|trad=parcial}}",
    ),
    ("et", "{{Tõlkimine/Ref|{source}|{title}|oldid={oldid}}}"),
    ("fr", "{{Traduction/Référence|{source}|{title}|{oldid}}}"),
    ("hu", "{{Fordítás|{source}|{title}|oldid={oldid}}}"),
    ("id", "{{Translation/Ref|{source}|{title}}}"),
    ("pt", "{{Tradução/ref|{source}|{title}|oldid={oldid}}}"),
    ("ru", "{{Источник/перевод|{source}|{title}|версия={oldid}}}"),
    ("sv", "{{{source}wp|artikel={title}}}"),
    ("zh", "{{Translation/Ref|lang={source}|article={title}|oldid={oldid}}}"),
    ("en", "{{Translation/Ref|{source}|{title}|oldid={oldid}}}"),
    ("gu", "{{Translation/Ref|{source}|{title}|oldid={oldid}}}"),
    ("ja", "{{Translation/Ref|{source}|{title}|oldid={oldid}}}"),
    ("ne", "{{Translation/Ref|{source}|{title}|oldid={oldid}}}"),
];

/// The fallback for target projects without a known template
const FALLBACK: &str = "Last revision id on {source} (<em>oldid</em>): {oldid}";

/// Gets the translation reference template for a target project
///
/// Always returns a string; there is no failure mode.
pub fn render(target_code: &str, source_code: &str, title: &str, revision_id: u64) -> String {
    let pattern = TEMPLATES
        .iter()
        .find(|(code, _)| *code == target_code)
        .map(|(_, pattern)| *pattern)
        .unwrap_or(FALLBACK);

    pattern
        .replace("{source}", source_code)
        .replace("{title}", title)
        .replace("{oldid}", &revision_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_template() {
        assert_eq!(
            render("fr", "en", "Metasyntactic variable", 123456),
            "{{Traduction/Référence|en|Metasyntactic variable|123456}}"
        );
    }

    #[test]
    fn test_templates_without_revision_id() {
        assert_eq!(
            render("af", "en", "Foobar", 42),
            "{{Vertaling/Verwysing|en|Foobar}}"
        );
        assert_eq!(
            render("id", "en", "Foobar", 42),
            "{{Translation/Ref|en|Foobar}}"
        );
    }

    #[test]
    fn test_swedish_source_interpolated_template_name() {
        assert_eq!(render("sv", "en", "Foobar", 42), "{{enwp|artikel=Foobar}}");
    }

    #[test]
    fn test_spanish_renders_both_variants() {
        let result = render("es", "en", "Foobar", 42);
        assert!(result.contains("trad=total"));
        assert!(result.contains("trad=parcial"));
        assert!(result.contains("<br />"));
    }

    #[test]
    fn test_translation_ref_group() {
        for code in ["en", "gu", "ja", "ne"] {
            assert_eq!(
                render(code, "fr", "Toto", 7),
                "{{Translation/Ref|fr|Toto|oldid=7}}"
            );
        }
    }

    #[test]
    fn test_russian_named_revision_parameter() {
        assert_eq!(
            render("ru", "en", "Foobar", 42),
            "{{Источник/перевод|en|Foobar|версия=42}}"
        );
    }

    #[test]
    fn test_unknown_target_falls_back_to_plain_line() {
        assert_eq!(
            render("de", "en", "Foobar", 42),
            "Last revision id on en (<em>oldid</em>): 42"
        );
    }
}
