//! End-to-end tests for the translation pipeline
//!
//! These exercise the full flow (request validation, table build,
//! substitution, attribution) against the in-memory data sources, with the
//! `en` → `fr` "Metasyntactic variable" scenario as the reference fixture.

use crate::api::MockWikiApi;
use crate::engine::{LinkTranslator, TranslationRequest};
use crate::error::TranslateError;
use crate::mask::mask_spans;
use crate::replica::{MockReplica, PageLink};
use crate::table::LinkPair;
use std::sync::Arc;

const ARTICLE_TEXT: &str = "\
{{Infobox term|name=[[Foobar]]}}\n\
A '''metasyntactic variable''' such as [[Foobar]] or [[foobar]] is used in\n\
[[Computer programming|programming]] examples. See [[Hacker culture]] and\n\
[[Variable (computer science)#History|variables]].\n\
[[Category:Placeholder names]]\n";

fn replica() -> MockReplica {
    MockReplica::new()
        // The seed article and its recorded outbound links
        .with_page("enwiki", 0, "Metasyntactic_variable", 1)
        .with_revision("enwiki", 0, "Metasyntactic_variable", 123456)
        .with_links(
            "enwiki",
            1,
            vec![
                PageLink::new(0, "Computer_programming"),
                PageLink::new(0, "Foobar"),
                PageLink::new(0, "Foobar"),
                PageLink::new(0, "Hacker_culture"),
                PageLink::new(0, "Variable_(computer_science)"),
                PageLink::new(14, "Placeholder_names"),
            ],
        )
        // Link targets
        .with_page("enwiki", 0, "Computer_programming", 10)
        .with_language_link("enwiki", 10, "fr", "Programmation informatique")
        .with_page("enwiki", 0, "Foobar", 11)
        .with_language_link("enwiki", 11, "fr", "Foobar")
        .with_page("enwiki", 0, "Hacker_culture", 12)
        .with_redirect("enwiki", 0, "Variable_(computer_science)", 13, "Variable_(programming)")
        .with_page("enwiki", 0, "Variable_(programming)", 14)
        .with_language_link("enwiki", 14, "fr", "Variable (informatique)")
        .with_page("enwiki", 14, "Placeholder_names", 15)
        .with_language_link("enwiki", 15, "fr", "Catégorie:Noms de remplacement")
}

fn wiki_api() -> MockWikiApi {
    MockWikiApi::new()
        .with_namespace("enwiki", 14, "Category")
        .with_text("enwiki", "Metasyntactic_variable", ARTICLE_TEXT)
}

fn translator() -> LinkTranslator {
    let request = TranslationRequest::new("en", "fr", "Metasyntactic variable");
    LinkTranslator::new(request, Arc::new(replica()), Arc::new(wiki_api())).unwrap()
}

#[tokio::test]
async fn test_translate_links_end_to_end() {
    let table = translator().translate_links().await.unwrap();

    assert!(!table.is_empty());
    let pairs = table.pairs();
    assert_eq!(pairs.len(), 6);

    // Extraction order is preserved, duplicates included
    assert_eq!(
        pairs[0],
        LinkPair::translated("Computer programming", "Programmation informatique")
    );
    assert_eq!(pairs[1], LinkPair::translated("Foobar", "Foobar"));
    assert_eq!(pairs[2], pairs[1]);
    assert_eq!(pairs[3], LinkPair::untranslated("Hacker culture"));
    // The redirect is followed before the language-link lookup
    assert_eq!(
        pairs[4],
        LinkPair::translated("Variable (computer science)", "Variable (informatique)")
    );
    assert_eq!(
        pairs[5],
        LinkPair::translated("Category:Placeholder names", "Catégorie:Noms de remplacement")
    );
}

#[tokio::test]
async fn test_substitute_links_end_to_end() {
    let translator = translator();
    let table = translator.translate_links().await.unwrap();
    let text = translator.fetch_raw_text().await.unwrap();
    let result = translator.substitute_links(&text, &table);

    // Translated links are rewritten in every position
    assert!(result.contains("[[Programmation informatique|programming]]"));
    assert!(result.contains("[[Variable (informatique)#History|variables]]"));
    assert!(result.contains("[[Catégorie:Noms de remplacement]]"));
    // Identity translation keeps both case variants
    assert!(result.contains("[[Foobar]]"));
    assert!(result.contains("[[foobar]]"));
    // The untranslated link turned into the French inline template
    assert!(result.contains("{{Lien|trad=Hacker culture|lang=en|fr=Hacker culture}}"));
    assert!(!result.contains("[[Hacker culture]]"));
}

#[tokio::test]
async fn test_attribution_end_to_end() {
    let translator = translator();
    let table = translator.translate_links().await.unwrap();
    let revision_id = translator.latest_revision_id().await.unwrap();

    let template = translator.attribution_template(&table, revision_id);
    assert!(template.contains("Traduction/Référence"));
    assert_eq!(
        template,
        "{{Traduction/Référence|en|Metasyntactic variable|123456}}"
    );
}

#[tokio::test]
async fn test_protected_regions_survive_substitution() {
    let translator = translator();
    let table = translator.translate_links().await.unwrap();
    let text = translator.fetch_raw_text().await.unwrap();

    // The caller's text flow: protect template regions, substitute, restore
    let masked = mask_spans(&text, "{{", "}}");
    let substituted = translator.substitute_links(masked.text(), &table);
    let result = masked.unmask(&substituted);

    // The infobox kept its original link, the prose got the translation
    assert!(result.contains("{{Infobox term|name=[[Foobar]]}}"));
    assert!(result.contains("[[Programmation informatique|programming]]"));
}

#[tokio::test]
async fn test_upstream_failure_produces_no_partial_table() {
    let request = TranslationRequest::new("en", "fr", "Metasyntactic variable");
    let replica = MockReplica::new().with_failure("replica down");
    let translator = LinkTranslator::new(request, Arc::new(replica), Arc::new(wiki_api())).unwrap();

    assert!(matches!(
        translator.translate_links().await,
        Err(TranslateError::UpstreamUnavailable(_))
    ));
}
