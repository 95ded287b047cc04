//! Link substitution in wiki markup
//!
//! Rewrites raw article text so every translated source link points at its
//! target-project title. Replacement is literal: for each table row with a
//! target, the three link-target positions `[[T|`, `[[T]]` and `[[T#` are
//! substituted, in both the stored spelling and the first-letter-lowercased
//! one. Display text of piped links and anchor fragments are untouched.
//!
//! Replacements run left-to-right over the table, each operating on the
//! output of the previous one. A title that is a substring of another
//! title's replacement can therefore be affected by ordering; this is an
//! accepted tradeoff of literal substitution.
//!
//! Links without a target are left alone by default. A per-locale
//! [`MissingLinkPolicy`] can instead mark them with a "needs translation"
//! inline template; the built-in registry carries the French `{{Lien}}`
//! policy and is extensible without touching the substitution logic.

use crate::table::LinkTranslationTable;
use crate::title::lowercase_first;

/// Per-locale handling of links that have no target-project equivalent
pub trait MissingLinkPolicy: Send + Sync {
    /// Rewrite the occurrences of one untranslated link in `text`
    ///
    /// # Arguments
    ///
    /// * `source_title` - Full display title of the untranslated link
    /// * `source_project` - Bare code of the project the article comes from
    fn apply(&self, text: &str, source_title: &str, source_project: &str) -> String;
}

/// French Wikipedia policy: mark untranslated links with the inline
/// `{{Lien}}` template, which renders a red-link with an interlanguage hint
///
/// Only bare `[[Title]]` occurrences are rewritten; piped links and anchors
/// keep their source target, as the template has no equivalent for them.
pub struct FrenchLienPolicy;

impl MissingLinkPolicy for FrenchLienPolicy {
    fn apply(&self, text: &str, source_title: &str, source_project: &str) -> String {
        let text = text.replace(
            &format!("[[{}]]", source_title),
            &format!(
                "{{{{Lien|trad={0}|lang={1}|fr={0}}}}}",
                source_title, source_project
            ),
        );

        let lowercased = lowercase_first(source_title);
        text.replace(
            &format!("[[{}]]", lowercased),
            &format!(
                "{{{{Lien|trad={0}|lang={1}|fr={0}|texte={2}}}}}",
                source_title, source_project, lowercased
            ),
        )
    }
}

/// The built-in missing-link policy for a target project, if any
pub fn missing_link_policy_for(target_code: &str) -> Option<&'static dyn MissingLinkPolicy> {
    match target_code {
        "fr" => Some(&FrenchLienPolicy),
        _ => None,
    }
}

/// Rewrites article markup from a [`LinkTranslationTable`]
pub struct Substitutor<'a> {
    missing_policy: Option<&'a dyn MissingLinkPolicy>,
}

impl Default for Substitutor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Substitutor<'a> {
    /// A substitutor with the default missing-link behavior (leave untouched)
    pub fn new() -> Self {
        Self {
            missing_policy: None,
        }
    }

    /// A substitutor with an explicit missing-link policy
    pub fn with_policy(policy: &'a dyn MissingLinkPolicy) -> Self {
        Self {
            missing_policy: Some(policy),
        }
    }

    /// A substitutor using the built-in policy registry for the target project
    pub fn for_target(target_code: &str) -> Self {
        Self {
            missing_policy: missing_link_policy_for(target_code),
        }
    }

    /// Replace the wiki links in the specified text
    pub fn apply(&self, text: &str, table: &LinkTranslationTable) -> String {
        let mut text = text.to_string();

        for pair in table.pairs() {
            match &pair.target {
                Some(target) => {
                    text = replace_link_target(text, &pair.source, target);
                    text = replace_link_target(
                        text,
                        &lowercase_first(&pair.source),
                        &lowercase_first(target),
                    );
                }
                None => {
                    if let Some(policy) = self.missing_policy {
                        text = policy.apply(&text, &pair.source, table.source_project());
                    }
                }
            }
        }

        text
    }
}

/// Substitute one link target in its three syntactic positions
fn replace_link_target(text: String, from: &str, to: &str) -> String {
    let text = text.replace(&format!("[[{}|", from), &format!("[[{}|", to));
    let text = text.replace(&format!("[[{}]]", from), &format!("[[{}]]", to));
    text.replace(&format!("[[{}#", from), &format!("[[{}#", to))
}
