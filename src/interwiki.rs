//! Cross-language equivalent lookup
//!
//! Given a title on a source project, find the equivalent title on a target
//! project by following the recorded language links. Redirects on the source
//! side are resolved first, with a bounded hop count: live wikis can contain
//! redirect loops, and an unbounded chase would never terminate.

use crate::error::{TranslateError, TranslateResult};
use crate::page::resolve_redirect_from_page_id;
use crate::project::ProjectReference;
use crate::replica::ReplicaAccess;
use crate::title::to_storage_form;

/// Maximum number of redirects followed before giving up
pub const REDIRECT_HOP_LIMIT: usize = 5;

/// Resolves titles to their target-project equivalents
pub struct InterwikiResolver<'a> {
    replica: &'a dyn ReplicaAccess,
}

impl<'a> InterwikiResolver<'a> {
    pub fn new(replica: &'a dyn ReplicaAccess) -> Self {
        Self { replica }
    }

    /// Find the equivalent title on the target project
    ///
    /// # Arguments
    ///
    /// * `source` - The project the title lives on
    /// * `target_code` - The bare code of the target project (e.g. `fr`);
    ///   lowercased before the language-link lookup
    /// * `title` - The title to look up, in either storage or display form
    /// * `namespace` - The title's namespace id
    ///
    /// # Returns
    ///
    /// * `Ok(Some(title))` - The recorded equivalent on the target project
    /// * `Ok(None)` - The page does not exist, a redirect row is missing, or
    ///   no interwiki is recorded; the caller treats these identically
    /// * `Err(TranslateError::RedirectCycleExceeded)` - More than
    ///   [`REDIRECT_HOP_LIMIT`] redirects were chained
    pub async fn find_equivalent_title(
        &self,
        source: &ProjectReference,
        target_code: &str,
        title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<String>> {
        let target_code = target_code.to_lowercase();
        let mut current = to_storage_form(title);

        for _ in 0..=REDIRECT_HOP_LIMIT {
            let Some(row) = self.replica.page_row(source, &current, namespace).await? else {
                return Ok(None);
            };

            if !row.is_redirect {
                return self
                    .replica
                    .language_link(source, row.page_id, &target_code)
                    .await;
            }

            match resolve_redirect_from_page_id(self.replica, source, row.page_id).await? {
                Some(target) => current = to_storage_form(&target),
                None => return Ok(None),
            }
        }

        Err(TranslateError::RedirectCycleExceeded(title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectDirectory, ProjectReference};
    use crate::replica::MockReplica;

    fn enwiki() -> ProjectReference {
        ProjectDirectory::resolve("enwiki").unwrap()
    }

    #[tokio::test]
    async fn test_direct_equivalent() {
        let replica = MockReplica::new()
            .with_page("enwiki", 0, "Foobar", 100)
            .with_language_link("enwiki", 100, "fr", "Foobar");

        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Foobar", 0)
            .await
            .unwrap();
        assert_eq!(title.as_deref(), Some("Foobar"));
    }

    #[tokio::test]
    async fn test_display_form_lookup_key() {
        let replica = MockReplica::new()
            .with_page("enwiki", 0, "Metasyntactic_variable", 100)
            .with_language_link("enwiki", 100, "fr", "Variable métasyntaxique");

        let resolver = InterwikiResolver::new(&replica);
        // Display form normalizes to the stored key
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Metasyntactic variable", 0)
            .await
            .unwrap();
        assert_eq!(title.as_deref(), Some("Variable métasyntaxique"));
    }

    #[tokio::test]
    async fn test_target_code_is_lowercased() {
        let replica = MockReplica::new()
            .with_page("enwiki", 0, "Foobar", 100)
            .with_language_link("enwiki", 100, "fr", "Foobar");

        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "FR", "Foobar", 0)
            .await
            .unwrap();
        assert_eq!(title.as_deref(), Some("Foobar"));
    }

    #[tokio::test]
    async fn test_missing_page_has_no_equivalent() {
        let replica = MockReplica::new();
        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Missing", 0)
            .await
            .unwrap();
        assert_eq!(title, None);
    }

    #[tokio::test]
    async fn test_no_language_link_recorded() {
        let replica = MockReplica::new().with_page("enwiki", 0, "Foobar", 100);
        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Foobar", 0)
            .await
            .unwrap();
        assert_eq!(title, None);
    }

    #[tokio::test]
    async fn test_equivalent_through_redirect() {
        let replica = MockReplica::new()
            .with_redirect("enwiki", 0, "Foo", 7, "Foobar")
            .with_page("enwiki", 0, "Foobar", 100)
            .with_language_link("enwiki", 100, "fr", "Foobar");

        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Foo", 0)
            .await
            .unwrap();
        assert_eq!(title.as_deref(), Some("Foobar"));
    }

    #[tokio::test]
    async fn test_chain_at_hop_limit_terminates() {
        // Hop_1 → ... → Hop_5 → Target: exactly REDIRECT_HOP_LIMIT hops
        let mut replica = MockReplica::new()
            .with_page("enwiki", 0, "Target", 100)
            .with_language_link("enwiki", 100, "fr", "Cible");
        for hop in 1..=REDIRECT_HOP_LIMIT {
            let next = if hop == REDIRECT_HOP_LIMIT {
                "Target".to_string()
            } else {
                format!("Hop_{}", hop + 1)
            };
            replica = replica.with_redirect("enwiki", 0, &format!("Hop_{}", hop), hop as u64, &next);
        }

        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Hop_1", 0)
            .await
            .unwrap();
        assert_eq!(title.as_deref(), Some("Cible"));
    }

    #[tokio::test]
    async fn test_redirect_cycle_fails() {
        let replica = MockReplica::new()
            .with_redirect("enwiki", 0, "A", 1, "B")
            .with_redirect("enwiki", 0, "B", 2, "A");

        let resolver = InterwikiResolver::new(&replica);
        match resolver.find_equivalent_title(&enwiki(), "fr", "A", 0).await {
            Err(TranslateError::RedirectCycleExceeded(title)) => assert_eq!(title, "A"),
            other => panic!("Expected RedirectCycleExceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chain_over_hop_limit_fails() {
        let mut replica = MockReplica::new()
            .with_page("enwiki", 0, "Target", 100)
            .with_language_link("enwiki", 100, "fr", "Cible");
        let chain = REDIRECT_HOP_LIMIT + 1;
        for hop in 1..=chain {
            let next = if hop == chain {
                "Target".to_string()
            } else {
                format!("Hop_{}", hop + 1)
            };
            replica = replica.with_redirect("enwiki", 0, &format!("Hop_{}", hop), hop as u64, &next);
        }

        let resolver = InterwikiResolver::new(&replica);
        assert!(matches!(
            resolver.find_equivalent_title(&enwiki(), "fr", "Hop_1", 0).await,
            Err(TranslateError::RedirectCycleExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_redirect_to_missing_target_has_no_equivalent() {
        let replica = MockReplica::new().with_redirect("enwiki", 0, "Flagged", 10, "Nowhere");
        let resolver = InterwikiResolver::new(&replica);
        let title = resolver
            .find_equivalent_title(&enwiki(), "fr", "Flagged", 0)
            .await
            .unwrap();
        assert_eq!(title, None);
    }
}
