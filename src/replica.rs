//! Read access to a project's page, redirect, language-link and pagelink data
//!
//! This module defines the `ReplicaAccess` trait for data-source abstraction,
//! enabling support for different backends (the public MediaWiki action API,
//! an in-memory mock, or a future database replica) without coupling the
//! engine to any specific implementation.
//!
//! All access is read-only and keyed by project identity. Titles passed to
//! and returned from this trait are in storage form unless noted otherwise.

use crate::error::TranslateResult;
use crate::project::ProjectReference;
use async_trait::async_trait;
use std::collections::HashMap;

/// One row of the page table: the page identifier and its redirect flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRow {
    pub page_id: u64,
    pub is_redirect: bool,
}

/// One recorded outbound internal link: target namespace and storage-form title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub namespace: u32,
    pub title: String,
}

impl PageLink {
    pub fn new(namespace: u32, title: &str) -> Self {
        Self {
            namespace,
            title: title.to_string(),
        }
    }
}

/// Generic trait for read-only wiki data sources
///
/// Implementations answer the five queries the translation engine needs:
/// page existence, redirect targets, cross-language links, outbound internal
/// links and latest revision ids. All methods are async to support I/O-bound
/// backends.
///
/// # Guarantees expected from implementations
///
/// - No method mutates any upstream state
/// - `outbound_links` returns links in a stable order (the order the data
///   source yields them, which is not necessarily source-text order)
/// - Lookup misses are `Ok(None)` / an empty list, never an error
#[async_trait]
pub trait ReplicaAccess: Send + Sync {
    /// Look up a page by storage-form title and namespace
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PageRow))` - The page id and redirect flag
    /// * `Ok(None)` - No page matches
    async fn page_row(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<PageRow>>;

    /// Look up the redirect target of a page known to be a redirect
    ///
    /// Returns the target title in storage form, or `None` when the redirect
    /// row is missing (a replica inconsistency the caller must tolerate).
    async fn redirect_target(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Option<String>>;

    /// Look up the cross-language link of a page towards a target project
    ///
    /// # Arguments
    ///
    /// * `target_code` - The lowercased bare code of the target project (e.g. `fr`)
    ///
    /// # Returns
    ///
    /// The equivalent title on the target project, or `None` when no
    /// interwiki is recorded.
    async fn language_link(
        &self,
        project: &ProjectReference,
        page_id: u64,
        target_code: &str,
    ) -> TranslateResult<Option<String>>;

    /// Enumerate the outbound internal links recorded for a page
    async fn outbound_links(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Vec<PageLink>>;

    /// Look up the latest revision id of a page by storage-form title
    async fn latest_revision_id(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<u64>>;
}

/// In-memory wiki fixture implementing [`ReplicaAccess`]
///
/// Useful for testing the translation pipeline without network access, and
/// for the CLI's offline mode. Build a small wiki with the `with_*` methods:
///
/// ```ignore
/// let replica = MockReplica::new()
///     .with_page("enwiki", 0, "Foobar", 100)
///     .with_language_link("enwiki", 100, "fr", "Foobar")
///     .with_links("enwiki", 100, vec![PageLink::new(0, "Metasyntactic_variable")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockReplica {
    pages: HashMap<(String, u32, String), PageRow>,
    redirects: HashMap<(String, u64), String>,
    langlinks: HashMap<(String, u64, String), String>,
    pagelinks: HashMap<(String, u64), Vec<PageLink>>,
    revisions: HashMap<(String, u32, String), u64>,
    /// When set, every query fails with this message
    failure: Option<String>,
}

impl MockReplica {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an ordinary (non-redirect) page
    pub fn with_page(mut self, project: &str, namespace: u32, storage_title: &str, page_id: u64) -> Self {
        self.pages.insert(
            (project.to_string(), namespace, storage_title.to_string()),
            PageRow { page_id, is_redirect: false },
        );
        self
    }

    /// Record a redirect page and its target title
    pub fn with_redirect(
        mut self,
        project: &str,
        namespace: u32,
        storage_title: &str,
        page_id: u64,
        target_storage_title: &str,
    ) -> Self {
        self.pages.insert(
            (project.to_string(), namespace, storage_title.to_string()),
            PageRow { page_id, is_redirect: true },
        );
        self.redirects
            .insert((project.to_string(), page_id), target_storage_title.to_string());
        self
    }

    /// Record a cross-language link
    pub fn with_language_link(mut self, project: &str, page_id: u64, lang: &str, title: &str) -> Self {
        self.langlinks
            .insert((project.to_string(), page_id, lang.to_string()), title.to_string());
        self
    }

    /// Record the outbound internal links of a page
    pub fn with_links(mut self, project: &str, page_id: u64, links: Vec<PageLink>) -> Self {
        self.pagelinks.insert((project.to_string(), page_id), links);
        self
    }

    /// Record the latest revision id of a page
    pub fn with_revision(mut self, project: &str, namespace: u32, storage_title: &str, revision_id: u64) -> Self {
        self.revisions.insert(
            (project.to_string(), namespace, storage_title.to_string()),
            revision_id,
        );
        self
    }

    /// Make every query fail, to simulate an unavailable upstream
    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check_failure(&self) -> TranslateResult<()> {
        match &self.failure {
            Some(message) => Err(crate::error::TranslateError::UpstreamUnavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReplicaAccess for MockReplica {
    async fn page_row(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<PageRow>> {
        self.check_failure()?;
        Ok(self
            .pages
            .get(&(project.code().to_string(), namespace, storage_title.to_string()))
            .copied())
    }

    async fn redirect_target(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Option<String>> {
        self.check_failure()?;
        Ok(self.redirects.get(&(project.code().to_string(), page_id)).cloned())
    }

    async fn language_link(
        &self,
        project: &ProjectReference,
        page_id: u64,
        target_code: &str,
    ) -> TranslateResult<Option<String>> {
        self.check_failure()?;
        Ok(self
            .langlinks
            .get(&(project.code().to_string(), page_id, target_code.to_string()))
            .cloned())
    }

    async fn outbound_links(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Vec<PageLink>> {
        self.check_failure()?;
        Ok(self
            .pagelinks
            .get(&(project.code().to_string(), page_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn latest_revision_id(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<u64>> {
        self.check_failure()?;
        Ok(self
            .revisions
            .get(&(project.code().to_string(), namespace, storage_title.to_string()))
            .copied())
    }
}
