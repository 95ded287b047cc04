//! Page resolution
//!
//! A [`PageHandle`] names one page (project, title, namespace) and offers
//! the per-page lookups the engine needs: page id, redirect target, latest
//! revision, raw text and the namespace-prefixed display title. A handle is
//! a plain value; the data sources are passed to each operation, so nothing
//! is cached across calls.

use crate::api::WikiApi;
use crate::error::{TranslateError, TranslateResult};
use crate::project::ProjectReference;
use crate::replica::{PageRow, ReplicaAccess};
use crate::title::{to_display_form, to_storage_form};
use std::collections::HashMap;

/// One page on one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    project: ProjectReference,
    title: String,
    namespace: u32,
}

impl PageHandle {
    pub fn new(project: ProjectReference, title: &str, namespace: u32) -> Self {
        Self {
            project,
            title: title.to_string(),
            namespace,
        }
    }

    pub fn project(&self) -> &ProjectReference {
        &self.project
    }

    pub fn namespace(&self) -> u32 {
        self.namespace
    }

    /// The title in storage form
    pub fn storage_title(&self) -> String {
        to_storage_form(&self.title)
    }

    /// The title in display form, without namespace prefix
    pub fn display_title(&self) -> String {
        to_display_form(&self.title)
    }

    /// The page row, or `None` when the page does not exist
    pub async fn row(&self, replica: &dyn ReplicaAccess) -> TranslateResult<Option<PageRow>> {
        replica
            .page_row(&self.project, &self.storage_title(), self.namespace)
            .await
    }

    /// The page identifier, or `None` when the page does not exist
    pub async fn page_id(&self, replica: &dyn ReplicaAccess) -> TranslateResult<Option<u64>> {
        Ok(self.row(replica).await?.map(|row| row.page_id))
    }

    /// The redirect target of this page, in storage form
    ///
    /// Returns `None` when the page does not exist or has no redirect row.
    pub async fn resolve_redirect(&self, replica: &dyn ReplicaAccess) -> TranslateResult<Option<String>> {
        let Some(row) = self.row(replica).await? else {
            return Ok(None);
        };
        resolve_redirect_from_page_id(replica, &self.project, row.page_id).await
    }

    /// The latest revision id of the page
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The last revision id
    /// * `Err(TranslateError::ArticleNotFound)` - When no matching page exists
    pub async fn latest_revision_id(&self, replica: &dyn ReplicaAccess) -> TranslateResult<u64> {
        self.latest_revision(replica)
            .await?
            .ok_or_else(|| TranslateError::ArticleNotFound(self.display_title()))
    }

    async fn latest_revision(&self, replica: &dyn ReplicaAccess) -> TranslateResult<Option<u64>> {
        replica
            .latest_revision_id(&self.project, &self.storage_title(), self.namespace)
            .await
    }

    /// The display title prefixed with its canonical namespace name
    ///
    /// Namespace names come from the project metadata API; namespace 0
    /// contributes no prefix and needs no API call.
    pub async fn full_display_title(&self, api: &dyn WikiApi) -> TranslateResult<String> {
        if self.namespace == 0 {
            return Ok(self.display_title());
        }
        let namespaces = api.namespace_names(&self.project).await?;
        self.full_display_title_with(&namespaces)
    }

    /// Like [`full_display_title`](Self::full_display_title), with a
    /// preloaded namespace table
    ///
    /// The table builder fetches namespace names once per translation
    /// request and prefixes every extracted link through this method.
    pub fn full_display_title_with(&self, namespaces: &HashMap<u32, String>) -> TranslateResult<String> {
        if self.namespace == 0 {
            return Ok(self.display_title());
        }
        let name = namespaces
            .get(&self.namespace)
            .ok_or(TranslateError::InvalidNamespaceId(self.namespace as i64))?;
        Ok(format!("{}:{}", name, self.display_title()))
    }

    /// The URL of the page on its wiki
    pub async fn url(&self, api: &dyn WikiApi) -> TranslateResult<String> {
        let title = to_storage_form(&self.full_display_title(api).await?);
        Ok(format!("{}?title={}", self.project.main_entry_point_url(), title))
    }

    /// The raw wiki markup of the page
    pub async fn raw_text(&self, api: &dyn WikiApi) -> TranslateResult<String> {
        let title = to_storage_form(&self.full_display_title(api).await?);
        api.raw_text(&self.project, &title).await
    }
}

/// Resolves a redirect from a page id
///
/// # Returns
///
/// * `Ok(Some(title))` - The target title in storage form
/// * `Ok(None)` - No redirect row for this page id
/// * `Err(TranslateError::InvalidPageId)` - The page id is not a positive integer
pub async fn resolve_redirect_from_page_id(
    replica: &dyn ReplicaAccess,
    project: &ProjectReference,
    page_id: u64,
) -> TranslateResult<Option<String>> {
    if page_id == 0 {
        return Err(TranslateError::InvalidPageId(page_id));
    }
    replica.redirect_target(project, page_id).await
}
