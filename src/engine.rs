//! The caller-facing translation engine
//!
//! The boundary is an explicit [`TranslationRequest`], validated once
//! before any external call is made, and a [`LinkTranslator`] bound to the
//! configured data sources. One translator processes one request to
//! completion; there is no shared mutable state across requests.

use crate::api::WikiApi;
use crate::attribution;
use crate::error::{TranslateError, TranslateResult};
use crate::page::PageHandle;
use crate::project::{ProjectDirectory, ProjectReference};
use crate::replica::ReplicaAccess;
use crate::substitute::Substitutor;
use crate::table::LinkTranslationTable;
use crate::title::is_valid_namespace_id;
use std::sync::Arc;

/// One translation request: which article, from where, to where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Bare code of the project to translate from (e.g. `en`)
    pub source_project: String,
    /// Bare code of the project to translate to (e.g. `fr`)
    pub target_project: String,
    /// The article on the source project where to find links
    pub article: String,
    /// The article's namespace id, 0 unless set
    pub namespace: u32,
}

impl TranslationRequest {
    pub fn new(source_project: &str, target_project: &str, article: &str) -> Self {
        Self {
            source_project: source_project.to_string(),
            target_project: target_project.to_string(),
            article: article.to_string(),
            namespace: 0,
        }
    }

    pub fn with_namespace(mut self, namespace: u32) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the namespace from an untrusted integer, e.g. a query parameter
    pub fn with_namespace_id(mut self, namespace_id: i64) -> TranslateResult<Self> {
        if !is_valid_namespace_id(namespace_id) {
            return Err(TranslateError::InvalidNamespaceId(namespace_id));
        }
        self.namespace = namespace_id as u32;
        Ok(self)
    }

    /// Check both project codes against the code-syntax invariant
    pub fn validate(&self) -> TranslateResult<()> {
        if !ProjectDirectory::is_valid_code(&self.source_project) {
            return Err(TranslateError::InvalidProjectCode(self.source_project.clone()));
        }
        if !ProjectDirectory::is_valid_code(&self.target_project) {
            return Err(TranslateError::InvalidProjectCode(self.target_project.clone()));
        }
        Ok(())
    }
}

/// Translates the links of one article, request-scoped
pub struct LinkTranslator {
    request: TranslationRequest,
    source: ProjectReference,
    replica: Arc<dyn ReplicaAccess>,
    api: Arc<dyn WikiApi>,
}

impl LinkTranslator {
    /// Create a translator for a request
    ///
    /// Validation happens here, eagerly: a malformed project code is
    /// reported before any external call.
    pub fn new(
        request: TranslationRequest,
        replica: Arc<dyn ReplicaAccess>,
        api: Arc<dyn WikiApi>,
    ) -> TranslateResult<Self> {
        request.validate()?;
        let source = ProjectDirectory::resolve_language(&request.source_project)?;
        Ok(Self {
            request,
            source,
            replica,
            api,
        })
    }

    pub fn request(&self) -> &TranslationRequest {
        &self.request
    }

    fn seed_page(&self) -> PageHandle {
        PageHandle::new(self.source.clone(), &self.request.article, self.request.namespace)
    }

    /// Build the link translation table for the requested article
    pub async fn translate_links(&self) -> TranslateResult<LinkTranslationTable> {
        LinkTranslationTable::build(
            self.replica.as_ref(),
            self.api.as_ref(),
            &self.source,
            &self.request.target_project,
            &self.request.article,
            self.request.namespace,
        )
        .await
    }

    /// Replace the wiki links in the specified text
    ///
    /// Uses the built-in missing-link policy of the target project, when
    /// one exists.
    pub fn substitute_links(&self, text: &str, table: &LinkTranslationTable) -> String {
        Substitutor::for_target(&self.request.target_project).apply(text, table)
    }

    /// The translation reference template for the target project
    pub fn attribution_template(&self, table: &LinkTranslationTable, revision_id: u64) -> String {
        attribution::render(
            table.target_project(),
            table.source_project(),
            table.article(),
            revision_id,
        )
    }

    /// The raw wiki markup of the requested article
    pub async fn fetch_raw_text(&self) -> TranslateResult<String> {
        self.seed_page().raw_text(self.api.as_ref()).await
    }

    /// The latest revision id of the requested article
    pub async fn latest_revision_id(&self) -> TranslateResult<u64> {
        self.seed_page().latest_revision_id(self.replica.as_ref()).await
    }
}
