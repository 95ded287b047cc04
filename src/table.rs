//! Link translation tables
//!
//! A [`LinkTranslationTable`] is the unit of result of a translation
//! request: one row per internal link of the source article, carrying the
//! link's full display title and its target-project equivalent when an
//! interwiki exists.
//!
//! Rows keep the order the data source enumerated the links in. The link
//! index has no positional information, so this order does not match the
//! order links appear in the wikitext; sorting by apparition order would
//! require parsing the source text. Duplicate source links are kept as
//! duplicate rows.

use crate::api::WikiApi;
use crate::error::{TranslateError, TranslateResult};
use crate::interwiki::InterwikiResolver;
use crate::page::PageHandle;
use crate::project::{PROJECT_FAMILY_SUFFIX, ProjectReference};
use crate::replica::ReplicaAccess;
use serde::Serialize;
use std::collections::HashMap;

/// One row of translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPair {
    /// Full display title of the source link, namespace prefix included
    pub source: String,
    /// Equivalent title on the target project, absent when no interwiki exists
    pub target: Option<String>,
}

impl LinkPair {
    pub fn translated(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: Some(target.to_string()),
        }
    }

    pub fn untranslated(source: &str) -> Self {
        Self {
            source: source.to_string(),
            target: None,
        }
    }

    pub fn is_translated(&self) -> bool {
        self.target.is_some()
    }
}

/// The ordered list of link translations for one article
///
/// Bound to one (source project, target project, article, namespace) tuple
/// and immutable after build.
#[derive(Debug, Clone, Serialize)]
pub struct LinkTranslationTable {
    source_project: String,
    target_project: String,
    article: String,
    namespace: u32,
    links: Vec<LinkPair>,
}

impl LinkTranslationTable {
    /// Build the translation table for one article
    ///
    /// Enumerates every internal link recorded as originating from the
    /// article, prefixes each with its canonical namespace name, and looks
    /// up its interwiki equivalent on the target project.
    ///
    /// # Arguments
    ///
    /// * `source` - The resolved source project
    /// * `target_code` - The bare code of the target project (e.g. `fr`)
    /// * `article` - The seed article title
    /// * `namespace` - The seed article's namespace id
    ///
    /// # Returns
    ///
    /// * `Ok(LinkTranslationTable)` - One row per enumerated link
    /// * `Err(TranslateError::ArticleNotFound)` - The seed article does not exist
    pub async fn build(
        replica: &dyn ReplicaAccess,
        api: &dyn WikiApi,
        source: &ProjectReference,
        target_code: &str,
        article: &str,
        namespace: u32,
    ) -> TranslateResult<Self> {
        let seed = PageHandle::new(source.clone(), article, namespace);
        let Some(page_id) = seed.page_id(replica).await? else {
            return Err(TranslateError::ArticleNotFound(article.to_string()));
        };

        let outbound = replica.outbound_links(source, page_id).await?;

        // One namespace fetch per request, only when a prefixed link occurs
        let namespaces: HashMap<u32, String> = if outbound.iter().any(|link| link.namespace != 0) {
            api.namespace_names(source).await?
        } else {
            HashMap::new()
        };

        let resolver = InterwikiResolver::new(replica);
        let mut links = Vec::with_capacity(outbound.len());
        for link in &outbound {
            let handle = PageHandle::new(source.clone(), &link.title, link.namespace);
            let full_title = handle.full_display_title_with(&namespaces)?;
            let target = resolver
                .find_equivalent_title(source, target_code, &handle.display_title(), link.namespace)
                .await?;
            links.push(LinkPair {
                source: full_title,
                target,
            });
        }

        let source_project = source
            .code()
            .strip_suffix(PROJECT_FAMILY_SUFFIX)
            .unwrap_or(source.code())
            .to_string();

        Ok(Self {
            source_project,
            target_project: target_code.to_string(),
            article: article.to_string(),
            namespace,
            links,
        })
    }

    /// The bare code of the source project
    pub fn source_project(&self) -> &str {
        &self.source_project
    }

    /// The bare code of the target project
    pub fn target_project(&self) -> &str {
        &self.target_project
    }

    /// The seed article title
    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn namespace(&self) -> u32 {
        self.namespace
    }

    /// All rows, in extraction order
    pub fn pairs(&self) -> &[LinkPair] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Rows with a target-project equivalent
    pub fn translated(&self) -> impl Iterator<Item = &LinkPair> {
        self.links.iter().filter(|pair| pair.is_translated())
    }

    /// Rows without a target-project equivalent
    pub fn untranslated(&self) -> impl Iterator<Item = &LinkPair> {
        self.links.iter().filter(|pair| !pair.is_translated())
    }

    /// A table built from explicit rows, for callers assembling fixtures
    pub fn from_pairs(
        source_project: &str,
        target_project: &str,
        article: &str,
        namespace: u32,
        links: Vec<LinkPair>,
    ) -> Self {
        Self {
            source_project: source_project.to_string(),
            target_project: target_project.to_string(),
            article: article.to_string(),
            namespace,
            links,
        }
    }
}
