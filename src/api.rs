//! MediaWiki HTTP clients
//!
//! Two capabilities live here, both read-only:
//!
//! 1. The [`WikiApi`] trait covers the project metadata API (namespace
//!    id → canonical name) and the raw content fetch, with an HTTP
//!    implementation ([`HttpWikiApi`]) and an in-memory one ([`MockWikiApi`]).
//! 2. [`ApiReplica`] implements [`ReplicaAccess`](crate::replica::ReplicaAccess)
//!    on top of the public MediaWiki action API, so the engine works without
//!    database-replica credentials.
//!
//! Every request carries a caller-identifying `User-Agent` header and a
//! bounded timeout. Responses are parsed from JSON; a payload that does not
//! have the expected shape surfaces as `UpstreamResponse`.

use crate::error::{TranslateError, TranslateResult};
use crate::project::ProjectReference;
use crate::replica::{PageLink, PageRow, ReplicaAccess};
use crate::title::to_storage_form;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// The user agent sent with HTTP requests when the caller supplies none
pub const DEFAULT_USER_AGENT: &str = "InterwikiTranslateTool/0.1";

/// Timeout applied to every outgoing request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client(user_agent: &str) -> TranslateResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| TranslateError::UpstreamUnavailable(format!("Failed to create HTTP client: {}", e)))
}

async fn get_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> TranslateResult<Value> {
    debug!(url, "wiki API request");
    let response = client.get(url).query(params).send().await?;

    if !response.status().is_success() {
        return Err(TranslateError::UpstreamResponse(format!(
            "{} answered with status {}",
            url,
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| TranslateError::UpstreamResponse(format!("Failed to parse API response: {}", e)))
}

/// Project metadata and raw content capabilities
///
/// Namespace configuration can legitimately differ across projects and,
/// rarely, change over time, so implementations must not cache namespace
/// names beyond one translation request.
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// The mapping of namespace id to canonical namespace name
    ///
    /// The default namespace (0) contributes no prefix and is not part of
    /// the mapping; virtual namespaces with negative ids never hold pages
    /// and are skipped as well.
    async fn namespace_names(&self, project: &ProjectReference) -> TranslateResult<HashMap<u32, String>>;

    /// The raw wiki markup of a page, by full storage-form title
    async fn raw_text(&self, project: &ProjectReference, full_storage_title: &str) -> TranslateResult<String>;
}

/// [`WikiApi`] implementation over HTTP
#[derive(Debug, Clone)]
pub struct HttpWikiApi {
    client: reqwest::Client,
}

impl HttpWikiApi {
    pub fn new() -> TranslateResult<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a client identifying itself with the given user agent
    pub fn with_user_agent(user_agent: &str) -> TranslateResult<Self> {
        Ok(Self {
            client: build_client(user_agent)?,
        })
    }
}

#[async_trait]
impl WikiApi for HttpWikiApi {
    async fn namespace_names(&self, project: &ProjectReference) -> TranslateResult<HashMap<u32, String>> {
        let json = get_json(
            &self.client,
            &project.api_entry_point_url(),
            &[
                ("action", "query"),
                ("meta", "siteinfo"),
                ("siprop", "namespaces"),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )
        .await?;

        let namespaces = json["query"]["namespaces"].as_object().ok_or_else(|| {
            TranslateError::UpstreamResponse("Missing 'query.namespaces' object".to_string())
        })?;

        let mut names = HashMap::new();
        for (ns, info) in namespaces {
            let id: i64 = ns.parse().map_err(|_| {
                TranslateError::UpstreamResponse(format!("Non-numeric namespace id: {}", ns))
            })?;
            if id <= 0 {
                continue;
            }
            if let Some(canonical) = info["canonical"].as_str() {
                names.insert(id as u32, canonical.to_string());
            }
        }
        Ok(names)
    }

    async fn raw_text(&self, project: &ProjectReference, full_storage_title: &str) -> TranslateResult<String> {
        let url = project.main_entry_point_url();
        debug!(url = %url, title = full_storage_title, "raw text fetch");
        let response = self
            .client
            .get(&url)
            .query(&[("title", full_storage_title), ("action", "raw")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::UpstreamResponse(format!(
                "{} answered with status {} for {}",
                url,
                response.status(),
                full_storage_title
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TranslateError::UpstreamResponse(format!("Failed to read page text: {}", e)))
    }
}

/// In-memory [`WikiApi`] fixture for tests and the CLI's offline mode
#[derive(Debug, Clone, Default)]
pub struct MockWikiApi {
    namespaces: HashMap<(String, u32), String>,
    texts: HashMap<(String, String), String>,
}

impl MockWikiApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a namespace canonical name for a project
    pub fn with_namespace(mut self, project: &str, id: u32, name: &str) -> Self {
        self.namespaces.insert((project.to_string(), id), name.to_string());
        self
    }

    /// Record the raw text of a page, keyed by full storage-form title
    pub fn with_text(mut self, project: &str, full_storage_title: &str, text: &str) -> Self {
        self.texts
            .insert((project.to_string(), full_storage_title.to_string()), text.to_string());
        self
    }
}

#[async_trait]
impl WikiApi for MockWikiApi {
    async fn namespace_names(&self, project: &ProjectReference) -> TranslateResult<HashMap<u32, String>> {
        Ok(self
            .namespaces
            .iter()
            .filter(|((code, _), _)| code == project.code())
            .map(|((_, id), name)| (*id, name.clone()))
            .collect())
    }

    async fn raw_text(&self, project: &ProjectReference, full_storage_title: &str) -> TranslateResult<String> {
        self.texts
            .get(&(project.code().to_string(), full_storage_title.to_string()))
            .cloned()
            .ok_or_else(|| TranslateError::ArticleNotFound(full_storage_title.to_string()))
    }
}

/// [`ReplicaAccess`] implementation backed by the MediaWiki action API
///
/// Maps each replica query onto an `action=query` request. Link enumeration
/// follows API continuation, so articles with more links than one API page
/// are enumerated completely.
#[derive(Debug, Clone)]
pub struct ApiReplica {
    client: reqwest::Client,
}

impl ApiReplica {
    pub fn new() -> TranslateResult<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> TranslateResult<Self> {
        Ok(Self {
            client: build_client(user_agent)?,
        })
    }

    async fn query(&self, project: &ProjectReference, params: &[(&str, &str)]) -> TranslateResult<Value> {
        let mut all: Vec<(&str, &str)> = vec![
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
        ];
        all.extend_from_slice(params);
        get_json(&self.client, &project.api_entry_point_url(), &all).await
    }

    /// The single page object of a one-title query response
    fn single_page(json: &Value) -> TranslateResult<Value> {
        json["query"]["pages"]
            .as_array()
            .and_then(|pages| pages.first())
            .cloned()
            .ok_or_else(|| TranslateError::UpstreamResponse("Missing 'query.pages' array".to_string()))
    }

    /// Prefix a storage-form title with its canonical namespace name
    ///
    /// The action API addresses pages by prefixed title, while the replica
    /// contract is keyed by bare title plus namespace id. Namespace names
    /// are fetched per call and not cached across requests.
    async fn prefixed_title(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<String> {
        if namespace == 0 {
            return Ok(storage_title.to_string());
        }

        let api = HttpWikiApi {
            client: self.client.clone(),
        };
        let names = api.namespace_names(project).await?;
        let name = names
            .get(&namespace)
            .ok_or(TranslateError::InvalidNamespaceId(namespace as i64))?;
        Ok(format!("{}:{}", name, storage_title))
    }
}

/// Strip the namespace prefix off a link title returned by the action API
///
/// `prop=links` yields display-form titles carrying their namespace prefix;
/// the replica contract wants the bare title.
fn bare_link_title(namespace: u32, title: &str) -> String {
    if namespace == 0 {
        return title.to_string();
    }
    match title.split_once(':') {
        Some((_, rest)) => rest.to_string(),
        None => title.to_string(),
    }
}

#[async_trait]
impl ReplicaAccess for ApiReplica {
    async fn page_row(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<PageRow>> {
        let title = self.prefixed_title(project, storage_title, namespace).await?;
        let json = self.query(project, &[("titles", &title)]).await?;
        let page = Self::single_page(&json)?;

        if page["missing"].as_bool() == Some(true) || page["invalid"].as_bool() == Some(true) {
            return Ok(None);
        }

        let page_id = page["pageid"].as_u64().ok_or_else(|| {
            TranslateError::UpstreamResponse("Missing 'pageid' field".to_string())
        })?;
        Ok(Some(PageRow {
            page_id,
            is_redirect: page["redirect"].as_bool() == Some(true),
        }))
    }

    async fn redirect_target(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Option<String>> {
        let id = page_id.to_string();
        let json = self
            .query(project, &[("pageids", &id), ("redirects", "1")])
            .await?;

        let target = json["query"]["redirects"]
            .as_array()
            .and_then(|redirects| redirects.first())
            .and_then(|redirect| redirect["to"].as_str())
            .map(to_storage_form);
        Ok(target)
    }

    async fn language_link(
        &self,
        project: &ProjectReference,
        page_id: u64,
        target_code: &str,
    ) -> TranslateResult<Option<String>> {
        let id = page_id.to_string();
        let json = self
            .query(
                project,
                &[
                    ("pageids", &id),
                    ("prop", "langlinks"),
                    ("lllang", target_code),
                    ("lllimit", "1"),
                ],
            )
            .await?;

        let page = Self::single_page(&json)?;
        let title = page["langlinks"]
            .as_array()
            .and_then(|links| links.first())
            .and_then(|link| link["title"].as_str())
            .map(|title| title.to_string());
        Ok(title)
    }

    async fn outbound_links(
        &self,
        project: &ProjectReference,
        page_id: u64,
    ) -> TranslateResult<Vec<PageLink>> {
        let id = page_id.to_string();
        let mut links = Vec::new();
        let mut continuation: Vec<(String, String)> = Vec::new();

        loop {
            let mut params: Vec<(&str, &str)> =
                vec![("pageids", &id), ("prop", "links"), ("pllimit", "max")];
            for (key, value) in &continuation {
                params.push((key.as_str(), value.as_str()));
            }
            let json = self.query(project, &params).await?;

            let page = Self::single_page(&json)?;
            if let Some(rows) = page["links"].as_array() {
                for row in rows {
                    let namespace = row["ns"].as_u64().ok_or_else(|| {
                        TranslateError::UpstreamResponse("Missing link 'ns' field".to_string())
                    })? as u32;
                    let title = row["title"].as_str().ok_or_else(|| {
                        TranslateError::UpstreamResponse("Missing link 'title' field".to_string())
                    })?;
                    links.push(PageLink {
                        namespace,
                        title: to_storage_form(&bare_link_title(namespace, title)),
                    });
                }
            }

            match json["continue"].as_object() {
                Some(object) => {
                    continuation = object
                        .iter()
                        .filter_map(|(key, value)| {
                            value.as_str().map(|v| (key.clone(), v.to_string()))
                        })
                        .collect();
                }
                None => break,
            }
        }

        Ok(links)
    }

    async fn latest_revision_id(
        &self,
        project: &ProjectReference,
        storage_title: &str,
        namespace: u32,
    ) -> TranslateResult<Option<u64>> {
        let title = self.prefixed_title(project, storage_title, namespace).await?;
        let json = self
            .query(project, &[("titles", &title), ("prop", "info")])
            .await?;
        let page = Self::single_page(&json)?;

        if page["missing"].as_bool() == Some(true) {
            return Ok(None);
        }
        Ok(page["lastrevid"].as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDirectory;

    #[test]
    fn test_bare_link_title() {
        assert_eq!(bare_link_title(0, "Foobar"), "Foobar");
        assert_eq!(bare_link_title(14, "Category:Variables"), "Variables");
        assert_eq!(bare_link_title(10, "Template:Infobox person"), "Infobox person");
        // No prefix despite a non-zero namespace: keep the title as is
        assert_eq!(bare_link_title(14, "Variables"), "Variables");
    }

    #[tokio::test]
    async fn test_mock_api_namespaces_are_per_project() {
        let api = MockWikiApi::new()
            .with_namespace("enwiki", 14, "Category")
            .with_namespace("frwiki", 14, "Catégorie");

        let enwiki = ProjectDirectory::resolve("enwiki").unwrap();
        let names = api.namespace_names(&enwiki).await.unwrap();
        assert_eq!(names.get(&14).map(String::as_str), Some("Category"));
        assert_eq!(names.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_api_raw_text() {
        let api = MockWikiApi::new().with_text("enwiki", "Foobar", "Some [[wiki]] text.");
        let enwiki = ProjectDirectory::resolve("enwiki").unwrap();

        assert_eq!(api.raw_text(&enwiki, "Foobar").await.unwrap(), "Some [[wiki]] text.");
        assert!(matches!(
            api.raw_text(&enwiki, "Missing").await,
            Err(TranslateError::ArticleNotFound(_))
        ));
    }

    // ========== Live API Tests (network access required) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_live_namespace_names() {
        let api = HttpWikiApi::new().unwrap();
        let enwiki = ProjectDirectory::resolve("enwiki").unwrap();
        let names = api.namespace_names(&enwiki).await.unwrap();

        assert_eq!(names.get(&14).map(String::as_str), Some("Category"));
        assert_eq!(names.get(&10).map(String::as_str), Some("Template"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_live_page_row_and_langlink() {
        let replica = ApiReplica::new().unwrap();
        let enwiki = ProjectDirectory::resolve("enwiki").unwrap();

        let row = replica
            .page_row(&enwiki, "Metasyntactic_variable", 0)
            .await
            .unwrap()
            .expect("page should exist");
        assert!(!row.is_redirect);

        let title = replica.language_link(&enwiki, row.page_id, "fr").await.unwrap();
        assert!(title.is_some());
    }
}
