//! Wiki project identities
//!
//! A project is identified by a family-suffixed code like `enwiki` or
//! `metawiki`. The directory maps such a code to the project's web and API
//! entry points without any network access: it is a pure string-to-URL
//! mapping with two resolution branches, one for the small fixed set of
//! special Wikimedia projects and one for per-language Wikipedias.

use crate::error::{TranslateError, TranslateResult};
use regex::Regex;
use std::sync::OnceLock;

/// The project-family suffix recognized by the directory
pub const PROJECT_FAMILY_SUFFIX: &str = "wiki";

static CODE_SYNTAX: OnceLock<Regex> = OnceLock::new();

fn code_syntax() -> &'static Regex {
    CODE_SYNTAX.get_or_init(|| Regex::new(r"^[a-z][a-z\-]*$").expect("valid code pattern"))
}

/// Identity of a wiki project: its code and its web entry points
///
/// Immutable; constructed on demand by [`ProjectDirectory::resolve`] and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    code: String,
    base_url: String,
    script_path: String,
}

impl ProjectReference {
    fn new(code: &str, base_url: String, script_path: &str) -> Self {
        Self {
            code: code.to_string(),
            base_url,
            script_path: script_path.to_string(),
        }
    }

    /// The family-suffixed project code, e.g. `enwiki`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The URL of the project wiki, e.g. `https://en.wikipedia.org`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The application URL (base URL plus script path)
    pub fn application_url(&self) -> String {
        format!("{}{}", self.base_url, self.script_path)
    }

    /// The entry point URL for the specified application entry point file
    pub fn entry_point_url(&self, file: &str) -> String {
        format!("{}/{}", self.application_url(), file)
    }

    /// The API entry point URL
    pub fn api_entry_point_url(&self) -> String {
        self.entry_point_url("api.php")
    }

    /// The main (index) entry point URL
    pub fn main_entry_point_url(&self) -> String {
        self.entry_point_url("index.php")
    }
}

/// Resolves project codes to [`ProjectReference`] values
pub struct ProjectDirectory;

impl ProjectDirectory {
    /// Resolve a family-suffixed project code
    ///
    /// # Arguments
    ///
    /// * `code` - A project identity like `enwiki`, `commonswiki` or `wikidatawiki`
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectReference)` - The resolved project
    /// * `Err(TranslateError::UnknownProjectKind)` - If the code does not end
    ///   with the recognized project-family suffix
    /// * `Err(TranslateError::InvalidProjectCode)` - If the code fails the
    ///   code-syntax invariant (lowercase letters and internal hyphens only)
    pub fn resolve(code: &str) -> TranslateResult<ProjectReference> {
        let Some(project) = code.strip_suffix(PROJECT_FAMILY_SUFFIX) else {
            return Err(TranslateError::UnknownProjectKind(code.to_string()));
        };

        if !Self::is_valid_code(project) {
            return Err(TranslateError::InvalidProjectCode(project.to_string()));
        }

        match project {
            "commons" | "meta" | "species" => Ok(ProjectReference::new(
                code,
                format!("https://{}.wikimedia.org", project),
                "/w",
            )),
            "wikidata" => Ok(ProjectReference::new(
                code,
                "https://www.wikidata.org".to_string(),
                "/w",
            )),
            _ => Ok(ProjectReference::new(
                code,
                format!("https://{}.wikipedia.org", project),
                "/w",
            )),
        }
    }

    /// Resolve a bare language code (`en`, `fr`) to its Wikipedia project
    pub fn resolve_language(language_code: &str) -> TranslateResult<ProjectReference> {
        Self::resolve(&format!("{}{}", language_code, PROJECT_FAMILY_SUFFIX))
    }

    /// Determines if the specified code has a valid project code syntax
    ///
    /// Codes are lowercase letters, with internal hyphens allowed. A code
    /// may not end in a hyphen.
    pub fn is_valid_code(code: &str) -> bool {
        code_syntax().is_match(code) && !code.ends_with('-')
    }
}
