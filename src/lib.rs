//! Interwiki link translation
//!
//! This library locates the internal links of one wiki article, finds the
//! equivalent article titles on a target-language project by following
//! interwiki (language link) metadata, and rewrites the article markup so
//! every translatable link points at its target-language counterpart. It
//! also renders the per-locale "translated from" attribution template.
//!
//! # Components
//!
//! 1. **Project directory** - maps project codes to web/API entry points
//! 2. **Page resolution** - page ids, redirects, revisions, raw text
//! 3. **Interwiki resolver** - cross-language equivalents with bounded
//!    redirect following
//! 4. **Link translation table** - the ordered (source, target) rows for
//!    one article
//! 5. **Text substitutor** - literal link rewriting with pluggable
//!    missing-link policies
//! 6. **Attribution templates** - data-driven per-locale formats
//!
//! # Example
//!
//! ```ignore
//! use interwiki_translate::{ApiReplica, HttpWikiApi, LinkTranslator, TranslationRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = TranslationRequest::new("en", "fr", "Metasyntactic variable");
//!     let translator = LinkTranslator::new(
//!         request,
//!         Arc::new(ApiReplica::new()?),
//!         Arc::new(HttpWikiApi::new()?),
//!     )?;
//!
//!     let table = translator.translate_links().await?;
//!     for pair in table.pairs() {
//!         println!("{} -> {:?}", pair.source, pair.target);
//!     }
//!
//!     let text = translator.fetch_raw_text().await?;
//!     println!("{}", translator.substitute_links(&text, &table));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod attribution;
pub mod engine;
pub mod error;
pub mod interwiki;
pub mod mask;
pub mod page;
pub mod project;
pub mod replica;
pub mod substitute;
pub mod table;
pub mod title;

#[cfg(test)]
mod integration_tests;

pub use api::{ApiReplica, DEFAULT_USER_AGENT, HttpWikiApi, MockWikiApi, WikiApi};
pub use engine::{LinkTranslator, TranslationRequest};
pub use error::{TranslateError, TranslateResult};
pub use interwiki::{InterwikiResolver, REDIRECT_HOP_LIMIT};
pub use mask::{MaskedText, mask_spans};
pub use page::PageHandle;
pub use project::{ProjectDirectory, ProjectReference};
pub use replica::{MockReplica, PageLink, PageRow, ReplicaAccess};
pub use substitute::{FrenchLienPolicy, MissingLinkPolicy, Substitutor, missing_link_policy_for};
pub use table::{LinkPair, LinkTranslationTable};
