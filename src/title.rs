//! Page title normalization
//!
//! MediaWiki stores titles with underscores joining the words and displays
//! them with spaces. The two forms are interchangeable renderings of the
//! same title; every lookup key uses the storage form, every human-facing
//! string the display form.

/// Gets the storage form of a title, with spaces replaced by underscores
pub fn to_storage_form(title: &str) -> String {
    title.replace(' ', "_")
}

/// Gets the display form of a title, with underscores replaced by spaces
pub fn to_display_form(title: &str) -> String {
    title.replace('_', " ")
}

/// Determines if an identifier is a valid namespace identifier for a page
///
/// Negative namespaces exist (virtual namespaces like Special:) but never
/// hold pages, so they are rejected here.
pub fn is_valid_namespace_id(namespace_id: i64) -> bool {
    namespace_id >= 0
}

/// Lowercases the first letter of a title
///
/// The first letter of a link target is case-insensitive on most wikis,
/// so `[[foo bar]]` and `[[Foo bar]]` designate the same page. Substitution
/// has to handle both spellings.
pub fn lowercase_first(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
