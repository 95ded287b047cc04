/// Error types for interwiki resolution and link translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A project code that fails the code-syntax invariant
    InvalidProjectCode(String),
    /// A syntactically valid code whose project family is not recognized
    UnknownProjectKind(String),
    /// The seed article does not exist on the source project
    ArticleNotFound(String),
    /// A page identifier that is not a positive integer
    InvalidPageId(u64),
    /// A namespace identifier that is not valid for this wiki
    InvalidNamespaceId(i64),
    /// A redirect chain longer than the hop limit
    RedirectCycleExceeded(String),
    /// The external data source could not be reached
    UpstreamUnavailable(String),
    /// The external data source answered with an unexpected payload shape
    UpstreamResponse(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::InvalidProjectCode(code) => {
                write!(f, "{} doesn't seem to be a valid project code", code)
            }
            TranslateError::UnknownProjectKind(code) => {
                write!(f, "Not currently handled project code: {}", code)
            }
            TranslateError::ArticleNotFound(title) => {
                write!(f, "This page doesn't exist: {}", title)
            }
            TranslateError::InvalidPageId(id) => {
                write!(f, "{} isn't a valid page id (a positive integer is expected)", id)
            }
            TranslateError::InvalidNamespaceId(id) => {
                write!(f, "{} isn't a valid namespace identifier", id)
            }
            TranslateError::RedirectCycleExceeded(title) => {
                write!(f, "Redirect chain starting at {} exceeds the hop limit", title)
            }
            TranslateError::UpstreamUnavailable(msg) => write!(f, "Upstream unavailable: {}", msg),
            TranslateError::UpstreamResponse(msg) => write!(f, "Unexpected upstream response: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::UpstreamUnavailable(err.to_string())
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TranslateError::InvalidProjectCode("Fr-".to_string());
        assert!(err.to_string().contains("Fr-"));

        let err = TranslateError::ArticleNotFound("Foobar".to_string());
        assert!(err.to_string().contains("Foobar"));

        let err = TranslateError::InvalidPageId(0);
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&TranslateError::UpstreamUnavailable("timeout".to_string()));
    }
}
