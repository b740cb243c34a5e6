// Error types for the adapter and its extraction backends

/// Error surfaced to callers of [`crate::InfoAdapter::get_info`].
///
/// Whatever went wrong inside the extraction tool is flattened into a single
/// kind carrying the original message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfoError {
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

impl InfoError {
    /// Message of the underlying extraction failure
    pub fn message(&self) -> &str {
        match self {
            Self::ExtractionFailed(msg) => msg,
        }
    }
}

impl From<ExtractorError> for InfoError {
    fn from(e: ExtractorError) -> Self {
        Self::ExtractionFailed(e.to_string())
    }
}

/// Failures produced by an extraction backend (yt-dlp, python module, stubs).
///
/// Never returned from the public entry point; converted into
/// [`InfoError::ExtractionFailed`] at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractorError {
    /// Network timeout while talking to the source site
    #[error("Network timeout: {0}")]
    Timeout(String),

    /// Source site refused the request (429, bot check, ...)
    #[error("Blocked by source site: {0}")]
    Blocked(String),

    /// yt-dlp or python not found in system
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// URL not recognised by the extraction tool
    #[error("Invalid URL: {0}")]
    UnsupportedUrl(String),

    /// Output could not be parsed even minimally
    #[error("Parse error: {0}")]
    Parse(String),

    /// Process could not be spawned or waited on
    #[error("Execution error: {0}")]
    Execution(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for ExtractorError {
    /// Classify raw stderr text from the extraction tool.
    fn from(s: String) -> Self {
        let lower = s.to_lowercase();

        if lower.contains("unsupported url") || lower.contains("invalid url") {
            return Self::UnsupportedUrl(s);
        }

        if lower.contains("timeout") || lower.contains("timed out") {
            return Self::Timeout(s);
        }

        if lower.contains("429") || lower.contains("sign in to confirm you're not a bot") {
            return Self::Blocked(s);
        }

        if lower.contains("command not found") || lower.contains("no such file") {
            return Self::ToolNotFound(s);
        }

        if lower.contains("json") {
            return Self::Parse(s);
        }

        Self::Other(s)
    }
}

impl From<&str> for ExtractorError {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}
