// InfoExtractor trait - the seam between the adapter and yt-dlp

use async_trait::async_trait;

use crate::config::ExtractorConfig;
use crate::errors::ExtractorError;
use crate::models::RawVideoRecord;

/// Produces a raw metadata record for a URL.
///
/// Implementations own their I/O, timeouts and retries; the adapter awaits
/// exactly one `extract` per request.
#[async_trait]
pub trait InfoExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor can run at all (tool installed, etc.).
    /// Must not block the runtime; implementations cache the answer.
    async fn is_available(&self) -> bool;

    /// Fetch the raw record for `url`
    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<RawVideoRecord, ExtractorError>;
}
