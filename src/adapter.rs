// InfoAdapter - the public getInfo entry point

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AdapterConfig;
use crate::errors::InfoError;
use crate::extractors::{diagnose_error, InfoExtractor, InfoExtractorOrchestrator};
use crate::models::VideoInfo;
use crate::normalizer::FormatNormalizer;

/// Stateless service: build once at startup and share by reference.
///
/// Each call does one extractor request followed by pure normalization;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct InfoAdapter {
    extractor: Arc<dyn InfoExtractor>,
    normalizer: FormatNormalizer,
    config: AdapterConfig,
}

impl InfoAdapter {
    pub fn new(extractor: Arc<dyn InfoExtractor>, config: AdapterConfig) -> Self {
        Self {
            extractor,
            normalizer: FormatNormalizer::new(config.live_policy),
            config,
        }
    }

    /// Adapter backed by the bundled yt-dlp orchestrator
    pub fn with_ytdlp(config: AdapterConfig) -> Self {
        Self::new(Arc::new(InfoExtractorOrchestrator::new()), config)
    }

    /// Fetch and normalize metadata for `url`.
    ///
    /// Any extractor failure comes back as [`InfoError::ExtractionFailed`]
    /// carrying the original message.
    pub async fn get_info(&self, url: &str) -> Result<VideoInfo, InfoError> {
        debug!(url, extractor = self.extractor.name(), "fetching raw record");

        let raw = match self.extractor.extract(url, &self.config.extractor).await {
            Ok(raw) => raw,
            Err(e) => {
                let message = e.to_string();
                let reason = diagnose_error(&message);
                warn!(
                    url,
                    reason = reason.map(|r| r.description()).unwrap_or("none"),
                    error = %message,
                    "extraction failed"
                );
                return Err(e.into());
            }
        };

        let video = self.normalizer.normalize(&raw);
        info!(
            url,
            formats = video.formats.len(),
            is_live = video.is_live(),
            length_seconds = %video.video_details.length_seconds,
            "normalized video info"
        );

        Ok(video)
    }
}
