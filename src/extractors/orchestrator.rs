// InfoExtractor Orchestrator - mode selection and fallback
//
// Strategy:
// 1. For YouTube: Python mode preferred (better anti-bot bypass)
// 2. For other sites: CLI mode preferred (faster)
// 3. Auto-fallback to the other mode on failure

use async_trait::async_trait;
use tracing::{info, warn};

use super::cli::CliInfoExtractor;
use super::python::PythonInfoExtractor;
use super::traits::InfoExtractor;
use crate::config::{ExtractorConfig, ExtractorMode};
use crate::errors::ExtractorError;
use crate::models::RawVideoRecord;
use crate::utils::is_youtube_url;

/// Orchestrator that manages the Python and CLI extractors
pub struct InfoExtractorOrchestrator {
    python: Box<dyn InfoExtractor>,
    cli: Box<dyn InfoExtractor>,
}

impl InfoExtractorOrchestrator {
    pub fn new() -> Self {
        Self::with_backends(
            Box::new(PythonInfoExtractor::new()),
            Box::new(CliInfoExtractor::new()),
        )
    }

    pub fn with_backends(python: Box<dyn InfoExtractor>, cli: Box<dyn InfoExtractor>) -> Self {
        Self { python, cli }
    }

    /// Order in which modes are tried for `url` under `Auto`
    pub fn mode_order(url: &str) -> [ExtractorMode; 2] {
        if is_youtube_url(url) {
            [ExtractorMode::Python, ExtractorMode::Cli]
        } else {
            [ExtractorMode::Cli, ExtractorMode::Python]
        }
    }

    fn backend(&self, mode: ExtractorMode) -> &dyn InfoExtractor {
        match mode {
            ExtractorMode::Python => self.python.as_ref(),
            _ => self.cli.as_ref(),
        }
    }

    async fn extract_auto(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<RawVideoRecord, ExtractorError> {
        let mut last_error: Option<ExtractorError> = None;

        for mode in Self::mode_order(url) {
            let backend = self.backend(mode);
            if !backend.is_available().await {
                info!(mode = %mode, backend = backend.name(), "backend unavailable, skipping");
                continue;
            }

            info!(mode = %mode, backend = backend.name(), "trying extraction");
            match backend.extract(url, config).await {
                Ok(record) => return Ok(record),
                Err(e) => {
                    warn!(mode = %mode, backend = backend.name(), error = %e, "extraction failed");
                    if matches!(e, ExtractorError::UnsupportedUrl(_)) {
                        return Err(e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ExtractorError::ToolNotFound(
                "Neither Python yt_dlp nor yt-dlp binary available".to_string(),
            )
        }))
    }
}

impl Default for InfoExtractorOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for InfoExtractorOrchestrator {
    fn name(&self) -> &'static str {
        "orchestrator"
    }

    async fn is_available(&self) -> bool {
        self.python.is_available().await || self.cli.is_available().await
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<RawVideoRecord, ExtractorError> {
        match config.mode {
            ExtractorMode::Auto => self.extract_auto(url, config).await,
            mode => self.backend(mode).extract(url, config).await,
        }
    }
}
