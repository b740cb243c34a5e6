// Python InfoExtractor - uses `python3 -m yt_dlp`
//
// Advantages:
// - Better at bypassing YouTube bot detection
// - Works well with cookies/auth
//
// Disadvantages:
// - Requires Python 3 and the yt-dlp module
// - Slightly slower than the native binary

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use super::traits::InfoExtractor;
use super::{check_command, common_args, failure_from_stderr, parse_dump_json};
use crate::config::ExtractorConfig;
use crate::errors::ExtractorError;
use crate::models::RawVideoRecord;
use crate::utils::{find_binary, run_output_with_timeout};

/// Python-based info extractor using the yt_dlp module
pub struct PythonInfoExtractor {
    python_cmd: String,
    /// `import yt_dlp` result, checked once on first use
    available: OnceCell<bool>,
}

impl PythonInfoExtractor {
    pub fn new() -> Self {
        Self::with_python(Self::find_python())
    }

    pub fn with_python(python_cmd: impl Into<String>) -> Self {
        Self {
            python_cmd: python_cmd.into(),
            available: OnceCell::new(),
        }
    }

    /// `YTDLP_PYTHON` wins, then `python3` from the usual install dirs or `PATH`
    fn find_python() -> String {
        if let Ok(custom) = std::env::var("YTDLP_PYTHON") {
            return custom;
        }

        find_binary("python3").unwrap_or_else(|| "python3".to_string())
    }

    async fn has_ytdlp_module(&self) -> bool {
        *self
            .available
            .get_or_init(|| check_command(&self.python_cmd, &["-c", "import yt_dlp"]))
            .await
    }

    fn build_args(&self, url: &str, config: &ExtractorConfig) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "yt_dlp".to_string()];
        args.extend(common_args(config));

        // Default to web client for Python mode
        let client = config.player_client.as_deref().unwrap_or("web");
        args.push("--extractor-args".to_string());
        args.push(format!("youtube:player_client={}", client));

        args.push(url.to_string());
        args
    }
}

impl Default for PythonInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for PythonInfoExtractor {
    fn name(&self) -> &'static str {
        "python-yt-dlp"
    }

    async fn is_available(&self) -> bool {
        self.has_ytdlp_module().await
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<RawVideoRecord, ExtractorError> {
        if !self.is_available().await {
            return Err(ExtractorError::ToolNotFound(
                "Python yt_dlp module not installed".to_string(),
            ));
        }

        let args = self.build_args(url, config);
        debug!(python = %self.python_cmd, args = %args.join(" "), "running yt_dlp module");

        let output = run_output_with_timeout(&self.python_cmd, args, config.timeout_seconds as u64)
            .await
            .map_err(|e| {
                if e.starts_with("Timed out") {
                    ExtractorError::Timeout(e)
                } else {
                    ExtractorError::Execution(format!("Python yt-dlp error: {}", e))
                }
            })?;

        if !output.status.success() {
            return Err(failure_from_stderr(&output.stderr));
        }

        parse_dump_json(&output.stdout)
    }
}
