// CLI InfoExtractor - uses native `yt-dlp` binary
//
// Advantages:
// - Faster than Python mode
// - No Python dependency
//
// Disadvantages:
// - More likely to trigger YouTube bot detection
// - May require different player clients

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::traits::InfoExtractor;
use super::{check_command, common_args, failure_from_stderr, parse_dump_json};
use crate::config::ExtractorConfig;
use crate::errors::ExtractorError;
use crate::models::RawVideoRecord;
use crate::utils::{find_binary, is_youtube_url, run_output_with_timeout};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// CLI-based info extractor using the yt-dlp binary
pub struct CliInfoExtractor {
    ytdlp_path: String,
    /// `yt-dlp --version` result, checked once on first use
    available: OnceCell<bool>,
}

impl CliInfoExtractor {
    pub fn new() -> Self {
        Self::with_binary(find_binary("yt-dlp").unwrap_or_else(|| "yt-dlp".to_string()))
    }

    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
            available: OnceCell::new(),
        }
    }

    async fn has_ytdlp_binary(&self) -> bool {
        *self
            .available
            .get_or_init(|| check_command(&self.ytdlp_path, &["--version"]))
            .await
    }

    fn build_args(&self, url: &str, config: &ExtractorConfig, client: Option<&str>) -> Vec<String> {
        let mut args = common_args(config);
        args.push("--user-agent".to_string());
        args.push(USER_AGENT.to_string());

        if let Some(client) = client {
            args.push("--extractor-args".to_string());
            args.push(format!("youtube:player_client={}", client));
        }

        args.push(url.to_string());
        args
    }

    /// Player clients to try, in order. `None` means no client override.
    fn clients_for(url: &str, config: &ExtractorConfig) -> Vec<Option<String>> {
        if !is_youtube_url(url) {
            return vec![None];
        }

        if let Some(client) = &config.player_client {
            return vec![Some(client.clone())];
        }

        // android is less likely to be blocked; web handles age-gated content
        let order: &[&str] = if config.cookies_path.is_some() || config.cookies_from_browser {
            &["web", "android"]
        } else {
            &["android", "tv", "web"]
        };

        order.iter().map(|c| Some(c.to_string())).collect()
    }

    async fn try_with_clients(
        &self,
        url: &str,
        config: &ExtractorConfig,
        clients: &[Option<String>],
    ) -> Result<RawVideoRecord, ExtractorError> {
        let mut last_error = ExtractorError::Other("No clients to try".to_string());

        for client in clients {
            let client_label = client.as_deref().unwrap_or("default");
            let args = self.build_args(url, config, client.as_deref());
            debug!(
                binary = %self.ytdlp_path,
                client = client_label,
                args = %args.join(" "),
                "running yt-dlp"
            );

            let output =
                run_output_with_timeout(&self.ytdlp_path, args, config.timeout_seconds as u64)
                    .await;

            match output {
                Ok(out) if out.status.success() => {
                    info!(client = client_label, "yt-dlp succeeded");
                    return parse_dump_json(&out.stdout);
                }
                Ok(out) => {
                    let err = failure_from_stderr(&out.stderr);
                    warn!(client = client_label, error = %err, "yt-dlp client failed");
                    // Another player client won't make the URL supported
                    if matches!(err, ExtractorError::UnsupportedUrl(_)) {
                        return Err(err);
                    }
                    last_error = err;
                }
                Err(e) => {
                    warn!(client = client_label, error = %e, "yt-dlp run failed");
                    last_error = ExtractorError::from(e);
                }
            }
        }

        Err(last_error)
    }
}

impl Default for CliInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for CliInfoExtractor {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    async fn is_available(&self) -> bool {
        self.has_ytdlp_binary().await
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<RawVideoRecord, ExtractorError> {
        if !self.is_available().await {
            return Err(ExtractorError::ToolNotFound(
                "yt-dlp binary not found".to_string(),
            ));
        }

        let clients = Self::clients_for(url, config);
        self.try_with_clients(url, config, &clients).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_for_other_sites() {
        let clients = CliInfoExtractor::clients_for("https://vimeo.com/1", &ExtractorConfig::default());
        assert_eq!(clients, vec![None]);
    }

    #[test]
    fn test_clients_for_youtube() {
        let config = ExtractorConfig::default().with_cookies_from_browser(true);
        let with_cookies = CliInfoExtractor::clients_for("https://youtu.be/x", &config);
        assert_eq!(with_cookies, vec![Some("web".to_string()), Some("android".to_string())]);

        let without = CliInfoExtractor::clients_for("https://youtu.be/x", &ExtractorConfig::default());
        assert_eq!(without.len(), 3);
        assert_eq!(without[0].as_deref(), Some("android"));

        let config = ExtractorConfig::default().with_player_client(Some("tv".to_string()));
        let pinned = CliInfoExtractor::clients_for("https://youtu.be/x", &config);
        assert_eq!(pinned, vec![Some("tv".to_string())]);
    }

    #[test]
    fn test_build_args_without_client() {
        let extractor = CliInfoExtractor::with_binary("yt-dlp");
        let args = extractor.build_args("https://vimeo.com/1", &ExtractorConfig::default(), None);

        assert!(!args.contains(&"--extractor-args".to_string()));
        assert!(args.contains(&"--user-agent".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://vimeo.com/1"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let extractor = CliInfoExtractor::with_binary("definitely-not-yt-dlp-ytinfo");
        let err = extractor
            .extract("https://vimeo.com/1", &ExtractorConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractorError::ToolNotFound(_)));
    }

    /// Fake yt-dlp whose `--version` takes a second and logs each call.
    #[cfg(unix)]
    fn slow_fake_ytdlp(dir: &std::path::Path) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("yt-dlp");
        let body = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then\n\
             echo call >> \"{log}\"\n\
             sleep 1\n\
             echo 2024.01.01\n\
             exit 0\n\
             fi\n\
             echo '{{\"title\": \"Fake\", \"duration\": 10, \"formats\": []}}'\n",
            log = dir.join("version-calls").display()
        );
        std::fs::write(&script, body).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "current_thread")]
    async fn test_availability_check_does_not_block_runtime() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let script = slow_fake_ytdlp(dir.path());
        let extractor = CliInfoExtractor::with_binary(script.to_string_lossy().to_string());

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_millis(50));
                loop {
                    interval.tick().await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        let config = ExtractorConfig::default().with_timeout(10);
        let record = extractor.extract("https://vimeo.com/1", &config).await.unwrap();
        ticker.abort();

        assert_eq!(record.title.as_deref(), Some("Fake"));
        // ~20 ticks fit in the one-second version check when nothing blocks
        assert!(ticks.load(Ordering::SeqCst) >= 10, "runtime was blocked");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_availability_is_checked_once() {
        let dir = tempfile::tempdir().unwrap();
        let script = slow_fake_ytdlp(dir.path());
        let extractor = CliInfoExtractor::with_binary(script.to_string_lossy().to_string());
        let config = ExtractorConfig::default().with_timeout(10);

        assert!(extractor.is_available().await);
        extractor.extract("https://vimeo.com/1", &config).await.unwrap();
        extractor.extract("https://vimeo.com/2", &config).await.unwrap();

        let calls = std::fs::read_to_string(dir.path().join("version-calls")).unwrap();
        assert_eq!(calls.lines().count(), 1);
    }
}
