// Extraction backends - the yt-dlp collaborator behind the adapter
//
// Provides two modes:
// - Python mode: Uses `python3 -m yt_dlp` (better for YouTube, avoids bot detection)
// - CLI mode: Uses native `yt-dlp` binary (faster, no Python dependency)
//
// The orchestrator picks a mode per URL and falls back to the other one.
// All of them hand back the `--dump-json` record as a RawVideoRecord.

mod cli;
mod diagnostics;
mod orchestrator;
mod python;
mod traits;

pub use cli::CliInfoExtractor;
pub use diagnostics::{diagnose_error, BlockingReason};
pub use orchestrator::InfoExtractorOrchestrator;
pub use python::PythonInfoExtractor;
pub use traits::InfoExtractor;

use crate::config::ExtractorConfig;
use crate::errors::ExtractorError;
use crate::models::RawVideoRecord;
use crate::utils::{last_error_line, run_output_with_timeout};

/// Upper bound for `--version` / `import yt_dlp` availability checks
const CHECK_TIMEOUT_SECS: u64 = 15;

/// Flags shared by both modes; the caller appends the URL.
pub(crate) fn common_args(config: &ExtractorConfig) -> Vec<String> {
    let mut args = vec![
        "--dump-json".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--socket-timeout".to_string(),
        config.timeout_seconds.to_string(),
        "--retries".to_string(),
        "2".to_string(),
    ];

    if let Some(path) = &config.cookies_path {
        args.push("--cookies".to_string());
        args.push(path.clone());
    } else if config.cookies_from_browser {
        args.push("--cookies-from-browser".to_string());
        args.push("chrome".to_string());
    }

    if let Some(proxy) = &config.proxy {
        args.push("--proxy".to_string());
        args.push(proxy.clone());
    }

    args
}

/// True when `program args...` starts and exits zero. Runs on the async
/// process driver so callers never stall a runtime worker.
pub(crate) async fn check_command(program: &str, args: &[&str]) -> bool {
    let args = args.iter().map(|a| a.to_string()).collect();
    match run_output_with_timeout(program, args, CHECK_TIMEOUT_SECS).await {
        Ok(out) => out.status.success(),
        Err(e) => {
            tracing::debug!(program, error = %e, "availability check failed");
            false
        }
    }
}

/// Parse `--dump-json` stdout. Only non-JSON output is an error; the record
/// itself is read leniently.
pub(crate) fn parse_dump_json(stdout: &[u8]) -> Result<RawVideoRecord, ExtractorError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| ExtractorError::Parse(format!("Invalid JSON from yt-dlp: {}", e)))?;

    if !json.is_object() {
        return Err(ExtractorError::Parse(
            "yt-dlp output is not a JSON object".to_string(),
        ));
    }

    Ok(RawVideoRecord::from_json(&json))
}

/// Turn a failed run's stderr into an error, keeping yt-dlp's own message.
pub(crate) fn failure_from_stderr(stderr: &[u8]) -> ExtractorError {
    let stderr = String::from_utf8_lossy(stderr);
    let message = last_error_line(&stderr)
        .unwrap_or("yt-dlp exited with an error and no output")
        .to_string();
    ExtractorError::from(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_args_with_cookies_file_and_proxy() {
        let config = ExtractorConfig::default()
            .with_cookies_path(Some("/tmp/cookies.txt".to_string()))
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()));
        let args = common_args(&config);

        assert_eq!(args[0], "--dump-json");
        assert!(args.windows(2).any(|w| w == ["--cookies", "/tmp/cookies.txt"]));
        assert!(args.windows(2).any(|w| w == ["--proxy", "socks5://127.0.0.1:1080"]));
        assert!(!args.contains(&"--cookies-from-browser".to_string()));
    }

    #[test]
    fn test_common_args_browser_cookies() {
        let args = common_args(&ExtractorConfig::default().with_cookies_from_browser(true));
        assert!(args.windows(2).any(|w| w == ["--cookies-from-browser", "chrome"]));
    }

    #[test]
    fn test_default_config_sends_no_cookie_flags() {
        let args = common_args(&ExtractorConfig::default());
        assert!(!args.iter().any(|a| a.starts_with("--cookies")));
    }

    #[tokio::test]
    async fn test_check_missing_program() {
        assert!(!check_command("definitely-not-a-real-binary-ytinfo", &["--version"]).await);
    }

    #[test]
    fn test_parse_dump_json() {
        let record = parse_dump_json(br#"{"title": "Clip", "duration": 30, "formats": []}"#).unwrap();
        assert_eq!(record.title.as_deref(), Some("Clip"));

        assert!(matches!(parse_dump_json(b"not json"), Err(ExtractorError::Parse(_))));
        assert!(matches!(parse_dump_json(b"[1, 2]"), Err(ExtractorError::Parse(_))));
    }

    #[test]
    fn test_failure_from_stderr() {
        let err = failure_from_stderr(b"[generic] x: Requesting header\nERROR: Unsupported URL: https://x\n");
        assert_eq!(
            err,
            ExtractorError::UnsupportedUrl("ERROR: Unsupported URL: https://x".to_string())
        );
    }
}
