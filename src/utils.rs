// Helper functions for the extraction backends

use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

/// Run command with timeout, collecting stdout and stderr.
pub async fn run_output_with_timeout(
    program: &str,
    args: Vec<String>,
    timeout_secs: u64,
) -> Result<std::process::Output, String> {
    let mut child = TokioCommand::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("Failed to start {}: {}", program, e))?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| format!("Failed to capture stdout from {}", program))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| format!("Failed to capture stderr from {}", program))?;

    // Drain both pipes concurrently so a chatty child can't block on a full pipe.
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe
            .read_to_end(&mut buf)
            .await
            .map_err(|e| format!("Failed to read stdout: {}", e))?;
        Ok::<Vec<u8>, String>(buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe
            .read_to_end(&mut buf)
            .await
            .map_err(|e| format!("Failed to read stderr: {}", e))?;
        Ok::<Vec<u8>, String>(buf)
    });

    match timeout(Duration::from_secs(timeout_secs), child.wait()).await {
        Ok(status_res) => {
            let status = status_res.map_err(|e| format!("Failed to wait for {}: {}", program, e))?;
            let stdout = stdout_task
                .await
                .map_err(|e| format!("stdout task failed: {}", e))??;
            let stderr = stderr_task
                .await
                .map_err(|e| format!("stderr task failed: {}", e))??;
            Ok(std::process::Output { status, stdout, stderr })
        }
        Err(_) => {
            let _ = child.kill().await;
            stdout_task.abort();
            stderr_task.abort();
            Err(format!("Timed out after {}s", timeout_secs))
        }
    }
}

/// YouTube URLs get player-client handling and Python-first extraction
pub fn is_youtube_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("youtube.com") || lower.contains("youtu.be")
}

/// Locate a binary: well-known install dirs first, then `PATH`.
pub fn find_binary(name: &str) -> Option<String> {
    let common_dirs = ["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];

    for dir in common_dirs {
        let candidate = std::path::Path::new(dir).join(name);
        if candidate.is_file() {
            return Some(candidate.to_string_lossy().to_string());
        }
    }

    which::which(name)
        .ok()
        .map(|p| p.to_string_lossy().to_string())
}

/// Last non-empty stderr line, which is where yt-dlp puts `ERROR: ...`
pub fn last_error_line(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_detection() {
        assert!(is_youtube_url("https://www.YouTube.com/watch?v=abc"));
        assert!(is_youtube_url("https://youtu.be/abc"));
        assert!(!is_youtube_url("https://vimeo.com/123"));
    }

    #[test]
    fn test_last_error_line() {
        let stderr = "WARNING: something\nERROR: Unsupported URL: x\n\n";
        assert_eq!(last_error_line(stderr), Some("ERROR: Unsupported URL: x"));
        assert_eq!(last_error_line("  \n"), None);
    }

    #[test]
    fn test_find_missing_binary() {
        assert_eq!(find_binary("definitely-not-a-real-binary-ytinfo"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_collects_stdout() {
        let out = run_output_with_timeout("sh", vec!["-c".into(), "echo hello".into()], 10)
            .await
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let err = run_output_with_timeout("sh", vec!["-c".into(), "sleep 5".into()], 1)
            .await
            .unwrap_err();
        assert!(err.contains("Timed out"));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = run_output_with_timeout("definitely-not-a-real-binary-ytinfo", vec![], 1)
            .await
            .unwrap_err();
        assert!(err.starts_with("Failed to start"));
    }
}
