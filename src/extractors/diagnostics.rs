// Failure diagnostics - why did the source site refuse the request?
//
// Only used to enrich log output; callers still receive a single
// ExtractionFailed carrying the original message.

/// Reasons an extraction can be refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingReason {
    UnsupportedUrl,
    Http403Forbidden,
    RateLimited,
    BotDetection,
    AgeRestricted,
    PrivateVideo,
    VideoUnavailable,
    GeoBlocked,
    /// DRM, Premium, purchase or rental
    DrmProtected,
    NetworkTimeout,
    Unknown,
}

impl BlockingReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedUrl => "URL not supported by the extraction tool",
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::RateLimited => "Rate limited by source site",
            Self::BotDetection => "Bot detection triggered",
            Self::AgeRestricted => "Age-restricted content",
            Self::PrivateVideo => "Private video",
            Self::VideoUnavailable => "Video unavailable",
            Self::GeoBlocked => "Geographic restriction",
            Self::DrmProtected => "DRM-protected or paid content",
            Self::NetworkTimeout => "Network timeout",
            Self::Unknown => "Unknown failure",
        }
    }
}

/// Checked in order of specificity; the first matching group wins.
const PATTERNS: &[(BlockingReason, &[&str])] = &[
    (BlockingReason::UnsupportedUrl, &["unsupported url"]),
    (
        BlockingReason::DrmProtected,
        &["drm", "widevine", "playready", "fairplay", "youtube premium", "requires purchase", "rental"],
    ),
    (
        BlockingReason::AgeRestricted,
        &["age-restricted", "sign in to confirm your age"],
    ),
    (
        BlockingReason::PrivateVideo,
        &["private video", "video is private"],
    ),
    (
        BlockingReason::VideoUnavailable,
        &["video unavailable", "has been removed", "no longer available"],
    ),
    (
        BlockingReason::GeoBlocked,
        &["not available in your country", "blocked in your country", "geo restrict"],
    ),
    (
        BlockingReason::RateLimited,
        &["429", "rate limit", "too many requests"],
    ),
    (
        BlockingReason::BotDetection,
        &["not a bot", "captcha", "unusual traffic"],
    ),
    (BlockingReason::Http403Forbidden, &["403", "forbidden"]),
    (
        BlockingReason::NetworkTimeout,
        &["timeout", "timed out", "connection refused", "network unreachable"],
    ),
];

/// Analyze an error message. `None` only for an empty message.
pub fn diagnose_error(error: &str) -> Option<BlockingReason> {
    if error.trim().is_empty() {
        return None;
    }

    let lower = error.to_lowercase();

    let reason = PATTERNS
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(reason, _)| *reason)
        .unwrap_or(BlockingReason::Unknown);

    Some(reason)
}
