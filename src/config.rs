// Configuration for the adapter and the yt-dlp invokers

use std::fmt;
use std::str::FromStr;

/// Extraction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Python module yt_dlp (better for YouTube, avoids bot detection)
    Python,
    /// CLI binary yt-dlp (faster, no Python dependency)
    Cli,
    /// Python first for YouTube, CLI first elsewhere, with fallback
    #[default]
    Auto,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Cli => write!(f, "cli"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ExtractorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(Self::Python),
            "cli" => Ok(Self::Cli),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown extractor mode '{}'", other)),
        }
    }
}

/// How the top-level live flag is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LivePolicy {
    /// Explicit signals, plus: no duration and no explicit `is_live: false` means live
    #[default]
    DurationHeuristic,
    /// Explicit `is_live` / `live_status` only
    ExplicitOnly,
}

impl FromStr for LivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "duration" => Ok(Self::DurationHeuristic),
            "explicit" => Ok(Self::ExplicitOnly),
            other => Err(format!("unknown live policy '{}'", other)),
        }
    }
}

/// Configuration for info extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub mode: ExtractorMode,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
    /// Use cookies from the local Chrome profile. Off by default; needs a
    /// desktop session with Chrome installed.
    pub cookies_from_browser: bool,
    /// Process timeout in seconds, also passed as `--socket-timeout`
    pub timeout_seconds: u32,
    /// YouTube player client (android, web, tv)
    pub player_client: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractorMode::Auto,
            proxy: None,
            cookies_path: None,
            cookies_from_browser: false,
            timeout_seconds: 30,
            player_client: None,
        }
    }
}

impl ExtractorConfig {
    /// Defaults overridden by `YTINFO_MODE`, `YTINFO_PROXY`, `YTINFO_COOKIES`,
    /// `YTINFO_BROWSER_COOKIES` and `YTINFO_TIMEOUT`. Unparseable values are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let vars = Vars(&lookup);
        let mut config = Self::default();

        if let Some(mode) = vars.parse::<ExtractorMode>("YTINFO_MODE") {
            config.mode = mode;
        }
        if let Some(proxy) = vars.non_empty("YTINFO_PROXY") {
            config.proxy = Some(proxy);
        }
        if let Some(path) = vars.non_empty("YTINFO_COOKIES") {
            config.cookies_path = Some(path);
        }
        if let Some(Flag(enabled)) = vars.parse::<Flag>("YTINFO_BROWSER_COOKIES") {
            config.cookies_from_browser = enabled;
        }
        match vars.parse::<u32>("YTINFO_TIMEOUT") {
            Some(0) => tracing::warn!("ignoring YTINFO_TIMEOUT=0, timeout must be at least 1s"),
            Some(secs) => config.timeout_seconds = secs,
            None => {}
        }

        config
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<String>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_cookies_from_browser(mut self, enabled: bool) -> Self {
        self.cookies_from_browser = enabled;
        self
    }

    pub fn with_mode(mut self, mode: ExtractorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_player_client(mut self, client: Option<String>) -> Self {
        self.player_client = client;
        self
    }
}

/// Everything an [`crate::InfoAdapter`] needs besides its extractor
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    pub extractor: ExtractorConfig,
    pub live_policy: LivePolicy,
}

impl AdapterConfig {
    /// [`ExtractorConfig::from_env`] plus `YTINFO_LIVE_POLICY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let live_policy = Vars(&lookup)
            .parse::<LivePolicy>("YTINFO_LIVE_POLICY")
            .unwrap_or_default();

        Self {
            extractor: ExtractorConfig::from_lookup(&lookup),
            live_policy,
        }
    }

    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_live_policy(mut self, policy: LivePolicy) -> Self {
        self.live_policy = policy;
        self
    }
}

struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    fn non_empty(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.non_empty(key)?;
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, value = %raw, "ignoring invalid environment value: {}", e);
                None
            }
        }
    }
}

/// Boolean environment value: 1/0, true/false, yes/no, on/off
struct Flag(bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Self(true)),
            "0" | "false" | "no" | "off" => Ok(Self(false)),
            other => Err(format!("expected a boolean, got '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Python".parse::<ExtractorMode>(), Ok(ExtractorMode::Python));
        assert_eq!(" cli ".parse::<ExtractorMode>(), Ok(ExtractorMode::Cli));
        assert!("ffmpeg".parse::<ExtractorMode>().is_err());
    }

    #[test]
    fn test_live_policy_parsing() {
        assert_eq!("explicit".parse::<LivePolicy>(), Ok(LivePolicy::ExplicitOnly));
        assert_eq!("heuristic".parse::<LivePolicy>(), Ok(LivePolicy::DurationHeuristic));
        assert_eq!(LivePolicy::default(), LivePolicy::DurationHeuristic);
    }

    #[test]
    fn test_builder_chain() {
        let config = ExtractorConfig::default()
            .with_mode(ExtractorMode::Cli)
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()))
            .with_cookies_from_browser(false)
            .with_timeout(5);

        assert_eq!(config.mode, ExtractorMode::Cli);
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert!(!config.cookies_from_browser);
        assert_eq!(config.timeout_seconds, 5);
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_browser_cookies_off_by_default() {
        assert!(!ExtractorConfig::default().cookies_from_browser);
        assert!(!ExtractorConfig::from_lookup(vars(&[])).cookies_from_browser);
    }

    #[test]
    fn test_browser_cookies_env_toggle() {
        let on = ExtractorConfig::from_lookup(vars(&[("YTINFO_BROWSER_COOKIES", "yes")]));
        assert!(on.cookies_from_browser);

        let off = ExtractorConfig::from_lookup(vars(&[("YTINFO_BROWSER_COOKIES", "0")]));
        assert!(!off.cookies_from_browser);

        let junk = ExtractorConfig::from_lookup(vars(&[("YTINFO_BROWSER_COOKIES", "maybe")]));
        assert!(!junk.cookies_from_browser);
    }

    #[test]
    fn test_env_overrides() {
        let config = AdapterConfig::from_lookup(vars(&[
            ("YTINFO_MODE", "cli"),
            ("YTINFO_PROXY", " socks5://127.0.0.1:1080 "),
            ("YTINFO_COOKIES", ""),
            ("YTINFO_TIMEOUT", "12"),
            ("YTINFO_LIVE_POLICY", "explicit"),
        ]));

        assert_eq!(config.extractor.mode, ExtractorMode::Cli);
        assert_eq!(config.extractor.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(config.extractor.cookies_path, None);
        assert_eq!(config.extractor.timeout_seconds, 12);
        assert_eq!(config.live_policy, LivePolicy::ExplicitOnly);
    }

    #[test]
    fn test_zero_timeout_env_is_ignored() {
        let config = ExtractorConfig::from_lookup(vars(&[("YTINFO_TIMEOUT", "0")]));
        assert_eq!(config.timeout_seconds, 30);
    }
}
