use clap::Parser;
use tracing_subscriber::EnvFilter;

use ytinfo_compat_lib::{AdapterConfig, ExtractorMode, InfoAdapter, LivePolicy};

/// Print yt-dlp metadata for a URL in the ytdl-core getInfo shape
#[derive(Parser, Debug)]
#[command(name = "ytinfo", version, about)]
struct Cli {
    /// Video URL
    url: String,

    /// Extraction mode: auto, python or cli
    #[arg(long)]
    mode: Option<ExtractorMode>,

    /// SOCKS5/HTTP proxy URL
    #[arg(long)]
    proxy: Option<String>,

    /// Path to a cookies.txt file
    #[arg(long)]
    cookies: Option<String>,

    /// Read cookies from the local Chrome profile
    #[arg(long)]
    browser_cookies: bool,

    /// Timeout for the extraction process, in seconds
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    timeout: Option<u32>,

    /// Only trust explicit live flags; a missing duration no longer implies live
    #[arg(long)]
    explicit_live_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// CLI flags override the environment
    fn adapter_config(&self) -> AdapterConfig {
        let mut config = AdapterConfig::from_env();

        if let Some(mode) = self.mode {
            config.extractor.mode = mode;
        }
        if self.proxy.is_some() {
            config.extractor.proxy = self.proxy.clone();
        }
        if self.cookies.is_some() {
            config.extractor.cookies_path = self.cookies.clone();
        }
        if self.browser_cookies {
            config.extractor.cookies_from_browser = true;
        }
        if let Some(secs) = self.timeout {
            config.extractor.timeout_seconds = secs;
        }
        if self.explicit_live_only {
            config.live_policy = LivePolicy::ExplicitOnly;
        }

        config
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let adapter = InfoAdapter::with_ytdlp(cli.adapter_config());

    let info = match adapter.get_info(&cli.url).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&info)
    } else {
        serde_json::to_string(&info)
    };

    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}
