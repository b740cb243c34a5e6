//! Adapter that turns yt-dlp `--dump-json` records into the ytdl-core
//! `getInfo` shape: title, duration, live status and normalized formats.

pub mod adapter;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod normalizer;
pub mod utils;

pub use adapter::InfoAdapter;
pub use config::{AdapterConfig, ExtractorConfig, ExtractorMode, LivePolicy};
pub use errors::{ExtractorError, InfoError};
pub use extractors::{
    CliInfoExtractor, InfoExtractor, InfoExtractorOrchestrator, PythonInfoExtractor,
};
pub use models::{Format, RawFormatRecord, RawScalar, RawVideoRecord, VideoInfo};
pub use normalizer::FormatNormalizer;
