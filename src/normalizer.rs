// FormatNormalizer - maps a raw yt-dlp record onto the getInfo shape
//
// Handles:
// - itag derivation from numeric format ids
// - Container inference from the file extension
// - Codec string composition (muxed vs elementary streams)
// - One live decision per record, broadcast to every format
//
// Total over its input: missing fields get a default, never an error.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::LivePolicy;
use crate::models::{
    number_to_text, Format, LegacyVideoDetails, LiveStatus, PlayerResponse, RawFormatRecord,
    RawVideoRecord, VideoDetails, VideoInfo,
};

/// Codec slot sentinel used by yt-dlp
pub const NO_CODEC: &str = "none";

/// Placeholder for container/codecs that cannot be inferred
pub const UNKNOWN: &str = "unknown";

lazy_static! {
    static ref ITAG_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Stateless; share one instance freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatNormalizer {
    live_policy: LivePolicy,
}

impl FormatNormalizer {
    pub fn new(live_policy: LivePolicy) -> Self {
        Self { live_policy }
    }

    pub fn normalize(&self, raw: &RawVideoRecord) -> VideoInfo {
        let is_live = infer_is_live(raw, self.live_policy);

        let formats = raw
            .formats
            .iter()
            .map(|f| normalize_format(f, is_live))
            .collect();

        VideoInfo {
            video_details: VideoDetails {
                title: raw.title.clone().unwrap_or_default(),
                length_seconds: format_length_seconds(raw),
                is_live_content: is_live,
                video_id: raw.id.clone(),
                author: raw.uploader.clone(),
                thumbnail: raw.thumbnail.clone(),
                video_url: raw.webpage_url.clone(),
            },
            player_response: PlayerResponse {
                video_details: LegacyVideoDetails {
                    is_live_content: is_live,
                },
            },
            formats,
        }
    }
}

/// Map a single raw format; `is_live` is the record-level decision.
pub fn normalize_format(raw: &RawFormatRecord, is_live: bool) -> Format {
    let format_id = raw.format_id.clone().unwrap_or_default();
    let ext = raw.ext.clone().unwrap_or_default();
    let acodec = present_codec(raw.acodec.as_deref());
    let vcodec = present_codec(raw.vcodec.as_deref());

    Format {
        url: raw.url.clone().unwrap_or_default(),
        itag: derive_itag(&format_id),
        container: container_for_ext(&ext),
        codecs: compose_codecs(acodec, vcodec),
        has_audio: acodec.is_some(),
        has_video: vcodec.is_some(),
        acodec: acodec.unwrap_or(NO_CODEC).to_string(),
        vcodec: vcodec.unwrap_or(NO_CODEC).to_string(),
        format_id,
        ext,
        audio_sample_rate: raw.asr.as_ref().map(|asr| asr.to_text()),
        asr: raw.asr.clone(),
        average_bitrate: raw.abr.clone(),
        bitrate: raw.tbr.clone(),
        is_live,
        loudness_db: raw.loudness.clone(),
        filesize: raw.filesize.clone(),
        format_note: raw.format_note.clone(),
        width: raw.width,
        height: raw.height,
        fps: raw.fps,
    }
}

/// Numeric itag, only when the whole id is decimal digits.
///
/// Ids from other sites ("hls-1080p", "dash-audio") give `None`, as do
/// digit strings beyond `u64`.
pub fn derive_itag(format_id: &str) -> Option<u64> {
    if !ITAG_RE.is_match(format_id) {
        return None;
    }
    format_id.parse().ok()
}

/// Container for an extension. Case-insensitive; unknown extensions keep
/// their original spelling.
pub fn container_for_ext(ext: &str) -> String {
    if ext.is_empty() {
        return UNKNOWN.to_string();
    }

    match ext.to_lowercase().as_str() {
        "webm" | "opus" => "webm".to_string(),
        "mp4" => "mp4".to_string(),
        "m4a" => "m4a".to_string(),
        "ogg" => "ogg".to_string(),
        _ => ext.to_string(),
    }
}

/// `"<audio>+<video>"` for muxed streams, the single codec for elementary ones.
pub fn compose_codecs(acodec: Option<&str>, vcodec: Option<&str>) -> String {
    match (acodec, vcodec) {
        (Some(a), Some(v)) => format!("{}+{}", a, v),
        (Some(a), None) => a.to_string(),
        (None, Some(v)) => v.to_string(),
        (None, None) => UNKNOWN.to_string(),
    }
}

/// Live decision for the whole record.
///
/// With [`LivePolicy::DurationHeuristic`] a record without a duration counts
/// as live unless `is_live` is explicitly false. This also catches finished
/// videos whose duration simply wasn't reported; callers depend on that.
pub fn infer_is_live(raw: &RawVideoRecord, policy: LivePolicy) -> bool {
    if raw.live.flag == Some(true) {
        return true;
    }
    if raw.live.status == Some(LiveStatus::IsLive) {
        return true;
    }

    match policy {
        LivePolicy::DurationHeuristic => raw.duration.is_none() && raw.live.flag != Some(false),
        LivePolicy::ExplicitOnly => false,
    }
}

/// Decimal seconds, or `"0"` when the duration is unknown.
pub fn format_length_seconds(raw: &RawVideoRecord) -> String {
    raw.duration
        .as_ref()
        .map(number_to_text)
        .unwrap_or_else(|| "0".to_string())
}

fn present_codec(codec: Option<&str>) -> Option<&str> {
    codec.filter(|c| !c.is_empty() && *c != NO_CODEC)
}
