// Data models: the raw yt-dlp record and the normalized getInfo shape

use serde::Serialize;
use serde_json::{Number, Value};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A loosely-typed scalar as found in yt-dlp output.
///
/// Serialized untagged, so a copied value comes out exactly as it went in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawScalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl RawScalar {
    /// Arrays, objects and null are not scalars.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Decimal/text rendering used for string-typed output fields
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_to_text(n),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for RawScalar {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<&str> for RawScalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Render a JSON number without unit conversion or rounding.
///
/// Integral floats (`125.0`) render without the fractional part.
pub fn number_to_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Values of yt-dlp's `live_status` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiveStatus {
    IsLive,
    WasLive,
    NotLive,
    IsUpcoming,
    PostLive,
    /// Anything a newer yt-dlp may emit
    Other(String),
}

impl LiveStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "is_live" => Self::IsLive,
            "was_live" => Self::WasLive,
            "not_live" => Self::NotLive,
            "is_upcoming" => Self::IsUpcoming,
            "post_live" => Self::PostLive,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Every live signal the record may (or may not) carry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveIndicator {
    /// `is_live`
    pub flag: Option<bool>,
    /// `live_status`
    pub status: Option<LiveStatus>,
}

/// One entry of the raw `formats` array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFormatRecord {
    pub url: Option<String>,
    pub format_id: Option<String>,
    pub ext: Option<String>,
    pub acodec: Option<String>,
    pub vcodec: Option<String>,
    pub abr: Option<RawScalar>,
    pub asr: Option<RawScalar>,
    pub tbr: Option<RawScalar>,
    pub filesize: Option<RawScalar>,
    pub format_note: Option<RawScalar>,
    pub loudness: Option<RawScalar>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
}

impl RawFormatRecord {
    pub fn from_json(f: &Value) -> Self {
        Self {
            url: text(f, "url"),
            format_id: text(f, "format_id"),
            ext: text(f, "ext"),
            acodec: text(f, "acodec"),
            vcodec: text(f, "vcodec"),
            abr: scalar(f, "abr"),
            asr: scalar(f, "asr"),
            tbr: scalar(f, "tbr"),
            filesize: scalar(f, "filesize"),
            format_note: scalar(f, "format_note"),
            loudness: scalar(f, "loudness"),
            width: f["width"].as_u64().and_then(|w| u32::try_from(w).ok()),
            height: f["height"].as_u64().and_then(|h| u32::try_from(h).ok()),
            fps: f["fps"].as_f64(),
        }
    }
}

/// The whole `--dump-json` record, read defensively
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVideoRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub thumbnail: Option<String>,
    pub webpage_url: Option<String>,
    /// Seconds; numeric strings are accepted
    pub duration: Option<Number>,
    pub live: LiveIndicator,
    pub formats: Vec<RawFormatRecord>,
}

impl RawVideoRecord {
    /// Never fails: absent or mistyped fields become `None`.
    pub fn from_json(json: &Value) -> Self {
        let formats = json["formats"]
            .as_array()
            .map(|arr| arr.iter().map(RawFormatRecord::from_json).collect())
            .unwrap_or_default();

        Self {
            id: json["id"].as_str().map(str::to_string),
            title: json["title"].as_str().map(str::to_string),
            uploader: json["uploader"].as_str().map(str::to_string),
            thumbnail: json["thumbnail"].as_str().map(str::to_string),
            webpage_url: json["webpage_url"].as_str().map(str::to_string),
            duration: duration(&json["duration"]),
            live: LiveIndicator {
                flag: json["is_live"].as_bool(),
                status: json["live_status"].as_str().map(LiveStatus::parse),
            },
            formats,
        }
    }
}

fn text(v: &Value, key: &str) -> Option<String> {
    match &v[key] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_text(n)),
        _ => None,
    }
}

fn scalar(v: &Value, key: &str) -> Option<RawScalar> {
    RawScalar::from_json(&v[key])
}

fn duration(v: &Value) -> Option<Number> {
    match v {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Normalized output (ytdl-core getInfo shape)
// ---------------------------------------------------------------------------

/// One playable variant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub url: String,
    #[serde(rename = "format_id")]
    pub format_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itag: Option<u64>,
    pub ext: String,
    pub acodec: String,
    pub vcodec: String,
    pub container: String,
    pub codecs: String,
    pub has_audio: bool,
    pub has_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asr: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_bitrate: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<RawScalar>,
    pub is_live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loudness_db: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<RawScalar>,
    #[serde(rename = "format_note", skip_serializing_if = "Option::is_none")]
    pub format_note: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub title: String,
    /// `"0"` means unknown, not zero-length
    pub length_seconds: String,
    pub is_live_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "video_url", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Older clients read live status from `player_response.videoDetails`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyVideoDetails {
    pub is_live_content: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub video_details: LegacyVideoDetails,
}

/// Normalized result of one `get_info` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_details: VideoDetails,
    #[serde(rename = "player_response")]
    pub player_response: PlayerResponse,
    pub formats: Vec<Format>,
}

impl VideoInfo {
    pub fn is_live(&self) -> bool {
        self.video_details.is_live_content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_tolerates_garbage() {
        let record = RawVideoRecord::from_json(&json!({
            "title": 42,
            "duration": "abc",
            "is_live": "yes",
            "formats": {"not": "an array"}
        }));

        assert_eq!(record.title, None);
        assert_eq!(record.duration, None);
        assert_eq!(record.live.flag, None);
        assert!(record.formats.is_empty());
    }

    #[test]
    fn test_non_object_input_yields_empty_record() {
        assert_eq!(RawVideoRecord::from_json(&json!(null)), RawVideoRecord::default());
        assert_eq!(RawVideoRecord::from_json(&json!([1, 2])), RawVideoRecord::default());
    }

    #[test]
    fn test_numeric_format_id_is_read_as_text() {
        let f = RawFormatRecord::from_json(&json!({"format_id": 22, "abr": [1, 2]}));
        assert_eq!(f.format_id.as_deref(), Some("22"));
        assert_eq!(f.abr, None);
    }

    #[test]
    fn test_duration_accepts_numeric_string() {
        let record = RawVideoRecord::from_json(&json!({"duration": " 61 "}));
        assert_eq!(record.duration.map(|n| number_to_text(&n)).as_deref(), Some("61"));
    }

    #[test]
    fn test_live_status_parsing() {
        let record = RawVideoRecord::from_json(&json!({"live_status": "post_live"}));
        assert_eq!(record.live.status, Some(LiveStatus::PostLive));

        let record = RawVideoRecord::from_json(&json!({"live_status": "whatever_next"}));
        assert_eq!(
            record.live.status,
            Some(LiveStatus::Other("whatever_next".to_string()))
        );
    }

    #[test]
    fn test_number_to_text() {
        assert_eq!(number_to_text(&Number::from(125)), "125");
        assert_eq!(number_to_text(&Number::from_f64(125.0).unwrap()), "125");
        assert_eq!(number_to_text(&Number::from_f64(12.5).unwrap()), "12.5");
    }

    #[test]
    fn test_scalar_serializes_verbatim() {
        let v = serde_json::to_value(RawScalar::from_json(&json!(129.48)).unwrap()).unwrap();
        assert_eq!(v, json!(129.48));
        let v = serde_json::to_value(RawScalar::from("medium")).unwrap();
        assert_eq!(v, json!("medium"));
    }
}
