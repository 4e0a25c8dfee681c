// Wire types shared with the extraction service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream classification derived from the codec sentinel fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatCategory {
    /// Audio and video muxed together
    Combined,
    /// Video stream without audio (acodec == "none")
    VideoOnly,
    /// Audio stream without video (vcodec == "none")
    AudioOnly,
}

impl FormatCategory {
    /// Section heading used when projecting the catalog
    pub fn label(&self) -> &'static str {
        match self {
            Self::Combined => "Video + Audio",
            Self::VideoOnly => "Video only",
            Self::AudioOnly => "Audio only",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => write!(f, "both"),
            Self::VideoOnly => write!(f, "video"),
            Self::AudioOnly => write!(f, "audio"),
        }
    }
}

/// One downloadable stream variant as reported by `/get_formats`.
///
/// Every field is optional - the backend passes yt-dlp output through
/// with minimal filtering, so rows can be arbitrarily sparse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Format ID (e.g., "137", "140", "18")
    pub id: Option<String>,
    /// Container extension (mp4, webm, m4a)
    pub ext: Option<String>,
    /// Resolution string (e.g., "1920x1080")
    pub resolution: Option<String>,
    /// Format note (e.g., "1080p", "medium")
    pub note: Option<String>,
    /// Frames per second
    pub fps: Option<f64>,
    /// Approximate file size in bytes
    pub filesize_approx: Option<u64>,
    /// Video codec, "none" for audio-only streams
    pub vcodec: Option<String>,
    /// Audio codec, "none" for video-only streams
    pub acodec: Option<String>,
    /// Total bitrate in kbps
    pub tbr: Option<f64>,
    /// Audio bitrate in kbps
    pub abr: Option<f64>,
    /// Video bitrate in kbps
    pub vbr: Option<f64>,
    /// Audio track language
    pub language: Option<String>,
}

impl FormatDescriptor {
    /// Classify the descriptor using the vcodec/acodec sentinel rule.
    /// The vcodec check runs first, matching the original selection order.
    pub fn category(&self) -> FormatCategory {
        if self.vcodec.as_deref() == Some("none") {
            FormatCategory::AudioOnly
        } else if self.acodec.as_deref() == Some("none") {
            FormatCategory::VideoOnly
        } else {
            FormatCategory::Combined
        }
    }
}

/// Response body of `POST /get_formats`.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatsResponse {
    pub success: bool,
    pub title: Option<String>,
    pub formats: Option<Vec<FormatDescriptor>>,
    pub error: Option<String>,
}

/// Request body of `POST /download`.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    /// Single descriptor id, or `videoId+audioId` for a server-side merge
    pub format_id: String,
    /// Locally suggested filename; the server may override it
    pub filename: String,
}

/// JSON error payload paired with a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
