//! Video URL classification.
//!
//! Recognises YouTube, Bilibili and Twitter/X links and extracts the
//! platform-specific video identifier. Precedence is YouTube, then
//! Bilibili, then Twitter; the first match wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Length of a YouTube video id.
pub const YOUTUBE_ID_LENGTH: usize = 11;

static YOUTUBE_WATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com/watch\?v=([^&]+)").expect("valid regex"));

static YOUTUBE_SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtu\.be/([^?]+)").expect("valid regex"));

static YOUTUBE_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com/embed/([^?]+)").expect("valid regex"));

static YOUTUBE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));

static BILIBILI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bilibili\.com/video/(BV[A-Za-z0-9]+)").expect("valid regex")
});

/// Host must start at a scheme separator or subdomain dot, so `fox.com` is
/// not taken for `x.com`.
static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[/.])(?:twitter|x)\.com/.*/status/(\d+)").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A platform whose videos can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    Twitter,
    Youtube,
    Bilibili,
}

impl VideoPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Youtube => "youtube",
            Self::Bilibili => "bilibili",
        }
    }
}

impl std::fmt::Display for VideoPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one URL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLink {
    Known { platform: VideoPlatform, id: String },
    /// Not a recognised video URL. Carries the original input for display.
    Unknown(String),
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a single URL string.
///
/// A YouTube-shaped URL whose captured id is not exactly 11 characters of
/// `[A-Za-z0-9_-]` is not YouTube; the remaining platforms are still tried.
pub fn classify_video_url(url: &str) -> VideoLink {
    if let Some(id) = youtube_id(url) {
        return VideoLink::Known {
            platform: VideoPlatform::Youtube,
            id,
        };
    }

    if let Some(caps) = BILIBILI_RE.captures(url) {
        return VideoLink::Known {
            platform: VideoPlatform::Bilibili,
            id: caps[1].to_string(),
        };
    }

    if let Some(caps) = TWITTER_RE.captures(url) {
        return VideoLink::Known {
            platform: VideoPlatform::Twitter,
            id: caps[1].to_string(),
        };
    }

    VideoLink::Unknown(url.to_string())
}

fn youtube_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_WATCH_RE
        .captures(url)
        .or_else(|| YOUTUBE_SHORT_RE.captures(url))
        .or_else(|| YOUTUBE_EMBED_RE.captures(url))?;
    let candidate = caps.get(1)?.as_str();
    YOUTUBE_ID_RE
        .is_match(candidate)
        .then(|| candidate.to_string())
}
