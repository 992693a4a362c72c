use image::RgbaImage;

use crate::foundation::{
    core::Rgba8,
    error::{MotionError, MotionResult},
};

/// Card color shown until a frame has been sampled.
pub const DEFAULT_CARD_BACKGROUND: Rgba8 = Rgba8::rgb(0xe5, 0xe7, 0xeb);

/// Load state reported by the host's media element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MediaStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    #[default]
    Primary,
    /// Static image used after the primary video failed.
    Fallback,
}

/// What the host should do with a card's media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    Play,
    /// Paused and rewound to the first frame.
    PauseAtStart,
    /// Fallback image; nothing to play.
    Still,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    pub video: String,
    pub fallback: String,
}

impl MediaItem {
    pub fn new(video: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            video: video.into(),
            fallback: fallback.into(),
        }
    }
}

/// The showcase reel bundled with the site.
pub fn default_showcase() -> Vec<MediaItem> {
    [
        "APEe8vAHJA8qvtT1UXxvKE2CA",
        "yXdMcYJicU7xfxsBmQJEYCf9H1c",
        "yvCOXE3FsehpZbAYAz4FgDbfhUc",
        "4ZbxNsQP7oZnAAYRONbYDwKJTc",
        "WoEzU6rPsJpT06fwcGi3b2IWWSE",
        "l7qUhfDxVpjSSGzjvXC3v2pMTIo",
    ]
    .into_iter()
    .map(|id| {
        MediaItem::new(
            format!("/videos/{id}.mp4"),
            format!("https://framerusercontent.com/images/{id}.gif"),
        )
    })
    .collect()
}

#[derive(Clone, Copy, Debug, Default)]
struct CardMediaState {
    status: MediaStatus,
    source: MediaSource,
    background: Option<Rgba8>,
}

/// Media state for every content item of the carousel, keyed by content index.
#[derive(Clone, Debug)]
pub struct CardMedia {
    items: Vec<MediaItem>,
    states: Vec<CardMediaState>,
}

impl CardMedia {
    pub fn new(items: Vec<MediaItem>) -> MotionResult<Self> {
        if items.is_empty() {
            return Err(MotionError::validation("showcase needs at least one media item"));
        }
        let states = vec![CardMediaState::default(); items.len()];
        Ok(Self { items, states })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true when this report switched the card to its fallback.
    pub fn on_status(&mut self, content_index: usize, status: MediaStatus) -> bool {
        let Some(state) = self.states.get_mut(content_index) else {
            return false;
        };
        if state.source == MediaSource::Fallback {
            return false;
        }
        state.status = status;
        if status == MediaStatus::Failed {
            state.source = MediaSource::Fallback;
            tracing::debug!(content_index, "showcase video failed; using fallback image");
            return true;
        }
        false
    }

    pub fn status(&self, content_index: usize) -> MediaStatus {
        self.states
            .get(content_index)
            .map_or(MediaStatus::Pending, |s| s.status)
    }

    pub fn source(&self, content_index: usize) -> MediaSource {
        self.states
            .get(content_index)
            .map_or(MediaSource::Primary, |s| s.source)
    }

    /// URL to load for the card.
    pub fn src(&self, content_index: usize) -> Option<&str> {
        let item = self.items.get(content_index)?;
        Some(match self.source(content_index) {
            MediaSource::Primary => item.video.as_str(),
            MediaSource::Fallback => item.fallback.as_str(),
        })
    }

    pub fn playback(&self, content_index: usize, is_active: bool) -> Playback {
        match (self.source(content_index), is_active) {
            (MediaSource::Fallback, _) => Playback::Still,
            (MediaSource::Primary, true) => Playback::Play,
            (MediaSource::Primary, false) => Playback::PauseAtStart,
        }
    }

    /// Record a decoded frame and derive the card background from it.
    pub fn on_frame_sampled(&mut self, content_index: usize, frame: &RgbaImage) -> Rgba8 {
        let color = dominant_color(frame);
        if let Some(state) = self.states.get_mut(content_index) {
            state.background = Some(color);
        }
        color
    }

    pub fn background(&self, content_index: usize) -> Rgba8 {
        self.states
            .get(content_index)
            .and_then(|s| s.background)
            .unwrap_or(DEFAULT_CARD_BACKGROUND)
    }
}

/// Most frequent coarse color of a frame.
///
/// Samples every 10th pixel in raster order, skips pixels with alpha below 128 and quantizes each
/// channel down to a multiple of 32. Ties go to the color seen first. A frame with no opaque
/// samples yields [`DEFAULT_CARD_BACKGROUND`].
pub fn dominant_color(frame: &RgbaImage) -> Rgba8 {
    const BUCKETS: usize = 8 * 8 * 8;

    let mut counts = [0u32; BUCKETS];
    let mut first_seen: Vec<usize> = Vec::new();

    for px in frame.pixels().step_by(10) {
        let [r, g, b, a] = px.0;
        if a < 128 {
            continue;
        }
        let bucket = usize::from(r / 32) * 64 + usize::from(g / 32) * 8 + usize::from(b / 32);
        if counts[bucket] == 0 {
            first_seen.push(bucket);
        }
        counts[bucket] += 1;
    }

    let mut best: Option<(usize, u32)> = None;
    for bucket in first_seen {
        let count = counts[bucket];
        if best.is_none_or(|(_, max)| count > max) {
            best = Some((bucket, count));
        }
    }

    match best {
        Some((bucket, _)) => {
            let channel = |shift: usize| ((bucket >> shift) & 7) as u8 * 32;
            Rgba8::rgb(channel(6), channel(3), channel(0))
        }
        None => DEFAULT_CARD_BACKGROUND,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/media.rs"]
mod tests;
