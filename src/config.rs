use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::{
    carousel::{
        engine::CarouselConfig,
        media::{MediaItem, default_showcase},
    },
    foundation::{
        core::DurationMs,
        error::{MotionError, MotionResult},
    },
    intro::choreography::IntroConfig,
    player::hover_loop::BadgeConfig,
    reveal::{mount::FadeConfig, sequencer::RevealConfig},
    sections::{
        headline::HeadlineConfig, skills::SkillsConfig, video_grid::VideoGridConfig,
        work::WorkConfig,
    },
    tilt::pointer::TiltConfig,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Rotating word under the hero headline.
    pub headline: HeadlineConfig,
    pub work: WorkConfig,
    pub skills: SkillsConfig,
    /// Parallax columns in the hero.
    pub video_grid: VideoGridConfig,
}

/// Every timing, spring and mapping constant of a page session.
///
/// All fields default, so a config file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal: RevealConfig,
    pub fades: FadeConfig,
    pub intro: IntroConfig,
    pub carousel: CarouselConfig,
    pub showcase: Vec<MediaItem>,
    pub tilt: TiltConfig,
    pub badge: BadgeConfig,
    pub sections: SectionsConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            fades: FadeConfig::default(),
            intro: IntroConfig::default(),
            carousel: CarouselConfig::default(),
            showcase: default_showcase(),
            tilt: TiltConfig::default(),
            badge: BadgeConfig::default(),
            sections: SectionsConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_reader(reader: impl Read) -> MotionResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| MotionError::serde(format!("parse motion config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MotionError::validation(format!("open motion config '{}': {e}", path.display()))
        })?;
        let config = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(path = %path.display(), "loaded motion config");
        Ok(config)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.reveal.intro_timeout == Some(DurationMs::ZERO) {
            return Err(MotionError::validation("reveal intro_timeout must be > 0"));
        }
        if self.showcase.is_empty() {
            return Err(MotionError::validation("showcase needs at least one media item"));
        }
        self.fades.validate()?;
        self.intro.validate()?;
        self.carousel.validate()?;
        self.tilt.validate()?;
        self.badge.validate()?;
        self.sections.headline.validate()?;
        self.sections.work.validate()?;
        self.sections.skills.validate()?;
        self.sections.video_grid.validate()
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MotionError::serde(format!("serialize motion config: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
