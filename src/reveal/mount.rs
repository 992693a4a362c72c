use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{DurationMs, TimeMs},
        error::{MotionError, MotionResult},
    },
    reveal::sequencer::RevealState,
};

/// Page sections whose visibility is gated by the reveal step.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    HeroBackground,
    Tagline,
    Headline,
    ToolsGrid,
    MusicPlayer,
    HeroVideoGrid,
    Navigation,
    Work,
    Skills,
    About,
    Showcase,
}

/// How a section reacts to reaching its step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gating {
    /// Always present; animates from hidden to shown.
    Fade,
    /// Not constructed until the step is reached.
    Mount,
}

impl Section {
    pub const ALL: [Self; 11] = [
        Self::HeroBackground,
        Self::Tagline,
        Self::Headline,
        Self::ToolsGrid,
        Self::MusicPlayer,
        Self::HeroVideoGrid,
        Self::Navigation,
        Self::Work,
        Self::Skills,
        Self::About,
        Self::Showcase,
    ];

    pub fn required_state(self) -> RevealState {
        match self {
            Self::HeroBackground => RevealState::IntroPlaying,
            Self::Tagline | Self::Headline => RevealState::HeadlineVisible,
            _ => RevealState::FullyRevealed,
        }
    }

    pub fn gating(self) -> Gating {
        match self {
            Self::Work | Self::Skills | Self::About | Self::Showcase => Gating::Mount,
            _ => Gating::Fade,
        }
    }

    pub fn is_revealed(self, state: RevealState) -> bool {
        state >= self.required_state()
    }
}

/// Sections present for `state`: every fade-gated section, plus mount-gated ones once reached.
pub fn mounted_sections(state: RevealState) -> impl Iterator<Item = Section> {
    Section::ALL
        .into_iter()
        .filter(move |s| s.gating() == Gating::Fade || s.is_revealed(state))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeTarget {
    pub opacity: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeSpec {
    pub hidden_y: f64,
    pub shown_opacity: f64,
    pub delay: DurationMs,
    pub duration: DurationMs,
    pub ease: Ease,
}

impl Default for FadeSpec {
    fn default() -> Self {
        Self {
            hidden_y: 0.0,
            shown_opacity: 1.0,
            delay: DurationMs::ZERO,
            duration: DurationMs(600),
            ease: Ease::STANDARD,
        }
    }
}

impl FadeSpec {
    /// Slides in from `hidden_y` with the default timing.
    pub fn slide(hidden_y: f64) -> Self {
        Self {
            hidden_y,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.hidden_y.is_finite() || !(0.0..=1.0).contains(&self.shown_opacity) {
            return Err(MotionError::validation(format!(
                "fade needs a finite offset and an opacity in [0, 1], got {self:?}"
            )));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::validation(format!(
                "invalid fade easing {:?}",
                self.ease
            )));
        }
        Ok(())
    }

    pub fn hidden(&self) -> FadeTarget {
        FadeTarget {
            opacity: 0.0,
            y: self.hidden_y,
        }
    }

    pub fn shown(&self) -> FadeTarget {
        FadeTarget {
            opacity: self.shown_opacity,
            y: 0.0,
        }
    }

    /// `revealed_at` is when the section's step was entered, if it has been.
    pub fn sample(&self, revealed_at: Option<TimeMs>, now: TimeMs) -> FadeTarget {
        let Some(at) = revealed_at else {
            return self.hidden();
        };
        let elapsed = now.since(at).saturating_sub(self.delay);
        let (hidden, shown) = (self.hidden(), self.shown());
        FadeTarget {
            opacity: Tween::new(hidden.opacity, shown.opacity, self.duration, self.ease)
                .sample(elapsed),
            y: Tween::new(hidden.y, shown.y, self.duration, self.ease).sample(elapsed),
        }
    }
}

/// Entrance animations of the fade-gated sections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fades to a dimmed opacity rather than sliding.
    pub hero_background: FadeSpec,
    pub tagline: FadeSpec,
    pub headline: FadeSpec,
    pub tools_grid: FadeSpec,
    pub music_player: FadeSpec,
    pub hero_video_grid: FadeSpec,
    pub navigation: FadeSpec,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            hero_background: FadeSpec {
                shown_opacity: 0.12,
                ..FadeSpec::default()
            },
            tagline: FadeSpec::slide(-50.0),
            headline: FadeSpec::slide(50.0),
            tools_grid: FadeSpec::slide(50.0),
            music_player: FadeSpec {
                delay: DurationMs(200),
                ..FadeSpec::slide(20.0)
            },
            hero_video_grid: FadeSpec::slide(0.0),
            navigation: FadeSpec::slide(-20.0),
        }
    }
}

impl FadeConfig {
    /// `None` for mount-gated sections.
    pub fn get(&self, section: Section) -> Option<&FadeSpec> {
        match section {
            Section::HeroBackground => Some(&self.hero_background),
            Section::Tagline => Some(&self.tagline),
            Section::Headline => Some(&self.headline),
            Section::ToolsGrid => Some(&self.tools_grid),
            Section::MusicPlayer => Some(&self.music_player),
            Section::HeroVideoGrid => Some(&self.hero_video_grid),
            Section::Navigation => Some(&self.navigation),
            Section::Work | Section::Skills | Section::About | Section::Showcase => None,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        Section::ALL
            .into_iter()
            .filter_map(|s| self.get(s))
            .try_for_each(FadeSpec::validate)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/mount.rs"]
mod tests;
