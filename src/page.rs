use std::collections::BTreeMap;

use image::RgbaImage;

use crate::{
    carousel::{
        engine::{CarouselEngine, RenderedCard},
        media::{CardMedia, MediaStatus},
    },
    config::MotionConfig,
    foundation::{
        core::{DurationMs, Point, Rect, Rgba8, TimeMs, Viewport},
        error::MotionResult,
    },
    intro::choreography::{IntroChoreography, IntroEvent, IntroEvents, IntroFrame},
    player::{command::AnimationPlayer, hover_loop::HoverLoop},
    reveal::{
        mount::{FadeTarget, Gating, Section, mounted_sections},
        sequencer::{RevealEvent, RevealSequencer, RevealState},
    },
    runtime::{clock::VirtualClock, signal::oneshot},
    scroll::lock::ScrollViewport,
    sections::{
        headline::{HeadlineFrame, WordRotator},
        skills::{SkillsFrame, SkillsSection},
        video_grid::VideoGrid,
        work::{Theme, WorkFrame, WorkSection},
    },
    tilt::pointer::{PointerTilt, TiltGate, TiltVector},
};

/// Laid-out element the host reports geometry for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Whole document; its height bounds the scroll position.
    Document,
    /// Intro subject container, in viewport coordinates.
    IntroSubject,
    /// Element the pointer tilt is measured against, in viewport coordinates.
    TiltSubject,
    HeroVideoGrid,
    Work,
    Skills,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEvent {
    Reveal(RevealEvent),
    Intro(IntroEvent),
    Mounted { section: Section, at: TimeMs },
    ThemeChanged(Theme),
    CarouselAdvanced { active_index: i64, at: TimeMs },
    HeadlineWord { index: usize, at: TimeMs },
    TiltEnabled { at: TimeMs },
    MediaFallback { content_index: usize },
}

/// Everything below the hero; constructed once the page is fully revealed.
#[derive(Debug)]
struct BelowFold {
    work: WorkSection,
    skills: SkillsSection,
    showcase: CarouselEngine,
    media: CardMedia,
    mounted_at: TimeMs,
}

impl BelowFold {
    fn mount(
        config: &MotionConfig,
        viewport: Viewport,
        layouts: &BTreeMap<Region, Rect>,
        scroll_y: f64,
        at: TimeMs,
    ) -> MotionResult<(Self, Option<Theme>)> {
        let mut work = WorkSection::new(&config.sections.work, viewport)?;
        let mut skills = SkillsSection::new(&config.sections.skills, viewport)?;
        let media = CardMedia::new(config.showcase.clone())?;
        let mut showcase = CarouselEngine::new(config.carousel.clone(), media.len(), &viewport)?;
        showcase.start(at);

        let mut theme = None;
        if let Some(&r) = layouts.get(&Region::Work) {
            theme = work.on_layout(r).or(theme);
        }
        if let Some(&r) = layouts.get(&Region::Skills) {
            skills.on_layout(r);
        }
        theme = work.on_scroll(scroll_y).or(theme);
        skills.on_scroll(scroll_y);

        let below = Self {
            work,
            skills,
            showcase,
            media,
            mounted_at: at,
        };
        Ok((below, theme))
    }
}

/// Serializable view of a page at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    pub at: TimeMs,
    pub state: RevealState,
    pub scroll_locked: bool,
    pub scroll_y: f64,
    pub theme: Theme,
    pub pill_expanded: bool,
    pub mounted: Vec<Section>,
    pub fades: Vec<(Section, FadeTarget)>,
    pub intro: IntroFrame,
    pub headline: Option<HeadlineFrame>,
    pub tilt: TiltVector,
    pub hero_columns: Vec<f64>,
    pub work: Option<WorkFrame>,
    pub skills: Option<SkillsFrame>,
    pub carousel: Option<Vec<RenderedCard>>,
}

/// Page root: owns the reveal sequencer and scroll lock, mounts sections as steps are reached
/// and routes host events to the independent subsystems.
///
/// Time only moves through [`Page::advance_to`]; timers due in between fire in order at their
/// own due times, with spring motion integrated up to each of them.
#[derive(Debug)]
pub struct Page<P> {
    config: MotionConfig,
    clock: VirtualClock,
    viewport: Viewport,
    sequencer: RevealSequencer,
    intro: IntroChoreography,
    tilt: PointerTilt,
    hero_grid: VideoGrid,
    headline: WordRotator,
    badge: HoverLoop<P>,
    scroll: ScrollViewport,
    below: Option<BelowFold>,
    layouts: BTreeMap<Region, Rect>,
    theme: Theme,
    carousel_hovered: bool,
    events: Vec<PageEvent>,
}

impl<P: AnimationPlayer> Page<P> {
    pub fn new(config: MotionConfig, viewport: Viewport, badge_player: P) -> MotionResult<Self> {
        config.validate()?;
        let (notifier, listener) = oneshot();
        let mut sequencer = RevealSequencer::new(config.reveal.clone(), listener);
        sequencer.set_mobile(viewport.is_mobile());
        let intro = IntroChoreography::new(config.intro.clone(), viewport, notifier)?;
        let tilt = PointerTilt::new(config.tilt.clone())?;
        let hero_grid = VideoGrid::new(&config.sections.video_grid, viewport)?;
        let headline = WordRotator::new(config.sections.headline.clone())?;
        let badge = HoverLoop::new(config.badge.clone(), badge_player)?;
        let mut scroll = ScrollViewport::new(sequencer.scroll_lock_view());
        // Unbounded until the document height is known.
        scroll.set_max_scroll(f64::INFINITY);

        Ok(Self {
            config,
            clock: VirtualClock::default(),
            viewport,
            sequencer,
            intro,
            tilt,
            hero_grid,
            headline,
            badge,
            scroll,
            below: None,
            layouts: BTreeMap::new(),
            theme: Theme::Light,
            carousel_hovered: false,
            events: Vec::new(),
        })
    }

    /// Start the session: the intro plays and reports completion to the sequencer.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self, now: TimeMs) {
        self.begin(now);
        let events = self.intro.start(now);
        self.on_intro(events);
    }

    /// Start without the intro, as when its asset never loads. The page stays hidden unless
    /// `reveal.intro_timeout` is configured.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start_stalled(&mut self, now: TimeMs) {
        self.begin(now);
        tracing::warn!("intro not started; waiting for the reveal timeout");
    }

    fn begin(&mut self, now: TimeMs) {
        self.clock.advance_to(now);
        self.sequencer.start(now);
        // Cycles from page mount; the headline fade decides when it is seen.
        self.headline.start(now);
        self.badge.mount(now);
    }

    /// Move the virtual clock to `now`, firing every timer due on the way.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance_to(&mut self, now: TimeMs) {
        // Frame requested since the last tick.
        self.tilt.on_frame();
        loop {
            let last = self.clock.now();
            let due = self.next_due().filter(|&t| t <= now);
            let t = due.unwrap_or(now).max(last);
            self.step_motion(t.since(last));
            self.clock.advance_to(t);
            self.fire(t);
            if due.is_none() {
                break;
            }
        }
    }

    pub fn advance_by(&mut self, dt: DurationMs) {
        self.advance_to(self.clock.now().after(dt));
    }

    fn fire(&mut self, t: TimeMs) {
        let intro = self.intro.advance(t);
        self.on_intro(intro);

        for e in self.sequencer.advance(t) {
            self.on_reveal(e);
        }

        if let Some(below) = &mut self.below
            && let Some(active_index) = below.showcase.advance(t)
        {
            self.events
                .push(PageEvent::CarouselAdvanced { active_index, at: t });
        }

        if let Some(index) = self.headline.advance(t) {
            self.events.push(PageEvent::HeadlineWord { index, at: t });
        }

        self.badge.advance(t);
    }

    fn step_motion(&mut self, dt: DurationMs) {
        if dt == DurationMs::ZERO {
            return;
        }
        self.tilt.step(dt);
        self.hero_grid.step(dt);
        if let Some(below) = &mut self.below {
            below.work.step(dt);
            below.showcase.step_motion(dt);
        }
    }

    fn on_intro(&mut self, events: IntroEvents) {
        for e in events {
            match (e, self.tilt.gate()) {
                (IntroEvent::SubjectSettled { at }, TiltGate::SubjectSettled)
                | (IntroEvent::Completed { at }, TiltGate::ChoreographyComplete) => {
                    self.enable_tilt(at);
                }
                _ => {}
            }
            self.events.push(PageEvent::Intro(e));
        }
    }

    fn on_reveal(&mut self, e: RevealEvent) {
        self.events.push(PageEvent::Reveal(e));
        match e {
            RevealEvent::Entered {
                state: RevealState::FullyRevealed,
                at,
            } => self.mount_below_fold(at),
            RevealEvent::IntroTimedOut { at } => self.enable_tilt(at),
            _ => {}
        }
    }

    fn enable_tilt(&mut self, at: TimeMs) {
        if self.tilt.is_enabled() {
            return;
        }
        self.tilt.enable();
        self.events.push(PageEvent::TiltEnabled { at });
    }

    fn mount_below_fold(&mut self, at: TimeMs) {
        if self.below.is_some() {
            return;
        }
        let mounted = BelowFold::mount(
            &self.config,
            self.viewport,
            &self.layouts,
            self.scroll.scroll_y(),
            at,
        );
        match mounted {
            Ok((mut below, theme)) => {
                if self.carousel_hovered {
                    below.showcase.hover_enter();
                }
                self.below = Some(below);
                for section in mounted_sections(RevealState::FullyRevealed)
                    .filter(|s| s.gating() == Gating::Mount)
                {
                    tracing::debug!(?section, at = at.0, "section mounted");
                    self.events.push(PageEvent::Mounted { section, at });
                }
                self.report_theme(theme);
            }
            Err(error) => tracing::error!(%error, "failed to mount below-the-fold sections"),
        }
    }

    fn report_theme(&mut self, theme: Option<Theme>) {
        if let Some(theme) = theme
            && theme != self.theme
        {
            self.theme = theme;
            self.events.push(PageEvent::ThemeChanged(theme));
        }
    }

    /// Returns false when the scroll was rejected by the lock.
    pub fn on_scroll(&mut self, y: f64) -> bool {
        let Some(y) = self.scroll.request_scroll(y) else {
            tracing::trace!(y, "scroll rejected while locked");
            return false;
        };
        self.hero_grid.on_scroll(y);
        let theme = self.below.as_mut().and_then(|b| {
            b.skills.on_scroll(y);
            b.work.on_scroll(y)
        });
        self.report_theme(theme);
        true
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for e in self.sequencer.set_mobile(viewport.is_mobile()) {
            self.on_reveal(e);
        }
        self.intro.set_viewport(viewport);
        self.hero_grid.on_resize(viewport);
        self.sync_max_scroll();
        let theme = self.below.as_mut().and_then(|b| {
            b.skills.on_resize(viewport);
            b.showcase.set_viewport(&viewport);
            b.work.on_resize(viewport)
        });
        self.report_theme(theme);
    }

    pub fn on_layout(&mut self, region: Region, rect: Rect) {
        self.layouts.insert(region, rect);
        match region {
            Region::Document => self.sync_max_scroll(),
            Region::IntroSubject => self.intro.set_origin(rect.origin()),
            Region::TiltSubject => self.tilt.set_element(Some(rect)),
            Region::HeroVideoGrid => self.hero_grid.on_layout(rect),
            Region::Work => {
                let theme = self.below.as_mut().and_then(|b| b.work.on_layout(rect));
                self.report_theme(theme);
            }
            Region::Skills => {
                if let Some(below) = &mut self.below {
                    below.skills.on_layout(rect);
                }
            }
        }
    }

    fn sync_max_scroll(&mut self) {
        if let Some(doc) = self.layouts.get(&Region::Document) {
            self.scroll
                .set_max_scroll(doc.height() - self.viewport.height);
        }
    }

    /// Returns true if the move was accepted and a tilt frame requested.
    pub fn on_pointer_move(&mut self, now: TimeMs, pointer: Point) -> bool {
        self.tilt.on_pointer_move(now, pointer)
    }

    pub fn on_pointer_leave(&mut self) {
        self.tilt.on_pointer_leave();
    }

    pub fn carousel_hover(&mut self, now: TimeMs, hovered: bool) {
        self.carousel_hovered = hovered;
        if let Some(below) = &mut self.below {
            if hovered {
                below.showcase.hover_enter();
            } else {
                below.showcase.hover_leave(now);
            }
        }
    }

    pub fn pill_hover(&mut self, hovered: bool) {
        for e in self.sequencer.set_pill_hovered(hovered) {
            self.on_reveal(e);
        }
    }

    pub fn badge_hover(&mut self, now: TimeMs, hovered: bool) {
        if hovered {
            self.badge.hover_start(now);
        } else {
            self.badge.hover_end(now);
        }
    }

    pub fn badge_animation_complete(&mut self) {
        self.badge.on_complete();
    }

    /// Media load state for a showcase item. Ignored until the showcase is mounted.
    pub fn media_status(&mut self, content_index: usize, status: MediaStatus) {
        let switched = self
            .below
            .as_mut()
            .is_some_and(|b| b.media.on_status(content_index, status));
        if switched {
            self.events.push(PageEvent::MediaFallback { content_index });
        }
    }

    /// Returns the card background derived from the frame.
    pub fn media_frame(&mut self, content_index: usize, frame: &RgbaImage) -> Option<Rgba8> {
        self.below
            .as_mut()
            .map(|b| b.media.on_frame_sampled(content_index, frame))
    }

    pub fn take_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn now(&self) -> TimeMs {
        self.clock.now()
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        [
            self.intro.next_due(),
            self.sequencer.next_due(),
            self.headline.next_due(),
            self.badge.next_due(),
            self.below.as_ref().and_then(|b| b.showcase.next_due()),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn state(&self) -> RevealState {
        self.sequencer.state()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll.is_locked()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll.scroll_y()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sequencer(&self) -> &RevealSequencer {
        &self.sequencer
    }

    pub fn intro(&self) -> &IntroChoreography {
        &self.intro
    }

    pub fn headline(&self) -> &WordRotator {
        &self.headline
    }

    pub fn tilt(&self) -> &PointerTilt {
        &self.tilt
    }

    pub fn badge(&self) -> &HoverLoop<P> {
        &self.badge
    }

    pub fn badge_mut(&mut self) -> &mut HoverLoop<P> {
        &mut self.badge
    }

    pub fn carousel(&self) -> Option<&CarouselEngine> {
        self.below.as_ref().map(|b| &b.showcase)
    }

    pub fn media(&self) -> Option<&CardMedia> {
        self.below.as_ref().map(|b| &b.media)
    }

    pub fn below_fold_mounted_at(&self) -> Option<TimeMs> {
        self.below.as_ref().map(|b| b.mounted_at)
    }

    pub fn is_mounted(&self, section: Section) -> bool {
        match section.gating() {
            Gating::Fade => true,
            Gating::Mount => self.below.is_some(),
        }
    }

    pub fn mounted(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|&s| self.is_mounted(s))
            .collect()
    }

    /// Entrance animation value of a fade-gated section.
    pub fn fade(&self, section: Section) -> Option<FadeTarget> {
        let entered = self.sequencer.entered_at(section.required_state());
        self.config
            .fades
            .get(section)
            .map(|f| f.sample(entered, self.now()))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let now = self.now();
        PageSnapshot {
            at: now,
            state: self.state(),
            scroll_locked: self.is_scroll_locked(),
            scroll_y: self.scroll_y(),
            theme: self.theme,
            pill_expanded: self.sequencer.pill_expanded(),
            mounted: self.mounted(),
            fades: Section::ALL
                .into_iter()
                .filter_map(|s| self.fade(s).map(|f| (s, f)))
                .collect(),
            intro: self.intro.sample(now),
            headline: self.headline.frame(now),
            tilt: self.tilt.vector(),
            hero_columns: self.hero_grid.column_offsets(),
            work: self.below.as_ref().map(|b| b.work.frame()),
            skills: self.below.as_ref().map(|b| b.skills.frame()),
            carousel: self.below.as_ref().map(|b| b.showcase.rendered()),
        }
    }

    /// Cancel every timer and pending frame the page owns.
    pub fn teardown(&mut self) {
        self.intro.teardown();
        self.sequencer.teardown();
        self.tilt.teardown();
        self.headline.teardown();
        self.badge.teardown();
        if let Some(below) = &mut self.below {
            below.showcase.teardown();
        }
        tracing::debug!(at = self.clock.now().0, "page torn down");
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
