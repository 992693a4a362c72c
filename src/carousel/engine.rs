use std::collections::BTreeMap;

use crate::{
    animation::spring::{Spring, SpringConfig},
    carousel::layout::{ArcLayout, Placement, ResponsiveLayout},
    foundation::{
        core::{DurationMs, TimeMs, Viewport},
        error::{MotionError, MotionResult},
        math::wrap_index,
    },
    runtime::timers::{TimerId, TimerQueue},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval: DurationMs,
    pub layout: ResponsiveLayout,
    pub spring: SpringConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: DurationMs(4_000),
            layout: ResponsiveLayout::default(),
            spring: SpringConfig::new(120.0, 14.0, 1.0),
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.interval.0 == 0 {
            return Err(MotionError::validation("carousel interval must be > 0"));
        }
        self.layout.validate()?;
        self.spring.validate()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CarouselState {
    /// Unbounded; only ever incremented (or reset to 0).
    pub active_index: i64,
    pub is_hovered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AdvanceTick;

/// Animated properties of one materialized card.
#[derive(Clone, Debug)]
struct CardMotion {
    x: Spring,
    y: Spring,
    rotation: Spring,
    scale: Spring,
    opacity: Spring,
    z_index: i32,
    offset: i64,
}

impl CardMotion {
    fn at(config: SpringConfig, p: Placement) -> Self {
        Self {
            x: Spring::new(config, p.x),
            y: Spring::new(config, p.y),
            rotation: Spring::new(config, p.rotation_deg),
            scale: Spring::new(config, p.scale),
            opacity: Spring::new(config, p.opacity),
            z_index: p.z_index,
            offset: p.offset,
        }
    }

    fn retarget(&mut self, p: Placement) {
        self.x.set_target(p.x);
        self.y.set_target(p.y);
        self.rotation.set_target(p.rotation_deg);
        self.scale.set_target(p.scale);
        self.opacity.set_target(p.opacity);
        self.z_index = p.z_index;
        self.offset = p.offset;
    }

    fn springs_mut(&mut self) -> [&mut Spring; 5] {
        [
            &mut self.x,
            &mut self.y,
            &mut self.rotation,
            &mut self.scale,
            &mut self.opacity,
        ]
    }

    fn current(&self) -> Placement {
        Placement {
            offset: self.offset,
            x: self.x.value(),
            y: self.y.value(),
            rotation_deg: self.rotation.value(),
            scale: self.scale.value(),
            opacity: self.opacity.value(),
            z_index: self.z_index,
        }
    }

    fn is_at_rest(&self) -> bool {
        [&self.x, &self.y, &self.rotation, &self.scale, &self.opacity]
            .iter()
            .all(|s| s.is_at_rest())
    }
}

/// One card as the host should draw it this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderedCard {
    /// Stable key: the unbounded index this card was materialized for.
    pub window_index: i64,
    pub content_index: usize,
    pub is_active: bool,
    /// Current animated values.
    pub placement: Placement,
}

/// Circular auto-advancing carousel laid out on an arc.
///
/// Only the `2 * window_radius + 1` cards around the active index exist at any time.
#[derive(Debug)]
pub struct CarouselEngine {
    config: CarouselConfig,
    content_len: usize,
    state: CarouselState,
    mobile: bool,
    timers: TimerQueue<AdvanceTick>,
    tick: Option<TimerId>,
    running: bool,
    cards: BTreeMap<i64, CardMotion>,
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig, content_len: usize, viewport: &Viewport) -> MotionResult<Self> {
        if content_len == 0 {
            return Err(MotionError::validation("carousel needs at least one item"));
        }
        config.validate()?;
        let mut engine = Self {
            config,
            content_len,
            state: CarouselState::default(),
            mobile: viewport.is_mobile(),
            timers: TimerQueue::new(),
            tick: None,
            running: false,
            cards: BTreeMap::new(),
        };
        engine.sync_cards();
        Ok(engine)
    }

    /// Begin auto-advancing; the first step lands one interval after `now`.
    pub fn start(&mut self, now: TimeMs) {
        self.running = true;
        if !self.state.is_hovered {
            self.arm(now);
        }
    }

    pub fn hover_enter(&mut self) {
        if self.state.is_hovered {
            return;
        }
        self.state.is_hovered = true;
        if let Some(id) = self.tick.take() {
            self.timers.cancel(id);
        }
        tracing::debug!(active = self.state.active_index, "carousel paused on hover");
    }

    /// Leaving re-arms a fresh full interval; missed steps are not caught up.
    pub fn hover_leave(&mut self, now: TimeMs) {
        if !self.state.is_hovered {
            return;
        }
        self.state.is_hovered = false;
        if self.running {
            self.arm(now);
        }
        tracing::debug!(active = self.state.active_index, "carousel resumed");
    }

    fn arm(&mut self, from: TimeMs) {
        if let Some(id) = self.tick.take() {
            self.timers.cancel(id);
        }
        self.tick = Some(self.timers.schedule(from, self.config.interval, AdvanceTick));
    }

    /// Returns the new active index if it moved.
    pub fn advance(&mut self, now: TimeMs) -> Option<i64> {
        let before = self.state.active_index;
        while let Some((due, AdvanceTick)) = self.timers.pop_due(now) {
            self.tick = None;
            self.state.active_index += 1;
            tracing::trace!(active = self.state.active_index, at = due.0, "carousel advanced");
            self.sync_cards();
            self.arm(due);
        }
        (self.state.active_index != before).then_some(self.state.active_index)
    }

    pub fn reset(&mut self) {
        self.state.active_index = 0;
        self.cards.clear();
        self.sync_cards();
    }

    pub fn set_viewport(&mut self, viewport: &Viewport) {
        let mobile = viewport.is_mobile();
        if mobile != self.mobile {
            self.mobile = mobile;
            self.sync_cards();
        }
    }

    pub fn layout(&self) -> &ArcLayout {
        if self.mobile {
            &self.config.layout.mobile
        } else {
            &self.config.layout.desktop
        }
    }

    pub fn window(&self) -> std::ops::RangeInclusive<i64> {
        let r = i64::from(self.layout().window_radius);
        let a = self.state.active_index;
        (a - r)..=(a + r)
    }

    pub fn content_index(&self, window_index: i64) -> usize {
        wrap_index(window_index, self.content_len)
    }

    pub fn active_content_index(&self) -> usize {
        self.content_index(self.state.active_index)
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    /// Target placements for the current window, ignoring spring motion.
    pub fn targets(&self) -> Vec<Placement> {
        let layout = self.layout();
        self.window()
            .map(|i| layout.place(i - self.state.active_index))
            .collect()
    }

    pub fn step_motion(&mut self, dt: DurationMs) {
        for card in self.cards.values_mut() {
            for spring in card.springs_mut() {
                spring.step(dt);
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.cards.values().all(CardMotion::is_at_rest)
    }

    pub fn rendered(&self) -> Vec<RenderedCard> {
        self.cards
            .iter()
            .map(|(&i, card)| RenderedCard {
                window_index: i,
                content_index: self.content_index(i),
                is_active: i == self.state.active_index,
                placement: card.current(),
            })
            .collect()
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.tick = None;
        self.running = false;
    }

    fn sync_cards(&mut self) {
        let window = self.window();
        self.cards.retain(|i, _| window.contains(i));

        let layout = self.layout().clone();
        let spring = self.config.spring;
        for i in window {
            let target = layout.place(i - self.state.active_index);
            self.cards
                .entry(i)
                .and_modify(|card| card.retarget(target))
                .or_insert_with(|| CardMotion::at(spring, target));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/engine.rs"]
mod tests;
