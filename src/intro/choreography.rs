use smallvec::SmallVec;

use crate::{
    animation::{ease::Ease, mapper::Lerp, tween::Tween},
    foundation::{
        core::{DurationMs, Point, TimeMs, Vec2, Viewport},
        error::{MotionError, MotionResult},
        math::lerp_f64,
    },
    intro::{
        callout::{callout_anchor, caret_visible, typed_chars, typed_prefix},
        timeline::{Boundary, PhaseTrack, TimedPhase},
    },
    runtime::{signal::Notifier, timers::TimerQueue},
};

/// Authored intro timeline constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub subject_width: f64,
    pub subject_height: f64,
    pub start_rotation_deg: f64,
    pub end_rotation_deg: f64,
    pub start_scale: f64,
    pub fade_in: DurationMs,
    pub fade_in_ease: Ease,
    /// Hold after the fade-in.
    pub pause: DurationMs,
    /// Extra hold so the rotation starts once the cursor has reached the corner.
    pub cursor_sync_delay: DurationMs,
    pub rotate: DurationMs,
    pub rotate_ease: Ease,
    /// Cursor starts this far right of the subject's right edge.
    pub cursor_start_gap: f64,
    pub cursor_approach: DurationMs,
    pub cursor_wait: DurationMs,
    pub cursor_drag: DurationMs,
    /// Offset from the cursor box origin to its drawn tip.
    pub cursor_hotspot: Vec2,
    pub handle_offset: f64,
    pub callout_delay: DurationMs,
    pub callout_text: String,
    pub type_interval: DurationMs,
    /// Time from the callout appearing to it starting to fade.
    pub callout_hold: DurationMs,
    pub callout_enter: DurationMs,
    pub callout_exit: DurationMs,
    pub callout_ease: Ease,
    /// Vertical gap between the cursor tip and the callout.
    pub callout_lift: f64,
    /// Slide distance of the callout's enter and exit.
    pub callout_rise: f64,
    pub selection_delay: DurationMs,
    pub selection_fade: DurationMs,
    pub handles_delay: DurationMs,
    pub handles_duration: DurationMs,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            subject_width: 212.0,
            subject_height: 217.0,
            start_rotation_deg: -45.0,
            end_rotation_deg: -5.0,
            start_scale: 0.8,
            fade_in: DurationMs(500),
            fade_in_ease: Ease::EASE_OUT,
            pause: DurationMs(500),
            cursor_sync_delay: DurationMs(400),
            rotate: DurationMs(1_200),
            rotate_ease: Ease::STANDARD,
            cursor_start_gap: 60.0,
            cursor_approach: DurationMs(400),
            cursor_wait: DurationMs(750),
            cursor_drag: DurationMs(1_200),
            cursor_hotspot: Vec2::new(20.0, 22.0),
            handle_offset: 4.0,
            callout_delay: DurationMs(500),
            callout_text: "Have fun!".to_owned(),
            type_interval: DurationMs(80),
            callout_hold: DurationMs(1_500),
            callout_enter: DurationMs(300),
            callout_exit: DurationMs(400),
            callout_ease: Ease::EASE_OUT,
            callout_lift: 60.0,
            callout_rise: 10.0,
            selection_delay: DurationMs(500),
            selection_fade: DurationMs(300),
            handles_delay: DurationMs(700),
            handles_duration: DurationMs(200),
        }
    }
}

impl IntroConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.subject_width > 0.0 && self.subject_height > 0.0) {
            return Err(MotionError::validation("intro subject size must be > 0"));
        }
        if self.callout_hold < self.callout_enter {
            return Err(MotionError::validation(
                "intro callout_hold must cover callout_enter",
            ));
        }
        for ease in [self.fade_in_ease, self.rotate_ease, self.callout_ease] {
            if !ease.is_valid() {
                return Err(MotionError::validation(format!("invalid intro easing {ease:?}")));
            }
        }
        Ok(())
    }

    /// Cursor resting spot at the subject's bottom-right corner for a given rotation.
    ///
    /// Coordinates are relative to the subject container's top-left.
    pub fn corner_position(&self, rotation_deg: f64) -> Point {
        let (s, c) = rotation_deg.to_radians().sin_cos();
        let half = self.subject_width / 2.0;
        let center = Point::new(self.subject_width / 2.0, self.subject_height / 2.0);
        let corner = center + Vec2::new(half * c - half * s, half * s + half * c);
        corner + Vec2::new(self.handle_offset, self.handle_offset) - self.cursor_hotspot
    }

    pub fn cursor_start(&self) -> Point {
        Point::new(
            self.subject_width + self.cursor_start_gap,
            self.subject_height / 2.0,
        )
    }
}

/// Pose of the subject (profile picture) during the intro.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SubjectPose {
    pub rotation_deg: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Lerp for SubjectPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            rotation_deg: lerp_f64(a.rotation_deg, b.rotation_deg, t),
            opacity: lerp_f64(a.opacity, b.opacity, t),
            scale: lerp_f64(a.scale, b.scale, t),
        }
    }
}

/// Cursor keyframe: `entry` blends from the start spot onto the subject's current corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorKey {
    pub entry: f64,
    pub opacity: f64,
}

impl Lerp for CursorKey {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            entry: lerp_f64(a.entry, b.entry, t),
            opacity: lerp_f64(a.opacity, b.opacity, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalloutKey {
    pub opacity: f64,
    pub scale: f64,
    pub dy: f64,
}

impl Lerp for CalloutKey {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: lerp_f64(a.opacity, b.opacity, t),
            scale: lerp_f64(a.scale, b.scale, t),
            dy: lerp_f64(a.dy, b.dy, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SelectionFrame {
    pub opacity: f64,
    pub handle_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorFrame {
    pub position: Point,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CalloutFrame {
    pub anchor: Point,
    pub text: String,
    pub caret: bool,
    pub opacity: f64,
    pub scale: f64,
    pub dy: f64,
}

/// Everything the host needs to draw one intro frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntroFrame {
    pub subject: SubjectPose,
    pub selection: Option<SelectionFrame>,
    pub cursor: Option<CursorFrame>,
    pub callout: Option<CalloutFrame>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroEvent {
    Started { at: TimeMs },
    SubjectSettled { at: TimeMs },
    CalloutShown { at: TimeMs, anchor: Point },
    CalloutFading { at: TimeMs },
    Completed { at: TimeMs },
}

pub type IntroEvents = SmallVec<[IntroEvent; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Track {
    Subject,
    Cursor,
    Callout,
}

/// One-shot entrance: the subject fades in and rotates while a simulated cursor drags its corner,
/// then a typed callout appears and fades. Completion is reported once through a [`Notifier`].
#[derive(Debug)]
pub struct IntroChoreography {
    config: IntroConfig,
    subject: PhaseTrack<SubjectPose>,
    cursor: PhaseTrack<CursorKey>,
    callout: PhaseTrack<CalloutKey>,
    timers: TimerQueue<(Track, Boundary)>,
    viewport: Viewport,
    origin: Point,
    started_at: Option<TimeMs>,
    callout_started_at: Option<TimeMs>,
    callout_shown_at: Option<TimeMs>,
    subject_settled_at: Option<TimeMs>,
    callout_gone: bool,
    completed_at: Option<TimeMs>,
    on_complete: Option<Notifier<TimeMs>>,
}

impl IntroChoreography {
    pub fn new(
        config: IntroConfig,
        viewport: Viewport,
        on_complete: Notifier<TimeMs>,
    ) -> MotionResult<Self> {
        config.validate()?;
        let subject = subject_track(&config)?;
        let cursor = cursor_track(&config)?;
        let callout = callout_track(&config)?;
        Ok(Self {
            config,
            subject,
            cursor,
            callout,
            timers: TimerQueue::new(),
            viewport,
            origin: Point::ORIGIN,
            started_at: None,
            callout_started_at: None,
            callout_shown_at: None,
            subject_settled_at: None,
            callout_gone: false,
            completed_at: None,
            on_complete: Some(on_complete),
        })
    }

    /// Top-left of the subject container in viewport coordinates.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn start(&mut self, now: TimeMs) -> IntroEvents {
        let mut events = IntroEvents::new();
        if self.started_at.is_some() {
            return events;
        }
        self.started_at = Some(now);
        tracing::debug!(at = now.0, "intro started");
        events.push(IntroEvent::Started { at: now });
        for track in [Track::Subject, Track::Cursor] {
            let first = self.track(track).first_boundary();
            if let Some((delay, b)) = first {
                self.timers.schedule(now, delay, (track, b));
            }
        }
        events
    }

    pub fn advance(&mut self, now: TimeMs) -> IntroEvents {
        let mut events = IntroEvents::new();
        while let Some((due, (track, b))) = self.timers.pop_due(now) {
            // Each boundary is chained from the one that just fired.
            let next = self.track(track).next_boundary(b);
            if let Some((delay, next)) = next {
                self.timers.schedule(due, delay, (track, next));
            }
            self.on_boundary(track, b, due, &mut events);
        }
        events
    }

    fn on_boundary(&mut self, track: Track, b: Boundary, at: TimeMs, events: &mut IntroEvents) {
        let last = self.track(track).is_last(b);
        match (track, b) {
            (Track::Subject, Boundary::End(_)) if last => {
                self.subject_settled_at = Some(at);
                tracing::debug!(at = at.0, "intro subject settled");
                events.push(IntroEvent::SubjectSettled { at });
            }
            (Track::Cursor, Boundary::End(_)) if last => {
                self.callout_started_at = Some(at);
                if let Some((delay, first)) = self.callout.first_boundary() {
                    self.timers.schedule(at, delay, (Track::Callout, first));
                }
            }
            (Track::Callout, Boundary::Begin(0)) => {
                self.callout_shown_at = Some(at);
                let anchor = self.callout_anchor();
                tracing::debug!(at = at.0, x = anchor.x, y = anchor.y, "intro callout shown");
                events.push(IntroEvent::CalloutShown { at, anchor });
            }
            (Track::Callout, Boundary::Begin(_)) => {
                events.push(IntroEvent::CalloutFading { at });
            }
            (Track::Callout, Boundary::End(_)) if last => {
                self.callout_gone = true;
            }
            _ => {}
        }

        if self.completed_at.is_none() && self.subject_settled_at.is_some() && self.callout_gone {
            self.completed_at = Some(at);
            tracing::debug!(at = at.0, "intro completed");
            events.push(IntroEvent::Completed { at });
            if let Some(notifier) = self.on_complete.take() {
                notifier.notify(at);
            }
        }
    }

    fn track(&self, track: Track) -> TrackRef<'_> {
        match track {
            Track::Subject => TrackRef::Subject(&self.subject),
            Track::Cursor => TrackRef::Cursor(&self.cursor),
            Track::Callout => TrackRef::Callout(&self.callout),
        }
    }

    fn callout_anchor(&self) -> Point {
        let resting = self
            .cursor
            .phases()
            .last()
            .map_or(*self.cursor.initial(), |p| p.to);
        let rest = self.cursor_position(resting, self.config.end_rotation_deg);
        callout_anchor(
            self.origin,
            rest,
            self.config.cursor_hotspot,
            self.config.callout_lift,
            &self.viewport,
        )
    }

    fn cursor_position(&self, key: CursorKey, rotation_deg: f64) -> Point {
        let start = self.config.cursor_start();
        let on_path = self.config.corner_position(rotation_deg);
        start.lerp(on_path, key.entry)
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn subject_settled(&self) -> bool {
        self.subject_settled_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn completed_at(&self) -> Option<TimeMs> {
        self.completed_at
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn sample(&self, now: TimeMs) -> IntroFrame {
        let Some(started) = self.started_at else {
            return IntroFrame {
                subject: *self.subject.initial(),
                selection: None,
                cursor: None,
                callout: None,
            };
        };
        let elapsed = now.since(started);
        let subject = self.subject.sample(elapsed);

        let selection = (!self.subject_settled()).then(|| {
            let c = &self.config;
            SelectionFrame {
                opacity: Tween::new(0.0, 1.0, c.selection_fade, Ease::Linear)
                    .sample(elapsed.saturating_sub(c.selection_delay)),
                handle_scale: Tween::new(0.0, 1.0, c.handles_duration, Ease::Linear)
                    .sample(elapsed.saturating_sub(c.handles_delay)),
            }
        });

        let cursor = (!self.callout_gone).then(|| {
            let key = self.cursor.sample(elapsed);
            let on_subject = self.cursor_position(key, subject.rotation_deg);
            CursorFrame {
                position: self.origin + on_subject.to_vec2(),
                opacity: key.opacity,
            }
        });

        let callout = match (self.callout_shown_at, self.callout_started_at) {
            (Some(shown), Some(began)) if !self.callout_gone => {
                let key = self.callout.sample(now.since(began));
                let text = &self.config.callout_text;
                let typed = typed_chars(text, now.since(shown), self.config.type_interval);
                Some(CalloutFrame {
                    anchor: self.callout_anchor(),
                    text: typed_prefix(text, typed).to_owned(),
                    caret: caret_visible(typed, text.chars().count()),
                    opacity: key.opacity,
                    scale: key.scale,
                    dy: key.dy,
                })
            }
            _ => None,
        };

        IntroFrame {
            subject,
            selection,
            cursor,
            callout,
        }
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }
}

enum TrackRef<'a> {
    Subject(&'a PhaseTrack<SubjectPose>),
    Cursor(&'a PhaseTrack<CursorKey>),
    Callout(&'a PhaseTrack<CalloutKey>),
}

impl TrackRef<'_> {
    fn first_boundary(&self) -> Option<(DurationMs, Boundary)> {
        match self {
            Self::Subject(t) => t.first_boundary(),
            Self::Cursor(t) => t.first_boundary(),
            Self::Callout(t) => t.first_boundary(),
        }
    }

    fn next_boundary(&self, b: Boundary) -> Option<(DurationMs, Boundary)> {
        match self {
            Self::Subject(t) => t.next_boundary(b),
            Self::Cursor(t) => t.next_boundary(b),
            Self::Callout(t) => t.next_boundary(b),
        }
    }

    fn is_last(&self, b: Boundary) -> bool {
        match self {
            Self::Subject(t) => t.is_last(b),
            Self::Cursor(t) => t.is_last(b),
            Self::Callout(t) => t.is_last(b),
        }
    }
}

fn subject_track(c: &IntroConfig) -> MotionResult<PhaseTrack<SubjectPose>> {
    let hidden = SubjectPose {
        rotation_deg: c.start_rotation_deg,
        opacity: 0.0,
        scale: c.start_scale,
    };
    let shown = SubjectPose {
        opacity: 1.0,
        scale: 1.0,
        ..hidden
    };
    let settled = SubjectPose {
        rotation_deg: c.end_rotation_deg,
        ..shown
    };
    PhaseTrack::new(hidden)
        .then(TimedPhase::new(DurationMs::ZERO, c.fade_in, shown, c.fade_in_ease))?
        .then(TimedPhase::new(
            c.pause.saturating_add(c.cursor_sync_delay),
            c.rotate,
            settled,
            c.rotate_ease,
        ))
}

// The drag phase holds the cursor on the corner; the corner itself follows the subject's
// rotation, and the phase's end starts the callout.
fn cursor_track(c: &IntroConfig) -> MotionResult<PhaseTrack<CursorKey>> {
    let hidden = CursorKey {
        entry: 0.0,
        opacity: 0.0,
    };
    let at_corner = CursorKey {
        entry: 1.0,
        opacity: 1.0,
    };
    PhaseTrack::new(hidden)
        .then(TimedPhase::new(
            DurationMs::ZERO,
            c.cursor_approach,
            at_corner,
            c.rotate_ease,
        ))?
        .then(TimedPhase::new(
            c.cursor_wait,
            c.cursor_drag,
            at_corner,
            c.rotate_ease,
        ))
}

fn callout_track(c: &IntroConfig) -> MotionResult<PhaseTrack<CalloutKey>> {
    let entering = CalloutKey {
        opacity: 0.0,
        scale: 0.8,
        dy: c.callout_rise,
    };
    let shown = CalloutKey {
        opacity: 1.0,
        scale: 1.0,
        dy: 0.0,
    };
    let leaving = CalloutKey {
        dy: -c.callout_rise,
        ..entering
    };
    PhaseTrack::new(entering)
        .then(TimedPhase::new(
            c.callout_delay,
            c.callout_enter,
            shown,
            c.callout_ease,
        ))?
        .then(TimedPhase::new(
            c.callout_hold.saturating_sub(c.callout_enter),
            c.callout_exit,
            leaving,
            c.callout_ease,
        ))
}

#[cfg(test)]
#[path = "../../tests/unit/intro/choreography.rs"]
mod tests;
