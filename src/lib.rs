//! folio-motion is a headless model of a portfolio page's animation orchestration.
//!
//! Hosts feed discrete events (scroll, resize, pointer, hover, media status) and a virtual
//! millisecond clock; the crate answers with visual properties:
//!
//! - a [`RevealSequencer`] that steps the page through its entrance and owns the [`ScrollLock`]
//! - scroll-linked [`RangeMap`] pipelines driven by a [`ScrollProgressSource`]
//! - an arc-shaped, auto-advancing [`CarouselEngine`]
//! - the one-shot [`IntroChoreography`] and the [`PointerTilt`] it unlocks
//!
//! [`Page`] wires all of them together the way the site does.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod carousel;
pub(crate) mod config;
pub(crate) mod intro;
pub(crate) mod page;
pub(crate) mod player;
pub(crate) mod reveal;
pub(crate) mod runtime;
pub(crate) mod scroll;
pub(crate) mod sections;
pub(crate) mod tilt;

pub use crate::foundation::core::{
    DurationMs, MOBILE_BREAKPOINT_PX, Point, Rect, Rgba8, TimeMs, Vec2, Viewport,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::mapper::{Lerp, MapperSet, MappingTable, RangeMap};
pub use crate::animation::spring::{DampingRegime, Spring, SpringConfig, spring_step};
pub use crate::animation::tween::Tween;
pub use crate::carousel::engine::{CarouselConfig, CarouselEngine, CarouselState, RenderedCard};
pub use crate::carousel::layout::{ArcLayout, Placement, ResponsiveLayout};
pub use crate::carousel::media::{
    CardMedia, DEFAULT_CARD_BACKGROUND, MediaItem, MediaSource, MediaStatus, Playback,
    default_showcase, dominant_color,
};
pub use crate::config::{MotionConfig, SectionsConfig};
pub use crate::intro::callout::{callout_anchor, caret_visible, typed_chars, typed_prefix};
pub use crate::intro::choreography::{
    CalloutFrame, CursorFrame, IntroChoreography, IntroConfig, IntroEvent, IntroEvents,
    IntroFrame, SelectionFrame, SubjectPose,
};
pub use crate::intro::timeline::{Boundary, PhaseSegment, PhaseTrack, TimedPhase};
pub use crate::page::{Page, PageEvent, PageSnapshot, Region};
pub use crate::player::command::{AnimationPlayer, CommandLog, PlayerCommand};
pub use crate::player::hover_loop::{BadgeConfig, HoverLoop};
pub use crate::reveal::mount::{
    FadeConfig, FadeSpec, FadeTarget, Gating, Section, mounted_sections,
};
pub use crate::reveal::sequencer::{
    RevealConfig, RevealEvent, RevealEvents, RevealSequencer, RevealState,
};
pub use crate::runtime::clock::VirtualClock;
pub use crate::runtime::frame::FrameSlot;
pub use crate::runtime::signal::{Listener, Notifier, oneshot};
pub use crate::runtime::timers::{TimerId, TimerQueue};
pub use crate::scroll::lock::{ScrollLock, ScrollLockView, ScrollViewport};
pub use crate::scroll::offset::{Edge, Intersection, ScrollOffset};
pub use crate::scroll::progress::{
    Changed, ConsumerId, ProgressRange, ScrollProgressSource, compute_progress,
};
pub use crate::sections::headline::{HeadlineConfig, HeadlineFrame, WordRotator};
pub use crate::sections::skills::{SkillsConfig, SkillsFrame, SkillsSection};
pub use crate::sections::video_grid::{VideoGrid, VideoGridConfig, column_direction};
pub use crate::sections::work::{Theme, WorkChannel, WorkConfig, WorkFrame, WorkSection};
pub use crate::tilt::pointer::{PointerTilt, TiltConfig, TiltGate, TiltVector};
