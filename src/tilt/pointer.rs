use crate::{
    animation::{
        mapper::RangeMap,
        spring::{Spring, SpringConfig},
    },
    foundation::{
        core::{DurationMs, Point, Rect, TimeMs},
        error::{MotionError, MotionResult},
    },
    runtime::frame::FrameSlot,
};

/// Which intro milestone turns pointer tilt on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiltGate {
    /// After the whole intro, callout included, has finished.
    #[default]
    ChoreographyComplete,
    /// As soon as the subject stops rotating.
    SubjectSettled,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Pointer distance from the element center, inclusive, within which tilt applies.
    pub radius: f64,
    pub throttle: DurationMs,
    pub max_tilt_deg: f64,
    /// Normalized offset at the radius.
    pub extent: f64,
    pub spring: SpringConfig,
    pub gate: TiltGate,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            radius: 250.0,
            throttle: DurationMs(16),
            max_tilt_deg: 12.0,
            extent: 0.5,
            spring: SpringConfig::new(100.0, 20.0, 1.0),
            gate: TiltGate::default(),
        }
    }
}

impl TiltConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MotionError::validation("tilt radius must be > 0"));
        }
        if !(self.extent.is_finite() && self.extent > 0.0) {
            return Err(MotionError::validation("tilt extent must be > 0"));
        }
        if !self.max_tilt_deg.is_finite() {
            return Err(MotionError::validation("tilt max_tilt_deg must be finite"));
        }
        self.spring.validate()
    }
}

/// 3D rotation of the subject, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TiltVector {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl TiltVector {
    pub const NEUTRAL: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };
}

/// Pointer-following tilt: throttled moves feed an animation-frame request, the frame callback
/// maps the offset from the element center to target rotations, and springs chase them.
#[derive(Debug)]
pub struct PointerTilt {
    config: TiltConfig,
    enabled: bool,
    element: Option<Rect>,
    last_accepted: Option<TimeMs>,
    frame: FrameSlot<Point>,
    rotate_x_map: RangeMap<f64>,
    rotate_y_map: RangeMap<f64>,
    target: TiltVector,
    rotate_x: Spring,
    rotate_y: Spring,
}

impl PointerTilt {
    pub fn new(config: TiltConfig) -> MotionResult<Self> {
        config.validate()?;
        let (e, m) = (config.extent, config.max_tilt_deg);
        let rotate_x_map = RangeMap::new(&[-e, e], vec![m, -m])?;
        let rotate_y_map = RangeMap::new(&[-e, e], vec![-m, m])?;
        Ok(Self {
            rotate_x: Spring::new(config.spring, 0.0),
            rotate_y: Spring::new(config.spring, 0.0),
            config,
            enabled: false,
            element: None,
            last_accepted: None,
            frame: FrameSlot::new(),
            rotate_x_map,
            rotate_y_map,
            target: TiltVector::NEUTRAL,
        })
    }

    pub fn gate(&self) -> TiltGate {
        self.config.gate
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            tracing::debug!("pointer tilt enabled");
        }
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Element bounds in viewport coordinates; `None` while it is not laid out.
    pub fn set_element(&mut self, element: Option<Rect>) {
        self.element = element;
    }

    /// Returns true if the move was accepted (not throttled) and a frame was requested.
    pub fn on_pointer_move(&mut self, now: TimeMs, pointer: Point) -> bool {
        if !self.enabled {
            return false;
        }
        if self
            .last_accepted
            .is_some_and(|t| now.since(t) < self.config.throttle)
        {
            return false;
        }
        self.last_accepted = Some(now);
        self.frame.request(pointer);
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.frame.cancel();
        self.target = TiltVector::NEUTRAL;
    }

    /// Animation-frame callback: sample geometry for the pending move, if any.
    pub fn on_frame(&mut self) {
        let Some(pointer) = self.frame.take() else {
            return;
        };
        let Some(element) = self.element else {
            return;
        };
        self.target = self.target_for(element, pointer);
    }

    fn target_for(&self, element: Rect, pointer: Point) -> TiltVector {
        let d = pointer - element.center();
        if d.hypot() > self.config.radius {
            return TiltVector::NEUTRAL;
        }
        let scale = self.config.extent / self.config.radius;
        let (nx, ny) = (d.x * scale, d.y * scale);
        TiltVector {
            rotate_x: self.rotate_x_map.map(ny),
            rotate_y: self.rotate_y_map.map(nx),
        }
    }

    pub fn step(&mut self, dt: DurationMs) {
        self.rotate_x.set_target(self.target.rotate_x);
        self.rotate_y.set_target(self.target.rotate_y);
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
    }

    /// Current rotation; neutral until enabled.
    pub fn vector(&self) -> TiltVector {
        if !self.enabled {
            return TiltVector::NEUTRAL;
        }
        TiltVector {
            rotate_x: self.rotate_x.value(),
            rotate_y: self.rotate_y.value(),
        }
    }

    pub fn target(&self) -> TiltVector {
        self.target
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn teardown(&mut self) {
        self.frame.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tilt/pointer.rs"]
mod tests;
