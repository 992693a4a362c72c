use crate::foundation::{
    core::DurationMs,
    error::{MotionError, MotionResult},
};

/// Physical parameters of a damped spring plus the thresholds used to declare it at rest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance to target below which the spring may settle.
    pub rest_delta: f64,
    /// Speed (units per second) below which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingRegime {
    Under,
    Critical,
    Over,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    pub const fn with_rest_delta(mut self, rest_delta: f64) -> Self {
        self.rest_delta = rest_delta;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        let all_finite = [
            self.stiffness,
            self.damping,
            self.mass,
            self.rest_delta,
            self.rest_speed,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(MotionError::animation("spring parameters must be finite"));
        }
        if self.stiffness <= 0.0 || self.mass <= 0.0 {
            return Err(MotionError::animation(
                "spring stiffness and mass must be > 0",
            ));
        }
        if self.damping < 0.0 || self.rest_delta < 0.0 || self.rest_speed < 0.0 {
            return Err(MotionError::animation(
                "spring damping and rest thresholds must be >= 0",
            ));
        }
        Ok(())
    }

    /// `c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt()).max(1e-9)
    }

    pub fn regime(&self) -> DampingRegime {
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() < 1e-6 {
            DampingRegime::Critical
        } else if zeta < 1.0 {
            DampingRegime::Under
        } else {
            DampingRegime::Over
        }
    }
}

/// One-dimensional damped spring chasing a target value.
///
/// Integration runs in fixed 1 ms sub-steps (semi-implicit Euler), so results depend only on the
/// total simulated time, not on how callers slice it.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Place the spring at `value` with no velocity and no pending motion.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    pub fn step(&mut self, dt: DurationMs) {
        const SUBSTEP: f64 = 0.001;

        let SpringConfig {
            stiffness,
            damping,
            mass,
            rest_delta,
            rest_speed,
        } = self.config;
        let mass = mass.max(1e-9);

        for _ in 0..dt.0 {
            if self.is_at_rest() {
                return;
            }
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * SUBSTEP;
            self.value += self.velocity * SUBSTEP;

            if (self.value - self.target).abs() <= rest_delta && self.velocity.abs() <= rest_speed
            {
                self.value = self.target;
                self.velocity = 0.0;
            }
        }
    }
}

/// Analytic unit step response `x(t)` of a spring released from 0 towards 1 with zero velocity.
///
/// `t` is in seconds.
pub fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 0.0;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let root = (1.0 - zeta * zeta).sqrt();
        let wd = w0 * root;
        let decay = (-zeta * w0 * t).exp();
        1.0 - decay * ((wd * t).cos() + zeta / root * (wd * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let slow = -w0 * (zeta - root);
        let fast = -w0 * (zeta + root);
        let a = (zeta + root) / (2.0 * root);
        let b = (zeta - root) / (2.0 * root);
        1.0 - (a * (slow * t).exp() - b * (fast * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
