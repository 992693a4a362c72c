use crate::foundation::{
    core::Viewport,
    error::{MotionError, MotionResult},
};

/// Arc placement constants for one breakpoint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArcLayout {
    pub radius: f64,
    pub angle_step_deg: f64,
    pub rotation_multiplier: f64,
    pub min_scale: f64,
    pub scale_decay: f64,
    pub min_opacity: f64,
    pub opacity_decay: f64,
    pub z_base: i32,
    /// Cards materialized on each side of the active one.
    pub window_radius: u32,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self::desktop()
    }
}

impl ArcLayout {
    pub fn desktop() -> Self {
        Self {
            radius: 800.0,
            angle_step_deg: 6.0,
            rotation_multiplier: 1.5,
            min_scale: 0.7,
            scale_decay: 0.1,
            min_opacity: 0.3,
            opacity_decay: 0.2,
            z_base: 100,
            window_radius: 4,
        }
    }

    pub fn mobile() -> Self {
        Self {
            radius: 300.0,
            angle_step_deg: 10.0,
            window_radius: 2,
            ..Self::desktop()
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let values = [
            self.radius,
            self.angle_step_deg,
            self.rotation_multiplier,
            self.min_scale,
            self.scale_decay,
            self.min_opacity,
            self.opacity_decay,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(MotionError::validation("carousel layout values must be finite"));
        }
        if self.radius <= 0.0 {
            return Err(MotionError::validation("carousel radius must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.min_scale) || !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(MotionError::validation(
                "carousel min_scale and min_opacity must be in [0, 1]",
            ));
        }
        // The active card must stay the largest and most opaque.
        if self.scale_decay < 0.0 || self.opacity_decay < 0.0 {
            return Err(MotionError::validation(
                "carousel scale_decay and opacity_decay must be >= 0",
            ));
        }
        Ok(())
    }

    /// Placement of the card `offset` slots away from the active one.
    pub fn place(&self, offset: i64) -> Placement {
        let o = offset as f64;
        let angle_deg = o * self.angle_step_deg;
        let rad = angle_deg.to_radians();
        let distance = offset.unsigned_abs();
        let z_drop = i32::try_from(distance).unwrap_or(i32::MAX);
        Placement {
            offset,
            x: rad.sin() * self.radius,
            y: self.radius - rad.cos() * self.radius,
            rotation_deg: angle_deg * self.rotation_multiplier,
            scale: (1.0 - o.abs() * self.scale_decay).max(self.min_scale),
            opacity: (1.0 - o.abs() * self.opacity_decay).max(self.min_opacity),
            z_index: self.z_base.saturating_sub(z_drop),
        }
    }
}

/// Visual properties of one card on the arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    pub offset: i64,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
}

/// Desktop and mobile layouts, selected by viewport width.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResponsiveLayout {
    pub desktop: ArcLayout,
    pub mobile: ArcLayout,
}

impl Default for ResponsiveLayout {
    fn default() -> Self {
        Self {
            desktop: ArcLayout::desktop(),
            mobile: ArcLayout::mobile(),
        }
    }
}

impl ResponsiveLayout {
    pub fn for_viewport(&self, viewport: &Viewport) -> &ArcLayout {
        if viewport.is_mobile() {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.desktop.validate()?;
        self.mobile.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/layout.rs"]
mod tests;
