use smallvec::SmallVec;

use crate::{
    foundation::{
        core::{Rect, Viewport},
        error::{MotionError, MotionResult},
    },
    scroll::offset::ScrollOffset,
};

/// Range a consumer's progress is clamped to.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressRange {
    #[default]
    Unit,
    /// Progress may overshoot, e.g. `[-0.2, 1.2]` for parallax lead-in.
    Extended { min: f64, max: f64 },
}

impl ProgressRange {
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Unit => (0.0, 1.0),
            Self::Extended { min, max } => (min, max),
        }
    }

    pub fn validate(self) -> MotionResult<()> {
        let (min, max) = self.bounds();
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(MotionError::validation(format!(
                "progress range [{min}, {max}] must be finite and ordered"
            )));
        }
        Ok(())
    }
}

/// Progress of `scroll_y` through `(at_start, at_end)`, clamped to `range`.
///
/// A degenerate span behaves like a step: 0 before the point and 1 at or after it.
pub fn compute_progress(scroll_y: f64, (at_start, at_end): (f64, f64), range: ProgressRange) -> f64 {
    let (min, max) = range.bounds();
    let span = at_end - at_start;
    if span.abs() < f64::EPSILON {
        return if scroll_y < at_start { 0.0 } else { 1.0 };
    }
    ((scroll_y - at_start) / span).clamp(min, max)
}

/// Handle for one registered consumer of a [`ScrollProgressSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsumerId(usize);

/// Ids whose progress changed after an input event.
pub type Changed = SmallVec<[ConsumerId; 4]>;

#[derive(Clone, Debug)]
struct Consumer {
    offset: ScrollOffset,
    range: ProgressRange,
    value: f64,
}

/// Scroll progress of one observed region, recomputed on scroll, resize and layout events.
///
/// Until a layout rect is supplied every consumer reads 0.
#[derive(Clone, Debug)]
pub struct ScrollProgressSource {
    region: Option<Rect>,
    viewport: Viewport,
    scroll_y: f64,
    consumers: Vec<Consumer>,
}

impl ScrollProgressSource {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            region: None,
            viewport,
            scroll_y: 0.0,
            consumers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, offset: ScrollOffset, range: ProgressRange) -> ConsumerId {
        let id = ConsumerId(self.consumers.len());
        let mut consumer = Consumer {
            offset,
            range,
            value: 0.0,
        };
        consumer.value = self.evaluate(&consumer);
        self.consumers.push(consumer);
        id
    }

    pub fn progress(&self, id: ConsumerId) -> f64 {
        self.consumers.get(id.0).map_or(0.0, |c| c.value)
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Changed {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
        self.recompute()
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> Changed {
        self.viewport = viewport;
        self.recompute()
    }

    pub fn on_layout(&mut self, region: Rect) -> Changed {
        self.region = Some(region);
        self.recompute()
    }

    /// The region left the layout (unmounted or hidden); progress falls back to 0.
    pub fn clear_layout(&mut self) -> Changed {
        self.region = None;
        self.recompute()
    }

    fn evaluate(&self, c: &Consumer) -> f64 {
        match self.region {
            Some(region) => compute_progress(
                self.scroll_y,
                c.offset.scroll_range(region, self.viewport.height),
                c.range,
            ),
            None => 0.0,
        }
    }

    fn recompute(&mut self) -> Changed {
        let mut changed = Changed::new();
        for i in 0..self.consumers.len() {
            let value = self.evaluate(&self.consumers[i]);
            let c = &mut self.consumers[i];
            if c.value != value {
                c.value = value;
                changed.push(ConsumerId(i));
            }
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
