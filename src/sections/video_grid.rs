use crate::{
    animation::{
        mapper::RangeMap,
        spring::{Spring, SpringConfig},
    },
    foundation::{
        core::{DurationMs, Rect, Viewport},
        error::{MotionError, MotionResult},
    },
    scroll::{
        offset::ScrollOffset,
        progress::{ConsumerId, ProgressRange, ScrollProgressSource},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoGridConfig {
    pub offset: ScrollOffset,
    pub columns: usize,
    /// Peak vertical shift of a column, in percent of its own height.
    pub travel_percent: f64,
    pub spring: SpringConfig,
}

impl Default for VideoGridConfig {
    fn default() -> Self {
        Self {
            offset: ScrollOffset::enter_exit(),
            columns: 4,
            travel_percent: 60.0,
            spring: SpringConfig::new(50.0, 20.0, 1.5),
        }
    }
}

impl VideoGridConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.columns == 0 {
            return Err(MotionError::validation("video grid needs at least one column"));
        }
        if !self.travel_percent.is_finite() {
            return Err(MotionError::validation("video grid travel must be finite"));
        }
        self.spring.validate()
    }
}

#[derive(Debug)]
struct Column {
    map: RangeMap<f64>,
    spring: Spring,
}

/// Column parallax: even columns drift down as the grid scrolls through, odd columns drift up.
#[derive(Debug)]
pub struct VideoGrid {
    source: ScrollProgressSource,
    id: ConsumerId,
    columns: Vec<Column>,
}

impl VideoGrid {
    pub fn new(config: &VideoGridConfig, viewport: Viewport) -> MotionResult<Self> {
        config.validate()?;
        let mut source = ScrollProgressSource::new(viewport);
        let id = source.subscribe(config.offset, ProgressRange::Unit);
        let columns = (0..config.columns)
            .map(|i| -> MotionResult<Column> {
                let dir = column_direction(i);
                let map = RangeMap::new(
                    &[0.0, 1.0],
                    vec![-config.travel_percent * dir, config.travel_percent * dir],
                )?;
                let spring = Spring::new(config.spring, map.map(0.0));
                Ok(Column { map, spring })
            })
            .collect::<MotionResult<Vec<_>>>()?;
        Ok(Self {
            source,
            id,
            columns,
        })
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.source.on_scroll(scroll_y);
        self.retarget();
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.source.on_resize(viewport);
        self.retarget();
    }

    pub fn on_layout(&mut self, region: Rect) {
        self.source.on_layout(region);
        self.retarget();
    }

    fn retarget(&mut self) {
        let p = self.source.progress(self.id);
        for col in &mut self.columns {
            col.spring.set_target(col.map.map(p));
        }
    }

    pub fn step(&mut self, dt: DurationMs) {
        self.columns.iter_mut().for_each(|c| c.spring.step(dt));
    }

    pub fn progress(&self) -> f64 {
        self.source.progress(self.id)
    }

    /// Smoothed vertical shift of each column, in percent.
    pub fn column_offsets(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.spring.value()).collect()
    }

    pub fn is_settled(&self) -> bool {
        self.columns.iter().all(|c| c.spring.is_at_rest())
    }
}

/// `+1` for even columns, `-1` for odd ones.
pub fn column_direction(index: usize) -> f64 {
    if index % 2 == 0 { 1.0 } else { -1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/video_grid.rs"]
mod tests;
