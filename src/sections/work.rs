use crate::{
    animation::{
        mapper::{MapperSet, MappingTable, RangeMap},
        spring::{Spring, SpringConfig},
    },
    foundation::{
        core::{DurationMs, Rect, Rgba8, Viewport},
        error::MotionResult,
    },
    scroll::{
        offset::{Edge, Intersection, ScrollOffset},
        progress::{ConsumerId, ProgressRange, ScrollProgressSource},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorkConfig {
    pub reveal_offset: ScrollOffset,
    /// Progress strictly inside `(0, 1)` means the section is under the navigation bar.
    pub dark_offset: ScrollOffset,
    pub smoothing: SpringConfig,
    pub spill_height: MappingTable,
    pub paint_opacity: MappingTable,
    pub drip_stretch: MappingTable,
    pub content_opacity: MappingTable,
    pub content_y: MappingTable,
    pub stars_opacity: MappingTable,
    pub page_color: Rgba8,
    pub paint_color: Rgba8,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            // "start 60%" to "start -10%"
            reveal_offset: ScrollOffset {
                start: Intersection {
                    target: Edge::Start,
                    viewport: Edge::Percent(60.0),
                },
                end: Intersection {
                    target: Edge::Start,
                    viewport: Edge::Percent(-10.0),
                },
            },
            // "start 100px" to "end 100px"
            dark_offset: ScrollOffset {
                start: Intersection {
                    target: Edge::Start,
                    viewport: Edge::Pixels(100.0),
                },
                end: Intersection {
                    target: Edge::End,
                    viewport: Edge::Pixels(100.0),
                },
            },
            smoothing: SpringConfig::new(50.0, 20.0, 1.0).with_rest_delta(0.001),
            spill_height: MappingTable::new(&[0.0, 0.6], &[0.0, 1.0]),
            paint_opacity: MappingTable::new(&[0.0, 0.2], &[0.0, 1.0]),
            drip_stretch: MappingTable::new(&[0.0, 0.3, 0.6], &[1.0, 3.0, 1.5]),
            content_opacity: MappingTable::new(&[0.4, 0.6], &[0.0, 1.0]),
            content_y: MappingTable::new(&[0.4, 0.6], &[100.0, 0.0]),
            stars_opacity: MappingTable::new(&[0.1, 0.3], &[0.0, 1.0]),
            page_color: Rgba8::WHITE,
            paint_color: Rgba8::BLACK,
        }
    }
}

impl WorkConfig {
    pub fn validate(&self) -> MotionResult<()> {
        self.smoothing.validate()?;
        for table in [
            &self.spill_height,
            &self.paint_opacity,
            &self.drip_stretch,
            &self.content_opacity,
            &self.content_y,
            &self.stars_opacity,
        ] {
            table.to_range_map()?;
        }
        Ok(())
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkChannel {
    SpillHeight,
    PaintOpacity,
    DripStretch,
    ContentOpacity,
    ContentY,
    StarsOpacity,
}

/// Visual state of the work section for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WorkFrame {
    pub progress: f64,
    /// Fraction of the section height covered by paint.
    pub spill_height: f64,
    pub paint_opacity: f64,
    pub drip_stretch: f64,
    pub content_opacity: f64,
    pub content_y: f64,
    pub stars_opacity: f64,
    /// Page color at the top of the section once the paint is composited.
    pub spill_color: Rgba8,
}

/// Paint-spill section: a smoothed scroll progress drives the spill, content reveal and star
/// field, while a second offset on the same region toggles the dark theme.
#[derive(Debug)]
pub struct WorkSection {
    source: ScrollProgressSource,
    reveal: ConsumerId,
    dark: ConsumerId,
    smooth: Spring,
    channels: MapperSet<WorkChannel, f64>,
    spill_color: RangeMap<Rgba8>,
    theme: Theme,
}

impl WorkSection {
    pub fn new(config: &WorkConfig, viewport: Viewport) -> MotionResult<Self> {
        config.validate()?;
        let channels = MapperSet::new()
            .with(WorkChannel::SpillHeight, config.spill_height.to_range_map()?)
            .with(WorkChannel::PaintOpacity, config.paint_opacity.to_range_map()?)
            .with(WorkChannel::DripStretch, config.drip_stretch.to_range_map()?)
            .with(WorkChannel::ContentOpacity, config.content_opacity.to_range_map()?)
            .with(WorkChannel::ContentY, config.content_y.to_range_map()?)
            .with(WorkChannel::StarsOpacity, config.stars_opacity.to_range_map()?);
        let spill_color = RangeMap::new(&[0.0, 1.0], vec![config.page_color, config.paint_color])?;

        let mut source = ScrollProgressSource::new(viewport);
        let reveal = source.subscribe(config.reveal_offset, ProgressRange::Unit);
        let dark = source.subscribe(config.dark_offset, ProgressRange::Unit);
        Ok(Self {
            source,
            reveal,
            dark,
            smooth: Spring::new(config.smoothing, 0.0),
            channels,
            spill_color,
            theme: Theme::Light,
        })
    }

    /// Returns the new theme when it changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<Theme> {
        let changed = self.source.on_scroll(scroll_y);
        self.apply(&changed)
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> Option<Theme> {
        let changed = self.source.on_resize(viewport);
        self.apply(&changed)
    }

    pub fn on_layout(&mut self, region: Rect) -> Option<Theme> {
        let changed = self.source.on_layout(region);
        self.apply(&changed)
    }

    fn apply(&mut self, changed: &[ConsumerId]) -> Option<Theme> {
        if changed.contains(&self.reveal) {
            self.smooth.set_target(self.source.progress(self.reveal));
        }
        if !changed.contains(&self.dark) {
            return None;
        }
        let v = self.source.progress(self.dark);
        let theme = if v > 0.0 && v < 1.0 {
            Theme::Dark
        } else {
            Theme::Light
        };
        if theme == self.theme {
            return None;
        }
        self.theme = theme;
        tracing::debug!(?theme, "work section theme changed");
        Some(theme)
    }

    pub fn step(&mut self, dt: DurationMs) {
        self.smooth.step(dt);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn raw_progress(&self) -> f64 {
        self.source.progress(self.reveal)
    }

    pub fn smoothed_progress(&self) -> f64 {
        self.smooth.value()
    }

    pub fn frame(&self) -> WorkFrame {
        let p = self.smooth.value();
        let ch = |c| self.channels.get(c, p).unwrap_or_default();
        let paint_opacity = ch(WorkChannel::PaintOpacity);
        WorkFrame {
            progress: p,
            spill_height: ch(WorkChannel::SpillHeight),
            paint_opacity,
            drip_stretch: ch(WorkChannel::DripStretch),
            content_opacity: ch(WorkChannel::ContentOpacity),
            content_y: ch(WorkChannel::ContentY),
            stars_opacity: ch(WorkChannel::StarsOpacity),
            spill_color: self.spill_color.map(paint_opacity),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/work.rs"]
mod tests;
