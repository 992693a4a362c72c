use crate::{
    animation::mapper::{MapperSet, MappingTable},
    foundation::{
        core::{Rect, Viewport},
        error::MotionResult,
    },
    scroll::{
        offset::ScrollOffset,
        progress::{ConsumerId, ProgressRange, ScrollProgressSource},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub offset: ScrollOffset,
    pub y: MappingTable,
    pub opacity: MappingTable,
    pub scale: MappingTable,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            offset: ScrollOffset::enter_exit(),
            y: MappingTable::new(&[0.0, 1.0], &[100.0, -200.0]),
            opacity: MappingTable::new(&[0.0, 0.2, 0.8, 1.0], &[0.0, 1.0, 1.0, 0.0]),
            scale: MappingTable::new(&[0.0, 1.0], &[1.0, 1.15]),
        }
    }
}

impl SkillsConfig {
    pub fn validate(&self) -> MotionResult<()> {
        for table in [&self.y, &self.opacity, &self.scale] {
            table.to_range_map()?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SkillsChannel {
    Y,
    Opacity,
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SkillsFrame {
    pub progress: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

/// Parallax heading block; channels follow raw progress with no smoothing.
#[derive(Debug)]
pub struct SkillsSection {
    source: ScrollProgressSource,
    id: ConsumerId,
    channels: MapperSet<SkillsChannel, f64>,
}

impl SkillsSection {
    pub fn new(config: &SkillsConfig, viewport: Viewport) -> MotionResult<Self> {
        let channels = MapperSet::new()
            .with(SkillsChannel::Y, config.y.to_range_map()?)
            .with(SkillsChannel::Opacity, config.opacity.to_range_map()?)
            .with(SkillsChannel::Scale, config.scale.to_range_map()?);
        let mut source = ScrollProgressSource::new(viewport);
        let id = source.subscribe(config.offset, ProgressRange::Unit);
        Ok(Self {
            source,
            id,
            channels,
        })
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.source.on_scroll(scroll_y);
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.source.on_resize(viewport);
    }

    pub fn on_layout(&mut self, region: Rect) {
        self.source.on_layout(region);
    }

    pub fn progress(&self) -> f64 {
        self.source.progress(self.id)
    }

    pub fn frame(&self) -> SkillsFrame {
        let p = self.progress();
        let ch = |c| self.channels.get(c, p).unwrap_or_default();
        SkillsFrame {
            progress: p,
            y: ch(SkillsChannel::Y),
            opacity: ch(SkillsChannel::Opacity),
            scale: ch(SkillsChannel::Scale),
        }
    }
}
