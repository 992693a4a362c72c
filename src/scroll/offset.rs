use std::fmt;
use std::str::FromStr;

use crate::foundation::{
    core::Rect,
    error::{MotionError, MotionResult},
};

/// A position along one axis of either the tracked element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    /// Percentage of the length, e.g. `60%` or `-10%`.
    Percent(f64),
    Pixels(f64),
}

impl Edge {
    /// Distance from the leading edge for an axis of `length` pixels.
    pub fn resolve(self, length: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => length / 2.0,
            Self::End => length,
            Self::Percent(p) => length * p / 100.0,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || MotionError::validation(format!("invalid scroll edge \"{s}\""));
        let finite = |v: f64| if v.is_finite() { Ok(v) } else { Err(bad()) };
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map_err(|_| bad()).and_then(finite).map(Self::Percent)
                } else if let Some(px) = s.strip_suffix("px") {
                    px.parse().map_err(|_| bad()).and_then(finite).map(Self::Pixels)
                } else {
                    // Bare numbers are fractions of the length.
                    s.parse::<f64>()
                        .map_err(|_| bad())
                        .and_then(finite)
                        .map(|f| Self::Percent(f * 100.0))
                }
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// "`target` edge of the element meets `viewport` edge of the viewport".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub target: Edge,
    pub viewport: Edge,
}

impl Intersection {
    /// Scroll position at which the condition holds for an element spanning `y0..y0 + height`.
    pub fn scroll_at(self, y0: f64, height: f64, viewport_height: f64) -> f64 {
        y0 + self.target.resolve(height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Intersection {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(target), viewport, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MotionError::validation(format!(
                "scroll intersection \"{s}\" must be \"<target> <viewport>\""
            )));
        };
        let target: Edge = target.parse()?;
        // A single edge applies to both sides.
        let viewport = match viewport {
            Some(v) => v.parse()?,
            None => target,
        };
        Ok(Self { target, viewport })
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.viewport)
    }
}

/// The pair of intersections that define progress 0 (`start`) and progress 1 (`end`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[String; 2]", into = "[String; 2]")]
pub struct ScrollOffset {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffset {
    pub fn parse(start: &str, end: &str) -> MotionResult<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// `["start end", "end start"]`: from the element entering at the bottom to leaving at the top.
    pub fn enter_exit() -> Self {
        Self {
            start: Intersection {
                target: Edge::Start,
                viewport: Edge::End,
            },
            end: Intersection {
                target: Edge::End,
                viewport: Edge::Start,
            },
        }
    }

    /// Scroll positions `(at_start, at_end)` for a region in document coordinates.
    pub fn scroll_range(&self, region: Rect, viewport_height: f64) -> (f64, f64) {
        let h = region.height();
        (
            self.start.scroll_at(region.y0, h, viewport_height),
            self.end.scroll_at(region.y0, h, viewport_height),
        )
    }
}

impl TryFrom<[String; 2]> for ScrollOffset {
    type Error = MotionError;

    fn try_from([start, end]: [String; 2]) -> Result<Self, Self::Error> {
        Self::parse(&start, &end)
    }
}

impl From<ScrollOffset> for [String; 2] {
    fn from(o: ScrollOffset) -> Self {
        [o.start.to_string(), o.end.to_string()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/offset.rs"]
mod tests;
