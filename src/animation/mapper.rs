use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{MotionError, MotionResult},
    foundation::math::lerp_f64,
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            lerp_f64(f64::from(a), f64::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Piecewise-linear map from an input value (usually scroll progress) to an output value.
///
/// Breakpoint inputs are strictly increasing. Inputs outside the table clamp to the first or last
/// output; there is no extrapolation. Each segment may carry its own easing.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeMap<T> {
    inputs: Vec<f64>,
    outputs: Vec<T>,
    eases: Vec<Ease>, // one per segment
}

impl<T> RangeMap<T>
where
    T: Lerp + Clone,
{
    pub fn new(inputs: &[f64], outputs: Vec<T>) -> MotionResult<Self> {
        if inputs.is_empty() {
            return Err(MotionError::animation(
                "RangeMap needs at least one breakpoint",
            ));
        }
        if inputs.len() != outputs.len() {
            return Err(MotionError::animation(format!(
                "RangeMap has {} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        if !inputs.iter().all(|x| x.is_finite()) {
            return Err(MotionError::animation("RangeMap inputs must be finite"));
        }
        if !inputs.windows(2).all(|w| w[0] < w[1]) {
            return Err(MotionError::animation(
                "RangeMap inputs must be strictly increasing",
            ));
        }
        Ok(Self {
            inputs: inputs.to_vec(),
            outputs,
            eases: vec![Ease::Linear; inputs.len() - 1],
        })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, T)>) -> MotionResult<Self> {
        let (inputs, outputs): (Vec<f64>, Vec<T>) = pairs.into_iter().unzip();
        Self::new(&inputs, outputs)
    }

    /// Apply the same easing to every segment.
    pub fn with_ease(mut self, ease: Ease) -> MotionResult<Self> {
        if !ease.is_valid() {
            return Err(MotionError::animation(format!("invalid easing {ease:?}")));
        }
        self.eases.iter_mut().for_each(|e| *e = ease);
        Ok(self)
    }

    pub fn with_segment_eases(mut self, eases: Vec<Ease>) -> MotionResult<Self> {
        if eases.len() != self.eases.len() {
            return Err(MotionError::animation(format!(
                "RangeMap has {} segments but {} eases",
                self.eases.len(),
                eases.len()
            )));
        }
        if let Some(bad) = eases.iter().find(|e| !e.is_valid()) {
            return Err(MotionError::animation(format!("invalid easing {bad:?}")));
        }
        self.eases = eases;
        Ok(self)
    }

    pub fn map(&self, x: f64) -> T {
        let last = self.inputs.len() - 1;
        // NaN compares false everywhere; treat it as below the table.
        if x.is_nan() || x <= self.inputs[0] {
            return self.outputs[0].clone();
        }
        if x >= self.inputs[last] {
            return self.outputs[last].clone();
        }

        let idx = self.inputs.partition_point(|&b| b <= x);
        let (i0, i1) = (self.inputs[idx - 1], self.inputs[idx]);
        let t = (x - i0) / (i1 - i0);
        let te = self.eases[idx - 1].apply(t);
        T::lerp(&self.outputs[idx - 1], &self.outputs[idx], te)
    }

    /// `(first, last)` breakpoint inputs.
    pub fn input_span(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }

    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }
}

/// Plain breakpoint table as it appears in configuration files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MappingTable {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
}

impl MappingTable {
    pub fn new(input: &[f64], output: &[f64]) -> Self {
        Self {
            input: input.to_vec(),
            output: output.to_vec(),
            ease: None,
        }
    }

    pub fn to_range_map(&self) -> MotionResult<RangeMap<f64>> {
        let map = RangeMap::new(&self.input, self.output.clone())?;
        match self.ease {
            Some(ease) => map.with_ease(ease),
            None => Ok(map),
        }
    }
}

/// Several named mappers driven by one shared input value.
#[derive(Clone, Debug)]
pub struct MapperSet<K, T> {
    entries: Vec<(K, RangeMap<T>)>,
}

impl<K, T> MapperSet<K, T>
where
    K: Copy + PartialEq,
    T: Lerp + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add (or replace) the mapper for `key`.
    pub fn with(mut self, key: K, map: RangeMap<T>) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = map,
            None => self.entries.push((key, map)),
        }
        self
    }

    pub fn get(&self, key: K, input: f64) -> Option<T> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| m.map(input))
    }

    pub fn sample(&self, input: f64) -> impl Iterator<Item = (K, T)> + '_ {
        self.entries.iter().map(move |(k, m)| (*k, m.map(input)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, T> Default for MapperSet<K, T>
where
    K: Copy + PartialEq,
    T: Lerp + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mapper.rs"]
mod tests;
