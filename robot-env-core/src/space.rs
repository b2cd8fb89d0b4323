//! Observation and action spaces.
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bounded (or unbounded) box of `f32` values, one interval per element.
///
/// Unbounded sides are represented with infinities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl BoxSpace {
    /// Creates a box from per-element lower and upper bounds.
    ///
    /// Fails when a lower bound exceeds its upper bound or either is NaN.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Result<Self, CoreError> {
        if low.len() != high.len() {
            return Err(CoreError::SpaceError(format!(
                "low has {} elements but high has {}",
                low.len(),
                high.len()
            )));
        }
        if let Some(i) = (0..low.len()).find(|&i| !(low[i] <= high[i])) {
            return Err(CoreError::SpaceError(format!(
                "low[{i}] = {} is greater than high[{i}] = {}",
                low[i], high[i]
            )));
        }
        Ok(Self { low, high })
    }

    /// Creates an unbounded box with `dim` elements.
    pub fn unbounded(dim: usize) -> Self {
        Self {
            low: vec![f32::NEG_INFINITY; dim],
            high: vec![f32::INFINITY; dim],
        }
    }

    /// Lower bounds.
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Number of elements.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Shape of a sample, always one-dimensional.
    pub fn shape(&self) -> [usize; 1] {
        [self.low.len()]
    }

    /// Returns `true` if `x` has the right length and lies inside the box, bounds included.
    pub fn contains(&self, x: &[f32]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }

    /// Returns the zero vector clipped into the box.
    pub fn zeros(&self) -> Vec<f32> {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(lo, hi)| 0f32.clamp(*lo, *hi))
            .collect()
    }
}

/// A single entry of a [`DictSpace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Real-valued vector.
    Box(BoxSpace),

    /// 8-bit image in `height x width x channels` layout.
    Image {
        /// Height in pixels.
        height: u32,
        /// Width in pixels.
        width: u32,
        /// Number of channels, 3 for RGB.
        channels: u32,
    },
}

/// A named collection of spaces, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictSpace(BTreeMap<String, Space>);

impl DictSpace {
    /// Creates an empty dictionary space.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds an entry, replacing an existing one with the same key.
    pub fn insert(&mut self, key: impl Into<String>, space: Space) {
        self.0.insert(key.into(), space);
    }

    /// Returns the entry registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Space> {
        self.0.get(key)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Space)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there is no entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
