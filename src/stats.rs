//! Descriptive statistics

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// Inclusive time range `[start, end]` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}
impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Mean, minimum and maximum of a sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}
impl Summary {
    /// Computes the summary, `None` if there are no values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        Some(Self {
            mean,
            min,
            max,
            count,
        })
    }
    /// Summary of the present values, missing samples are ignored
    pub fn from_sparse(values: &[Option<f64>]) -> Option<Self> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        Self::from_values(&present)
    }
    /// Largest magnitude of the extrema
    pub fn peak(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}
