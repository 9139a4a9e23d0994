//! Distance Statistics
//!
//! Running maximum and mean of the absolute distances observed by fuzzy
//! comparisons during one test.

/// Accumulator for observed ULP distances
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceStats {
    max: f64,
    sum: f64,
    count: u64,
}

impl DistanceStats {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one distance into the accumulator (the sign is ignored)
    pub fn record(&mut self, distance: f64) {
        let distance = distance.abs();
        // NaN never replaces the running maximum
        if distance > self.max {
            self.max = distance;
        }
        self.sum += distance;
        self.count += 1;
    }

    /// Fold every lane of a tuple
    pub fn record_all(&mut self, distances: impl IntoIterator<Item = f64>) {
        for d in distances {
            self.record(d);
        }
    }

    /// Largest absolute distance seen so far
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of absolute distances
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of recorded samples
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean absolute distance, or `None` without samples
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Whether every recorded value matched its reference exactly
    pub fn is_exact(&self) -> bool {
        self.max == 0.0
    }

    /// Forget everything recorded
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
