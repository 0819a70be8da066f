//! Per-repetition timing samples and their summary statistics

/// Elapsed seconds of each repetition, in run order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingSummary {
    samples: Vec<f64>,
}

impl TimingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(repetitions: usize) -> Self {
        Self {
            samples: Vec::with_capacity(repetitions),
        }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn record(&mut self, seconds: f64) {
        self.samples.push(seconds);
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.samples.iter().sum()
    }

    /// Arithmetic mean. `None` when no repetition ran, since the mean of
    /// zero samples is undefined.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.total() / self.samples.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    /// Calculate percentile from samples
    ///
    /// # Arguments
    /// * `p` - Percentile (0-100), e.g., 50.0 for median, 99.0 for P99
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);
        let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }
}
