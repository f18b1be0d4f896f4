/// Which rasterization path serviced a drawing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawPath {
    Accelerated,
    Fallback,
}

impl DrawPath {
    pub fn is_accelerated(self) -> bool {
        matches!(self, Self::Accelerated)
    }
}

/// Counts drawing operations and how many took the accelerated path.
///
/// A single classification is noisy, so consumers only read the ratio after a batch of
/// operations has been collected (see [`AccelerationSampler::take_ratio_if_above`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccelerationSampler {
    total: u64,
    accelerated: u64,
}

impl AccelerationSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_operation(&mut self, path: DrawPath) {
        self.total += 1;
        if path.is_accelerated() {
            self.accelerated += 1;
        }
    }

    /// Operations logged since the last [`clear`](Self::clear).
    pub fn operation_count(&self) -> u64 {
        self.total
    }

    pub fn accelerated_count(&self) -> u64 {
        self.accelerated
    }

    /// Accelerated share of all operations, or `0.0` when nothing was logged.
    pub fn accelerated_ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.accelerated as f64 / self.total as f64) as f32
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Add `other`'s counts to this sampler. `other` is left untouched.
    pub fn add_from(&mut self, other: &AccelerationSampler) {
        self.total += other.total;
        self.accelerated += other.accelerated;
    }

    /// Return the ratio and reset when more than `threshold` operations were seen.
    pub fn take_ratio_if_above(&mut self, threshold: u64) -> Option<f32> {
        if self.total <= threshold {
            return None;
        }
        let ratio = self.accelerated_ratio();
        self.clear();
        Some(ratio)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/accel.rs"]
mod tests;
