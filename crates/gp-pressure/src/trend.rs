//! Normal compaction velocity trend.

/// Log-linear compaction trend `vn(z) = exp(a - b·z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactionTrend {
    pub a: f64,
    pub b: f64,
}

impl CompactionTrend {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn velocity_at(&self, depth: f64) -> f64 {
        (self.a - self.b * depth).exp()
    }

    pub fn velocity(&self, depth: &[f64]) -> Vec<f64> {
        depth.iter().map(|&z| self.velocity_at(z)).collect()
    }
}

/// Normal compaction trend velocity at each depth.
pub fn normal(depth: &[f64], a: f64, b: f64) -> Vec<f64> {
    CompactionTrend::new(a, b).velocity(depth)
}
