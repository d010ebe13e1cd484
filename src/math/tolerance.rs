use super::{NORMAL_SIMILARITY, QUANTIZATION, TOLERANCE};

/// Tolerance settings shared by every engine operation.
///
/// A single length epsilon drives equality, inside/outside and parallelism
/// checks across all components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Length epsilon in meters.
    pub length: f64,
    /// Minimum dot product between unit normals considered coplanar.
    pub normal_similarity: f64,
    /// Grid step used to quantize coordinates into hash keys.
    pub quantization: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            length: TOLERANCE,
            normal_similarity: NORMAL_SIMILARITY,
            quantization: QUANTIZATION,
        }
    }
}

impl Tolerance {
    /// Returns a copy with a different length epsilon.
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Returns a copy with a different normal similarity threshold.
    #[must_use]
    pub fn with_normal_similarity(mut self, normal_similarity: f64) -> Self {
        self.normal_similarity = normal_similarity;
        self
    }

    /// Returns a copy with a different quantization step.
    #[must_use]
    pub fn with_quantization(mut self, quantization: f64) -> Self {
        self.quantization = quantization;
        self
    }

    /// Bucket width for quantizing unit normal components.
    #[must_use]
    pub fn normal_step(&self) -> f64 {
        (1.0 - self.normal_similarity).max(f64::EPSILON)
    }
}
