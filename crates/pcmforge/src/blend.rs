//! Blend modes for combining new samples with audio already on disk.

use serde::{Deserialize, Serialize};

use crate::wav::SampleFormat;

/// How a generated sample combines with the sample already stored at the
/// same position.
///
/// All arithmetic happens in a signed domain centered on silence, so 8-bit
/// and 16-bit streams blend identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace the existing sample.
    #[default]
    Normal,
    /// Sum of existing and new.
    Add,
    /// Existing minus new.
    Subtract,
    /// Normalized product: full scale times full scale stays full scale.
    Multiply,
    /// Normalized quotient of existing over new. A silent divisor leaves the
    /// existing sample untouched.
    Divide,
}

impl BlendMode {
    /// Whether this mode needs to read the existing samples.
    pub fn reads_existing(self) -> bool {
        self != BlendMode::Normal
    }

    /// Combines two stored sample values and saturates the result.
    pub fn apply(self, format: &SampleFormat, existing: i32, new: i32) -> i32 {
        if self == BlendMode::Normal {
            return new;
        }

        let e = (existing as f64) - format.offset;
        let n = (new as f64) - format.offset;
        let combined = match self {
            BlendMode::Normal => n,
            BlendMode::Add => e + n,
            BlendMode::Subtract => e - n,
            BlendMode::Multiply => e * n / format.scale,
            BlendMode::Divide => {
                if n == 0.0 {
                    e
                } else {
                    e * format.scale / n
                }
            }
        };

        format.saturate(combined + format.offset)
    }
}
