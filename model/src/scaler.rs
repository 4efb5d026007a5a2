use ndarray::Array1;
use serde::Deserialize;

use crate::error::{ModelErr, Result};

/// A pre-fit standardization transform.
///
/// Maps each feature to `(x - mean) / scale` using parameters fit during
/// training. Deserialization goes through the checked constructor, so a
/// decoded scaler always satisfies the structural invariants.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct StandardScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// Wire form of the scaler artifact, before validation.
#[derive(Deserialize)]
struct RawScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl TryFrom<RawScaler> for StandardScaler {
    type Error = ModelErr;

    fn try_from(raw: RawScaler) -> Result<Self> {
        Self::new(raw.mean, raw.scale)
    }
}

impl StandardScaler {
    /// Creates a validated scaler.
    ///
    /// # Errors
    /// Returns `ModelErr` if `mean` and `scale` differ in length or any
    /// scale entry is zero.
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Checks the structural invariants of the fitted parameters.
    ///
    /// # Errors
    /// Returns `ModelErr` if `mean` and `scale` differ in length or any
    /// scale entry is zero.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(ModelErr::DimensionMismatch {
                what: "scaler parameters",
                got: self.scale.len(),
                expected: self.mean.len(),
            });
        }
        if self.scale.iter().any(|&s| s == 0.0) {
            return Err(ModelErr::Malformed(
                "scaler has a zero scale entry".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the number of features the scaler was fit on.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standardizes `x` in place.
    ///
    /// # Errors
    /// Returns `ModelErr::DimensionMismatch` if `x` does not match the
    /// fitted feature count.
    pub fn transform(&self, x: &mut Array1<f32>) -> Result<()> {
        if x.len() != self.len() {
            return Err(ModelErr::DimensionMismatch {
                what: "scaler input",
                got: x.len(),
                expected: self.len(),
            });
        }
        for (v, (m, s)) in x.iter_mut().zip(self.mean.iter().zip(&self.scale)) {
            *v = (*v - m) / s;
        }
        Ok(())
    }
}
