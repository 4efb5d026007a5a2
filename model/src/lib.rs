//! Pure inference for the churn classifier: a pre-fit standard scaler and a
//! serialized random forest, both loaded from JSON artifacts at startup.

mod error;
mod forest;
mod scaler;

use std::{fs::File, io::BufReader, path::Path};

use ndarray::ArrayView1;

pub use error::{ModelErr, Result};
pub use forest::{Forest, Tree};
pub use scaler::StandardScaler;

/// The loaded classifier: scaler parameters plus the forest.
///
/// Immutable after construction; requests share it read-only.
#[derive(Debug, Clone)]
pub struct ChurnModel {
    scaler: StandardScaler,
    forest: Forest,
}

impl ChurnModel {
    /// Creates a model from already-validated parts.
    ///
    /// # Errors
    /// Returns `ModelErr` if either part fails validation.
    pub fn new(scaler: StandardScaler, forest: Forest) -> Result<Self> {
        scaler.validate()?;
        forest.validate()?;
        Ok(Self { scaler, forest })
    }

    /// Loads both artifacts from disk and validates them.
    ///
    /// # Errors
    /// Returns `ModelErr` if a file cannot be opened, fails to parse, or
    /// violates a structural invariant.
    pub fn load(scaler_path: &Path, forest_path: &Path) -> Result<Self> {
        let scaler: StandardScaler = read_artifact(scaler_path)?;
        let forest: Forest = read_artifact(forest_path)?;
        Self::new(scaler, forest)
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Predicts the class index for one encoded feature vector.
    ///
    /// # Errors
    /// Returns `ModelErr::DimensionMismatch` if the vector length does not
    /// match the trained feature count.
    pub fn predict(&self, features: ArrayView1<f32>) -> Result<usize> {
        self.forest.predict(&features)
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| ModelErr::Artifact {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn scaler_artifact_deserializes() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{ "mean": [1.0, 2.0], "scale": [3.0, 4.0] }"#).unwrap();
        assert_eq!(scaler.len(), 2);
    }

    #[test]
    fn forest_artifact_deserializes_and_predicts() {
        let json = r#"{
            "n_features": 1,
            "n_classes": 2,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -1, -1],
                "threshold": [0.5, 0.0, 0.0],
                "value": [[5.0, 5.0], [5.0, 0.0], [0.0, 5.0]]
            }]
        }"#;
        let forest: Forest = serde_json::from_str(json).unwrap();
        assert_eq!(forest.predict(&arr1(&[2.0]).view()).unwrap(), 1);
    }

    #[test]
    fn empty_forest_artifact_fails_to_deserialize() {
        let json = r#"{ "n_features": 1, "n_classes": 2, "trees": [] }"#;
        assert!(serde_json::from_str::<Forest>(json).is_err());
    }

    #[test]
    fn load_reports_the_missing_artifact_path() {
        let err = ChurnModel::load(
            Path::new("/nonexistent/scaler.json"),
            Path::new("/nonexistent/forest.json"),
        )
        .unwrap_err();
        match err {
            ModelErr::Artifact { path, .. } => assert!(path.contains("scaler.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
