//! Generator and model traits, and the serializable model envelope

use crate::data::{Descriptor, Record, Value};
use crate::error::Result;
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::knn::KnnModel;
use super::linear_models::{LinearRegressionModel, LogisticRegressionModel};

/// A trained predictor
pub trait Model: Send + Sync + fmt::Debug {
    /// Raw numeric prediction for one feature vector
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64>;

    /// Schema stamped on the model when it was generated
    fn descriptor(&self) -> &Descriptor;

    fn set_descriptor(&mut self, descriptor: Descriptor);

    /// Convert, predict and decode a raw record into the label's native value
    fn predict_example(&self, example: &dyn Record) -> Result<Value> {
        let descriptor = self.descriptor();
        let features = descriptor.convert_one(example, false)?;
        let raw = self.predict(features.view())?;
        Ok(descriptor.label()?.decode(raw))
    }
}

/// Algorithm producing a [`TrainedModel`] from a training matrix/vector pair.
/// Stateless with respect to data.
pub trait Generator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Schema stamped on every generated model
    fn descriptor(&self) -> &Descriptor;

    fn generate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<TrainedModel>;
}

/// Enum to hold trained model variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrainedModel {
    Knn(KnnModel),
    LinearRegression(LinearRegressionModel),
    LogisticRegression(LogisticRegressionModel),
}

impl TrainedModel {
    fn inner(&self) -> &dyn Model {
        match self {
            TrainedModel::Knn(m) => m,
            TrainedModel::LinearRegression(m) => m,
            TrainedModel::LogisticRegression(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Model {
        match self {
            TrainedModel::Knn(m) => m,
            TrainedModel::LinearRegression(m) => m,
            TrainedModel::LogisticRegression(m) => m,
        }
    }

    /// Save the model, descriptor included, as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a model written by [`TrainedModel::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&json)?;
        Ok(model)
    }
}

impl Model for TrainedModel {
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64> {
        self.inner().predict(features)
    }

    fn descriptor(&self) -> &Descriptor {
        self.inner().descriptor()
    }

    fn set_descriptor(&mut self, descriptor: Descriptor) {
        self.inner_mut().set_descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Property, Row};
    use crate::training::knn::KnnGenerator;
    use ndarray::{arr1, arr2};

    fn descriptor() -> Descriptor {
        Descriptor::new()
            .with_feature(Property::number("x"))
            .with_label(Property::boolean("hot"))
    }

    #[test]
    fn test_predict_example_decodes_label() {
        let generator = KnnGenerator::new(descriptor(), 1);
        let x = arr2(&[[0.0], [10.0]]);
        let y = arr1(&[0.0, 1.0]);
        let model = generator.generate(x.view(), y.view()).unwrap();

        let mut row = Row::new();
        row.insert("x".into(), Value::Number(9.0));
        assert_eq!(model.predict_example(&row).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_save_load_round_trip() {
        let generator = KnnGenerator::new(descriptor(), 1);
        let x = arr2(&[[0.0], [10.0]]);
        let y = arr1(&[0.0, 1.0]);
        let model = generator.generate(x.view(), y.view()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();
        let loaded = TrainedModel::load(&path).unwrap();

        assert_eq!(loaded.descriptor(), model.descriptor());
        let q = arr1(&[1.0]);
        assert_eq!(loaded.predict(q.view()).unwrap(), model.predict(q.view()).unwrap());
    }
}
