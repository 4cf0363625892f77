//! K-Nearest Neighbors
//!
//! A lazy learner: generating a model stores the training rows verbatim.
//! Prediction ranks every stored row by Euclidean distance to the query and
//! returns the most frequent label among the `k` closest.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::models::{Generator, Model, TrainedModel};
use crate::data::Descriptor;
use crate::error::{NumlError, Result};
use crate::math::metrics::{Distance, EuclideanDistance};

/// KNN configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Number of neighbors
    pub k: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { k: 5 }
    }
}

/// Produces [`KnnModel`]s
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnGenerator {
    pub config: KnnConfig,
    pub descriptor: Descriptor,
}

impl KnnGenerator {
    pub fn new(descriptor: Descriptor, k: usize) -> Self {
        Self {
            config: KnnConfig { k },
            descriptor,
        }
    }
}

impl Generator for KnnGenerator {
    fn name(&self) -> &str {
        "knn"
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn generate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<TrainedModel> {
        if self.config.k == 0 {
            return Err(NumlError::InvalidConfiguration("k must be at least 1".to_string()));
        }
        NumlError::check_dims(x.nrows(), y.len())?;

        Ok(TrainedModel::Knn(KnnModel {
            k: self.config.k,
            x: x.to_owned(),
            y: y.to_owned(),
            descriptor: self.descriptor.clone(),
        }))
    }
}

/// Stored training set plus `k`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnModel {
    pub k: usize,
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub descriptor: Descriptor,
}

impl Model for KnnModel {
    /// NaN when the model holds no training rows
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64> {
        NumlError::check_dims(self.x.ncols(), features.len())?;
        let n = self.x.nrows();
        if n == 0 {
            return Ok(f64::NAN);
        }

        // one slot per training row
        let distances: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| EuclideanDistance.compute(self.x.row(i), features))
            .collect::<Result<Vec<f64>>>()?;

        // stable: equal distances keep training-row order
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

        let nearest: Vec<f64> = order.iter().take(self.k).map(|&i| self.y[i]).collect();
        Ok(mode(&nearest))
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn set_descriptor(&mut self, descriptor: Descriptor) {
        self.descriptor = descriptor;
    }
}

/// Most frequent value; ties go to the value seen first
fn mode(values: &[f64]) -> f64 {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &v in values {
        match counts.iter_mut().find(|(c, _)| *c == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }

    let mut best = (f64::NAN, 0usize);
    for (v, n) in counts {
        if n > best.1 {
            best = (v, n);
        }
    }
    best.0
}
