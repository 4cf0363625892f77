//! Distance and similarity metrics
//!
//! Every metric is symmetric and side-effect free, and fails with
//! `DimensionMismatch` when the two vectors differ in length.

use crate::error::{NumlError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Dissimilarity between two feature vectors (0 for identical vectors)
pub trait Distance: Send + Sync {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64>;
}

/// Similarity between two feature vectors (larger means closer)
pub trait Similarity: Send + Sync {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64>;
}

fn dims(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> Result<()> {
    NumlError::check_dims(x.len(), y.len())
}

fn squared_euclidean(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

/// dot, ‖x‖², ‖y‖² in one pass
fn dot_and_norms(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> (f64, f64, f64) {
    let mut dot = 0.0;
    let mut norm_x = 0.0;
    let mut norm_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        dot += a * b;
        norm_x += a * a;
        norm_y += b * b;
    }
    (dot, norm_x, norm_y)
}

fn cosine(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> f64 {
    let (dot, norm_x, norm_y) = dot_and_norms(x, y);
    let denom = norm_x.sqrt() * norm_y.sqrt();
    if denom > 0.0 { dot / denom } else { 0.0 }
}

/// `1 - cos(x, y)`; a zero vector is at distance 1 from everything
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CosineDistance;

impl Distance for CosineDistance {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(1.0 - cosine(&x, &y))
    }
}

/// L2 distance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EuclideanDistance;

impl Distance for EuclideanDistance {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(squared_euclidean(&x, &y).sqrt())
    }
}

/// L1 distance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ManhattanDistance;

impl Distance for ManhattanDistance {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).sum())
    }
}

/// Number of components that differ
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HammingDistance;

impl Distance for HammingDistance {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(x.iter().zip(y.iter()).filter(|(a, b)| a != b).count() as f64)
    }
}

/// `cos(x, y)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CosineSimilarity;

impl Similarity for CosineSimilarity {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(cosine(&x, &y))
    }
}

/// `1 / (1 + ‖x - y‖₂)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EuclideanSimilarity;

impl Similarity for EuclideanSimilarity {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        Ok(1.0 / (1.0 + squared_euclidean(&x, &y).sqrt()))
    }
}

/// Pearson correlation coefficient; 0 when either vector has no variance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PearsonCorrelation;

impl Similarity for PearsonCorrelation {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        let n = x.len() as f64;
        if n == 0.0 {
            return Ok(0.0);
        }

        let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y.iter()) {
            sx += a;
            sy += b;
            sxx += a * a;
            syy += b * b;
            sxy += a * b;
        }

        let num = sxy - sx * sy / n;
        let den = ((sxx - sx * sx / n) * (syy - sy * sy / n)).sqrt();
        if den == 0.0 || den.is_nan() { Ok(0.0) } else { Ok(num / den) }
    }
}

/// `dot / (‖x‖² + ‖y‖² - dot)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TanimotoCoefficient;

impl Similarity for TanimotoCoefficient {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        dims(&x, &y)?;
        let (dot, norm_x, norm_y) = dot_and_norms(&x, &y);
        let den = norm_x + norm_y - dot;
        if den == 0.0 { Ok(0.0) } else { Ok(dot / den) }
    }
}
