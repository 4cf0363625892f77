//! Coefficient penalties for the cost functions
//!
//! The bias term `theta[0]` is never penalized.

use crate::error::{NumlError, Result};
use ndarray::{s, Array1, ArrayView1};

pub trait Regularizer: Send + Sync {
    /// Penalized cost
    fn regularize_cost(&self, cost: f64, theta: ArrayView1<f64>, m: usize, lambda: f64) -> f64;

    /// Penalized gradient; `theta` and `gradient` must have equal length
    fn regularize_gradient(
        &self,
        theta: ArrayView1<f64>,
        gradient: Array1<f64>,
        m: usize,
        lambda: f64,
    ) -> Result<Array1<f64>>;
}

/// Ridge penalty: `(λ/2m)·Σθ[1:]²` on the cost, `(λ/m)·θ[i]` on gradient components `i ≥ 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Regularizer;

impl Regularizer for L2Regularizer {
    fn regularize_cost(&self, cost: f64, theta: ArrayView1<f64>, m: usize, lambda: f64) -> f64 {
        if theta.len() < 2 {
            return cost;
        }
        let tail = theta.slice(s![1..]);
        cost + (lambda / (2.0 * m as f64)) * tail.dot(&tail)
    }

    fn regularize_gradient(
        &self,
        theta: ArrayView1<f64>,
        mut gradient: Array1<f64>,
        m: usize,
        lambda: f64,
    ) -> Result<Array1<f64>> {
        NumlError::check_dims(theta.len(), gradient.len())?;
        let scale = lambda / m as f64;
        for i in 1..gradient.len() {
            gradient[i] += scale * theta[i];
        }
        Ok(gradient)
    }
}
