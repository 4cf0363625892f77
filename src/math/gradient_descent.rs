//! Step-accepting gradient descent
//!
//! Each iteration evaluates cost and gradient at the best theta found so far.
//! If that cost beats the best cost seen, the step `theta -= alpha * gradient`
//! is taken; otherwise the learning rate is shrunk by [`ALPHA_DECAY`] and the
//! same point is evaluated again on the next iteration. There is no
//! convergence threshold: the loop runs `max_iterations + 1` times.

use crate::error::Result;
use crate::math::cost::CostFunction;
use crate::math::regularization::Regularizer;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Learning-rate multiplier applied after a rejected step
pub const ALPHA_DECAY: f64 = 0.99;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientDescent {
    pub max_iterations: usize,
    /// Initial learning rate (alpha)
    pub learning_rate: f64,
    /// Regularization strength; 0 disables the regularizer
    pub lambda: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            learning_rate: 0.01,
            lambda: 0.0,
        }
    }
}

impl GradientDescent {
    pub fn new(max_iterations: usize, learning_rate: f64, lambda: f64) -> Self {
        Self { max_iterations, learning_rate, lambda }
    }

    /// Returns `(best_cost, best_theta)` starting from `theta`
    pub fn run(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        cost_function: &dyn CostFunction,
        regularizer: &dyn Regularizer,
    ) -> Result<(f64, Array1<f64>)> {
        let mut best_theta = theta.to_owned();
        let mut best_cost = f64::MAX;
        let mut alpha = self.learning_rate;
        let mut rejected = 0usize;

        for _ in 0..=self.max_iterations {
            let cost = cost_function.compute_cost(best_theta.view(), x, y, self.lambda, regularizer)?;
            let gradient = cost_function.compute_gradient(best_theta.view(), x, y, self.lambda, regularizer)?;

            if cost < best_cost {
                best_theta.scaled_add(-alpha, &gradient);
                best_cost = cost;
            } else {
                alpha *= ALPHA_DECAY;
                rejected += 1;
            }
        }

        debug!(
            best_cost,
            final_alpha = alpha,
            rejected,
            iterations = self.max_iterations + 1,
            "Gradient descent finished"
        );

        Ok((best_cost, best_theta))
    }
}
