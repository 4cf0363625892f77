//! Linear and logistic regression trained by gradient descent
//!
//! Both generators prepend a bias column of ones, start from a zero
//! coefficient vector and fit it with [`GradientDescent`] under an L2 penalty.

use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::models::{Generator, Model, TrainedModel};
use crate::data::Descriptor;
use crate::error::{NumlError, Result};
use crate::math::cost::{CostFunction, LinearCostFunction, LogisticCostFunction};
use crate::math::functions::logistic;
use crate::math::gradient_descent::GradientDescent;
use crate::math::regularization::L2Regularizer;

/// Gradient-descent settings shared by both regressions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionConfig {
    pub max_iterations: usize,
    pub learning_rate: f64,
    /// L2 strength; 0 disables regularization
    pub lambda: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            learning_rate: 0.1,
            lambda: 0.0,
        }
    }
}

impl RegressionConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    fn optimizer(&self) -> GradientDescent {
        GradientDescent::new(self.max_iterations, self.learning_rate, self.lambda)
    }
}

/// `[1 | x]`
fn with_bias(x: ArrayView2<f64>) -> Result<Array2<f64>> {
    let ones = Array2::ones((x.nrows(), 1));
    Ok(concatenate(Axis(1), &[ones.view(), x.view()])?)
}

/// `θ · [1, features]`
fn biased_dot(theta: &Array1<f64>, features: ArrayView1<f64>) -> Result<f64> {
    NumlError::check_dims(theta.len(), features.len() + 1)?;
    Ok(theta[0] + theta.slice(ndarray::s![1..]).dot(&features))
}

fn fit(
    config: &RegressionConfig,
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    cost_function: &dyn CostFunction,
) -> Result<Array1<f64>> {
    NumlError::check_dims(x.nrows(), y.len())?;
    let xb = with_bias(x)?;
    let theta0 = Array1::zeros(xb.ncols());
    if xb.nrows() == 0 {
        // no rows: theta stays at theta0
        debug!(n_params = theta0.len(), "empty training slice, keeping initial theta");
        return Ok(theta0);
    }
    let (_, theta) = config
        .optimizer()
        .run(theta0.view(), xb.view(), y, cost_function, &L2Regularizer)?;
    Ok(theta)
}

/// Produces [`LinearRegressionModel`]s
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionGenerator {
    pub config: RegressionConfig,
    pub descriptor: Descriptor,
}

impl LinearRegressionGenerator {
    pub fn new(descriptor: Descriptor, config: RegressionConfig) -> Self {
        Self { config, descriptor }
    }
}

impl Generator for LinearRegressionGenerator {
    fn name(&self) -> &str {
        "linear_regression"
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn generate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<TrainedModel> {
        let theta = fit(&self.config, x, y, &LinearCostFunction)?;
        Ok(TrainedModel::LinearRegression(LinearRegressionModel {
            theta,
            descriptor: self.descriptor.clone(),
        }))
    }
}

/// Learned coefficients, bias first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    pub theta: Array1<f64>,
    pub descriptor: Descriptor,
}

impl Model for LinearRegressionModel {
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64> {
        biased_dot(&self.theta, features)
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn set_descriptor(&mut self, descriptor: Descriptor) {
        self.descriptor = descriptor;
    }
}

/// Produces [`LogisticRegressionModel`]s for 0/1 labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionGenerator {
    pub config: RegressionConfig,
    pub descriptor: Descriptor,
}

impl LogisticRegressionGenerator {
    pub fn new(descriptor: Descriptor, config: RegressionConfig) -> Self {
        Self { config, descriptor }
    }
}

impl Generator for LogisticRegressionGenerator {
    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn generate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<TrainedModel> {
        let theta = fit(&self.config, x, y, &LogisticCostFunction)?;
        Ok(TrainedModel::LogisticRegression(LogisticRegressionModel {
            theta,
            descriptor: self.descriptor.clone(),
        }))
    }
}

/// Learned coefficients, bias first; predicts 1.0 when `logistic(θ·x) >= 0.5`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    pub theta: Array1<f64>,
    pub descriptor: Descriptor,
}

impl LogisticRegressionModel {
    /// P(label = 1)
    pub fn probability(&self, features: ArrayView1<f64>) -> Result<f64> {
        Ok(logistic(biased_dot(&self.theta, features)?))
    }
}

impl Model for LogisticRegressionModel {
    fn predict(&self, features: ArrayView1<f64>) -> Result<f64> {
        Ok(if self.probability(features)? >= 0.5 { 1.0 } else { 0.0 })
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn set_descriptor(&mut self, descriptor: Descriptor) {
        self.descriptor = descriptor;
    }
}
