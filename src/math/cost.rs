//! Cost functions for parametric generators
//!
//! Both functions apply the regularizer only when `lambda != 0`.

use crate::error::{NumlError, Result};
use crate::math::functions::logistic;
use crate::math::regularization::Regularizer;
use ndarray::{Array1, ArrayView1, ArrayView2};

pub trait CostFunction: Send + Sync {
    /// Map a linear response `xᵗθ` to the model output
    fn hypothesis(&self, z: f64) -> f64;

    fn compute_cost(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<f64>;

    /// Gradient of the cost; same length as `theta`
    fn compute_gradient(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<Array1<f64>>;
}

fn check_shapes(theta: &ArrayView1<f64>, x: &ArrayView2<f64>, y: &ArrayView1<f64>) -> Result<usize> {
    NumlError::check_dims(x.ncols(), theta.len())?;
    NumlError::check_dims(x.nrows(), y.len())?;
    if x.nrows() == 0 {
        return Err(NumlError::InvalidInput("cost over zero examples".to_string()));
    }
    Ok(x.nrows())
}

/// `Xᵗ(h - y) / m`, regularized when `lambda != 0`
fn gradient_from(
    theta: ArrayView1<f64>,
    x: ArrayView2<f64>,
    residual: Array1<f64>,
    m: usize,
    lambda: f64,
    regularizer: &dyn Regularizer,
) -> Result<Array1<f64>> {
    let gradient = x.t().dot(&residual) / m as f64;
    if lambda != 0.0 {
        regularizer.regularize_gradient(theta, gradient, m, lambda)
    } else {
        Ok(gradient)
    }
}

/// Mean squared residual `(1/2m)·Σ(Xθ - y)²`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearCostFunction;

impl CostFunction for LinearCostFunction {
    fn hypothesis(&self, z: f64) -> f64 {
        z
    }

    fn compute_cost(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<f64> {
        let m = check_shapes(&theta, &x, &y)?;
        let residual = x.dot(&theta) - &y;
        let cost = residual.dot(&residual) / (2.0 * m as f64);
        Ok(if lambda != 0.0 {
            regularizer.regularize_cost(cost, theta, m, lambda)
        } else {
            cost
        })
    }

    fn compute_gradient(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<Array1<f64>> {
        let m = check_shapes(&theta, &x, &y)?;
        let residual = x.dot(&theta) - &y;
        gradient_from(theta, x, residual, m, lambda, regularizer)
    }
}

/// Mean negative log-likelihood of `logistic(Xθ)`.
///
/// `log(1 - p)` is taken as `log(|1 - p|)` so rounding that pushes `p`
/// marginally above 1 does not produce NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticCostFunction;

impl CostFunction for LogisticCostFunction {
    fn hypothesis(&self, z: f64) -> f64 {
        logistic(z)
    }

    fn compute_cost(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<f64> {
        let m = check_shapes(&theta, &x, &y)?;
        let p = x.dot(&theta).mapv(logistic);
        let total: f64 = p
            .iter()
            .zip(y.iter())
            .map(|(&pi, &yi)| -yi * pi.ln() - (1.0 - yi) * (1.0 - pi).abs().ln())
            .sum();
        let cost = total / m as f64;
        Ok(if lambda != 0.0 {
            regularizer.regularize_cost(cost, theta, m, lambda)
        } else {
            cost
        })
    }

    fn compute_gradient(
        &self,
        theta: ArrayView1<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        lambda: f64,
        regularizer: &dyn Regularizer,
    ) -> Result<Array1<f64>> {
        let m = check_shapes(&theta, &x, &y)?;
        let residual = x.dot(&theta).mapv(logistic) - &y;
        gradient_from(theta, x, residual, m, lambda, regularizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::regularization::L2Regularizer;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_linear_cost_and_gradient() {
        let x = arr2(&[[1.0, 1.0], [1.0, 2.0]]);
        let y = arr1(&[2.0, 4.0]);
        let theta = arr1(&[0.0, 1.0]);
        // residuals -1, -2
        let cost = LinearCostFunction
            .compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        assert!((cost - 1.25).abs() < 1e-12);

        let grad = LinearCostFunction
            .compute_gradient(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        assert!((grad[0] + 1.5).abs() < 1e-12);
        assert!((grad[1] + 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_lambda_matches_unregularized() {
        let x = arr2(&[[1.0, 0.5, -1.0], [1.0, 2.0, 0.3], [1.0, -0.7, 1.1]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let theta = arr1(&[0.4, -1.2, 3.3]);

        let residual = x.dot(&theta) - &y;
        let expected_cost = residual.dot(&residual) / 6.0;
        let expected_grad = x.t().dot(&residual) / 3.0;

        let cost = LinearCostFunction
            .compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        let grad = LinearCostFunction
            .compute_gradient(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        assert_eq!(cost, expected_cost);
        assert_eq!(grad, expected_grad);
    }

    #[test]
    fn test_zero_lambda_matches_unregularized_log_loss() {
        let x = arr2(&[[1.0, 0.5, -1.0], [1.0, 2.0, 0.3], [1.0, -0.7, 1.1]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let theta = arr1(&[0.4, -1.2, 3.3]);

        let p = x.dot(&theta).mapv(logistic);
        let expected_cost = (-(p[0].ln()) - (1.0 - p[1]).abs().ln() - p[2].ln()) / 3.0;
        let expected_grad = x.t().dot(&(&p - &y)) / 3.0;

        let cost = LogisticCostFunction
            .compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        let grad = LogisticCostFunction
            .compute_gradient(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        assert!((cost - expected_cost).abs() < 1e-12);
        assert_eq!(grad, expected_grad);
    }

    #[test]
    fn test_regularization_leaves_bias_gradient() {
        let x = arr2(&[[1.0, 0.5, -1.0], [1.0, 2.0, 0.3], [1.0, -0.7, 1.1]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let theta = arr1(&[0.4, -1.2, 3.3]);
        let costs: Vec<Box<dyn CostFunction>> = vec![Box::new(LinearCostFunction), Box::new(LogisticCostFunction)];
        for cf in costs {
            let plain = cf.compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer).unwrap();
            let grad = cf.compute_gradient(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer).unwrap();
            let reg = cf.compute_cost(theta.view(), x.view(), y.view(), 1.0, &L2Regularizer).unwrap();
            let reg_grad = cf.compute_gradient(theta.view(), x.view(), y.view(), 1.0, &L2Regularizer).unwrap();
            assert!(reg > plain);
            assert_eq!(grad[0], reg_grad[0]);
            assert!((reg_grad[1] - grad[1] - (-1.2 / 3.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_logistic_cost_at_zero_theta() {
        let x = arr2(&[[1.0, 2.0], [1.0, -2.0]]);
        let y = arr1(&[1.0, 0.0]);
        let theta = arr1(&[0.0, 0.0]);
        let cost = LogisticCostFunction
            .compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .unwrap();
        assert!((cost - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let x = arr2(&[[1.0, 2.0]]);
        let y = arr1(&[1.0]);
        let theta = arr1(&[0.0, 0.0, 0.0]);
        assert!(LinearCostFunction
            .compute_cost(theta.view(), x.view(), y.view(), 0.0, &L2Regularizer)
            .is_err());
    }
}
