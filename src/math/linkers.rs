//! Linkage criteria: distance between two groups of row vectors

use crate::error::{NumlError, Result};
use crate::math::metrics::{Distance, EuclideanDistance};
use ndarray::{ArrayView2, Axis};

/// Aggregate distance between the rows of `x` and the rows of `y`
pub trait Linker: Send + Sync {
    fn distance(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64>;
}

fn check_groups(x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> Result<()> {
    if x.nrows() == 0 || y.nrows() == 0 {
        return Err(NumlError::InvalidInput("linkage over an empty group".to_string()));
    }
    NumlError::check_dims(x.ncols(), y.ncols())
}

/// Fold every pairwise distance between the two groups
fn fold_pairs<D: Distance>(
    metric: &D,
    x: &ArrayView2<f64>,
    y: &ArrayView2<f64>,
    init: f64,
    f: impl Fn(f64, f64) -> f64,
) -> Result<f64> {
    let mut acc = init;
    for xi in x.outer_iter() {
        for yj in y.outer_iter() {
            acc = f(acc, metric.compute(xi, yj)?);
        }
    }
    Ok(acc)
}

/// Minimum pairwise distance
#[derive(Debug, Clone, Default)]
pub struct SingleLinker<D: Distance = EuclideanDistance> {
    pub metric: D,
}

impl<D: Distance> SingleLinker<D> {
    pub fn new(metric: D) -> Self {
        Self { metric }
    }
}

impl<D: Distance> Linker for SingleLinker<D> {
    fn distance(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64> {
        check_groups(&x, &y)?;
        fold_pairs(&self.metric, &x, &y, f64::INFINITY, f64::min)
    }
}

/// Maximum pairwise distance
#[derive(Debug, Clone, Default)]
pub struct CompleteLinker<D: Distance = EuclideanDistance> {
    pub metric: D,
}

impl<D: Distance> CompleteLinker<D> {
    pub fn new(metric: D) -> Self {
        Self { metric }
    }
}

impl<D: Distance> Linker for CompleteLinker<D> {
    fn distance(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64> {
        check_groups(&x, &y)?;
        fold_pairs(&self.metric, &x, &y, f64::NEG_INFINITY, f64::max)
    }
}

/// Mean pairwise distance.
///
/// Only pairs `(i, j)` with `j > i` are summed, yet the sum is divided by
/// `|x| · |y|`; the result is an approximation of the all-pairs mean.
#[derive(Debug, Clone, Default)]
pub struct AverageLinker<D: Distance = EuclideanDistance> {
    pub metric: D,
}

impl<D: Distance> AverageLinker<D> {
    pub fn new(metric: D) -> Self {
        Self { metric }
    }
}

impl<D: Distance> Linker for AverageLinker<D> {
    fn distance(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64> {
        check_groups(&x, &y)?;
        let mut sum = 0.0;
        for i in 0..x.nrows() {
            for j in (i + 1)..y.nrows() {
                sum += self.metric.compute(x.row(i), y.row(j))?;
            }
        }
        Ok(sum / (x.nrows() * y.nrows()) as f64)
    }
}

/// Distance between the two group means
#[derive(Debug, Clone, Default)]
pub struct CentroidLinker<D: Distance = EuclideanDistance> {
    pub metric: D,
}

impl<D: Distance> CentroidLinker<D> {
    pub fn new(metric: D) -> Self {
        Self { metric }
    }
}

impl<D: Distance> Linker for CentroidLinker<D> {
    fn distance(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64> {
        check_groups(&x, &y)?;
        let cx = x
            .mean_axis(Axis(0))
            .ok_or_else(|| NumlError::InvalidInput("empty group".to_string()))?;
        let cy = y
            .mean_axis(Axis(0))
            .ok_or_else(|| NumlError::InvalidInput("empty group".to_string()))?;
        self.metric.compute(cx.view(), cy.view())
    }
}
