//! Kernel functions
//!
//! A [`Kernel`] maps pairs of feature vectors to an inner product in some
//! feature space. `compute` builds the Gram matrix over the rows of a matrix,
//! `project` evaluates one new vector against every row.

use crate::error::{NumlError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Below this many rows the Gram matrix is filled sequentially
const PARALLEL_GRAM_ROWS: usize = 100;

pub trait Kernel: Send + Sync {
    /// Kernel value for one pair; must be symmetric in its arguments
    fn evaluate(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// Symmetric Gram matrix `K[i, j] = k(m_i, m_j)`
    fn compute(&self, m: ArrayView2<f64>) -> Array2<f64> {
        let n = m.nrows();
        let mut k = Array2::zeros((n, n));

        if n < PARALLEL_GRAM_ROWS {
            for i in 0..n {
                for j in i..n {
                    let val = self.evaluate(m.row(i), m.row(j));
                    k[[i, j]] = val;
                    k[[j, i]] = val;
                }
            }
            return k;
        }

        // upper triangle rows in parallel, mirrored afterwards
        let rows: Vec<Vec<(usize, f64)>> = (0..n)
            .into_par_iter()
            .map(|i| (i..n).map(|j| (j, self.evaluate(m.row(i), m.row(j)))).collect())
            .collect();

        for (i, row_vals) in rows.into_iter().enumerate() {
            for (j, val) in row_vals {
                k[[i, j]] = val;
                k[[j, i]] = val;
            }
        }
        k
    }

    /// `[k(m_0, x), k(m_1, x), ...]`
    fn project(&self, m: ArrayView2<f64>, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        NumlError::check_dims(m.ncols(), x.len())?;
        Ok(m.rows().into_iter().map(|row| self.evaluate(row, x)).collect())
    }
}

/// `xᵗy`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinearKernel;

impl Kernel for LinearKernel {
    fn evaluate(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        x.dot(&y)
    }
}

/// `(1 + xᵗy)^d`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolyKernel {
    pub dimension: i32,
}

impl PolyKernel {
    pub fn new(dimension: i32) -> Self {
        Self { dimension }
    }
}

impl Default for PolyKernel {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Kernel for PolyKernel {
    fn evaluate(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (1.0 + x.dot(&y)).powi(self.dimension)
    }
}

/// `exp(-‖x - y‖² / (2σ²))`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RbfKernel {
    pub sigma: f64,
}

impl RbfKernel {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }
}

impl Default for RbfKernel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for RbfKernel {
    fn evaluate(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        let diff = &x - &y;
        (-diff.dot(&diff) / (2.0 * self.sigma * self.sigma)).exp()
    }
}
