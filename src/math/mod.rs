//! Numeric building blocks shared by the generators
//!
//! - [`impurity`] - label impurity and information gain
//! - [`metrics`] - distance and similarity functions
//! - [`kernels`] - Gram matrices and kernel projections
//! - [`linkers`] - aggregate distance between groups of vectors
//! - [`cost`], [`regularization`], [`gradient_descent`] - parametric optimization

pub mod cost;
pub mod functions;
pub mod gradient_descent;
pub mod impurity;
pub mod kernels;
pub mod linkers;
pub mod metrics;
pub mod regularization;

pub use cost::{CostFunction, LinearCostFunction, LogisticCostFunction};
pub use functions::logistic;
pub use gradient_descent::GradientDescent;
pub use impurity::{segment, Conditional, Entropy, Gini, Misclassification, Impurity, Range};
pub use kernels::{Kernel, LinearKernel, PolyKernel, RbfKernel};
pub use linkers::{AverageLinker, CentroidLinker, CompleteLinker, Linker, SingleLinker};
pub use metrics::{
    CosineDistance, CosineSimilarity, Distance, EuclideanDistance, EuclideanSimilarity,
    HammingDistance, ManhattanDistance, PearsonCorrelation, Similarity, TanimotoCoefficient,
};
pub use regularization::{L2Regularizer, Regularizer};
