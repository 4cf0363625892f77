//! Model training module
//!
//! Provides the generator/model abstractions and the learner that selects
//! the best of several trained candidates:
//! - K-Nearest Neighbors
//! - Linear and logistic regression (gradient descent)
//! - Randomized train/test splits
//! - Best-of-trials [`Learner`]

mod config;
mod learner;
mod models;
pub mod knn;
pub mod linear_models;
pub mod sampling;

pub use config::LearnerConfig;
pub use knn::{KnnConfig, KnnGenerator, KnnModel};
pub use learner::{best, learn, Learner, LearningModel};
pub use linear_models::{
    LinearRegressionGenerator, LinearRegressionModel, LogisticRegressionGenerator,
    LogisticRegressionModel, RegressionConfig,
};
pub use models::{Generator, Model, TrainedModel};
pub use sampling::{split, training_count, RandomSource, TrialSplit};
