//! numl - supervised learning engine
//!
//! Turns a collection of labeled examples into a selected, evaluated model:
//! the [`training::Learner`] splits the data, trains one candidate per trial
//! in parallel and keeps the one with the best held-out accuracy.
//!
//! # Modules
//!
//! - [`data`] - Records, values and the feature/label [`data::Descriptor`]
//! - [`math`] - Impurity, metrics, kernels, linkers and gradient descent
//! - [`training`] - Generators, models and the learner

// Core error handling
pub mod error;

pub mod data;
pub mod math;
pub mod training;

pub use error::{NumlError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{NumlError, Result};

    // Data
    pub use crate::data::{rows_from_frame, Descriptor, Property, PropertyKind, Record, Row, Value};

    // Math
    pub use crate::math::{
        CostFunction, Distance, GradientDescent, Impurity, Kernel, Linker, Regularizer, Similarity,
    };

    // Training
    pub use crate::training::{
        best, Generator, KnnGenerator, Learner, LearnerConfig, LearningModel,
        LinearRegressionGenerator, LogisticRegressionGenerator, Model, RandomSource,
        RegressionConfig, TrainedModel,
    };
}
