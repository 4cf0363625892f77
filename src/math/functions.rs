//! Scalar activation functions

/// Logistic squashing `1 / (1 + e^-z)`
pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
