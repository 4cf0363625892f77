//! Impurity measures and information gain
//!
//! An [`Impurity`] scores how heterogeneous a label vector is. The provided
//! methods build conditional impurity and gain on top of `calculate`, either
//! splitting a feature on its distinct values or on half-open [`Range`]s.

use crate::error::{NumlError, Result};
use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Half-open interval `[min, max)`; a point range (`min == max`) holds exactly one value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn point(value: f64) -> Self {
        Self { min: value, max: value }
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        if self.is_point() {
            value == self.min
        } else {
            value >= self.min && value < self.max
        }
    }
}

/// Outcome of a conditional impurity computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// Σ P(x ∈ segment) · impurity(y | x ∈ segment)
    pub value: f64,
    /// Partition of x used, ordered by `min`
    pub segments: Vec<Range>,
    /// True when x was split on its distinct values
    pub discrete: bool,
}

/// Split `x`'s domain into `segments` equal-width ranges ordered by `min`.
/// The last range is widened just past the maximum so every value falls in a range.
pub fn segment(x: ArrayView1<f64>, segments: usize) -> Result<Vec<Range>> {
    if segments == 0 {
        return Err(NumlError::InvalidInput("segments must be at least 1".to_string()));
    }
    if x.is_empty() {
        return Err(NumlError::InvalidInput("cannot segment an empty vector".to_string()));
    }

    let min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let upper = max + max.abs().max(1.0) * 1e-9;
    let step = (max - min) / segments as f64;

    if step == 0.0 {
        return Ok(vec![Range::new(min, upper)]);
    }

    Ok((0..segments)
        .map(|i| {
            let lo = min + i as f64 * step;
            let hi = if i + 1 == segments { upper } else { min + (i + 1) as f64 * step };
            Range::new(lo, hi)
        })
        .collect())
}

/// Distinct values of `labels` in ascending order with their counts
pub(crate) fn frequencies(labels: ArrayView1<f64>) -> Vec<(f64, usize)> {
    let mut sorted: Vec<f64> = labels.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut counts: Vec<(f64, usize)> = Vec::new();
    for v in sorted {
        match counts.last_mut() {
            Some((last, n)) if *last == v => *n += 1,
            _ => counts.push((v, 1)),
        }
    }
    counts
}

fn check_labels(labels: ArrayView1<f64>) -> Result<f64> {
    if labels.is_empty() {
        return Err(NumlError::InvalidInput("impurity of an empty label vector".to_string()));
    }
    Ok(labels.len() as f64)
}

/// A measure of label heterogeneity
pub trait Impurity: Send + Sync {
    fn name(&self) -> &'static str;

    /// Impurity of `labels`; non-negative, zero for a single-class vector
    fn calculate(&self, labels: ArrayView1<f64>) -> Result<f64>;

    /// Impurity of `y` conditioned on each distinct value of `x`
    fn conditional(&self, y: ArrayView1<f64>, x: ArrayView1<f64>) -> Result<Conditional> {
        NumlError::check_dims(y.len(), x.len())?;
        let n = check_labels(x)?;

        let mut value = 0.0;
        let mut segments = Vec::new();
        for (v, count) in frequencies(x) {
            let idx: Vec<usize> = x
                .iter()
                .enumerate()
                .filter(|(_, &xi)| xi == v)
                .map(|(i, _)| i)
                .collect();
            let subset = y.select(Axis(0), &idx);
            value += (count as f64 / n) * self.calculate(subset.view())?;
            segments.push(Range::point(v));
        }

        Ok(Conditional { value, segments, discrete: true })
    }

    /// `calculate(y) - conditional(y, x)`
    fn gain(&self, y: ArrayView1<f64>, x: ArrayView1<f64>) -> Result<f64> {
        Ok(self.calculate(y)? - self.conditional(y, x)?.value)
    }

    /// Gain normalized by `calculate(y)`; NaN or infinite when `y` is pure
    fn relative_gain(&self, y: ArrayView1<f64>, x: ArrayView1<f64>) -> Result<f64> {
        Ok(self.gain(y, x)? / self.calculate(y)?)
    }

    /// Impurity of `y` conditioned on `segments` equal-width ranges of `x`
    fn segmented_conditional(&self, y: ArrayView1<f64>, x: ArrayView1<f64>, segments: usize) -> Result<Conditional> {
        let ranges = segment(x, segments)?;
        self.ranged_conditional(y, x, &ranges)
    }

    /// Impurity of `y` conditioned on caller-supplied ranges of `x`.
    /// Values outside every range and empty ranges contribute nothing.
    fn ranged_conditional(&self, y: ArrayView1<f64>, x: ArrayView1<f64>, ranges: &[Range]) -> Result<Conditional> {
        NumlError::check_dims(y.len(), x.len())?;
        let n = check_labels(x)?;

        let mut segments = ranges.to_vec();
        segments.sort_by(|a, b| a.min.total_cmp(&b.min));

        let mut value = 0.0;
        for range in &segments {
            let idx: Vec<usize> = x
                .iter()
                .enumerate()
                .filter(|(_, &xi)| range.contains(xi))
                .map(|(i, _)| i)
                .collect();
            if idx.is_empty() {
                continue;
            }
            let subset = y.select(Axis(0), &idx);
            value += (idx.len() as f64 / n) * self.calculate(subset.view())?;
        }

        Ok(Conditional { value, segments, discrete: false })
    }

    fn segmented_gain(&self, y: ArrayView1<f64>, x: ArrayView1<f64>, segments: usize) -> Result<f64> {
        Ok(self.calculate(y)? - self.segmented_conditional(y, x, segments)?.value)
    }

    fn segmented_relative_gain(&self, y: ArrayView1<f64>, x: ArrayView1<f64>, segments: usize) -> Result<f64> {
        Ok(self.segmented_gain(y, x, segments)? / self.calculate(y)?)
    }
}

/// Classification error: `1 - max_i P(y = i)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Misclassification;

impl Impurity for Misclassification {
    fn name(&self) -> &'static str {
        "misclassification"
    }

    fn calculate(&self, labels: ArrayView1<f64>) -> Result<f64> {
        let n = check_labels(labels)?;
        let max = frequencies(labels).iter().map(|&(_, c)| c).max().unwrap_or(0);
        Ok(1.0 - max as f64 / n)
    }
}

/// Shannon entropy in bits
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Entropy;

impl Impurity for Entropy {
    fn name(&self) -> &'static str {
        "entropy"
    }

    fn calculate(&self, labels: ArrayView1<f64>) -> Result<f64> {
        let n = check_labels(labels)?;
        let h: f64 = frequencies(labels)
            .iter()
            .map(|&(_, c)| {
                let p = c as f64 / n;
                -p * p.log2()
            })
            .sum();
        // -0.0 for a pure vector
        Ok(h.max(0.0))
    }
}

/// Gini impurity: `1 - Σ P(y = i)²`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Gini;

impl Impurity for Gini {
    fn name(&self) -> &'static str {
        "gini"
    }

    fn calculate(&self, labels: ArrayView1<f64>) -> Result<f64> {
        let n = check_labels(labels)?;
        let sum_sq: f64 = frequencies(labels)
            .iter()
            .map(|&(_, c)| (c as f64 / n).powi(2))
            .sum();
        Ok(1.0 - sum_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array1};

    #[test]
    fn test_pure_labels_have_zero_impurity() {
        let y = Array1::from_elem(10, 1.0);
        assert_eq!(Misclassification.calculate(y.view()).unwrap(), 0.0);
        assert_eq!(Entropy.calculate(y.view()).unwrap(), 0.0);
        assert!(Gini.calculate(y.view()).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_balanced_labels() {
        let y = arr1(&[0.0, 0.0, 1.0, 1.0]);
        assert!((Misclassification.calculate(y.view()).unwrap() - 0.5).abs() < 1e-12);
        assert!((Entropy.calculate(y.view()).unwrap() - 1.0).abs() < 1e-12);
        assert!((Gini.calculate(y.view()).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_labels_fail() {
        let y: Array1<f64> = Array1::zeros(0);
        assert!(Misclassification.calculate(y.view()).is_err());
    }

    #[test]
    fn test_conditional_never_exceeds_impurity() {
        let y = arr1(&[0.0, 0.0, 1.0, 1.0]);
        let x = arr1(&[0.0, 1.0, 0.0, 1.0]);
        let measures: Vec<Box<dyn Impurity>> = vec![Box::new(Misclassification), Box::new(Entropy), Box::new(Gini)];
        for m in measures {
            let h = m.calculate(y.view()).unwrap();
            let c = m.conditional(y.view(), x.view()).unwrap();
            assert!(c.value >= 0.0 && c.value <= h + 1e-12, "{} conditional out of bounds", m.name());
            assert!(c.discrete);
            assert_eq!(c.segments, vec![Range::point(0.0), Range::point(1.0)]);
        }
    }

    #[test]
    fn test_perfect_split_gain() {
        let y = arr1(&[0.0, 0.0, 1.0, 1.0]);
        let x = arr1(&[5.0, 5.0, 7.0, 7.0]);
        assert!((Misclassification.gain(y.view(), x.view()).unwrap() - 0.5).abs() < 1e-12);
        assert!((Misclassification.relative_gain(y.view(), x.view()).unwrap() - 1.0).abs() < 1e-12);
        assert!((Entropy.gain(y.view(), x.view()).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_gain_of_pure_labels_is_undefined() {
        let y = arr1(&[1.0, 1.0, 1.0]);
        let x = arr1(&[1.0, 2.0, 3.0]);
        assert!(!Misclassification.relative_gain(y.view(), x.view()).unwrap().is_finite());
    }

    #[test]
    fn test_segmented_conditional() {
        let y = arr1(&[0.0, 0.0, 1.0, 1.0]);
        let x = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let c = Misclassification.segmented_conditional(y.view(), x.view(), 2).unwrap();
        assert!(!c.discrete);
        assert_eq!(c.segments.len(), 2);
        assert_eq!(c.segments[0], Range::new(1.0, 2.5));
        assert!(c.segments[1].contains(4.0));
        assert_eq!(c.value, 0.0);
        assert!((Misclassification.segmented_gain(y.view(), x.view(), 2).unwrap() - 0.5).abs() < 1e-12);
        assert!((Misclassification.segmented_relative_gain(y.view(), x.view(), 2).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranged_conditional_orders_by_min() {
        let y = arr1(&[0.0, 1.0, 1.0, 0.0]);
        let x = arr1(&[0.5, 1.5, 2.5, 3.5]);
        let ranges = [Range::new(2.0, 4.0), Range::new(0.0, 2.0)];
        let c = Gini.ranged_conditional(y.view(), x.view(), &ranges).unwrap();
        assert_eq!(c.segments[0].min, 0.0);
        assert_eq!(c.segments[1].min, 2.0);
        assert!((c.value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_conditional_dimension_mismatch() {
        let y = arr1(&[0.0, 1.0]);
        let x = arr1(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            Misclassification.conditional(y.view(), x.view()),
            Err(NumlError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_segment_constant_vector() {
        let x = arr1(&[3.0, 3.0]);
        let ranges = segment(x.view(), 4).unwrap();
        assert_eq!(ranges.len(), 1);
        assert!(ranges[0].contains(3.0));
    }
}
