//! Best-of-trials learner
//!
//! For each generator the learner converts the examples once, draws `repeat`
//! independent train/test splits, trains and scores one model per split in
//! parallel, and keeps the model with the highest held-out accuracy.

use ndarray::{Array1, Array2, Axis};
use polars::prelude::DataFrame;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::config::LearnerConfig;
use super::models::{Generator, Model, TrainedModel};
use super::sampling::{split, RandomSource, TrialSplit};
use crate::data::{rows_from_frame, Descriptor, Record};
use crate::error::{NumlError, Result};

/// Outcome of a learning run for one generator
#[derive(Debug)]
pub struct LearningModel<'g> {
    pub generator: &'g dyn Generator,
    pub model: TrainedModel,
    /// Share of held-out examples predicted correctly; NaN for an empty test set
    pub accuracy: f64,
}

/// Index of the highest score. NaN never wins over a number; ties keep the
/// earliest index; an all-NaN input yields index 0.
fn best_index(scores: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    let mut any = false;
    for (i, score) in scores.into_iter().enumerate() {
        any = true;
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if score <= b => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i).or(if any { Some(0) } else { None })
}

/// Model with the maximum accuracy; `None` for an empty slice
pub fn best<'a, 'g>(models: &'a [LearningModel<'g>]) -> Option<&'a LearningModel<'g>> {
    best_index(models.iter().map(|m| m.accuracy)).map(|i| &models[i])
}

/// Learn with a one-off configuration
pub fn learn<'g, R: Record>(
    examples: &[R],
    training_percentage: f64,
    repeat: usize,
    generator: &'g dyn Generator,
) -> Result<LearningModel<'g>> {
    Learner::new(LearnerConfig::new(training_percentage, repeat)).learn(examples, generator)
}

struct Trial {
    model: TrainedModel,
    accuracy: f64,
}

/// Orchestrates splitting, training and model selection
#[derive(Debug, Clone)]
pub struct Learner {
    config: LearnerConfig,
    rng: Arc<RandomSource>,
}

impl Learner {
    pub fn new(config: LearnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Arc::new(RandomSource::seeded(seed)),
            None => RandomSource::shared(),
        };
        Self { config, rng }
    }

    /// Replace the random source used for splits
    pub fn with_random_source(mut self, rng: Arc<RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Best of `repeat` trials for a single generator
    pub fn learn<'g, R: Record>(&self, examples: &[R], generator: &'g dyn Generator) -> Result<LearningModel<'g>> {
        self.config.validate()?;
        self.learn_one(examples, generator)
    }

    /// Best of `repeat` trials for each generator, in input order
    pub fn learn_all<'g, R: Record>(
        &self,
        examples: &[R],
        generators: &[&'g dyn Generator],
    ) -> Result<Vec<LearningModel<'g>>> {
        if generators.is_empty() {
            return Err(NumlError::InvalidConfiguration("no generators supplied".to_string()));
        }
        self.config.validate()?;

        generators
            .iter()
            .map(|&generator| self.learn_one(examples, generator))
            .collect()
    }

    /// [`Learner::learn`] over the rows of a `DataFrame`
    pub fn learn_frame<'g>(&self, df: &DataFrame, generator: &'g dyn Generator) -> Result<LearningModel<'g>> {
        let rows = rows_from_frame(df)?;
        self.learn(&rows, generator)
    }

    /// [`Learner::learn_all`] over the rows of a `DataFrame`
    pub fn learn_frame_all<'g>(
        &self,
        df: &DataFrame,
        generators: &[&'g dyn Generator],
    ) -> Result<Vec<LearningModel<'g>>> {
        let rows = rows_from_frame(df)?;
        self.learn_all(&rows, generators)
    }

    fn learn_one<'g, R: Record>(&self, examples: &[R], generator: &'g dyn Generator) -> Result<LearningModel<'g>> {
        let start = Instant::now();
        let total = examples.len();
        if total == 0 {
            return Err(NumlError::InvalidInput("no examples to learn from".to_string()));
        }

        // converted once, shared read-only by every trial
        let descriptor = generator.descriptor().fit(examples)?;
        let (x, y) = descriptor.convert(examples)?;

        let repeat = self.config.repeat;
        let pct = self.config.training_percentage;
        let splits: Vec<TrialSplit> = (0..repeat).map(|_| split(total, pct, &self.rng)).collect();
        let test_count = splits.first().map(|s| s.test_indices.len()).unwrap_or(0);

        info!(
            generator = generator.name(),
            total,
            repeat,
            test_count,
            "Learning"
        );

        let trials: Vec<Trial> = splits
            .par_iter()
            .enumerate()
            .map(|(i, s)| {
                let trial = run_trial(examples, &x, &y, &descriptor, generator, s)?;
                debug!(generator = generator.name(), trial = i, accuracy = trial.accuracy, "Trial finished");
                Ok(trial)
            })
            .collect::<Result<Vec<Trial>>>()?;

        let idx = best_index(trials.iter().map(|t| t.accuracy))
            .ok_or_else(|| NumlError::InvalidConfiguration("no trials were run".to_string()))?;
        let Trial { model, accuracy } = trials
            .into_iter()
            .nth(idx)
            .ok_or_else(|| NumlError::InvalidInput(format!("trial {} missing", idx)))?;

        info!(
            generator = generator.name(),
            trial = idx,
            accuracy,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "Selected best model"
        );

        Ok(LearningModel { generator, model, accuracy })
    }
}

/// Train on the split's training rows and score against its test records
fn run_trial<R: Record>(
    examples: &[R],
    x: &Array2<f64>,
    y: &Array1<f64>,
    descriptor: &Descriptor,
    generator: &dyn Generator,
    split: &TrialSplit,
) -> Result<Trial> {
    let x_train = x.select(Axis(0), &split.train_indices);
    let y_train = y.select(Axis(0), &split.train_indices);

    let mut model = generator.generate(x_train.view(), y_train.view())?;
    model.set_descriptor(descriptor.clone());

    let label = descriptor.label()?;
    let mut correct = 0usize;
    for &i in &split.test_indices {
        let example = &examples[i];
        let raw_truth = example
            .field(&label.name)
            .ok_or_else(|| NumlError::MissingField(label.name.clone()))?;
        let truth = label.normalize(&raw_truth);

        let features = descriptor.convert_one(example, false)?;
        let prediction = label.decode(model.predict(features.view())?);
        if prediction == truth {
            correct += 1;
        }
    }

    // 0 / 0 = NaN for an empty test set
    let accuracy = correct as f64 / split.test_indices.len() as f64;
    Ok(Trial { model, accuracy })
}
