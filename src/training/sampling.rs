//! Random train/test partitioning
//!
//! Test rows are drawn by rejection sampling: draw a uniform index, redraw if
//! it was already chosen. This is cheap while the test share is small and
//! slows down as it approaches the whole dataset.

use parking_lot::Mutex;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

static SHARED: OnceLock<Arc<RandomSource>> = OnceLock::new();

/// Thread-safe random source used for sampling splits
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Seeded from the wall clock at one-second resolution
    pub fn from_clock() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::seeded(secs)
    }

    /// Process-wide source, seeded once at first use
    pub fn shared() -> Arc<RandomSource> {
        SHARED.get_or_init(|| Arc::new(Self::from_clock())).clone()
    }

    /// `count` distinct indices from `[0, total)`, in draw order
    pub fn sample_indices(&self, total: usize, count: usize) -> Vec<usize> {
        let count = count.min(total);
        let mut rng = self.rng.lock();
        let mut seen = HashSet::with_capacity(count);
        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            let i = rng.gen_range(0..total);
            if seen.insert(i) {
                drawn.push(i);
            }
        }
        drawn
    }
}

/// A single train/test partition of `0..total`
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSplit {
    /// Ascending
    pub train_indices: Vec<usize>,
    /// Ascending
    pub test_indices: Vec<usize>,
}

/// `floor(total * training_percentage)`
pub fn training_count(total: usize, training_percentage: f64) -> usize {
    ((total as f64 * training_percentage).floor() as usize).min(total)
}

/// Draw a fresh test sample of `total - training_count` rows; the rest train
pub fn split(total: usize, training_percentage: f64, rng: &RandomSource) -> TrialSplit {
    let test_count = total - training_count(total, training_percentage);
    let mut test_indices = rng.sample_indices(total, test_count);
    let chosen: HashSet<usize> = test_indices.iter().copied().collect();

    let train_indices: Vec<usize> = (0..total).filter(|i| !chosen.contains(i)).collect();
    test_indices.sort_unstable();

    TrialSplit {
        train_indices,
        test_indices,
    }
}
