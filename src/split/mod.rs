//! Reproducible train/test splitting.

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::NerPrepError;

/// Split options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitOptions {
    /// Fraction of the corpus that goes to the test set, in `[0.0, 1.0]`.
    pub test_fraction: f64,
    /// Seed for the shuffle. The same seed and input order always give the
    /// same split.
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.1,
            seed: 42,
        }
    }
}

/// Validate split options before running.
pub fn validate_split_options(opts: &SplitOptions) -> Result<(), NerPrepError> {
    if !opts.test_fraction.is_finite() {
        return Err(NerPrepError::InvalidSplitParams {
            message: "test fraction must be a finite number".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&opts.test_fraction) {
        return Err(NerPrepError::InvalidSplitParams {
            message: "test fraction must be in the interval [0.0, 1.0]".to_string(),
        });
    }

    Ok(())
}

/// Number of items that go to the test set: `floor(fraction * total)`.
pub fn test_count(total: usize, test_fraction: f64) -> usize {
    let raw = (test_fraction * total as f64).floor() as usize;
    raw.min(total)
}

/// A train/test partition.
#[derive(Clone, Debug, PartialEq)]
pub struct Split<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

impl<T> Split<T> {
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }
}

/// Shuffles `items` with a seeded generator and splits off the test tail.
///
/// After the shuffle the last `test_count` items form the test set and the
/// rest form the training set. An empty input gives two empty sets.
pub fn split_corpus<T>(mut items: Vec<T>, opts: &SplitOptions) -> Result<Split<T>, NerPrepError> {
    validate_split_options(opts)?;

    let mut rng = StdRng::seed_from_u64(opts.seed);
    items.shuffle(&mut rng);

    let total = items.len();
    let test_len = test_count(total, opts.test_fraction);
    let test = items.split_off(total - test_len);

    tracing::info!(
        train = items.len(),
        test = test.len(),
        seed = opts.seed,
        "corpus split"
    );

    Ok(Split { train: items, test })
}
