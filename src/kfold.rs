//! K-fold cross-validation over row indices.
//!
//! Rows are split into `n_splits` consecutive blocks; each block serves once
//! as the test set while the remaining rows form the training set. The first
//! `n_samples % n_splits` blocks hold one extra row. Without shuffling the
//! partition depends only on row order.

use crate::error::{PrepError, Result};
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

/// One train/test partition of the row indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fold {
    pub index: usize,
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
    seed: Option<u64>,
}

impl KFold {
    /// Unshuffled k-fold. Fails when `n_splits < 2`.
    pub fn new(n_splits: usize) -> Result<Self> {
        if n_splits < 2 {
            return Err(PrepError::InvalidConfig(format!(
                "k-fold cross-validation requires at least 2 splits, got {n_splits}"
            )));
        }
        Ok(Self {
            n_splits,
            seed: None,
        })
    }

    /// Shuffle indices with a seeded generator before partitioning.
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    pub fn is_shuffled(&self) -> bool {
        self.seed.is_some()
    }

    /// Folds over `n_samples` rows, produced lazily.
    pub fn split(&self, n_samples: usize) -> Result<Folds> {
        if self.n_splits > n_samples {
            return Err(PrepError::InsufficientSamples {
                n_splits: self.n_splits,
                n_samples,
            });
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if let Some(seed) = self.seed {
            let mut rng = StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        }

        info!(
            n_samples,
            n_splits = self.n_splits,
            shuffled = self.is_shuffled(),
            "K-fold: ~{} samples per fold",
            n_samples / self.n_splits
        );

        Ok(Folds {
            indices,
            n_splits: self.n_splits,
            next: 0,
        })
    }

    pub fn split_table(&self, df: &DataFrame) -> Result<Folds> {
        self.split(df.height())
    }
}

/// Iterator over the folds of a [`KFold`] split.
#[derive(Debug, Clone)]
pub struct Folds {
    indices: Vec<usize>,
    n_splits: usize,
    next: usize,
}

impl Folds {
    fn bounds(&self, fold: usize) -> (usize, usize) {
        let fold_size = self.indices.len() / self.n_splits;
        let remainder = self.indices.len() % self.n_splits;
        let start = fold * fold_size + fold.min(remainder);
        let end = start + fold_size + usize::from(fold < remainder);
        (start, end)
    }
}

impl Iterator for Folds {
    type Item = Fold;

    fn next(&mut self) -> Option<Fold> {
        if self.next >= self.n_splits {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let (start, end) = self.bounds(index);
        let test = self.indices[start..end].to_vec();
        let train = self.indices[..start]
            .iter()
            .chain(&self.indices[end..])
            .copied()
            .collect::<Vec<_>>();

        debug!(
            "Fold {}/{}: {} train, {} test",
            index + 1,
            self.n_splits,
            train.len(),
            test.len()
        );

        Some(Fold { index, train, test })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_splits - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Folds {}
