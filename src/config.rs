//! Configuration for a preparation run.
//!
//! [`PipelineConfig`] gathers everything the loader, splitter and fold
//! generator need. Build one with [`PipelineConfig::builder()`]; `build()`
//! validates the values.
//!
//! ```rust,ignore
//! use kfold_prep::PipelineConfig;
//!
//! let config = PipelineConfig::builder()
//!     .train_path("data/train.csv")
//!     .n_folds(5)
//!     .shuffle(true)
//!     .seed(42)
//!     .build()?;
//! ```

use crate::error::{PrepError, Result};
use crate::kfold::KFold;
use crate::loader::LoadOptions;
use crate::split::SplitOptions;
use std::path::PathBuf;

/// Default number of cross-validation folds.
pub const DEFAULT_FOLDS: usize = 10;

/// Default number of rows shown when previewing a table.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Default name of the label column.
pub const DEFAULT_LABEL_COLUMN: &str = "Class";

/// Field values read as missing, in addition to empty fields.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Table without labels, only loaded and previewed.
    /// Default: "test.csv"
    pub test_path: PathBuf,

    /// Table carrying the label column.
    /// Default: "train.csv"
    pub train_path: PathBuf,

    /// Default: "Class"
    pub label_column: String,

    /// Rows printed per table preview.
    /// Default: 10
    pub preview_rows: usize,

    /// Default: 10
    pub n_folds: usize,

    /// Shuffle row indices before partitioning.
    /// Default: false
    pub shuffle: bool,

    /// Seed used when `shuffle` is set. A missing seed means 0.
    pub seed: Option<u64>,

    /// Default: b','
    pub separator: u8,

    /// Tokens read as missing values.
    pub null_values: Vec<String>,

    /// Keep the label column inside the feature matrix when it is not the
    /// first column.
    /// Default: false
    pub keep_label_in_features: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_path: PathBuf::from("test.csv"),
            train_path: PathBuf::from("train.csv"),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            n_folds: DEFAULT_FOLDS,
            shuffle: false,
            seed: None,
            separator: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            keep_label_in_features: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Options for [`crate::loader::load_table`].
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator,
            null_values: self.null_values.clone(),
        }
    }

    /// Options for [`crate::split::split_features_labels`].
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            label_column: self.label_column.clone(),
            keep_label_in_features: self.keep_label_in_features,
        }
    }

    /// Fold generator for `n_folds`, shuffled when `shuffle` is set.
    pub fn kfold(&self) -> Result<KFold> {
        let kfold = KFold::new(self.n_folds)?;
        Ok(if self.shuffle {
            kfold.shuffled(self.seed.unwrap_or_default())
        } else {
            kfold
        })
    }
}

#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.test_path = path.into();
        self
    }

    pub fn train_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.train_path = path.into();
        self
    }

    pub fn label_column(mut self, name: impl Into<String>) -> Self {
        self.config.label_column = name.into();
        self
    }

    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.config.preview_rows = rows;
        self
    }

    /// Set the number of folds. [`build()`](Self::build) rejects values below 2.
    pub fn n_folds(mut self, folds: usize) -> Self {
        self.config.n_folds = folds;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.config.shuffle = shuffle;
        self
    }

    /// Seed for the shuffle. Only valid together with `shuffle(true)`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn keep_label_in_features(mut self, keep: bool) -> Self {
        self.config.keep_label_in_features = keep;
        self
    }

    /// # Errors
    ///
    /// Returns [`PrepError::InvalidConfig`] if:
    /// - `n_folds` is less than 2
    /// - `label_column` is empty
    /// - a seed is set without shuffling
    pub fn build(self) -> Result<PipelineConfig> {
        if self.config.n_folds < 2 {
            return Err(PrepError::InvalidConfig(
                "n_folds must be at least 2".to_string(),
            ));
        }

        if self.config.label_column.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "label_column must not be empty".to_string(),
            ));
        }

        if self.config.seed.is_some() && !self.config.shuffle {
            return Err(PrepError::InvalidConfig(
                "seed has no effect unless shuffle is enabled".to_string(),
            ));
        }

        Ok(self.config)
    }
}
