//! Dataset preparation for a classification exercise.
//!
//! Loads CSV tables with polars, drops rows holding missing values, then either
//! splits a table into a feature matrix and label vector or partitions its rows
//! into k cross-validation folds.
//!
//! ```rust,ignore
//! use kfold_prep::{load_table, split_features_labels, KFold, LoadOptions, SplitOptions};
//! use std::path::Path;
//!
//! let train = load_table(Path::new("train.csv"), &LoadOptions::default())?;
//!
//! let dataset = split_features_labels(&train, &SplitOptions::default())?;
//! println!("{:?}", dataset.features().dim());
//!
//! for fold in KFold::new(10)?.split_table(&train)? {
//!     println!("TRAIN: {:?} TEST: {:?}", fold.train, fold.test);
//! }
//! ```

pub mod config;
pub mod error;
pub mod kfold;
pub mod loader;
pub mod split;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{PrepError, Result};
pub use kfold::{Fold, Folds, KFold};
pub use loader::{
    column_names, dataframe_from_csv, drop_missing, load_table, preview, LoadOptions,
};
pub use split::{array_from_dataframe, split_features_labels, Dataset, SplitOptions};
