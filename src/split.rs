//! Separating a table into a feature matrix and a label vector.

use crate::config::DEFAULT_LABEL_COLUMN;
use crate::error::{PrepError, Result};
use ndarray::prelude::*;
use polars::prelude::*;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub label_column: String,
    /// Keep the label column among the features when it is not the first
    /// column, so the features are exactly "every column but the first".
    pub keep_label_in_features: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            keep_label_in_features: false,
        }
    }
}

/// Feature matrix and label vector with the same number of rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: Array2<f64>,
    labels: Series,
}

impl Dataset {
    /// Pairs a feature matrix with its labels.
    ///
    /// Fails with [`PrepError::SampleCountMismatch`] when the row counts differ.
    pub fn new(feature_names: Vec<String>, features: Array2<f64>, labels: Series) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(PrepError::SampleCountMismatch {
                features: features.nrows(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &Series {
        &self.labels
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Labels as numbers; fails for a non-numeric label column.
    pub fn labels_array(&self) -> Result<Array1<f64>> {
        if !self.labels.dtype().is_numeric() {
            return Err(PrepError::NonNumericLabel {
                column: self.labels.name().to_string(),
                dtype: self.labels.dtype().to_string(),
            });
        }

        let values = self.labels.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_no_null_iter().collect())
    }
}

/// Converts a DataFrame of numeric columns into a row-major 2D array.
///
/// An empty frame gives a `(0, width)` array whatever its column types, since
/// a header-only file infers every column as text.
pub fn array_from_dataframe(df: &DataFrame) -> Result<Array2<f64>> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(Array2::zeros((df.height(), df.width())));
    }

    for series in df.get_columns() {
        if !series.dtype().is_numeric() {
            return Err(PrepError::NonNumericFeature {
                column: series.name().to_string(),
                dtype: series.dtype().to_string(),
            });
        }
    }

    Ok(df.to_ndarray::<Float64Type>(IndexOrder::C)?)
}

/// Splits a table into features and labels.
///
/// The features are every column except the first, which is taken to be a
/// row identifier. Unless `keep_label_in_features` is set, the label column
/// is left out of the features as well.
pub fn split_features_labels(df: &DataFrame, options: &SplitOptions) -> Result<Dataset> {
    let labels = df
        .column(&options.label_column)
        .map_err(|_| PrepError::ColumnNotFound(options.label_column.clone()))?
        .clone();

    let feature_columns: Vec<Series> = df
        .get_columns()
        .iter()
        .skip(1)
        .filter(|s| options.keep_label_in_features || s.name() != options.label_column)
        .cloned()
        .collect();
    let feature_names = feature_columns
        .iter()
        .map(|s| s.name().to_string())
        .collect();

    let features = if feature_columns.is_empty() {
        Array2::zeros((df.height(), 0))
    } else {
        array_from_dataframe(&DataFrame::new(feature_columns)?)?
    };

    let dataset = Dataset::new(feature_names, features, labels)?;
    info!(
        samples = dataset.n_samples(),
        features = dataset.features().ncols(),
        label = %options.label_column,
        "Split dataset into features and labels"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    fn two_row_table() -> DataFrame {
        df! {
            "id" => [1i64, 2],
            "f" => [5i64, 6],
            "Class" => [0i64, 1],
        }
        .unwrap()
    }

    #[test]
    fn test_split_excludes_first_column_and_label() {
        let dataset = split_features_labels(&two_row_table(), &SplitOptions::default()).unwrap();

        assert_eq!(dataset.feature_names(), &["f".to_string()]);
        assert_eq!(dataset.features(), &array![[5.0], [6.0]]);
        assert_eq!(dataset.labels_array().unwrap(), array![0.0, 1.0]);
        assert_eq!(dataset.n_samples(), 2);
    }

    #[test]
    fn test_split_keep_label_is_positional_only() {
        let options = SplitOptions {
            keep_label_in_features: true,
            ..SplitOptions::default()
        };
        let dataset = split_features_labels(&two_row_table(), &options).unwrap();

        assert_eq!(dataset.features(), &array![[5.0, 0.0], [6.0, 1.0]]);
        assert_eq!(dataset.labels().len(), 2);
    }

    #[test]
    fn test_first_column_dropped_by_position() {
        let df = df! {
            "f" => [1.0f64, 2.0],
            "id" => [10i64, 20],
            "Class" => [1i64, 0],
        }
        .unwrap();

        let dataset = split_features_labels(&df, &SplitOptions::default()).unwrap();
        assert_eq!(dataset.feature_names(), &["id".to_string()]);
        assert_eq!(dataset.features(), &array![[10.0], [20.0]]);
    }

    #[test]
    fn test_missing_label_column() {
        let df = df! {
            "id" => [1i64, 2],
            "f" => [5i64, 6],
        }
        .unwrap();

        let result = split_features_labels(&df, &SplitOptions::default());
        assert!(matches!(result, Err(PrepError::ColumnNotFound(name)) if name == "Class"));
    }

    #[test]
    fn test_non_numeric_feature() {
        let df = df! {
            "id" => [1i64, 2],
            "colour" => ["red", "blue"],
            "Class" => [0i64, 1],
        }
        .unwrap();

        let result = split_features_labels(&df, &SplitOptions::default());
        assert!(matches!(result, Err(PrepError::NonNumericFeature { column, .. }) if column == "colour"));
    }

    #[test]
    fn test_string_labels() {
        let df = df! {
            "id" => [1i64, 2],
            "f" => [0.5f64, 0.7],
            "Class" => ["cat", "dog"],
        }
        .unwrap();

        let dataset = split_features_labels(&df, &SplitOptions::default()).unwrap();
        assert_eq!(dataset.labels().len(), 2);
        assert!(matches!(
            dataset.labels_array(),
            Err(PrepError::NonNumericLabel { .. })
        ));
    }

    #[test]
    fn test_only_id_and_label_gives_empty_features() {
        let df = df! {
            "id" => [1i64, 2, 3],
            "Class" => [0i64, 1, 1],
        }
        .unwrap();

        let dataset = split_features_labels(&df, &SplitOptions::default()).unwrap();
        assert_eq!(dataset.features().dim(), (3, 0));
    }

    #[test]
    fn test_empty_text_table_splits_to_zero_rows() {
        let df = DataFrame::new(vec![
            Series::new_empty("id", &DataType::Utf8),
            Series::new_empty("f", &DataType::Utf8),
            Series::new_empty("Class", &DataType::Utf8),
        ])
        .unwrap();

        let dataset = split_features_labels(&df, &SplitOptions::default()).unwrap();
        assert_eq!(dataset.features().dim(), (0, 1));
        assert_eq!(dataset.labels().len(), 0);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let features = Array2::<f64>::zeros((3, 1));
        let labels = Series::new("Class", &[0i64, 1]);

        let result = Dataset::new(vec!["f".to_string()], features, labels);
        assert!(matches!(
            result,
            Err(PrepError::SampleCountMismatch {
                features: 3,
                labels: 2
            })
        ));
    }
}
