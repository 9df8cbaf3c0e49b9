//! Reading CSV files into tables with incomplete rows removed.

use crate::error::{PrepError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// How a delimited file is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub separator: u8,
    /// Tokens read as missing values, in addition to empty fields.
    pub null_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            null_values: crate::config::DEFAULT_NULL_VALUES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Reads a CSV file with a header row into a DataFrame, without dropping anything.
pub fn dataframe_from_csv(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PrepError::FileNotFound(path.to_path_buf()));
    }

    let null_values = if options.null_values.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(options.null_values.clone()))
    };

    let df = CsvReader::from_path(path)?
        .has_header(true)
        .with_separator(options.separator)
        .with_null_values(null_values)
        .finish()?;

    Ok(df)
}

/// Reads a CSV file and removes every row holding a missing value.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    info!("Loading dataset from: {}", path.display());
    let raw = dataframe_from_csv(path, options)?;
    let rows_read = raw.height();

    let df = drop_missing(&raw)?;
    info!(
        rows_read,
        rows_dropped = rows_read - df.height(),
        columns = df.width(),
        "Dataset loaded: {}",
        path.display()
    );

    Ok(df)
}

/// Removes rows containing a null in any column, a NaN in a float column, or
/// a blank string (a quoted empty field) in a text column.
pub fn drop_missing(df: &DataFrame) -> Result<DataFrame> {
    let df = df.drop_nulls::<String>(None)?;

    let mut keep = vec![true; df.height()];
    for series in df.get_columns() {
        match series.dtype() {
            dtype if dtype.is_float() => {
                let values = series.cast(&DataType::Float64)?;
                for (row, value) in values.f64()?.into_iter().enumerate() {
                    if value.map_or(true, f64::is_nan) {
                        keep[row] = false;
                    }
                }
            }
            DataType::Utf8 => {
                for (row, value) in series.utf8()?.into_iter().enumerate() {
                    if value.map_or(true, |v| v.trim().is_empty()) {
                        keep[row] = false;
                    }
                }
            }
            _ => {}
        }
    }

    if keep.iter().all(|k| *k) {
        return Ok(df);
    }

    let missing_rows = keep.iter().filter(|k| !**k).count();
    debug!(missing_rows, "Dropping rows with NaN or blank values");
    let mask = BooleanChunked::from_slice("keep", &keep);
    Ok(df.filter(&mask)?)
}

/// The first `rows` rows of a table.
pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
    df.head(Some(rows))
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_drop_missing_removes_null_rows() {
        let df = df! {
            "id" => [1i64, 2, 3],
            "f" => [Some(5.0f64), None, Some(7.0)],
            "Class" => [0i64, 1, 0],
        }
        .unwrap();

        let cleaned = drop_missing(&df).unwrap();
        assert_eq!(cleaned.height(), 2);
        for series in cleaned.get_columns() {
            assert_eq!(series.null_count(), 0);
        }
    }

    #[test]
    fn test_drop_missing_removes_nan_rows() {
        let df = df! {
            "id" => [1i64, 2, 3],
            "f" => [5.0f64, f64::NAN, 7.0],
        }
        .unwrap();

        let cleaned = drop_missing(&df).unwrap();
        let ids: Vec<i64> = cleaned
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_drop_missing_removes_blank_strings() {
        let df = df! {
            "id" => [1i64, 2, 3, 4],
            "name" => ["alice", "", "carol", "  "],
        }
        .unwrap();

        let cleaned = drop_missing(&df).unwrap();
        let ids: Vec<i64> = cleaned
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_drop_missing_empty_table() {
        let df = DataFrame::new(vec![Series::new_empty("name", &DataType::Utf8)]).unwrap();
        assert_eq!(drop_missing(&df).unwrap().height(), 0);
    }

    #[test]
    fn test_drop_missing_keeps_complete_table() {
        let df = df! {
            "name" => ["a", "b"],
            "f" => [1.0f64, 2.0],
        }
        .unwrap();

        assert_eq!(drop_missing(&df).unwrap().height(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = load_table(Path::new("does/not/exist.csv"), &LoadOptions::default());
        assert!(matches!(result, Err(PrepError::FileNotFound(_))));
    }

    #[test]
    fn test_preview_and_columns() {
        let df = df! {
            "id" => (0..25i64).collect::<Vec<_>>(),
            "Class" => (0..25i64).map(|i| i % 2).collect::<Vec<_>>(),
        }
        .unwrap();

        assert_eq!(preview(&df, 10).height(), 10);
        assert_eq!(preview(&df, 100).height(), 25);
        assert_eq!(column_names(&df), vec!["id".to_string(), "Class".to_string()]);
    }
}
