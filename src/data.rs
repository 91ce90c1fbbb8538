//! Training data handed to the pipeline factory
//!
//! The search core never reads values; it only needs the logical type of each
//! column and whether it has missing values, to pick preprocessing components.

use crate::error::{Result, SearchError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Logical type of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    Numeric,
    Boolean,
    Categorical,
    Datetime,
    /// Free text, declared explicitly by the caller
    NaturalLanguage,
}

/// Column information used when composing pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub logical_type: LogicalType,
    pub n_missing: usize,
}

/// Features and target of a search
#[derive(Debug, Clone)]
pub struct Dataset {
    features: DataFrame,
    target: Series,
    columns: Vec<ColumnInfo>,
}

impl Dataset {
    /// Wrap features and target, deriving column types from the frame's dtypes
    pub fn new(features: DataFrame, target: Series) -> Result<Self> {
        Self::with_text_columns(features, target, &[])
    }

    /// Like [`Dataset::new`], marking the named string columns as natural language
    pub fn with_text_columns(features: DataFrame, target: Series, text_columns: &[&str]) -> Result<Self> {
        if features.height() != target.len() {
            return Err(SearchError::InvalidInput(format!(
                "features have {} rows but target has {}",
                features.height(),
                target.len()
            )));
        }

        let text: HashSet<&str> = text_columns.iter().copied().collect();
        let names: Vec<String> = features
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        for name in &text {
            if !names.iter().any(|n| n == name) {
                return Err(SearchError::InvalidInput(format!(
                    "text column '{}' not found in features",
                    name
                )));
            }
        }

        let mut columns = Vec::with_capacity(names.len());
        for (name, dtype) in names.iter().zip(features.dtypes()) {
            let n_missing = features.column(name)?.null_count();
            let logical_type = if text.contains(name.as_str()) {
                LogicalType::NaturalLanguage
            } else {
                Self::logical_type_of(&dtype)
            };
            columns.push(ColumnInfo {
                name: name.clone(),
                logical_type,
                n_missing,
            });
        }

        Ok(Self {
            features,
            target,
            columns,
        })
    }

    fn logical_type_of(dtype: &DataType) -> LogicalType {
        if dtype.is_bool() {
            LogicalType::Boolean
        } else if dtype.is_primitive_numeric() {
            LogicalType::Numeric
        } else if dtype.is_temporal() {
            LogicalType::Datetime
        } else {
            // Strings and categoricals are treated as categories unless declared as text
            LogicalType::Categorical
        }
    }

    pub fn features(&self) -> &DataFrame {
        &self.features
    }

    pub fn target(&self) -> &Series {
        &self.target
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.features.height()
    }

    pub fn has_missing_values(&self) -> bool {
        self.columns.iter().any(|c| c.n_missing > 0)
    }

    pub fn has_logical_type(&self, logical_type: LogicalType) -> bool {
        self.columns.iter().any(|c| c.logical_type == logical_type)
    }

    /// Names of columns of the given logical type
    pub fn columns_of_type(&self, logical_type: LogicalType) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.logical_type == logical_type)
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_frame() -> DataFrame {
        df!(
            "age" => &[Some(21.0), None, Some(35.0), Some(40.0)],
            "city" => &["paris", "oslo", "paris", "lima"],
            "review" => &["great stay", "too loud at night", "ok", "would come back"],
            "member" => &[true, false, true, true]
        )
        .unwrap()
    }

    #[test]
    fn test_column_types() {
        let target = Series::new("y".into(), &[0i64, 1, 0, 1]);
        let data = Dataset::with_text_columns(mixed_frame(), target, &["review"]).unwrap();

        assert_eq!(data.n_rows(), 4);
        assert!(data.has_missing_values());
        assert_eq!(data.columns_of_type(LogicalType::Numeric), vec!["age"]);
        assert_eq!(data.columns_of_type(LogicalType::Categorical), vec!["city"]);
        assert_eq!(data.columns_of_type(LogicalType::NaturalLanguage), vec!["review"]);
        assert_eq!(data.columns_of_type(LogicalType::Boolean), vec!["member"]);
    }

    #[test]
    fn test_integer_and_float_columns_are_numeric() {
        let frame = df!(
            "count" => &[1i64, 2, 3],
            "ratio" => &[0.5f32, 0.25, 0.125],
            "small" => &[1i32, 2, 3]
        )
        .unwrap();
        let data = Dataset::new(frame, Series::new("y".into(), &[0i64, 1, 0])).unwrap();
        assert_eq!(
            data.columns_of_type(LogicalType::Numeric),
            vec!["count", "ratio", "small"]
        );
    }

    #[test]
    fn test_row_count_mismatch() {
        let target = Series::new("y".into(), &[0i64, 1]);
        assert!(matches!(
            Dataset::new(mixed_frame(), target),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_text_column() {
        let target = Series::new("y".into(), &[0i64, 1, 0, 1]);
        assert!(Dataset::with_text_columns(mixed_frame(), target, &["missing"]).is_err());
    }
}
