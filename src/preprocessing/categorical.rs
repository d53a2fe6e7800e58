//! Drop-first one-hot encoding for categorical columns

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// One-hot encoder that drops the first (reference) level per column.
///
/// `fit` records, for each configured column, the distinct levels observed in
/// ascending order with the first level excluded as the implicit reference.
/// `transform` emits one 0/1 indicator column per retained level, named
/// `"<column>_<level>"`, and drops the original column. Levels unseen at fit
/// time produce all-zero indicator rows; no new columns are ever emitted at
/// transform time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    variables: Vec<String>,
    // Maps column name -> retained levels, ascending, reference level dropped
    levels: HashMap<String, Vec<String>>,
    is_fitted: bool,
}

impl CategoricalEncoder {
    /// Create a new encoder for the given categorical columns.
    ///
    /// Fails with [`PrepError::ConfigError`] when `variables` is empty.
    pub fn new(variables: Vec<String>) -> Result<Self> {
        super::validate_variables(&variables)?;
        Ok(Self {
            variables,
            levels: HashMap::new(),
            is_fitted: false,
        })
    }

    /// Fit the encoder, capturing the distinct levels of each configured column.
    ///
    /// A column with fewer than two distinct levels retains no levels at all:
    /// `transform` will drop it without producing any indicator column.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        for col_name in &self.variables {
            let ca = super::str_column(df, col_name)?;

            // Distinct non-null levels in ascending order
            let distinct: BTreeSet<&str> = ca.into_iter().flatten().collect();
            let retained: Vec<String> = distinct
                .into_iter()
                .skip(1) // first sorted level is the implicit reference
                .map(|s| s.to_string())
                .collect();

            debug!(column = %col_name, dummies = retained.len(), "fitted one-hot levels");
            self.levels.insert(col_name.clone(), retained);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing each configured column with its
    /// indicator columns.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let mut result = df.clone();

        for col_name in &self.variables {
            let ca = super::str_column(df, col_name)?;
            let retained = self
                .levels
                .get(col_name)
                .ok_or_else(|| PrepError::FeatureNotFound(col_name.clone()))?;

            for level in retained {
                let values: Vec<i32> = ca
                    .into_iter()
                    .map(|v| if v == Some(level.as_str()) { 1 } else { 0 })
                    .collect();

                let indicator =
                    Series::new(format!("{}_{}", col_name, level).into(), values);
                result = result
                    .with_column(indicator)
                    .map_err(|e| PrepError::DataError(e.to_string()))?
                    .clone();
            }

            result = result
                .drop(col_name)
                .map_err(|e| PrepError::DataError(e.to_string()))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Derived indicator column names for a fitted source column.
    pub fn dummy_columns(&self, column: &str) -> Option<Vec<String>> {
        self.levels.get(column).map(|retained| {
            retained
                .iter()
                .map(|level| format!("{}_{}", column, level))
                .collect()
        })
    }
}
