//! Target-rank ordinal encoding for categorical columns

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Ordinal encoder that orders category levels by target rank.
///
/// `fit` computes the fractional (average-tie) statistical rank of the target
/// over all rows, sums the ranks within each category level, and assigns
/// ordinal labels 1, 2, 3, ... in ascending order of that sum. `transform`
/// replaces each level with its label.
///
/// A level unseen at fit time maps to null in the output rather than failing.
/// Downstream consumers that cannot tolerate nulls must check for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    variables: Vec<String>,
    target: String,
    // Maps column name -> (level -> 1-based ordinal label)
    labels: HashMap<String, HashMap<String, i64>>,
    is_fitted: bool,
}

impl OrdinalEncoder {
    /// Create a new encoder for the given categorical columns and target name.
    ///
    /// Fails with [`PrepError::ConfigError`] when `variables` is empty.
    pub fn new(variables: Vec<String>, target: impl Into<String>) -> Result<Self> {
        super::validate_variables(&variables)?;
        Ok(Self {
            variables,
            target: target.into(),
            labels: HashMap::new(),
            is_fitted: false,
        })
    }

    /// Name of the target column this encoder ranks by.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Fit the encoder against a target aligned row-for-row with `df`.
    pub fn fit(&mut self, df: &DataFrame, target: &Series) -> Result<&mut Self> {
        if target.len() != df.height() {
            return Err(PrepError::ShapeError {
                expected: format!("{} target rows", df.height()),
                actual: format!("{} target rows", target.len()),
            });
        }

        let target_values = target
            .cast(&DataType::Float64)
            .map_err(|_| {
                PrepError::DataError(format!(
                    "target '{}' is not a numeric column",
                    self.target
                ))
            })?
            .f64()?
            .clone();
        let values: Vec<f64> = target_values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let ranks = fractional_rank(&values);

        for col_name in &self.variables {
            let ca = super::str_column(df, col_name)?;

            // Sum the target ranks within each level
            let mut rank_sums: HashMap<String, f64> = HashMap::new();
            for (level, rank) in ca.into_iter().zip(ranks.iter()) {
                if let Some(level) = level {
                    *rank_sums.entry(level.to_string()).or_insert(0.0) += rank;
                }
            }

            // Ascending rank sum, ties broken by level for reproducibility
            let mut ordered: Vec<(String, f64)> = rank_sums.into_iter().collect();
            ordered.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });

            let mapping: HashMap<String, i64> = ordered
                .into_iter()
                .enumerate()
                .map(|(i, (level, _))| (level, (i + 1) as i64))
                .collect();

            debug!(column = %col_name, levels = mapping.len(), "fitted ordinal labels");
            self.labels.insert(col_name.clone(), mapping);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing each configured column's levels with
    /// their ordinal labels. Unseen levels and nulls become null.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let mut result = df.clone();

        for col_name in &self.variables {
            let ca = super::str_column(df, col_name)?;
            let mapping = self
                .labels
                .get(col_name)
                .ok_or_else(|| PrepError::FeatureNotFound(col_name.clone()))?;

            let values: Vec<Option<i64>> = ca
                .into_iter()
                .map(|v| v.and_then(|level| mapping.get(level).copied()))
                .collect();

            let encoded = Series::new(col_name.as_str().into(), values);
            result = result
                .with_column(encoded)
                .map_err(|e| PrepError::DataError(e.to_string()))?
                .clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, target: &Series) -> Result<DataFrame> {
        self.fit(df, target)?;
        self.transform(df)
    }

    /// Learned level-to-label mapping for a fitted source column.
    pub fn labels(&self, column: &str) -> Option<&HashMap<String, i64>> {
        self.labels.get(column)
    }
}

/// Fractional (average-tie) ranking, 1-based.
///
/// Tied values all receive the mean of the positions they occupy, so the rank
/// vector is invariant under any permutation of equal values.
fn fractional_rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        // Positions i+1 ..= j averaged over the tie run
        let avg_rank = (i + j + 1) as f64 / 2.0;
        for k in i..j {
            ranks[indexed[k].0] = avg_rank;
        }

        i = j;
    }

    ranks
}
