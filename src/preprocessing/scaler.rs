//! Min-max scaling for continuous columns

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Observed value range for a fitted column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RangeParams {
    min: f64,
    max: f64,
}

/// Min-max scaler over a configured set of numeric columns.
///
/// `fit` records each column's observed minimum and maximum; `transform`
/// rescales values as `(v - min) / (max - min)`. Values outside the fit-time
/// range scale outside [0,1] (no clamping), and a constant column produces
/// NaN for every row. Nulls pass through unchanged and are excluded from the
/// fitted min/max.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousScaler {
    variables: Vec<String>,
    params: HashMap<String, RangeParams>,
    is_fitted: bool,
}

impl ContinuousScaler {
    /// Create a new scaler for the given numeric columns.
    ///
    /// Fails with [`PrepError::ConfigError`] when `variables` is empty.
    pub fn new(variables: Vec<String>) -> Result<Self> {
        super::validate_variables(&variables)?;
        Ok(Self {
            variables,
            params: HashMap::new(),
            is_fitted: false,
        })
    }

    /// Fit the scaler, recording each configured column's min and max.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        for col_name in &self.variables {
            let ca = super::f64_column(df, col_name)?;
            let params = RangeParams {
                min: ca.min().unwrap_or(f64::NAN),
                max: ca.max().unwrap_or(f64::NAN),
            };

            debug!(column = %col_name, min = params.min, max = params.max, "fitted value range");
            self.params.insert(col_name.clone(), params);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, rescaling each configured column to the fitted range.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        self.apply(df, |v, p| (v - p.min) / (p.max - p.min))
    }

    /// Undo `transform` by applying the inverse affine map `v * (max - min) + min`.
    ///
    /// Columns with a degenerate (zero-width) fitted range do not round-trip.
    pub fn inverse_transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        self.apply(df, |v, p| v * (p.max - p.min) + p.min)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Fitted (min, max) pair for a configured column.
    pub fn range(&self, column: &str) -> Option<(f64, f64)> {
        self.params.get(column).map(|p| (p.min, p.max))
    }

    fn apply<F>(&self, df: &DataFrame, op: F) -> Result<DataFrame>
    where
        F: Fn(f64, &RangeParams) -> f64,
    {
        let mut result = df.clone();

        for col_name in &self.variables {
            let ca = super::f64_column(df, col_name)?;
            let params = self
                .params
                .get(col_name)
                .ok_or_else(|| PrepError::FeatureNotFound(col_name.clone()))?;

            let scaled: Float64Chunked = ca
                .into_iter()
                .map(|opt| opt.map(|v| op(v, params)))
                .collect();

            let scaled = scaled.with_name(col_name.as_str().into()).into_series();
            result = result
                .with_column(scaled)
                .map_err(|e| PrepError::DataError(e.to_string()))?
                .clone();
        }

        Ok(result)
    }
}
