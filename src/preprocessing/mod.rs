//! Data preprocessing transformers
//!
//! Provides three stateful fit/transform components:
//! - One-hot encoding with a dropped reference level ([`CategoricalEncoder`])
//! - Supervised ordinal encoding by target rank ([`OrdinalEncoder`])
//! - Min-max scaling to [0,1] ([`ContinuousScaler`])
//!
//! All components follow the same lifecycle: `fit` learns parameters from a
//! training `DataFrame` and persists them on the component; `transform`
//! applies them read-only to any dataset with the same schema. Calling
//! `transform` before `fit` fails with [`PrepError::NotFitted`].

mod categorical;
mod ordinal;
mod scaler;

pub use categorical::CategoricalEncoder;
pub use ordinal::OrdinalEncoder;
pub use scaler::ContinuousScaler;

use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Validate a configured variable list at construction time.
///
/// The column list must be non-empty; an empty list is a configuration
/// mistake surfaced immediately rather than at fit time.
pub(crate) fn validate_variables(variables: &[String]) -> Result<()> {
    if variables.is_empty() {
        return Err(PrepError::ConfigError(
            "variables must be a non-empty list of column names".to_string(),
        ));
    }
    Ok(())
}

/// Fetch a configured column as a materialized series, mapping a missing
/// column to `FeatureNotFound`.
pub(crate) fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::FeatureNotFound(name.to_string()))?;
    Ok(column.as_materialized_series())
}

/// Fetch a configured column as string data.
pub(crate) fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    required_column(df, name)?.str().map_err(|_| {
        PrepError::DataError(format!("column '{name}' is not a categorical (string) column"))
    })
}

/// Fetch a configured column as f64 data, casting integer columns.
pub(crate) fn f64_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = required_column(df, name)?;
    let casted = series.cast(&DataType::Float64).map_err(|_| {
        PrepError::DataError(format!("column '{name}' is not a numeric column"))
    })?;
    Ok(casted.f64()?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_variables_rejects_empty() {
        let result = validate_variables(&[]);
        assert!(matches!(result, Err(PrepError::ConfigError(_))));
    }

    #[test]
    fn test_validate_variables_accepts_nonempty() {
        assert!(validate_variables(&["age".to_string()]).is_ok());
    }

    #[test]
    fn test_required_column_missing() {
        let df = df!("a" => &[1.0, 2.0]).unwrap();
        let result = required_column(&df, "b");
        assert!(matches!(result, Err(PrepError::FeatureNotFound(name)) if name == "b"));
    }

    #[test]
    fn test_f64_column_casts_integers() {
        let df = df!("a" => &[1i64, 2, 3]).unwrap();
        let ca = f64_column(&df, "a").unwrap();
        assert_eq!(ca.get(2), Some(3.0));
    }

    #[test]
    fn test_str_column_wrong_dtype() {
        let df = df!("a" => &[1.0, 2.0]).unwrap();
        assert!(matches!(str_column(&df, "a"), Err(PrepError::DataError(_))));
    }
}
