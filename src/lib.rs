//! tabprep - Stateful preprocessing transformers for tabular feature data
//!
//! This crate provides three independent fit/transform components:
//! - [`preprocessing::CategoricalEncoder`] - drop-first one-hot encoding
//! - [`preprocessing::OrdinalEncoder`] - target-rank ordinal encoding
//! - [`preprocessing::ContinuousScaler`] - min-max scaling to [0,1]
//!
//! Each component learns its parameters from training data in `fit` and
//! applies them unchanged to any later dataset with the same schema in
//! `transform`. Components do not depend on each other and may be composed
//! in any order by the caller.
//!
//! ```
//! use tabprep::prelude::*;
//! use polars::prelude::*;
//!
//! let df = df!("color" => &["red", "blue", "red", "green"]).unwrap();
//! let mut encoder = CategoricalEncoder::new(vec!["color".to_string()]).unwrap();
//! let encoded = encoder.fit_transform(&df).unwrap();
//! assert!(encoded.column("color_red").is_ok());
//! ```

// Core error handling
pub mod error;

// Preprocessing transformers
pub mod preprocessing;

pub use error::{PrepError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{PrepError, Result};
    pub use crate::preprocessing::{CategoricalEncoder, ContinuousScaler, OrdinalEncoder};
}
