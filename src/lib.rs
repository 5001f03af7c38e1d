pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::lookup::{build_lookup, CachedLookup, InMemoryLookup};
pub use crate::adapters::storage::LocalStorage;
pub use crate::config::cli::ConversionSettings;
pub use crate::core::engine::{ConversionEngine, ConversionOutcome};
pub use crate::core::format::FitFormat;
pub use crate::core::pipeline::ConvertPipeline;
pub use crate::core::{fit_from_eft, fit_from_eft2, fit_from_json, fit_from_yaml, parse_fit, render_fit};
pub use crate::domain::model::Fit;
pub use crate::utils::error::{FitError, Result};
