//! Career salary trajectory estimates from a short profile.
//!
//! ```no_run
//! use salary_predictor::{estimate, intake, ReferenceDataset};
//!
//! let dataset = ReferenceDataset::standard()?;
//! let raw = intake::RawProfile::from_form_fields([
//!     ("major_group", "Engineering"),
//!     ("region", "West"),
//!     ("skills", "Python"),
//! ]);
//! let result = estimate(&intake::normalize(&raw, &dataset), &dataset)?;
//! println!("starting mid: {}", result.starting.mid);
//! # Ok::<(), salary_predictor::error::AppError>(())
//! ```

pub mod config;
pub mod error;
pub mod estimation;
pub mod intake;
pub mod telemetry;

pub use estimation::{
    estimate, EstimationError, EstimationResult, EstimatorConfig, Profile, ReferenceDataset,
    SalaryEstimator,
};
