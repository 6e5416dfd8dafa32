use crate::config::ConfigError;
use crate::estimation::{DatasetError, EstimationError};
use crate::telemetry::TelemetryError;
use std::fmt;

/// Any failure a host can hit while wiring up and running the estimator.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Dataset(DatasetError),
    Estimation(EstimationError),
}

impl AppError {
    /// True when the caller's input was at fault rather than the host or engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Estimation(EstimationError::MalformedInput(_))
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::Estimation(err) => write!(f, "estimation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Estimation(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<EstimationError> for AppError {
    fn from(value: EstimationError) -> Self {
        Self::Estimation(value)
    }
}
