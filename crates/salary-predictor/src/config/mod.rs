use crate::estimation::{DatasetError, EstimatorConfig, ReferenceDataset, SalaryEstimator};
use chrono::{Datelike, Local};
use std::env;
use std::fmt;
use std::fs;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log filter used when `APP_LOG_LEVEL` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

/// Top-level configuration for a host embedding the estimator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub estimation: EstimationSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dataset_path = non_empty_var("SALARY_DATA_PATH").map(PathBuf::from);
        let tuning_path = non_empty_var("SALARY_TUNING_PATH").map(PathBuf::from);
        let reference_year = non_empty_var("SALARY_REFERENCE_YEAR")
            .map(|value| {
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|source| ConfigError::InvalidReferenceYear { value, source })
            })
            .transpose()?;

        let log_level = non_empty_var("APP_LOG_LEVEL")
            .unwrap_or_else(|| environment.default_log_level().to_string());

        Ok(Self {
            environment,
            estimation: EstimationSettings {
                dataset_path,
                tuning_path,
                reference_year,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// The configured dataset file, or the bundled standard dataset.
    pub fn load_dataset(&self) -> Result<ReferenceDataset, DatasetError> {
        match &self.estimation.dataset_path {
            Some(path) => ReferenceDataset::from_path(path),
            None => ReferenceDataset::standard(),
        }
    }

    /// Builds an estimator from the tuning file (if any) with the configured
    /// reference year layered on top. When neither sets a reference year the
    /// current calendar year is captured here, once.
    pub fn estimator(&self) -> Result<SalaryEstimator, ConfigError> {
        let mut tuning = match &self.estimation.tuning_path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| ConfigError::TuningUnreadable {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str::<EstimatorConfig>(&raw).map_err(|source| {
                    ConfigError::TuningInvalid {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            None => EstimatorConfig::default(),
        };

        tuning.reference_year = self
            .estimation
            .reference_year
            .or(tuning.reference_year)
            .or_else(|| Some(Local::now().year()));

        Ok(SalaryEstimator::new(tuning))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Where the reference data and tuning come from.
#[derive(Debug, Clone, Default)]
pub struct EstimationSettings {
    pub dataset_path: Option<PathBuf>,
    pub tuning_path: Option<PathBuf>,
    pub reference_year: Option<i32>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReferenceYear {
        value: String,
        source: ParseIntError,
    },
    TuningUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    TuningInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReferenceYear { value, .. } => {
                write!(f, "SALARY_REFERENCE_YEAR must be a whole year, found '{}'", value)
            }
            ConfigError::TuningUnreadable { path, .. } => {
                write!(f, "unable to read tuning file {}", path.display())
            }
            ConfigError::TuningInvalid { path, .. } => {
                write!(f, "tuning file {} is not a valid estimator config", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidReferenceYear { source, .. } => Some(source),
            ConfigError::TuningUnreadable { source, .. } => Some(source),
            ConfigError::TuningInvalid { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SALARY_DATA_PATH");
        env::remove_var("SALARY_TUNING_PATH");
        env::remove_var("SALARY_REFERENCE_YEAR");
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("salary-predictor-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("scratch file written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.estimation.dataset_path.is_none());
        assert!(config.estimation.reference_year.is_none());

        let dataset = config.load_dataset().expect("bundled dataset loads");
        assert!(dataset.major("Engineering").is_some());

        let estimator = config.estimator().expect("estimator builds");
        assert!(estimator.reference_year().is_some_and(|year| year >= 2024));
    }

    #[test]
    fn environment_picks_default_log_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_level, "info");

        env::set_var("APP_ENV", "ci");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "warn");

        env::set_var("APP_LOG_LEVEL", "salary_predictor=trace");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "salary_predictor=trace");
        reset_env();
    }

    #[test]
    fn tuning_reference_year_is_kept_without_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let tuning = scratch_file("pinned.json", r#"{ "reference_year": 2019 }"#);
        env::set_var("SALARY_TUNING_PATH", &tuning);

        let config = AppConfig::load().expect("config loads");
        let estimator = config.estimator().expect("estimator builds");

        assert_eq!(estimator.reference_year(), Some(2019));
        fs::remove_file(tuning).ok();
        reset_env();
    }

    #[test]
    fn reference_year_overrides_tuning() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let tuning = scratch_file(
            "tuning.json",
            r#"{ "reference_year": 2019, "max_tips": 2 }"#,
        );
        env::set_var("APP_ENV", "ci");
        env::set_var("SALARY_TUNING_PATH", &tuning);
        env::set_var("SALARY_REFERENCE_YEAR", "2031");

        let config = AppConfig::load().expect("config loads");
        let estimator = config.estimator().expect("estimator builds");

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(estimator.reference_year(), Some(2031));
        assert_eq!(estimator.config().max_tips, 2);
        fs::remove_file(tuning).ok();
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_reference_year() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SALARY_REFERENCE_YEAR", "next year");

        let err = AppConfig::load().expect_err("year rejected");

        assert!(matches!(err, ConfigError::InvalidReferenceYear { .. }));
        reset_env();
    }

    #[test]
    fn reports_unusable_tuning_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let tuning = scratch_file("broken.json", "{ not json");
        env::set_var("SALARY_TUNING_PATH", &tuning);

        let config = AppConfig::load().expect("config loads");
        let err = config.estimator().expect_err("tuning rejected");

        assert!(matches!(err, ConfigError::TuningInvalid { .. }));
        fs::remove_file(tuning).ok();

        env::set_var("SALARY_TUNING_PATH", "/nonexistent/salary-tuning.json");
        let config = AppConfig::load().expect("config loads");
        assert!(matches!(
            config.estimator(),
            Err(ConfigError::TuningUnreadable { .. })
        ));
        reset_env();
    }

    #[test]
    fn missing_dataset_file_is_reported() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SALARY_DATA_PATH", "/nonexistent/salary_data.json");

        let config = AppConfig::load().expect("config loads");

        assert!(matches!(config.load_dataset(), Err(DatasetError::Io(_))));
        reset_env();
    }
}
