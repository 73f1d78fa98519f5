use fintrack_config::ConfigError;
use fintrack_core::CoreError;
use thiserror::Error;

/// Failures raised while opening or mutating the tracker state.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
