//! CLI error types.

use quire_config::ConfigError;
use quire_processor::DispatchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Validation(String),
}
