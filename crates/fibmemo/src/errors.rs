//! Error handling and exit codes.

use fibmemo_cli::input::InputError;
use fibmemo_core::constants::exit_codes;
use fibmemo_core::engine::FibError;

/// Failures surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The input was not a valid non-negative integer. The engine was not called.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The engine failed. No value is shown.
    #[error("An error occurred during calculation: {0}")]
    Compute(String),

    /// The user interrupted the calculation.
    #[error("Calculation cancelled")]
    Cancelled,
}

impl AppError {
    /// Exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => exit_codes::ERROR_INPUT,
            Self::Compute(_) => exit_codes::ERROR_COMPUTE,
            Self::Cancelled => exit_codes::ERROR_CANCELED,
        }
    }
}

impl From<FibError> for AppError {
    fn from(err: FibError) -> Self {
        match err {
            FibError::Cancelled => Self::Cancelled,
            other @ (FibError::IndexTooLarge(_) | FibError::MemoryLimit { .. }) => {
                Self::Compute(other.to_string())
            }
        }
    }
}

/// Exit code for any error returned by `app::run`.
#[must_use]
pub fn handle_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map_or(exit_codes::ERROR_GENERIC, AppError::exit_code)
}
