//! # fibmemo-cli
//!
//! Input validation, result formatting and terminal presentation for the
//! Fibonacci engine.

pub mod input;
pub mod interfaces;
pub mod output;
pub mod presenter;
pub mod spinner;
pub mod ui;

pub use input::{parse_request, InputError};
pub use interfaces::{CalculationReport, ResultPresenter};
pub use presenter::{CliPresenter, OutputMode};
pub use spinner::LoadingSpinner;
