//! Presentation interfaces.

use std::fmt;
use std::time::Duration;

use num_bigint::BigUint;

use fibmemo_core::engine::EngineStats;
use fibmemo_core::strategy::Strategy;

/// Trait for presenting results to the user.
pub trait ResultPresenter {
    /// Present a computed value.
    fn present_result(&self, report: &CalculationReport);

    /// Present a failure. No value is shown.
    fn present_error(&self, error: &dyn fmt::Display);
}

/// Everything known about one answered request.
#[derive(Debug, Clone)]
pub struct CalculationReport {
    /// Requested index.
    pub n: u64,
    /// F(n).
    pub value: BigUint,
    /// Time spent inside the engine.
    pub duration: Duration,
    /// Engine counters after the request.
    pub stats: EngineStats,
    /// Strategy the engine was configured with.
    pub strategy: Strategy,
}
