//! CLI result presenter.

use std::fmt;

use serde::Serialize;

use fibmemo_core::engine::EngineStats;

use crate::interfaces::{CalculationReport, ResultPresenter};
use crate::output::{digit_count, format_duration, format_number, format_result};
use crate::ui;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// `F(n) = value`, optionally with details.
    #[default]
    Normal,
    /// Only the number.
    Quiet,
    /// One JSON object per result.
    Json,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    n: u64,
    value: String,
    digits: usize,
    bits: u64,
    duration_us: u128,
    strategy: &'a str,
    stats: EngineStats,
}

/// CLI result presenter.
pub struct CliPresenter {
    mode: OutputMode,
    details: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(mode: OutputMode, details: bool) -> Self {
        Self { mode, details }
    }

    /// Render a report as the text `present_result` prints.
    #[must_use]
    pub fn render(&self, report: &CalculationReport) -> String {
        let value = format_result(&report.value);
        match self.mode {
            OutputMode::Quiet => value,
            OutputMode::Json => {
                let record = JsonRecord {
                    n: report.n,
                    digits: value.len(),
                    value,
                    bits: report.value.bits(),
                    duration_us: report.duration.as_micros(),
                    strategy: report.strategy.name(),
                    stats: report.stats,
                };
                // Serializing a struct of plain fields cannot fail.
                serde_json::to_string(&record).unwrap_or_default()
            }
            OutputMode::Normal => {
                let mut out = String::new();
                if self.details {
                    let stats = report.stats;
                    out.push_str(&format!("Strategy: {}\n", report.strategy));
                    out.push_str(&format!("Duration: {}\n", format_duration(report.duration)));
                    out.push_str(&format!("Result digits: {}\n", digit_count(&report.value)));
                    out.push_str(&format!("Result bits: {}\n", report.value.bits()));
                    out.push_str(&format!(
                        "Cache: {} requests, {} hits, {} computed\n",
                        stats.requests, stats.hits, stats.computed
                    ));
                }
                out.push_str(&format!("F({}) = {value}", format_number(report.n)));
                out
            }
        }
    }
}

impl ResultPresenter for CliPresenter {
    fn present_result(&self, report: &CalculationReport) {
        println!("{}", self.render(report));
    }

    fn present_error(&self, error: &dyn fmt::Display) {
        ui::print_error(&error.to_string());
    }
}
