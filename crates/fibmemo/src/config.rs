//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use fibmemo_cli::presenter::OutputMode;
use fibmemo_core::constants::DEFAULT_RECURSION_LIMIT;
use fibmemo_core::memory_budget::parse_memory_limit;
use fibmemo_core::strategy::Strategy;

/// Largest accepted `--recursion-limit`; the worker stack is sized for it.
pub const MAX_RECURSION_LIMIT: u64 = 100_000;

/// Default cap on the cache size.
pub const DEFAULT_MEMORY_LIMIT: &str = "256M";

/// Evaluation strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Bottom-up fill, constant stack.
    Iterative,
    /// Top-down memoized recursion, bounded by --recursion-limit.
    Recursive,
}

/// fibmemo: Fibonacci numbers with a memoizing, arbitrary-precision engine.
#[derive(Parser, Debug)]
#[command(name = "fibmemo", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Fibonacci index to compute. Omit to read indices from stdin.
    #[arg(env = "FIBMEMO_N", allow_negative_numbers = true)]
    pub input: Option<String>,

    /// Evaluation strategy.
    #[arg(long, value_enum, default_value = "iterative", env = "FIBMEMO_STRATEGY")]
    pub strategy: StrategyArg,

    /// Maximum recursion depth before the recursive strategy fills bottom-up.
    #[arg(
        long,
        default_value_t = DEFAULT_RECURSION_LIMIT as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_RECURSION_LIMIT)
    )]
    pub recursion_limit: u64,

    /// Cache memory limit (e.g. "256M", "2G"); 0 or "unlimited" disables it.
    #[arg(
        long,
        default_value = DEFAULT_MEMORY_LIMIT,
        env = "FIBMEMO_MEMORY_LIMIT",
        value_parser = parse_limit_arg
    )]
    pub memory_limit: u64,

    /// Cosmetic delay before computing, in milliseconds.
    #[arg(long, default_value_t = 0, env = "FIBMEMO_DELAY_MS")]
    pub delay: u64,

    /// Quiet mode (only output the number).
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit one JSON object per result.
    #[arg(long)]
    pub json: bool,

    /// Show digits, bits, duration and cache statistics.
    #[arg(short, long)]
    pub details: bool,

    /// Also write the value to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable the loading spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Engine strategy assembled from `--strategy` and `--recursion-limit`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn engine_strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Iterative => Strategy::Iterative,
            StrategyArg::Recursive => Strategy::Recursive {
                max_depth: self.recursion_limit as usize,
            },
        }
    }

    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Whether the spinner should be drawn.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.no_progress && self.output_mode() == OutputMode::Normal
    }

    #[must_use]
    pub fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay)
    }

    /// Cache limit in bytes, `None` when unlimited.
    #[must_use]
    pub fn memory_limit_bytes(&self) -> Option<u64> {
        (self.memory_limit != 0).then_some(self.memory_limit)
    }
}

/// `--memory-limit` parser; 0 stands for unlimited.
fn parse_limit_arg(s: &str) -> Result<u64, String> {
    parse_memory_limit(s).map(Option::unwrap_or_default)
}
