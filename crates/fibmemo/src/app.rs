//! Application entry point and dispatch.

use std::io::{self, BufRead, IsTerminal};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use fibmemo_cli::input::parse_request;
use fibmemo_cli::interfaces::{CalculationReport, ResultPresenter};
use fibmemo_cli::output::write_to_file;
use fibmemo_cli::presenter::{CliPresenter, OutputMode};
use fibmemo_cli::spinner::LoadingSpinner;
use fibmemo_cli::ui;
use fibmemo_core::constants::exit_codes;
use fibmemo_core::engine::FibEngine;
use fibmemo_core::observers::ChannelObserver;
use fibmemo_core::progress::CancellationToken;
use fibmemo_core::shared::SharedEngine;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Capacity of the progress channel between worker and spinner.
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// Worker stack size, large enough for the deepest allowed recursion.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Lines that end an interactive session.
const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

/// Outcome of an interactive session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Requests that produced a value.
    pub answered: u64,
    /// Requests rejected or failed.
    pub rejected: u64,
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let engine = build_engine(config);
    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let presenter = CliPresenter::new(config.output_mode(), config.details);
    match config.input.as_deref() {
        Some(raw) => run_once(config, &engine, &cancel, &presenter, raw),
        None => {
            if config.output_mode() == OutputMode::Normal {
                ui::print_header("Fibonacci Calculator");
                ui::print_note("Enter a non-negative integer per line; 'quit' or EOF exits.");
                ui::print_note("The first 10 Fibonacci numbers are pre-computed for instant results.");
            }
            let stdin = io::stdin();
            let prompt = stdin.is_terminal() && config.output_mode() == OutputMode::Normal;
            let summary = run_session(config, &engine, &cancel, &presenter, stdin.lock(), prompt)?;
            info!(
                answered = summary.answered,
                rejected = summary.rejected,
                "session finished"
            );
            Ok(())
        }
    }
}

/// Engine configured from `--strategy`, `--recursion-limit` and `--memory-limit`.
#[must_use]
pub fn build_engine(config: &AppConfig) -> SharedEngine {
    SharedEngine::new(
        FibEngine::with_strategy(config.engine_strategy())
            .with_memory_limit(config.memory_limit_bytes()),
    )
}

fn run_once(
    config: &AppConfig,
    engine: &SharedEngine,
    cancel: &CancellationToken,
    presenter: &dyn ResultPresenter,
    raw: &str,
) -> Result<()> {
    let report = answer(config, engine, cancel, raw)?;
    deliver(config, presenter, &report)
}

/// Present a result and, with `--output`, write its value to the file.
///
/// The file is rewritten on every result, so in a session it holds the
/// most recent answer.
fn deliver(
    config: &AppConfig,
    presenter: &dyn ResultPresenter,
    report: &CalculationReport,
) -> Result<()> {
    presenter.present_result(report);
    if let Some(ref path) = config.output {
        write_to_file(path, &report.value)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Answer requests line by line from one engine until EOF or a quit command.
///
/// Rejected lines are reported and the session continues; cancellation ends it.
pub fn run_session<R: BufRead>(
    config: &AppConfig,
    engine: &SharedEngine,
    cancel: &CancellationToken,
    presenter: &dyn ResultPresenter,
    mut input: R,
    prompt: bool,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut line = String::new();

    loop {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled.into());
        }
        if prompt {
            ui::prompt("n> ")?;
        }

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }
        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&request) {
            break;
        }

        match answer(config, engine, cancel, request) {
            Ok(report) => {
                deliver(config, presenter, &report)?;
                summary.answered += 1;
            }
            Err(AppError::Cancelled) => return Err(AppError::Cancelled.into()),
            Err(err) => {
                presenter.present_error(&err);
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

/// Validate one raw request and compute it. The engine is only called for
/// valid input.
pub fn answer(
    config: &AppConfig,
    engine: &SharedEngine,
    cancel: &CancellationToken,
    raw: &str,
) -> Result<CalculationReport, AppError> {
    let n = parse_request(raw).inspect_err(|e| debug!(input = raw, "rejected: {e}"))?;
    calculate(config, engine, cancel, n)
}

/// Compute F(n) on a worker thread while the spinner follows its progress.
pub fn calculate(
    config: &AppConfig,
    engine: &SharedEngine,
    cancel: &CancellationToken,
    n: u64,
) -> Result<CalculationReport, AppError> {
    let (tx, rx) = crossbeam_channel::bounded(PROGRESS_CHANNEL_CAPACITY);
    let spinner = LoadingSpinner::new(n, config.show_progress());

    let delay = config.delay_duration();
    let worker_engine = engine.clone();
    let worker_cancel = cancel.clone();
    let worker = thread::Builder::new()
        .name("fibmemo-worker".into())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || {
            let observer = ChannelObserver::new(tx);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            let start = Instant::now();
            let result = worker_engine.compute(n, &worker_cancel, &observer);
            (result, start.elapsed())
        })
        .map_err(|e| {
            debug!("failed to spawn worker: {e}");
            AppError::Compute(e.to_string())
        })?;

    // Returns once the worker drops its observer.
    spinner.follow(&rx);

    let (result, duration) = worker.join().map_err(|_| {
        debug!(n, "worker thread panicked");
        AppError::Compute("worker thread panicked".into())
    })?;
    let value = result.inspect_err(|e| debug!(n, "calculation failed: {e}"))?;

    let stats = engine.stats();
    info!(
        n,
        duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        hits = stats.hits,
        computed = stats.computed,
        "calculation complete"
    );

    Ok(CalculationReport {
        n,
        value,
        duration,
        stats,
        strategy: engine.strategy(),
    })
}

/// First Ctrl+C cancels the running calculation, a second one exits.
fn ctrlc_handler(cancel: CancellationToken) {
    let installed = ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            std::process::exit(exit_codes::ERROR_CANCELED);
        }
        cancel.cancel();
    });
    if let Err(e) = installed {
        warn!("Ctrl+C handler not installed: {e}");
    }
}
