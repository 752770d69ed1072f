//! fibmemo: Fibonacci numbers with a memoizing, arbitrary-precision engine.

use std::process::ExitCode;

use fibmemo_cli::ui;
use fibmemo_lib::{app, config, errors};

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_error(&format!("{err:#}"));
            let code = errors::handle_error(&err);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
