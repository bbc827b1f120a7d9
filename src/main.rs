use std::{path::Path, process::ExitCode};

use clap::Parser;
use mazegen::cli::{Args, run};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Set up logging to standard error, or to `--log-file` when given.
/// The returned guard flushes buffered log lines when dropped.
fn init_tracing(args: &Args) -> std::io::Result<WorkerGuard> {
    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    let (writer, guard) = match &args.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("log file '{}' does not name a file", path.display()),
                )
            })?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(args.log_file.is_none())
        .with_target(false)
        .init();
    Ok(guard)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = match init_tracing(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error:  {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("run failed: {:?}", e);
            eprintln!("Error:  {}", e);
            ExitCode::FAILURE
        }
    }
}
