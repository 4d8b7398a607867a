// src/main.rs

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use x_cli::commands::{execute, OutputSettings};
use x_cli::config::{load_credentials, CommandLineInput};
use x_cli::ApiErrorKind;

const LOG_LEVEL_VAR: &str = "X_CLI_LOG_LEVEL";
const CREDENTIALS_HINT: &str =
    "Check X_API_KEY, X_API_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET and X_BEARER_TOKEN.";

/// Level from `X_CLI_LOG_LEVEL`, or warn.
fn env_log_level() -> LevelFilter {
    match std::env::var(LOG_LEVEL_VAR)
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

/// Sets up logging configuration. Console logs go to stderr so stdout only
/// ever carries command output.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        env_log_level()
    };

    let log_file_path = std::env::temp_dir().join("x_cli.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {M} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .logger(Logger::builder().build("rustls", LevelFilter::Info))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let output = OutputSettings {
        mode: cli.output_mode(),
        verbose: cli.verbose,
    };

    let result = match load_credentials() {
        Ok(credentials) => execute(cli.command, credentials, output).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {:?}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden) = e.api_kind() {
            eprintln!("{}", CREDENTIALS_HINT.dimmed());
        }
        std::process::exit(1);
    }

    Ok(())
}
