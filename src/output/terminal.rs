// src/output/terminal.rs
//! Prints rendered payloads to stdout.

use super::Renderer;
use crate::error::AppError;
use crate::formatting::format_output;
use crate::types::OutputMode;
use serde_json::Value;
use std::io::Write;

/// Writes formatted output to stdout, flushing after every payload so
/// watch output shows up as it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(
        &self,
        payload: &Value,
        mode: OutputMode,
        title: &str,
        verbose: bool,
    ) -> Result<(), AppError> {
        let content = format_output(payload, mode, title, verbose)?;
        log::debug!("Printing {} bytes as {}", content.len(), mode);
        print_to_stdout(&content)
    }
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
