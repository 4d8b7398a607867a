// src/formatting/mod.rs
//! Turns API payloads into text for the terminal, for scripts, or for notes.
//!
//! Every renderer is a pure function of the payload; printing is left to
//! the caller so output can be captured and tested.

mod common;
mod human;
mod json;
mod markdown;
mod plain;

use crate::error::AppError;
use crate::types::OutputMode;
use serde_json::Value;

pub use common::format_number;

/// Renders `payload` in `mode`. `title` labels the panel or section where
/// the mode has one; `verbose` adds metadata and, for JSON, the full
/// envelope.
pub fn format_output(
    payload: &Value,
    mode: OutputMode,
    title: &str,
    verbose: bool,
) -> Result<String, AppError> {
    match mode {
        OutputMode::Json => json::render(payload, verbose),
        OutputMode::Plain => Ok(plain::render(payload, verbose)?),
        OutputMode::Markdown => Ok(markdown::render(payload, title, verbose)?),
        OutputMode::Human => Ok(human::render(payload, title, verbose)?),
    }
}
