// src/formatting/json.rs
//! Raw JSON output.

use crate::error::AppError;
use serde_json::Value;

/// Pretty JSON. Without `verbose`, only `data` is shown when present.
pub fn render(payload: &Value, verbose: bool) -> Result<String, AppError> {
    let target = match payload.get("data") {
        Some(inner) if !verbose && !inner.is_null() => inner,
        _ => payload,
    };
    Ok(format!("{}\n", serde_json::to_string_pretty(target)?))
}
