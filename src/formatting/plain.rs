// src/formatting/plain.rs
//! Tab-separated output for piping into other tools.

use super::common::{cell, list_of_users, Envelope};
use serde_json::{Map, Value};
use std::fmt::{self, Write};

/// Fields left out of single-object output unless verbose.
const NOISY_FIELDS: &[&str] = &[
    "public_metrics",
    "entities",
    "edit_history_tweet_ids",
    "attachments",
    "referenced_tweets",
    "profile_image_url",
];

const USER_COLUMNS: &[&str] = &["username", "name", "description"];
const TWEET_COLUMNS: &[&str] = &["id", "author_id", "text", "created_at"];

pub fn render(payload: &Value, verbose: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match Envelope::open(payload).inner {
        Value::Array(items) => render_list(&mut out, items, verbose)?,
        Value::Object(map) => render_object(&mut out, map, verbose)?,
        other => writeln!(out, "{}", cell(other))?,
    }
    Ok(out)
}

/// `key<TAB>value` per field.
fn render_object(out: &mut String, map: &Map<String, Value>, verbose: bool) -> fmt::Result {
    for (key, value) in map {
        if !verbose && NOISY_FIELDS.contains(&key.as_str()) {
            continue;
        }
        writeln!(out, "{}\t{}", key, cell(value))?;
    }
    Ok(())
}

/// A header row, then one row per item.
fn render_list(out: &mut String, items: &[Value], verbose: bool) -> fmt::Result {
    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            writeln!(out, "{}", cell(item))?;
        }
        return Ok(());
    };

    let all_keys: Vec<&str> = first.keys().map(String::as_str).collect();
    let keys = if verbose {
        all_keys
    } else {
        let preferred = if list_of_users(items) {
            USER_COLUMNS
        } else {
            TWEET_COLUMNS
        };
        let compact: Vec<&str> = preferred
            .iter()
            .copied()
            .filter(|k| first.contains_key(*k))
            .collect();
        if compact.is_empty() {
            all_keys
        } else {
            compact
        }
    };

    writeln!(out, "{}", keys.join("\t"))?;
    for item in items {
        let row: Vec<String> = keys
            .iter()
            .map(|k| item.get(*k).map(cell).unwrap_or_default())
            .collect();
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}
