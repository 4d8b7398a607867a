// src/formatting/markdown.rs
//! Markdown output, for pasting into notes and documents.

use super::common::*;
use crate::api::parser::display_text;
use crate::constants::MARKDOWN_DESCRIPTION_CHARS;
use serde_json::Value;
use std::fmt::{self, Write};

pub fn render(payload: &Value, title: &str, verbose: bool) -> Result<String, fmt::Error> {
    let envelope = Envelope::open(payload);
    let mut out = String::new();

    match envelope.inner {
        Value::Array(items) => render_list(&mut out, items, envelope.includes, title, verbose)?,
        item @ Value::Object(_) if is_user(item) => render_user(&mut out, item, verbose)?,
        item @ Value::Object(_) => render_tweet(&mut out, item, envelope.includes, title, verbose)?,
        other => writeln!(out, "{}", cell(other))?,
    }

    if verbose {
        if let Some(token) = envelope.next_token() {
            writeln!(out, "\n*Next page: `--next-token {}`*", token)?;
        }
    }
    Ok(out)
}

fn render_tweet(
    out: &mut String,
    tweet: &Value,
    includes: Option<&Value>,
    title: &str,
    verbose: bool,
) -> fmt::Result {
    let author = resolve_author(str_field(tweet, "author_id"), includes);

    if !title.is_empty() {
        writeln!(out, "## {}\n", title)?;
    }
    writeln!(out, "**{}**", author)?;
    if verbose {
        let created = text_of(tweet, "created_at");
        if !created.is_empty() {
            writeln!(out, "*{}*", created)?;
        }
    }
    writeln!(out, "\n{}\n", display_text(tweet))?;

    if verbose {
        let parts: Vec<String> = metrics(tweet)
            .into_iter()
            .map(|(k, v)| format!("{}: {}", metric_label(k, false), cell(v)))
            .collect();
        if !parts.is_empty() {
            writeln!(out, "{}\n", parts.join(" | "))?;
        }
    }
    writeln!(out, "ID: `{}`", text_of(tweet, "id"))
}

fn render_user(out: &mut String, user: &Value, verbose: bool) -> fmt::Result {
    writeln!(
        out,
        "## {} (@{})\n",
        text_of(user, "name"),
        text_of(user, "username")
    )?;

    let description = text_of(user, "description");
    if !description.is_empty() {
        writeln!(out, "{}\n", description)?;
    }

    let parts: Vec<String> = metrics(user)
        .into_iter()
        .map(|(k, v)| format!("**{}**: {}", metric_label(k, false), grouped(v)))
        .collect();
    if !parts.is_empty() {
        writeln!(out, "{}\n", parts.join(" | "))?;
    }

    if verbose {
        let location = text_of(user, "location");
        if !location.is_empty() {
            writeln!(out, "Location: {}", location)?;
        }
        let created = text_of(user, "created_at");
        if !created.is_empty() {
            writeln!(out, "Joined: {}", created)?;
        }
    }
    Ok(())
}

fn render_list(
    out: &mut String,
    items: &[Value],
    includes: Option<&Value>,
    title: &str,
    verbose: bool,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    if !title.is_empty() {
        writeln!(out, "## {}\n", title)?;
    }
    if list_of_users(items) {
        return render_user_table(out, items, verbose);
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(out, "\n---\n")?;
        }
        render_tweet(out, item, includes, "", verbose)?;
    }
    Ok(())
}

fn render_user_table(out: &mut String, users: &[Value], verbose: bool) -> fmt::Result {
    if verbose {
        writeln!(out, "| Username | Name | Followers | Description |")?;
        writeln!(out, "|----------|------|-----------|-------------|")?;
    } else {
        writeln!(out, "| Username | Name | Followers |")?;
        writeln!(out, "|----------|------|-----------|")?;
    }

    for user in users {
        let followers = user
            .pointer("/public_metrics/followers_count")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        write!(
            out,
            "| @{} | {} | {} |",
            text_of(user, "username"),
            text_of(user, "name"),
            format_number(followers)
        )?;
        if verbose {
            let description = truncate_chars(text_of(user, "description"), MARKDOWN_DESCRIPTION_CHARS)
                .replace('|', "/")
                .replace('\n', " ");
            write!(out, " {} |", description)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
