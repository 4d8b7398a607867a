// src/formatting/human.rs
//! Terminal output: bordered panels for tweets and profiles, aligned tables
//! for user lists.

use super::common::*;
use crate::api::parser::display_text;
use crate::constants::{PANEL_WIDTH, USER_TABLE_DESCRIPTION_CHARS};
use chrono::DateTime;
use colored::{Color, Colorize};
use serde_json::Value;
use std::fmt::{self, Write};
use textwrap::core::display_width;

pub fn render(payload: &Value, title: &str, verbose: bool) -> Result<String, fmt::Error> {
    let envelope = Envelope::open(payload);
    let mut out = String::new();

    match envelope.inner {
        Value::Array(items) if list_of_users(items) => {
            render_user_table(&mut out, items, title, verbose)?
        }
        Value::Array(items) => {
            for item in items {
                out.push_str(&tweet_panel(item, envelope.includes, "", verbose));
            }
        }
        item @ Value::Object(_) if is_user(item) => out.push_str(&user_panel(item, verbose)),
        item @ Value::Object(_) => {
            out.push_str(&tweet_panel(item, envelope.includes, title, verbose))
        }
        other => writeln!(out, "{}", cell(other))?,
    }

    if verbose {
        if let Some(token) = envelope.next_token() {
            writeln!(out, "{}", format!("Next page: --next-token {}", token).dimmed())?;
        }
    }
    Ok(out)
}

/// `2025-01-01T12:30:00.000Z` → `2025-01-01 12:30 UTC`; anything else as-is.
fn friendly_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn tweet_panel(tweet: &Value, includes: Option<&Value>, title: &str, verbose: bool) -> String {
    let author = resolve_author(str_field(tweet, "author_id"), includes);

    let mut header = author.bold().to_string();
    if verbose {
        let created = text_of(tweet, "created_at");
        if !created.is_empty() {
            header.push_str(&format!("  {}", friendly_timestamp(created).dimmed()));
        }
    }

    let mut lines = vec![header, String::new(), display_text(tweet).to_string()];

    if verbose {
        let parts: Vec<String> = metrics(tweet)
            .into_iter()
            .map(|(k, v)| format!("{}: {}", metric_label(k, true), cell(v)))
            .collect();
        if !parts.is_empty() {
            lines.push(String::new());
            lines.push(parts.join(" | ").dimmed().to_string());
        }
    }

    let panel_title = if title.is_empty() {
        format!("Tweet {}", text_of(tweet, "id"))
    } else {
        title.to_string()
    };
    panel(&panel_title, &lines, Color::Blue)
}

fn user_panel(user: &Value, verbose: bool) -> String {
    let username = text_of(user, "username");

    let mut header = format!("{} @{}", text_of(user, "name").bold(), username);
    if user.get("verified").and_then(Value::as_bool).unwrap_or(false) {
        header.push_str(&format!(" {}", "verified".blue()));
    }
    let mut lines = vec![header];

    let description = text_of(user, "description");
    if !description.is_empty() {
        lines.push(description.to_string());
    }

    if verbose {
        let location = text_of(user, "location");
        if !location.is_empty() {
            lines.push(format!("Location: {}", location).dimmed().to_string());
        }
        let created = text_of(user, "created_at");
        if !created.is_empty() {
            lines.push(
                format!("Joined: {}", friendly_timestamp(created))
                    .dimmed()
                    .to_string(),
            );
        }
    }

    let parts: Vec<String> = metrics(user)
        .into_iter()
        .map(|(k, v)| format!("{}: {}", metric_label(k, true), grouped(v)))
        .collect();
    if !parts.is_empty() {
        lines.push(String::new());
        lines.push(parts.join(" | "));
    }

    panel(&format!("@{}", username), &lines, Color::Green)
}

/// A box that shrinks to fit its content, wrapping long lines.
fn panel(title: &str, lines: &[String], border: Color) -> String {
    let max_inner = PANEL_WIDTH.saturating_sub(4);
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|line| {
            textwrap::wrap(line, max_inner)
                .into_iter()
                .map(|l| l.into_owned())
                .collect::<Vec<_>>()
        })
        .collect();

    let title_width = display_width(title);
    let inner = wrapped
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0)
        .max(title_width + 1);

    let mut out = String::new();
    let fill = "─".repeat(inner + 2 - (title_width + 3));
    out.push_str(&format!(
        "{}{}{}\n",
        "╭─ ".color(border),
        title.bold(),
        format!(" {}╮", fill).color(border)
    ));
    for line in &wrapped {
        let pad = " ".repeat(inner - display_width(line));
        out.push_str(&format!(
            "{} {}{} {}\n",
            "│".color(border),
            line,
            pad,
            "│".color(border)
        ));
    }
    out.push_str(&format!(
        "{}\n",
        format!("╰{}╯", "─".repeat(inner + 2)).color(border)
    ));
    out
}

fn render_user_table(out: &mut String, users: &[Value], title: &str, verbose: bool) -> fmt::Result {
    let mut headers = vec!["Username", "Name", "Followers"];
    if verbose {
        headers.push("Description");
    }

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            let mut row = vec![
                format!("@{}", text_of(u, "username")),
                text_of(u, "name").to_string(),
                u.pointer("/public_metrics/followers_count")
                    .map(grouped)
                    .unwrap_or_default(),
            ];
            if verbose {
                row.push(
                    truncate_chars(text_of(u, "description"), USER_TABLE_DESCRIPTION_CHARS)
                        .replace('\n', " "),
                );
            }
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .map(|r| display_width(&r[col]))
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let table_title = if title.is_empty() { "Users" } else { title };
    writeln!(out, "{}", table_title.bold())?;

    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad_cell(h, *w, h == &"Followers"))
        .collect();
    writeln!(out, "{}", header_cells.join("  ").bold())?;
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (value, w))| {
                let padded = pad_cell(value, *w, col == 2);
                if col == 0 {
                    padded.bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

fn pad_cell(value: &str, width: usize, right_align: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{}{}", pad, value)
    } else {
        format!("{}{}", value, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn plain_colors() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_tweet_panel() {
        plain_colors();
        let payload = json!({
            "data": {"id": "7", "text": "hello world", "author_id": "1"},
            "includes": {"users": [{"id": "1", "username": "alice"}]}
        });
        assert_eq!(
            render(&payload, "", false).unwrap(),
            "╭─ Tweet 7 ───╮\n\
             │ @alice      │\n\
             │             │\n\
             │ hello world │\n\
             ╰─────────────╯\n"
        );
    }

    #[test]
    fn test_watch_title_replaces_tweet_id() {
        plain_colors();
        let payload = json!({"data": {"id": "7", "text": "hi"}});
        let rendered = render(&payload, "@alice", false).unwrap();
        assert!(rendered.starts_with("╭─ @alice "));
        assert!(!rendered.contains("Tweet 7"));
    }

    #[test]
    fn test_long_text_wraps_inside_panel() {
        plain_colors();
        let text = "word ".repeat(40);
        let payload = json!({"data": {"id": "1", "text": text}});
        let rendered = render(&payload, "", false).unwrap();
        for line in rendered.lines() {
            assert!(display_width(line) <= PANEL_WIDTH, "too wide: {}", line);
        }
    }

    #[test]
    fn test_verbose_tweet_metrics_and_timestamp() {
        plain_colors();
        let payload = json!({"data": {
            "id": "1",
            "text": "t",
            "created_at": "2025-03-04T05:06:07.000Z",
            "public_metrics": {"like_count": 2, "quote_count": 0}
        }});
        let rendered = render(&payload, "", true).unwrap();
        assert!(rendered.contains("?  2025-03-04 05:06 UTC"));
        assert!(rendered.contains("like: 2 | quote: 0"));
    }

    #[test]
    fn test_user_panel() {
        plain_colors();
        let payload = json!({"data": {
            "name": "Alice",
            "username": "alice",
            "verified": true,
            "public_metrics": {"followers_count": 1200, "tweet_count": 5}
        }});
        let rendered = render(&payload, "", false).unwrap();
        assert!(rendered.starts_with("╭─ @alice "));
        assert!(rendered.contains("Alice @alice verified"));
        assert!(rendered.contains("followers: 1,200 | tweet: 5"));
    }

    #[test]
    fn test_user_table_alignment() {
        plain_colors();
        let payload = json!({"data": [
            {"username": "a", "name": "Ann", "public_metrics": {"followers_count": 5}},
            {"username": "bobby", "name": "Bob", "public_metrics": {"followers_count": 12000}}
        ]});
        assert_eq!(
            render(&payload, "", false).unwrap(),
            "Users\n\
             Username  Name  Followers\n\
             ────────  ────  ─────────\n\
             @a        Ann           5\n\
             @bobby    Bob      12,000\n"
        );
    }
}
