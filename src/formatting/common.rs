// src/formatting/common.rs
//! Helpers shared by the renderers: payload shape, authors, numbers.

use serde_json::Value;

/// The parts of an API envelope a renderer cares about.
pub struct Envelope<'a> {
    /// `data` if present and not null, else the payload itself.
    pub inner: &'a Value,
    pub includes: Option<&'a Value>,
    pub meta: Option<&'a Value>,
}

impl<'a> Envelope<'a> {
    pub fn open(payload: &'a Value) -> Self {
        match payload {
            Value::Object(map) => Self {
                inner: map.get("data").filter(|d| !d.is_null()).unwrap_or(payload),
                includes: map.get("includes"),
                meta: map.get("meta"),
            },
            other => Self {
                inner: other,
                includes: None,
                meta: None,
            },
        }
    }

    pub fn next_token(&self) -> Option<&'a str> {
        self.meta
            .and_then(|m| m.get("next_token"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Users carry a `username`; everything else is treated as a tweet.
pub fn is_user(item: &Value) -> bool {
    item.get("username").is_some()
}

pub fn list_of_users(items: &[Value]) -> bool {
    items.first().is_some_and(is_user)
}

/// `@username` of a tweet's author from `includes.users`, the raw ID when
/// the author is not included, or `?` without an author ID.
pub fn resolve_author(author_id: Option<&str>, includes: Option<&Value>) -> String {
    let Some(author_id) = author_id.filter(|id| !id.is_empty()) else {
        return "?".to_string();
    };

    includes
        .and_then(|i| i.get("users"))
        .and_then(Value::as_array)
        .and_then(|users| {
            users
                .iter()
                .find(|u| u.get("id").and_then(Value::as_str) == Some(author_id))
        })
        .map(|u| format!("@{}", str_field(u, "username").unwrap_or("?")))
        .unwrap_or_else(|| author_id.to_string())
}

pub fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// A string field, or `""`.
pub fn text_of<'a>(item: &'a Value, key: &str) -> &'a str {
    str_field(item, key).unwrap_or("")
}

/// A single cell: strings verbatim, everything else as compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `like_count` → `like`; with `spaced`, underscores become spaces too.
pub fn metric_label(key: &str, spaced: bool) -> String {
    let label = key.replace("_count", "");
    if spaced {
        label.replace('_', " ")
    } else {
        label
    }
}

/// `public_metrics` as `(key, value)` pairs, in API order.
pub fn metrics(item: &Value) -> Vec<(&str, &Value)> {
    item.get("public_metrics")
        .and_then(Value::as_object)
        .map(|m| m.iter().map(|(k, v)| (k.as_str(), v)).collect())
        .unwrap_or_default()
}

/// Thousands separators: `1234567` → `1,234,567`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Numbers get separators; anything else is shown as-is.
pub fn grouped(value: &Value) -> String {
    value
        .as_i64()
        .map(format_number)
        .unwrap_or_else(|| cell(value))
}

/// At most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-45000), "-45,000");
    }

    #[test]
    fn test_resolve_author() {
        let includes = json!({"users": [{"id": "1", "username": "alice"}]});
        assert_eq!(resolve_author(Some("1"), Some(&includes)), "@alice");
        assert_eq!(resolve_author(Some("2"), Some(&includes)), "2");
        assert_eq!(resolve_author(None, Some(&includes)), "?");
        assert_eq!(resolve_author(Some("1"), None), "1");
    }

    #[test]
    fn test_envelope_falls_back_to_payload() {
        let payload = json!({"id": "1", "text": "bare"});
        assert_eq!(Envelope::open(&payload).inner, &payload);

        let payload = json!({"data": {"id": "1"}, "meta": {"next_token": "abc"}});
        let env = Envelope::open(&payload);
        assert_eq!(env.inner, &json!({"id": "1"}));
        assert_eq!(env.next_token(), Some("abc"));
    }

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("retweet_count", false), "retweet");
        assert_eq!(metric_label("impression_count", true), "impression");
        assert_eq!(metric_label("bookmark_count", true), "bookmark");
        assert_eq!(metric_label("listed_count", true), "listed");
        assert_eq!(metric_label("tweet_count", true), "tweet");
        assert_eq!(metric_label("followers_count", true), "followers");
        assert_eq!(metric_label("quote_tweets", true), "quote tweets");
    }
}
