// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;

/// The five secrets needed to talk to the X API.
///
/// Immutable once loaded. `Debug` redacts every value so credentials
/// never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
    pub bearer_token: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: bearer_token.into(),
        }
    }
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}...", visible)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &"<redacted>")
            .field("access_token", &redact(&self.access_token))
            .field("access_token_secret", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// An account handle without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Strips a leading `@` and validates what is left.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = raw.as_ref().trim().trim_start_matches('@');

        if name.is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidUsername {
                name: raw.as_ref().to_string(),
                reason: "only letters, digits and underscores are allowed".to_string(),
            });
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The handle with its `@`, as shown to users.
    pub fn handle(&self) -> String {
        format!("@{}", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
    Plain,
    Markdown,
}

impl OutputMode {
    /// Resolves the global output flags; the first set flag wins.
    pub fn from_flags(json: bool, plain: bool, markdown: bool) -> Self {
        match (json, plain, markdown) {
            (true, _, _) => Self::Json,
            (_, true, _) => Self::Plain,
            (_, _, true) => Self::Markdown,
            _ => Self::Human,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Plain => "plain",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
