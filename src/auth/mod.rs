// src/auth/mod.rs
//! Request authentication: bearer tokens for app-only reads, OAuth 1.0a
//! signatures for user-context calls.

pub mod oauth;

pub use oauth::{percent_encode, sign, sign_with, FixedEntropy, SigningEntropy, SystemEntropy};

use crate::types::Credentials;

/// `Authorization` value for app-only (bearer) requests.
pub fn bearer_header(credentials: &Credentials) -> String {
    format!("Bearer {}", credentials.bearer_token)
}
