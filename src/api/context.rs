// src/api/context.rs
//! Explicit authentication state carried by the API client.

use crate::error::AppError;
use crate::types::{Credentials, UserId};

/// Credentials plus the authenticated account's ID once it is known.
///
/// The ID is resolved with one `/users/me` lookup and then carried as a
/// value; nothing fills it in behind the caller's back.
#[derive(Debug, Clone)]
pub struct AuthenticatedContext {
    pub credentials: Credentials,
    pub cached_self_id: Option<UserId>,
}

impl AuthenticatedContext {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            cached_self_id: None,
        }
    }

    pub fn with_self_id(mut self, id: UserId) -> Self {
        self.cached_self_id = Some(id);
        self
    }

    /// The authenticated user's ID, required by `/users/{me}/...` endpoints.
    pub fn self_id(&self) -> Result<&UserId, AppError> {
        self.cached_self_id.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(
                "authenticated user ID has not been resolved".to_string(),
            )
        })
    }
}
