//! Static-token IdentityProvider implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use devconnector_core::identity::{CallerIdentity, IdentityProvider, UserId};
use devconnector_core::{ProfileError, Result};

/// Resolves bearer tokens from a fixed table.
///
/// Used for local wiring and tests; real token verification is provided by
/// the authentication service.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIdentityProvider {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user: impl Into<UserId>) -> Self {
        self.tokens.insert(token.into(), user.into());
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<CallerIdentity> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        self.tokens
            .get(token)
            .cloned()
            .map(CallerIdentity::new)
            .ok_or_else(|| ProfileError::unauthorized("Unknown or expired token"))
    }
}
