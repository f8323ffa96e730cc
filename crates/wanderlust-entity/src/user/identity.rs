//! Serialized reference to a user, as kept inside a session.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wanderlust_core::error::AppError;

/// What the session stores for an authenticated user: the user id as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Build the token for a user id.
    pub fn from_user_id(id: Uuid) -> Self {
        Self(id.to_string())
    }

    /// Parse the user id back out of the token.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0)
            .map_err(|e| AppError::not_found(format!("Malformed identity token: {e}")))
    }

    /// Raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip() {
        let id = Uuid::new_v4();
        let token = IdentityToken::from_user_id(id);
        assert_eq!(token.user_id().unwrap(), id);
    }

    #[test]
    fn test_malformed_token() {
        let token: IdentityToken = serde_json::from_str("\"not-a-uuid\"").unwrap();
        assert!(token.user_id().is_err());
    }
}
