//! Decrypted session state.

use serde::{Deserialize, Serialize};

use crate::flash::FlashMessages;
use crate::user::IdentityToken;

/// Key-value state attached to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Serialized identity of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<IdentityToken>,
    /// Flash messages waiting for the next rendered view.
    #[serde(default, skip_serializing_if = "FlashMessages::is_empty")]
    pub flash: FlashMessages,
    /// Where to send the user after a successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}
