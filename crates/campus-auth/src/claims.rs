//! The signed claim set.
//!
//! The payload deliberately carries only the subject id and the account
//! type. Mutable account state (disabled, deleted, school membership) is
//! re-read from the database by callers that need it.

use serde::{Deserialize, Serialize};

use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID. Empty when a token was minted without one; such tokens are rejected.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "accountType")]
    pub account_type: Role,
    pub iss: String,
    pub aud: Vec<String>,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}
