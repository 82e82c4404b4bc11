//! # Campus Auth
//!
//! Account roles, token claims and JWT utilities for the Campus API.
//!
//! - [`role`]: the account-type tags carried by every identity
//! - [`claims`]: the signed claim set (`{ id, accountType, ... }`)
//! - [`jwt`]: signing and verification against a [`JwtConfig`](campus_config::JwtConfig)
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{Role, create_access_token, verify_token};
//! use campus_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Role::Teacher, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.account_type, Role::Teacher);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, verify_token};
pub use role::Role;
