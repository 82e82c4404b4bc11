//! JWT signing configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `JWT_SECRET` | development placeholder |
//! | `JWT_ACCESS_EXPIRY` | `3600` seconds |
//! | `JWT_ISSUER` | `campus-api` |
//! | `JWT_AUDIENCE` | `campus-staff,campus-admin,campus-super-admin` (comma-separated) |

use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    pub issuer: String,
    /// A token is accepted when any of its `aud` entries is listed here.
    pub audience: Vec<String>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "campus-api".to_string()),
            audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "campus-staff,campus-admin,campus-super-admin".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
