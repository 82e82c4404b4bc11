//! JWT signing and verification.
//!
//! Tokens are HS256-signed with the configured secret and carry the
//! configured issuer and audience. Verification checks signature, `exp`,
//! `iss` and `aud`, then requires a non-empty `id` claim.
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{Role, create_access_token, verify_token};
//!
//! let token = create_access_token(user_id, Role::Admin, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.id, user_id.to_string());
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

/// Why a presented token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid: {0}")]
    Invalid(String),
    #[error("token carries no subject id")]
    MissingSubject,
}

/// Signs an access token for `user_id` with the given account type.
///
/// # Errors
///
/// Returns an internal error if encoding fails (e.g. an unusable secret).
pub fn create_access_token(
    user_id: Uuid,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0);

    let claims = Claims {
        id: user_id.to_string(),
        account_type: role,
        iss: jwt_config.issuer.clone(),
        aud: jwt_config.audience.clone(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature, expiry, issuer and audience and decodes the claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(jwt_config),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;

    if claims.id.trim().is_empty() {
        return Err(TokenError::MissingSubject);
    }

    Ok(claims)
}

fn validation(jwt_config: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&jwt_config.issuer]);
    validation.set_audience(&jwt_config.audience);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);
    validation
}
