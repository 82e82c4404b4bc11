//! School members and platform super-admins.
//!
//! The `password` column is deliberately absent from both [`USERS`] and
//! [`User`]; the login flow reads the hash with a dedicated query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use campus_auth::Role;
use campus_db::Table;

pub const USERS: Table = Table {
    name: "users",
    alias: "user",
    columns: &[
        "id",
        "school_id",
        "first_name",
        "last_name",
        "email",
        "account_type",
        "phone_number",
        "is_active",
        "is_disabled",
        "is_deleted",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    /// `None` only for super-admins.
    pub school_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub account_type: Role,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub is_disabled: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this account may act on behalf of `school_id`.
    pub fn can_access_school(&self, school_id: Uuid) -> bool {
        if self.is_disabled || self.is_deleted {
            return false;
        }
        self.account_type.is_super_admin() || self.school_id == Some(school_id)
    }
}

/// Adds a member to the school named in the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMemberDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub account_type: Role,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}
