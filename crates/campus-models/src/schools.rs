use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use campus_db::Table;

pub const SCHOOLS: Table = Table {
    name: "schools",
    alias: "school",
    columns: &[
        "id",
        "name",
        "address",
        "phone_number",
        "email",
        "website",
        "principal_name",
        "description",
        "registration_number",
        "state",
        "city",
        "is_active",
        "is_disabled",
        "is_deleted",
        "created_at",
        "updated_at",
    ],
};

/// A tenant. Every class, subject and non-super-admin user belongs to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_name: Option<String>,
    pub description: Option<String>,
    pub registration_number: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub is_active: bool,
    pub is_disabled: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSchoolDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub address: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub principal_name: Option<String>,
    pub description: Option<String>,
    pub registration_number: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSchoolDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub principal_name: Option<String>,
    pub description: Option<String>,
    pub registration_number: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub is_disabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_school_validation() {
        let dto: CreateSchoolDto = serde_json::from_value(serde_json::json!({
            "name": "Greenfield Academy",
            "email": "office@greenfield.test",
            "website": "https://greenfield.test"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let dto: CreateSchoolDto = serde_json::from_value(serde_json::json!({
            "name": "",
            "email": "not-an-email"
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_descriptor_has_scope_columns() {
        for column in ["id", "is_deleted", "created_at"] {
            assert!(SCHOOLS.has_column(column));
        }
    }
}
