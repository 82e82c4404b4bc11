use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use campus_db::Table;

/// Subject lists join [`CLASSES`](crate::CLASSES) on `class_id`, so
/// `class.class_name` is available to `fields`, `sort` and filters.
pub const SUBJECTS: Table = Table {
    name: "subjects",
    alias: "subject",
    columns: &[
        "id",
        "school_id",
        "name",
        "code",
        "class_id",
        "description",
        "department_head_id",
        "total_classes",
        "is_active",
        "is_deleted",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub class_id: Option<Uuid>,
    pub description: Option<String>,
    pub department_head_id: Option<Uuid>,
    pub total_classes: i32,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 20))]
    pub code: Option<String>,
    pub class_id: Option<Uuid>,
    pub description: Option<String>,
    pub department_head_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub total_classes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 20))]
    pub code: Option<String>,
    pub class_id: Option<Uuid>,
    pub description: Option<String>,
    pub department_head_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub total_classes: Option<i32>,
    pub is_active: Option<bool>,
}
