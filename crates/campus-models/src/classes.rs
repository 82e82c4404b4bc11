use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use campus_db::Table;

pub const CLASSES: Table = Table {
    name: "classes",
    alias: "class",
    columns: &[
        "id",
        "school_id",
        "class_name",
        "description",
        "class_teacher_id",
        "total_students",
        "academic_year",
        "is_active",
        "is_deleted",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_name: String,
    pub description: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    pub total_students: i32,
    pub academic_year: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub class_name: String,
    pub description: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub total_students: Option<i32>,
    #[validate(length(max = 20))]
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub class_name: Option<String>,
    pub description: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub total_students: Option<i32>,
    #[validate(length(max = 20))]
    pub academic_year: Option<String>,
    pub is_active: Option<bool>,
}
