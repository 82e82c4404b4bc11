use anyhow::anyhow;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use campus_core::{AppError, PaginationMeta};
use campus_db::{QueryParams, ScopedQuery};
use campus_models::{CLASSES, Class, CreateClassDto, UpdateClassDto};

use crate::db::{fetch_page, map_write_error};
use crate::metrics::track_record_created;
use crate::modules::users::service::UserService;

const DUPLICATE_CLASS: &str = "A class with this name already exists in this school";
const UNKNOWN_CLASS_TEACHER: &str = "Class teacher not found in this school";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto), fields(class.name = %dto.class_name, db.operation = "INSERT", db.table = "classes"))]
    pub async fn create_class(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateClassDto,
    ) -> Result<Class, AppError> {
        UserService::ensure_member(db, school_id, dto.class_teacher_id, UNKNOWN_CLASS_TEACHER).await?;

        let sql = format!(
            "INSERT INTO classes (school_id, class_name, description, class_teacher_id,
                                  total_students, academic_year)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {}",
            CLASSES.column_list()
        );

        let class = sqlx::query_as::<_, Class>(&sql)
            .bind(school_id)
            .bind(&dto.class_name)
            .bind(&dto.description)
            .bind(dto.class_teacher_id)
            .bind(dto.total_students)
            .bind(&dto.academic_year)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CLASS))?;

        track_record_created("classes");
        info!(class.id = %class.id, school.id = %school_id, "Class created");
        Ok(class)
    }

    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "classes"))]
    pub async fn get_classes(
        db: &PgPool,
        school_id: Uuid,
        params: &QueryParams,
    ) -> Result<(Vec<Value>, PaginationMeta), AppError> {
        let base = ScopedQuery::new(CLASSES)
            .where_eq("school_id", school_id)
            .not_deleted();
        fetch_page(db, base, params).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "classes"))]
    pub async fn get_class(db: &PgPool, school_id: Uuid, class_id: Uuid) -> Result<Class, AppError> {
        let sql = format!(
            "SELECT {} FROM classes WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
            CLASSES.column_list()
        );
        sqlx::query_as::<_, Class>(&sql)
            .bind(class_id)
            .bind(school_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }

    /// Whether `class_id` names a live class of `school_id`.
    pub async fn class_exists(db: &PgPool, school_id: Uuid, class_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE)",
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "classes"))]
    pub async fn update_class(
        db: &PgPool,
        school_id: Uuid,
        class_id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        UserService::ensure_member(db, school_id, dto.class_teacher_id, UNKNOWN_CLASS_TEACHER).await?;

        let sql = format!(
            "UPDATE classes SET
                class_name = COALESCE($3, class_name),
                description = COALESCE($4, description),
                class_teacher_id = COALESCE($5, class_teacher_id),
                total_students = COALESCE($6, total_students),
                academic_year = COALESCE($7, academic_year),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
             WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE
             RETURNING {}",
            CLASSES.column_list()
        );

        let class = sqlx::query_as::<_, Class>(&sql)
            .bind(class_id)
            .bind(school_id)
            .bind(&dto.class_name)
            .bind(&dto.description)
            .bind(dto.class_teacher_id)
            .bind(dto.total_students)
            .bind(&dto.academic_year)
            .bind(dto.is_active)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CLASS))?
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))?;

        info!(class.id = %class.id, "Class updated");
        Ok(class)
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "classes"))]
    pub async fn delete_class(db: &PgPool, school_id: Uuid, class_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE classes SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
        )
        .bind(class_id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        info!(class.id = %class_id, "Class deleted");
        Ok(())
    }
}
