use anyhow::anyhow;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use campus_core::{AppError, PaginationMeta};
use campus_db::{QueryParams, ScopedQuery};
use campus_models::{CLASSES, CreateSubjectDto, SUBJECTS, Subject, UpdateSubjectDto};

use crate::db::{fetch_page, map_write_error};
use crate::metrics::track_record_created;
use crate::modules::classes::service::ClassService;
use crate::modules::users::service::UserService;

const DUPLICATE_SUBJECT: &str = "A subject with this name already exists in this school";
const UNKNOWN_DEPARTMENT_HEAD: &str = "Department head not found in this school";

pub struct SubjectService;

impl SubjectService {
    /// A subject may only point at a live class of its own school.
    async fn ensure_class(db: &PgPool, school_id: Uuid, class_id: Option<Uuid>) -> Result<(), AppError> {
        let Some(class_id) = class_id else {
            return Ok(());
        };
        if !ClassService::class_exists(db, school_id, class_id).await? {
            debug!(class.id = %class_id, "Class not found in school");
            return Err(AppError::bad_request(anyhow!("Class not found in this school")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(subject.name = %dto.name, db.operation = "INSERT", db.table = "subjects"))]
    pub async fn create_subject(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_class(db, school_id, dto.class_id).await?;
        UserService::ensure_member(db, school_id, dto.department_head_id, UNKNOWN_DEPARTMENT_HEAD)
            .await?;

        let sql = format!(
            "INSERT INTO subjects (school_id, name, code, class_id, description,
                                   department_head_id, total_classes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0))
             RETURNING {}",
            SUBJECTS.column_list()
        );

        let subject = sqlx::query_as::<_, Subject>(&sql)
            .bind(school_id)
            .bind(&dto.name)
            .bind(&dto.code)
            .bind(dto.class_id)
            .bind(&dto.description)
            .bind(dto.department_head_id)
            .bind(dto.total_classes)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SUBJECT))?;

        track_record_created("subjects");
        info!(subject.id = %subject.id, school.id = %school_id, "Subject created");
        Ok(subject)
    }

    /// Lists subjects joined with their class, so `class.class_name` can be
    /// filtered, sorted and projected.
    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "subjects"))]
    pub async fn get_subjects(
        db: &PgPool,
        school_id: Uuid,
        params: &QueryParams,
    ) -> Result<(Vec<Value>, PaginationMeta), AppError> {
        let base = ScopedQuery::new(SUBJECTS)
            .left_join(CLASSES, "class_id")
            .where_eq("school_id", school_id)
            .not_deleted();
        fetch_page(db, base, params).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "subjects"))]
    pub async fn get_subject(
        db: &PgPool,
        school_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        let sql = format!(
            "SELECT {} FROM subjects WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
            SUBJECTS.column_list()
        );
        sqlx::query_as::<_, Subject>(&sql)
            .bind(subject_id)
            .bind(school_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "subjects"))]
    pub async fn update_subject(
        db: &PgPool,
        school_id: Uuid,
        subject_id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        Self::ensure_class(db, school_id, dto.class_id).await?;
        UserService::ensure_member(db, school_id, dto.department_head_id, UNKNOWN_DEPARTMENT_HEAD)
            .await?;

        let sql = format!(
            "UPDATE subjects SET
                name = COALESCE($3, name),
                code = COALESCE($4, code),
                class_id = COALESCE($5, class_id),
                description = COALESCE($6, description),
                department_head_id = COALESCE($7, department_head_id),
                total_classes = COALESCE($8, total_classes),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
             WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE
             RETURNING {}",
            SUBJECTS.column_list()
        );

        let subject = sqlx::query_as::<_, Subject>(&sql)
            .bind(subject_id)
            .bind(school_id)
            .bind(&dto.name)
            .bind(&dto.code)
            .bind(dto.class_id)
            .bind(&dto.description)
            .bind(dto.department_head_id)
            .bind(dto.total_classes)
            .bind(dto.is_active)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SUBJECT))?
            .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))?;

        info!(subject.id = %subject.id, "Subject updated");
        Ok(subject)
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "subjects"))]
    pub async fn delete_subject(
        db: &PgPool,
        school_id: Uuid,
        subject_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE subjects SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
        )
        .bind(subject_id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        info!(subject.id = %subject_id, "Subject deleted");
        Ok(())
    }
}
