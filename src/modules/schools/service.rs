use anyhow::anyhow;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use campus_core::{AppError, PaginationMeta};
use campus_db::{QueryParams, ScopedQuery};
use campus_models::{CreateSchoolDto, SCHOOLS, School, UpdateSchoolDto};

use crate::db::{fetch_page, map_write_error};
use crate::metrics::track_record_created;

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db, dto), fields(school.name = %dto.name, db.operation = "INSERT", db.table = "schools"))]
    pub async fn create_school(db: &PgPool, dto: CreateSchoolDto) -> Result<School, AppError> {
        let sql = format!(
            "INSERT INTO schools (name, address, phone_number, email, website, principal_name,
                                  description, registration_number, state, city)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            SCHOOLS.column_list()
        );

        let school = sqlx::query_as::<_, School>(&sql)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.phone_number)
            .bind(&dto.email)
            .bind(&dto.website)
            .bind(&dto.principal_name)
            .bind(&dto.description)
            .bind(&dto.registration_number)
            .bind(&dto.state)
            .bind(&dto.city)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "School name already exists"))?;

        track_record_created("schools");
        info!(school.id = %school.id, "School created");

        Ok(school)
    }

    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_schools(
        db: &PgPool,
        params: &QueryParams,
    ) -> Result<(Vec<Value>, PaginationMeta), AppError> {
        fetch_page(db, ScopedQuery::new(SCHOOLS).not_deleted(), params).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_school(db: &PgPool, school_id: Uuid) -> Result<School, AppError> {
        let sql = format!(
            "SELECT {} FROM schools WHERE id = $1 AND is_deleted = FALSE",
            SCHOOLS.column_list()
        );

        sqlx::query_as::<_, School>(&sql)
            .bind(school_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                debug!(school.id = %school_id, "School not found");
                AppError::not_found(anyhow!("School not found"))
            })
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "schools"))]
    pub async fn update_school(
        db: &PgPool,
        school_id: Uuid,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let sql = format!(
            "UPDATE schools SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                phone_number = COALESCE($4, phone_number),
                email = COALESCE($5, email),
                website = COALESCE($6, website),
                principal_name = COALESCE($7, principal_name),
                description = COALESCE($8, description),
                registration_number = COALESCE($9, registration_number),
                state = COALESCE($10, state),
                city = COALESCE($11, city),
                is_active = COALESCE($12, is_active),
                is_disabled = COALESCE($13, is_disabled),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {}",
            SCHOOLS.column_list()
        );

        let school = sqlx::query_as::<_, School>(&sql)
            .bind(school_id)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.phone_number)
            .bind(&dto.email)
            .bind(&dto.website)
            .bind(&dto.principal_name)
            .bind(&dto.description)
            .bind(&dto.registration_number)
            .bind(&dto.state)
            .bind(&dto.city)
            .bind(dto.is_active)
            .bind(dto.is_disabled)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "School name already exists"))?
            .ok_or_else(|| AppError::not_found(anyhow!("School not found")))?;

        info!(school.id = %school.id, "School updated");
        Ok(school)
    }

    /// Soft delete. Members, classes and subjects stay in place but become
    /// unreachable because the tenant gate rejects deleted schools.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "schools"))]
    pub async fn delete_school(db: &PgPool, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE schools SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("School not found")));
        }

        info!(school.id = %school_id, "School deleted");
        Ok(())
    }
}
