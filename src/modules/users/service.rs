use anyhow::anyhow;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use campus_auth::Role;
use campus_core::{AppError, PaginationMeta, hash_password};
use campus_db::{QueryParams, ScopedQuery};
use campus_models::{CreateMemberDto, USERS, User};

use crate::db::{fetch_page, map_write_error};
use crate::metrics::track_record_created;

/// Column values for a new `users` row. The password is already hashed.
pub struct NewUser<'a> {
    pub school_id: Option<Uuid>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub account_type: Role,
    pub phone_number: Option<&'a str>,
}

/// Partial unique index allowing one live super-admin.
pub const SINGLE_SUPER_ADMIN_INDEX: &str = "users_single_super_admin";
pub const SUPER_ADMIN_EXISTS: &str = "A super admin already exists";

pub struct UserService;

impl UserService {
    pub async fn insert_user(db: &PgPool, new_user: NewUser<'_>) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (school_id, first_name, last_name, email, password, account_type, phone_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            USERS.column_list()
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(new_user.school_id)
            .bind(new_user.first_name)
            .bind(new_user.last_name)
            .bind(new_user.email)
            .bind(new_user.password_hash)
            .bind(new_user.account_type.as_str())
            .bind(new_user.phone_number)
            .fetch_one(db)
            .await
            .map_err(|e| {
                let second_super_admin = e
                    .as_database_error()
                    .and_then(|db_err| db_err.constraint())
                    == Some(SINGLE_SUPER_ADMIN_INDEX);
                if second_super_admin {
                    warn!("Rejected a second live super admin");
                    return AppError::forbidden(SUPER_ADMIN_EXISTS);
                }
                map_write_error(e, "Email already exists")
            })?;

        track_record_created("users");
        Ok(user)
    }

    /// Rejects a referenced user id that is not a live member of `school_id`.
    pub async fn ensure_member(
        db: &PgPool,
        school_id: Uuid,
        user_id: Option<Uuid>,
        message: &'static str,
    ) -> Result<(), AppError> {
        let Some(user_id) = user_id else {
            return Ok(());
        };
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE)",
        )
        .bind(user_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            warn!(user.id = %user_id, school.id = %school_id, "Referenced user is not a member of this school");
            return Err(AppError::bad_request(anyhow!(message)));
        }
        Ok(())
    }

    /// Live (not soft-deleted) user by id, whatever their school.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_user(db: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 AND is_deleted = FALSE",
            USERS.column_list()
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_member(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateMemberDto,
    ) -> Result<User, AppError> {
        if dto.account_type.is_super_admin() {
            warn!(school.id = %school_id, "Attempted to add a super admin to a school");
            return Err(AppError::bad_request(anyhow!(
                "Super admins cannot belong to a school"
            )));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = Self::insert_user(
            db,
            NewUser {
                school_id: Some(school_id),
                first_name: &dto.first_name,
                last_name: &dto.last_name,
                email: &dto.email,
                password_hash: &password_hash,
                account_type: dto.account_type,
                phone_number: dto.phone_number.as_deref(),
            },
        )
        .await?;

        info!(user.id = %user.id, user.role = %user.account_type, "Member added");
        Ok(user)
    }

    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_members(
        db: &PgPool,
        school_id: Uuid,
        params: &QueryParams,
    ) -> Result<(Vec<Value>, PaginationMeta), AppError> {
        let base = ScopedQuery::new(USERS)
            .where_eq("school_id", school_id)
            .not_deleted();
        fetch_page(db, base, params).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_member(db: &PgPool, school_id: Uuid, user_id: Uuid) -> Result<User, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
            USERS.column_list()
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(school_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn delete_member(db: &PgPool, school_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND school_id = $2 AND is_deleted = FALSE",
        )
        .bind(user_id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user.id = %user_id, "Member deleted");
        Ok(())
    }
}
