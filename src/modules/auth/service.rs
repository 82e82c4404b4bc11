use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use campus_auth::{Role, create_access_token};
use campus_config::JwtConfig;
use campus_core::{AppError, hash_password, verify_dummy_password, verify_password};
use campus_models::{AuthResponse, LoginRequest, RegisterSuperAdminRequest, USERS, User};

use crate::metrics::track_login;
use crate::modules::users::service::{NewUser, SUPER_ADMIN_EXISTS, UserService};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Bootstraps the platform. Only succeeds while no live super-admin exists.
    #[instrument(skip(db, jwt_config, dto), fields(user.email = %dto.email))]
    pub async fn register_super_admin(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: RegisterSuperAdminRequest,
    ) -> Result<AuthResponse, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE account_type = $1 AND is_deleted = FALSE)",
        )
        .bind(Role::SuperAdmin.as_str())
        .fetch_one(db)
        .await?;

        if exists {
            warn!("Rejected super admin registration, one already exists");
            return Err(AppError::forbidden(SUPER_ADMIN_EXISTS));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = UserService::insert_user(
            db,
            NewUser {
                school_id: None,
                first_name: &dto.first_name,
                last_name: &dto.last_name,
                email: &dto.email,
                password_hash: &password_hash,
                account_type: Role::SuperAdmin,
                phone_number: None,
            },
        )
        .await?;

        let access_token = create_access_token(user.id, user.account_type, jwt_config)?;
        info!(user.id = %user.id, "Super admin registered");

        Ok(AuthResponse { access_token, user })
    }

    #[instrument(skip(db, jwt_config, dto), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let sql = format!(
            "SELECT {}, password FROM users WHERE email = $1 AND is_deleted = FALSE",
            USERS.column_list()
        );

        let Some(UserWithPassword { user, password }) =
            sqlx::query_as::<_, UserWithPassword>(&sql)
                .bind(&dto.email)
                .fetch_optional(db)
                .await?
        else {
            verify_dummy_password(&dto.password);
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &password)? {
            track_login(false);
            warn!(user.id = %user.id, "Failed login attempt");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if user.is_disabled {
            track_login(false);
            warn!(user.id = %user.id, "Disabled account attempted to log in");
            return Err(AppError::forbidden("Account is disabled"));
        }

        let access_token = create_access_token(user.id, user.account_type, jwt_config)?;
        track_login(true);
        info!(user.id = %user.id, user.role = %user.account_type, "User logged in");

        Ok(AuthResponse { access_token, user })
    }

    pub async fn profile(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        UserService::find_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Disables a school admin account. Their existing tokens stop passing the
    /// tenant gate, and they can no longer log in.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn deactivate_admin(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET is_disabled = TRUE, updated_at = NOW()
             WHERE id = $1 AND account_type = $2 AND is_deleted = FALSE
             RETURNING {}",
            USERS.column_list()
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(Role::Admin.as_str())
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Admin not found")))?;

        info!(user.id = %user.id, "Admin deactivated");
        Ok(user)
    }
}
