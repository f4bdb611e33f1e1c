use sqlx::PgPool;
use tracing::{info, instrument, warn};

use skillswap_auth::create_access_token;
use skillswap_config::JwtConfig;
use skillswap_core::{AppError, hash_password, verify_password};
use skillswap_models::{Email, LoginRequest, SignupDto, User, UserWithPassword};

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_signup,
};
use crate::modules::users::service::{USER_COLUMNS, UserService};

pub struct AuthService;

impl AuthService {
    /// Registers a user and signs them in.
    #[instrument(skip(db, jwt_config, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: SignupDto,
    ) -> Result<(String, User), AppError> {
        let new_user = dto.into_new_user()?;

        if UserService::email_exists(db, &new_user.email).await? {
            warn!(email = %new_user.email, "Signup with registered email");
            return Err(AppError::duplicate_email());
        }

        let hashed_password = hash_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password, bio, skills_offered, skills_wanted,
                               instagram, telegram, twitter, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&hashed_password)
        .bind(&new_user.bio)
        .bind(&new_user.skills_offered)
        .bind(&new_user.skills_wanted)
        .bind(&new_user.social_links.instagram)
        .bind(&new_user.social_links.telegram)
        .bind(&new_user.social_links.twitter)
        .bind(&new_user.phone)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::duplicate_email();
            }
            AppError::from(e)
        })?;

        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        track_user_signup();
        track_jwt_issued();

        info!(user.id = %user.id, "User registered");

        Ok((token, user))
    }

    /// Both an unknown email and a wrong password yield the same
    /// `InvalidCredentials` error.
    #[instrument(skip(db, jwt_config, dto), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<(String, User), AppError> {
        let Ok(email) = Email::new(dto.email) else {
            track_user_login_failure("invalid_email");
            return Err(AppError::invalid_credentials());
        };

        let record = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {}, password FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(record) = record else {
            track_user_login_failure("user_not_found");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &record.password)? {
            track_user_login_failure("invalid_password");
            return Err(AppError::invalid_credentials());
        }

        let user = record.user;
        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        track_user_login_success();
        track_jwt_issued();

        info!(user.id = %user.id, "User logged in");

        Ok((token, user))
    }
}
