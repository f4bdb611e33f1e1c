use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use skillswap_core::AppError;
use skillswap_models::{
    Email, ProfileChanges, PublicProfile, User, UserCard, UserFilterParams, UserId,
};

/// Columns selected for a [`User`]. The password hash is never part of it.
pub const USER_COLUMNS: &str = "id, name, email, bio, skills_offered, skills_wanted, \
     instagram, telegram, twitter, phone, created_at, updated_at";

const CARD_COLUMNS: &str =
    "id, name, bio, skills_offered, skills_wanted, instagram, telegram, twitter, phone";

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn exists(db: &PgPool, id: UserId) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;

        Ok(exists)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_public(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<Vec<PublicProfile>, AppError> {
        let filters = filters.normalized();

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, bio, skills_offered, skills_wanted, created_at FROM users WHERE TRUE",
        );

        if let Some(name) = filters.name {
            query.push(" AND name = ").push_bind(name);
        }
        if let Some(email) = filters.email {
            query.push(" AND email = ").push_bind(email);
        }
        if let Some(skill) = filters.skills_offered {
            query
                .push(" AND ")
                .push_bind(skill)
                .push(" = ANY(skills_offered)");
        }
        if let Some(skill) = filters.skills_wanted {
            query
                .push(" AND ")
                .push_bind(skill)
                .push(" = ANY(skills_wanted)");
        }

        query.push(" ORDER BY created_at DESC, id DESC");

        let users = query
            .build_query_as::<PublicProfile>()
            .fetch_all(db)
            .await?;

        debug!(count = users.len(), "Listed users");

        Ok(users)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_self(db: &PgPool, id: UserId) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn email_exists(db: &PgPool, email: &Email) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    /// Writes only the columns present in `changes`.
    #[instrument(skip(db, changes), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_self(
        db: &PgPool,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, AppError> {
        if changes.is_empty() {
            return Self::get_self(db, id).await;
        }

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut set = query.separated(", ");

        if let Some(name) = changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(bio) = changes.bio {
            set.push("bio = ").push_bind_unseparated(bio);
        }
        if let Some(skills) = changes.skills_offered {
            set.push("skills_offered = ").push_bind_unseparated(skills);
        }
        if let Some(skills) = changes.skills_wanted {
            set.push("skills_wanted = ").push_bind_unseparated(skills);
        }
        if let Some(links) = changes.social_links {
            set.push("instagram = ").push_bind_unseparated(links.instagram);
            set.push("telegram = ").push_bind_unseparated(links.telegram);
            set.push("twitter = ").push_bind_unseparated(links.twitter);
        }
        set.push("updated_at = NOW()");

        query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(USER_COLUMNS);

        let user = query
            .build_query_as::<User>()
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        info!(user.id = %user.id, "Profile updated");

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_card(db: &PgPool, id: UserId) -> Result<Option<UserCard>, AppError> {
        let card = sqlx::query_as::<_, UserCard>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            CARD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(card)
    }

    /// Loads the cards for a batch of ids in one round trip.
    #[instrument(skip(db, ids), fields(db.operation = "SELECT", db.table = "users", count = ids.len()))]
    pub async fn find_cards(
        db: &PgPool,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, UserCard>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cards = sqlx::query_as::<_, UserCard>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            CARD_COLUMNS
        ))
        .bind(ids)
        .fetch_all(db)
        .await?;

        Ok(cards.into_iter().map(|card| (card.id, card)).collect())
    }

    #[instrument(skip(db, ids), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_emails(
        db: &PgPool,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, Email>, AppError> {
        let rows: Vec<(UserId, Email)> =
            sqlx::query_as("SELECT id, email FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(db)
                .await?;

        Ok(rows.into_iter().collect())
    }
}
