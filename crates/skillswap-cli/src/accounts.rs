//! Account creation outside the HTTP surface.

use skillswap_core::hash_password;
use skillswap_models::{SignupDto, UserId};
use sqlx::PgPool;
use validator::Validate;

/// Registers a user with the same normalization and contact rule as
/// `POST /auth/signup`.
pub async fn create_user(
    db: &PgPool,
    dto: SignupDto,
) -> Result<UserId, Box<dyn std::error::Error>> {
    dto.validate()?;
    let new_user = dto.into_new_user().map_err(|e| e.error.to_string())?;

    let hashed_password = hash_password(&new_user.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        r#"
        INSERT INTO users (name, email, password, bio, skills_offered, skills_wanted,
                           instagram, telegram, twitter, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
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
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| "User with this email already exists".into())
}

/// Splits a comma-separated prompt answer into a skill list.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// An empty prompt answer means "not provided".
pub fn non_empty(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(
            parse_list(" rust, ,guitar ,  cooking"),
            vec!["rust", "guitar", "cooking"]
        );
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  @ada ".into()), Some("@ada".to_string()));
        assert_eq!(non_empty("   ".into()), None);
    }
}
