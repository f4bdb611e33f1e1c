//! Database seeding for development and demos.
//!
//! Users are generated in parallel and inserted with multi-row statements
//! inside a single transaction per table.

pub mod models;
pub mod swap_requests;
pub mod users;

use std::time::Instant;

use skillswap_core::hash_password;
use skillswap_models::UserId;
use sqlx::PgPool;

pub use models::{SeedConfig, SwapRequestSeed, UserSeed};

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

fn seed_password_hash() -> Result<String, Box<dyn std::error::Error>> {
    hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error).into())
}

/// Seeds users, then swap requests between them.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Starting database seed...\n");

    let password_hash = seed_password_hash()?;
    let user_ids = users::seed_users(db, config.num_users, &password_hash).await?;
    let requests =
        swap_requests::seed_requests(db, &user_ids, config.requests_per_user).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Users:         {}", user_ids.len());
    println!("   Swap requests: {}", requests);
    println!("   Password:      {}", SEED_PASSWORD);

    Ok(())
}

/// Seeds users without any swap requests.
pub async fn seed_users_only(
    db: &PgPool,
    count: usize,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let password_hash = seed_password_hash()?;
    users::seed_users(db, count, &password_hash).await
}

/// Removes every seeded user along with their requests.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = users::clear_users(db).await?;
    println!("\n✅ Cleared {} seeded users and their swap requests", deleted);
    Ok(deleted)
}
