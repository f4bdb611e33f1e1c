//! User seeding functionality.
//!
//! Seeded accounts all live under `@example.com` so that `clear-seed` can
//! find them again.

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use skillswap_models::UserId;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::UserSeed;

pub const SEED_EMAIL_DOMAIN: &str = "example.com";

pub const SKILLS: &[&str] = &[
    "guitar",
    "piano",
    "cooking",
    "baking",
    "photography",
    "spanish",
    "french",
    "japanese",
    "rust",
    "python",
    "javascript",
    "design",
    "yoga",
    "chess",
    "woodworking",
    "knitting",
    "gardening",
    "public speaking",
    "video editing",
    "calligraphy",
];

/// Generates user data in parallel using Rayon
pub fn generate_users(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(idx, password_hash))
        .collect()
}

fn generate_user(idx: usize, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let handle = format!("{}{}", slug(&first_name), slug(&last_name));

    let email = format!(
        "{}.{}+{}@{}",
        slug(&first_name),
        slug(&last_name),
        idx,
        SEED_EMAIL_DOMAIN
    );

    // Every account needs a way to be reached once a swap is accepted.
    let phone: Option<String> = Boolean(50).fake::<bool>().then(|| PhoneNumber().fake());
    let instagram = (phone.is_none() || Boolean(50).fake::<bool>()).then(|| handle.clone());
    let telegram = Boolean(30).fake::<bool>().then(|| format!("@{}", handle));
    let twitter = Boolean(30).fake::<bool>().then(|| format!("@{}", handle));

    let (skills_offered, skills_wanted) = pick_skills();

    UserSeed {
        name: format!("{} {}", first_name, last_name),
        email,
        password_hash: password_hash.to_string(),
        bio: Boolean(80)
            .fake::<bool>()
            .then(|| Sentence(6..14).fake()),
        skills_offered,
        skills_wanted,
        instagram,
        telegram,
        twitter,
        phone,
    }
}

/// Draws disjoint offered and wanted lists from [`SKILLS`].
fn pick_skills() -> (Vec<String>, Vec<String>) {
    let offered_count: usize = (1..4).fake();
    let wanted_count: usize = (1..4).fake();
    let start: usize = (0..SKILLS.len()).fake();

    let mut rotated = SKILLS.iter().cycle().skip(start).map(|s| s.to_string());
    let offered = rotated.by_ref().take(offered_count).collect();
    let wanted = rotated.take(wanted_count).collect();

    (offered, wanted)
}

fn slug(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// Seeds users into the database
pub async fn seed_users(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count, password_hash);
    let user_ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        user_ids.len(),
        start_time.elapsed()
    );

    if user_ids.len() < users.len() {
        println!(
            "   ⚠ Skipped {} users whose email already exists",
            users.len() - user_ids.len()
        );
    }

    Ok(user_ids)
}

/// Inserts users in batches using multi-value INSERT statements
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 10 params per user, under the 65535 bind limit
    const BATCH_SIZE: usize = 500;

    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO users (name, email, password, bio, skills_offered, skills_wanted, \
         instagram, telegram, twitter, phone) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let placeholders: Vec<String> = (1..=10).map(|n| format!("${}", i * 10 + n)).collect();
        query.push('(');
        query.push_str(&placeholders.join(", "));
        query.push(')');
    }

    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.bio)
            .bind(&user.skills_offered)
            .bind(&user.skills_wanted)
            .bind(&user.instagram)
            .bind(&user.telegram)
            .bind(&user.twitter)
            .bind(&user.phone);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all seeded users. Their swap requests go with them.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
