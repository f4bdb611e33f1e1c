//! Swap-request seeding functionality.

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::Sentence;
use rayon::prelude::*;
use skillswap_models::{SwapStatus, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::SwapRequestSeed;

/// Generates up to `per_user` requests from every user to distinct others.
pub fn generate_requests(user_ids: &[UserId], per_user: usize) -> Vec<SwapRequestSeed> {
    let n = user_ids.len();
    if n < 2 {
        return Vec::new();
    }
    let per_user = per_user.min(n - 1);

    user_ids
        .par_iter()
        .enumerate()
        .flat_map(|(idx, &from_user_id)| {
            // Consecutive offsets in 1..n give distinct recipients, never the sender.
            let start: usize = (0..n - 1).fake();
            (0..per_user)
                .map(|k| {
                    let offset = (start + k) % (n - 1) + 1;
                    SwapRequestSeed {
                        from_user_id,
                        to_user_id: user_ids[(idx + offset) % n],
                        message: random_message(),
                        status: random_status(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn random_message() -> String {
    if Boolean(20).fake() {
        return String::new();
    }
    let sentence: String = Sentence(4..12).fake();
    sentence.chars().take(200).collect()
}

fn random_status() -> SwapStatus {
    match (0u8..10).fake::<u8>() {
        0..=1 => SwapStatus::Accepted,
        2 => SwapStatus::Rejected,
        _ => SwapStatus::Pending,
    }
}

/// Seeds swap requests into the database
pub async fn seed_requests(
    db: &PgPool,
    user_ids: &[UserId],
    per_user: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let requests = generate_requests(user_ids, per_user);
    println!("🤝 Seeding {} swap requests...", requests.len());

    let inserted = insert_requests_batch(db, &requests).await?;

    println!(
        "   ✓ Inserted {} swap requests in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn insert_requests_batch(
    db: &PgPool,
    requests: &[SwapRequestSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 4 params per request
    const BATCH_SIZE: usize = 2000;

    let mut inserted = 0;
    for chunk in requests.chunks(BATCH_SIZE) {
        inserted += insert_requests_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_requests_chunk(
    tx: &mut Transaction<'_, Postgres>,
    requests: &[SwapRequestSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if requests.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO swap_requests (from_user_id, to_user_id, message, status) VALUES ",
    );

    for i in 0..requests.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(" ON CONFLICT (from_user_id, to_user_id) DO NOTHING");

    let mut q = sqlx::query(&query);
    for request in requests {
        q = q
            .bind(request.from_user_id)
            .bind(request.to_user_id)
            .bind(&request.message)
            .bind(request.status);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}
