#![allow(dead_code)]

use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Duration;

pub async fn create_community(pool: &PgPool, domain_name: &str, short_description: &str) {
    sqlx::query(
        "INSERT INTO Communities (DomainName, Description, ShortDescription) VALUES ($1, $2, $3)",
    )
    .bind(domain_name)
    .bind("description")
    .bind(short_description)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn short_description(pool: &PgPool, domain_name: &str) -> Option<String> {
    sqlx::query_scalar::<_, Option<String>>(
        "SELECT ShortDescription FROM Communities WHERE DomainName = $1",
    )
    .bind(domain_name)
    .fetch_optional(pool)
    .await
    .unwrap()
    .flatten()
}

pub async fn community_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM Communities")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Writes `contents` to a per-test file under the system temp directory.
pub fn write_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "community-updater-{}-{}.csv",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Waits until some session in the test database is blocked on a row lock.
pub async fn wait_for_lock_waiter(pool: &PgPool) {
    for _ in 0..250 {
        let waiting: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pg_stat_activity \
             WHERE datname = current_database() AND wait_event_type = 'Lock'",
        )
        .fetch_one(pool)
        .await
        .unwrap();

        if waiting > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("no session blocked on a row lock");
}
