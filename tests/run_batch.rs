mod common;

use community_updater::error::InputError;
use community_updater::infrastructure::persistence::PgCommunityRepository;
use community_updater::runner::process_file;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;

#[sqlx::test(migrations = "./migrations")]
async fn test_match_and_missing_rows(pool: PgPool) {
    common::create_community(&pool, "a.com", "old").await;
    let path = common::write_csv("match_and_missing", "a.com,d1,s1\nb.com,d2,s2\n");
    let repo = Arc::new(PgCommunityRepository::new(Arc::new(pool.clone())));

    let summary = process_file(repo, &path, false, 1).await.unwrap();

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        common::short_description(&pool, "a.com").await,
        Some("s1".to_string())
    );
    assert_eq!(common::short_description(&pool, "b.com").await, None);
    assert_eq!(common::community_count(&pool).await, 1);

    std::fs::remove_file(path).ok();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_error_keeps_earlier_updates(pool: PgPool) {
    common::create_community(&pool, "a.com", "old-a").await;
    common::create_community(&pool, "c.com", "old-c").await;
    let path = common::write_csv("read_error", "a.com,d1,s1\nb.com,d2\nc.com,d3,s3\n");
    let repo = Arc::new(PgCommunityRepository::new(Arc::new(pool.clone())));

    let result = process_file(repo, &path, false, 1).await;

    assert!(matches!(result, Err(InputError::Read(_))));
    assert_eq!(
        common::short_description(&pool, "a.com").await,
        Some("s1".to_string())
    );
    assert_eq!(
        common::short_description(&pool, "c.com").await,
        Some("old-c".to_string())
    );

    std::fs::remove_file(path).ok();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_header_row_skipped(pool: PgPool) {
    common::create_community(&pool, "a.com", "old").await;
    let path = common::write_csv(
        "header_row",
        "DomainName,Description,ShortDescription\na.com,d1,s1\n",
    );
    let repo = Arc::new(PgCommunityRepository::new(Arc::new(pool.clone())));

    let summary = process_file(repo, &path, true, 1).await.unwrap();

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.updated, 1);

    std::fs::remove_file(path).ok();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_run_applies_every_row(pool: PgPool) {
    let mut csv = String::new();
    for i in 0..20 {
        common::create_community(&pool, &format!("site{i}.com"), "old").await;
        csv.push_str(&format!("site{i}.com,d,s{i}\n"));
    }
    let path = common::write_csv("concurrent", &csv);
    let repo = Arc::new(PgCommunityRepository::new(Arc::new(pool.clone())));

    let summary = process_file(repo, &path, false, 4).await.unwrap();

    assert_eq!(summary.updated, 20);
    assert_eq!(summary.failed, 0);
    for i in 0..20 {
        assert_eq!(
            common::short_description(&pool, &format!("site{i}.com")).await,
            Some(format!("s{i}"))
        );
    }

    std::fs::remove_file(path).ok();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_input_file(pool: PgPool) {
    let repo = Arc::new(PgCommunityRepository::new(Arc::new(pool)));

    let result = process_file(repo, Path::new("does/not/exist.csv"), false, 1).await;

    assert!(matches!(result, Err(InputError::Open { .. })));
}
