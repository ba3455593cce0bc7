//! Postgres round-trip tests for the store queries.
//!
//! These need a reachable database; point `DATABASE_URL` at one and run
//! `cargo test -- --ignored`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::PgPool;
use warden::db::pool;
use warden::db::queries::{link, message, mute, warning};

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let pool = pool::create_pool(&url).await.expect("pool connects");
    pool::run_migrations(&pool).await.expect("migrations run");
    pool
}

static NEXT_ID: AtomicI64 = AtomicI64::new(0);

/// Ids unique per call so repeated runs never collide on live rows.
fn unique_id() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock is past the epoch")
        .as_nanos() as i64;
    nanos + NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[tokio::test]
#[ignore]
async fn test_remute_replaces_instead_of_stacking() {
    let pool = test_pool().await;
    let subject = unique_id();
    let role = unique_id();

    let first = mute::upsert(&pool, subject, 111, 1_000, role)
        .await
        .expect("first mute");
    let second = mute::upsert(&pool, subject, 222, 2_000, role)
        .await
        .expect("re-mute");

    assert_eq!(first.ticket, second.ticket, "replaced, not stacked");
    assert_eq!(second.expires, 2_000);
    assert_eq!(second.issuer_id, 222);

    // A sweep that scanned the old expiry must not reap the replacement.
    let stale = mute::delete_expired(&pool, first.ticket, 1_000)
        .await
        .expect("stale delete");
    assert!(!stale);
    assert!(mute::get_active(&pool, subject, role)
        .await
        .expect("lookup")
        .is_some());

    let fresh = mute::delete_expired(&pool, second.ticket, 2_000)
        .await
        .expect("fresh delete");
    assert!(fresh);
    assert!(mute::get_active(&pool, subject, role)
        .await
        .expect("lookup")
        .is_none());
}

#[tokio::test]
#[ignore]
async fn test_expired_scan_only_sees_past_expiries() {
    let pool = test_pool().await;
    let subject = unique_id();
    let role_a = unique_id();
    let role_b = unique_id();

    let past = mute::upsert(&pool, subject, 1, 100, role_a)
        .await
        .expect("expired mute");
    let future = mute::upsert(&pool, subject, 1, i64::MAX, role_b)
        .await
        .expect("future mute");

    let expired = mute::get_expired(&pool, 200).await.expect("scan");
    assert!(expired.iter().any(|r| r.ticket == past.ticket));
    assert!(!expired.iter().any(|r| r.ticket == future.ticket));

    assert!(mute::delete_expired(&pool, past.ticket, past.expires)
        .await
        .expect("cleanup"));
    assert!(mute::delete_expired(&pool, future.ticket, future.expires)
        .await
        .expect("cleanup"));
}

#[tokio::test]
#[ignore]
async fn test_warning_tickets_grow_monotonically() {
    let pool = test_pool().await;
    let subject = unique_id();

    let first = warning::create(&pool, subject, "spamming", 42)
        .await
        .expect("first warning");
    let second = warning::create(&pool, subject, "more spamming", 42)
        .await
        .expect("second warning");
    assert!(second > first);

    assert_eq!(
        warning::count_for(&pool, subject).await.expect("count"),
        2
    );

    let recent = warning::list_for(&pool, subject, 1).await.expect("list");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].ticket, second);
    assert_eq!(recent[0].reason, "more spamming");
}

#[tokio::test]
#[ignore]
async fn test_archive_take_is_single_use() {
    let pool = test_pool().await;
    let id = unique_id();

    message::archive(&pool, id, Some("hello"), 7, "tester", 99)
        .await
        .expect("archive");
    message::archive(&pool, id, Some("hello, edited"), 7, "tester", 99)
        .await
        .expect("refresh");

    let record = message::take(&pool, id)
        .await
        .expect("take")
        .expect("archived row");
    assert_eq!(record.content.as_deref(), Some("hello, edited"));
    assert_eq!(record.author_name, "tester");

    assert!(message::take(&pool, id).await.expect("second take").is_none());
}

#[tokio::test]
#[ignore]
async fn test_link_symmetry() {
    let pool = test_pool().await;
    let discord = unique_id();
    let minecraft = format!("test-{}", discord);

    assert!(!link::is_linked_either(&pool, &minecraft, discord)
        .await
        .expect("fresh check"));

    link::create(&pool, &minecraft, link::id_hash(&minecraft), discord)
        .await
        .expect("create");

    // Either side alone blocks a new link.
    assert!(link::is_linked_either(&pool, &minecraft, unique_id())
        .await
        .expect("minecraft side"));
    assert!(link::is_linked_either(&pool, "someone-else", discord)
        .await
        .expect("discord side"));
    assert!(link::is_discord_linked(&pool, discord)
        .await
        .expect("discord linked"));

    let by_discord = link::get_by_discord(&pool, discord)
        .await
        .expect("by discord")
        .expect("row");
    assert_eq!(by_discord.minecraft_id, minecraft);

    let by_minecraft = link::get_by_minecraft_id(&pool, &minecraft)
        .await
        .expect("by minecraft")
        .expect("row");
    assert_eq!(by_minecraft.discord_id, discord);

    assert!(link::delete_by_discord(&pool, discord)
        .await
        .expect("unlink"));
    assert!(!link::delete_by_discord(&pool, discord)
        .await
        .expect("second unlink"));
}
