//! Tests against a live Redis server.
//!
//! Ignored by default. Run with a disposable server:
//! `REDIS_URL=redis://127.0.0.1:6379 cargo test --test redis_store -- --ignored`
//! Every test works under its own key prefix and cleans up after itself.

use std::sync::Arc;
use std::time::Duration;

use rankcache::error::Error;
use rankcache::leaderboard::service::Leaderboard;
use rankcache::maintenance::service::KeyMaintenance;
use rankcache::store::{RedisStore, StoreClient};

async fn connect() -> Arc<RedisStore> {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    Arc::new(
        RedisStore::connect(&url, Duration::from_secs(2), 10)
            .await
            .expect("a Redis server at REDIS_URL"),
    )
}

#[tokio::test]
#[ignore]
async fn test_redis_leaderboard_ranks_and_ties() {
    let store = connect().await;
    let board = Leaderboard::new(store.clone(), "rankcache-test:board");
    store.delete_key("rankcache-test:board").await.unwrap();

    for (player, score) in [("A", 50.0), ("B", 80.0), ("C", 80.0), ("D", 10.0)] {
        board.submit_score(player, score).await.unwrap();
    }
    board.submit_score("D", 20.0).await.unwrap();

    let top: Vec<String> = board
        .get_top(3)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.player)
        .collect();
    assert_eq!(top, vec!["C", "B", "A"]);

    let d = board.get_player("D").await.unwrap().unwrap();
    assert_eq!((d.score, d.rank), (20.0, 4));
    assert_eq!(board.get_player("nobody").await.unwrap(), None);
    assert_eq!(board.player_count().await.unwrap(), 4);
    assert!(board.get_top(0).await.unwrap().is_empty());

    store.delete_key("rankcache-test:board").await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_redis_delete_by_pattern_spans_scan_rounds() {
    let store = connect().await;
    let maintenance = KeyMaintenance::new(store.clone());
    maintenance
        .delete_by_pattern("rankcache-test:bulk:*")
        .await
        .unwrap();

    // More keys than one SCAN round (COUNT 10) returns.
    for i in 0..35 {
        store
            .set_string(&format!("rankcache-test:bulk:{}", i), "v", None)
            .await
            .unwrap();
    }
    store
        .set_string("rankcache-test:keep", "v", None)
        .await
        .unwrap();

    assert_eq!(
        maintenance
            .delete_by_pattern("rankcache-test:bulk:*")
            .await
            .unwrap(),
        35
    );
    assert_eq!(
        maintenance
            .delete_by_pattern("rankcache-test:nomatch:*")
            .await
            .unwrap(),
        0
    );
    assert!(store.key_exists("rankcache-test:keep").await.unwrap());

    store.delete_key("rankcache-test:keep").await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_redis_ttl_and_hashes() {
    let store = connect().await;

    store
        .set_string("rankcache-test:ttl", "v", Some(Duration::from_millis(100)))
        .await
        .unwrap();
    assert!(store.key_exists("rankcache-test:ttl").await.unwrap());
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(store.get_string("rankcache-test:ttl").await.unwrap(), None);

    store.delete_key("rankcache-test:hash").await.unwrap();
    assert!(store.hash_set("rankcache-test:hash", "f", "1").await.unwrap());
    assert_eq!(store.hash_len("rankcache-test:hash").await.unwrap(), 1);
    assert_eq!(
        store.hash_get("rankcache-test:hash", "f").await.unwrap(),
        Some("1".to_string())
    );

    // Wrong-type access is a store-side error.
    assert!(matches!(
        store.get_string("rankcache-test:hash").await,
        Err(Error::StoreUnavailable(_))
    ));

    store.delete_key("rankcache-test:hash").await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_unreachable_server_is_unavailable() {
    let result = RedisStore::connect("redis://127.0.0.1:1", Duration::from_millis(300), 10).await;

    assert!(matches!(result, Err(Error::StoreUnavailable(_))));
}
