use std::time::Duration;

use tinylink_core::LinkStore;
use tinylink_redis::RedisLinkStore;
use tinylink_test_infra::RedisServer;

/// Test fixture that manages a Redis container for the duration of a test.
struct RedisFixture {
    #[allow(dead_code)]
    server: RedisServer,
    store: RedisLinkStore,
}

impl RedisFixture {
    async fn start() -> Self {
        let server = RedisServer::start().await;
        let url = server.url().await;

        // Wait a moment to ensure Redis is fully ready
        tokio::time::sleep(Duration::from_millis(500)).await;

        let store = RedisLinkStore::connect(&url)
            .await
            .expect("Failed to connect to Redis");
        Self { server, store }
    }
}

#[tokio::test]
async fn put_then_get_roundtrip() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store.put("it:abc", "https://example.com").await.unwrap();

    let value = store.get("it:abc").await.unwrap();
    assert_eq!(value.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn get_absent_key_returns_none() {
    let fixture = RedisFixture::start().await;

    let value = fixture.store.get("it:missing").await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn put_overwrites_existing_value() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store.put("it:abc", "https://old.example").await.unwrap();
    store.put("it:abc", "https://new.example").await.unwrap();

    let value = store.get("it:abc").await.unwrap();
    assert_eq!(value.as_deref(), Some("https://new.example"));
}

#[tokio::test]
async fn remove_reports_removed_count() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store.put("it:abc", "https://example.com").await.unwrap();

    assert_eq!(store.remove("it:abc").await.unwrap(), 1);
    assert_eq!(store.remove("it:abc").await.unwrap(), 0);
}

#[tokio::test]
async fn entry_with_expiry_is_evicted() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store
        .put_with_expiry("it:ephemeral", "https://example.com", Duration::from_secs(1))
        .await
        .unwrap();

    let value = store.get("it:ephemeral").await.unwrap();
    assert_eq!(value.as_deref(), Some("https://example.com"));

    awaitility::at_most(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(100))
        .until_async(|| async { store.get("it:ephemeral").await.unwrap().is_none() })
        .await;
}

#[tokio::test]
async fn scan_keys_matches_only_the_pattern() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store.put("scan:a", "1").await.unwrap();
    store.put("scan:b", "2").await.unwrap();
    store.put("other:c", "3").await.unwrap();

    let mut keys = store.scan_keys("scan:*").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["scan:a", "scan:b"]);
}

#[tokio::test]
async fn remove_batch_reports_one_count_per_key() {
    let fixture = RedisFixture::start().await;
    let store = &fixture.store;

    store.put("batch:a", "1").await.unwrap();
    store.put("batch:b", "2").await.unwrap();

    let outcomes = store
        .remove_batch(&[
            "batch:a".to_string(),
            "batch:missing".to_string(),
            "batch:b".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(outcomes, vec![1, 0, 1]);
    assert!(store.get("batch:a").await.unwrap().is_none());
    assert!(store.get("batch:b").await.unwrap().is_none());
}
