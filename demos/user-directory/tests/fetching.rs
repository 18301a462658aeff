//! Fetch lifecycle tests for the user directory container

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use user_directory::{FetchError, QueryKey, StaticUserSource, UserDirectory, UserRecord, UserSource};

/// Source whose n-th call takes `latencies[n]` and returns n+1 records
struct SequencedSource {
    latencies: Vec<Duration>,
    calls: AtomicUsize,
}

impl UserSource for SequencedSource {
    fn fetch(&self, _key: &QueryKey) -> BoxFuture<'static, Result<Vec<UserRecord>, FetchError>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let latency = self.latencies.get(call).copied().unwrap_or_default();
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            let users = (0..=call as u64)
                .map(|id| UserRecord {
                    id,
                    name: format!("user {id}"),
                    email: format!("user{id}@example.org"),
                    phone: String::new(),
                    website: String::new(),
                })
                .collect();
            Ok(users)
        })
    }
}

struct BrokenSource;

impl UserSource for BrokenSource {
    fn fetch(&self, _key: &QueryKey) -> BoxFuture<'static, Result<Vec<UserRecord>, FetchError>> {
        Box::pin(async {
            Err(FetchError::Unavailable {
                status: 503,
                message: "maintenance".into(),
            })
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_loading_then_resolved() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let directory = UserDirectory::new(Arc::new(
        StaticUserSource::sample().with_latency(Duration::from_millis(300)),
    ));
    assert!(!directory.is_loading().await);

    directory.start_fetch(QueryKey::users()).await.unwrap();
    assert!(directory.is_loading().await);
    assert!(directory.users().await.is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!directory.is_loading().await);
    assert_eq!(directory.users().await.len(), 3);
    assert_eq!(directory.error().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_newer_fetch_supersedes_older() {
    let source = Arc::new(SequencedSource {
        latencies: vec![Duration::from_millis(500), Duration::from_millis(100)],
        calls: AtomicUsize::new(0),
    });
    let directory = UserDirectory::new(source.clone());

    directory.start_fetch(QueryKey::users()).await.unwrap();
    directory.fetch(QueryKey::new("users?page=2")).await.unwrap();

    // Give the slow first call time to land if it had not been aborted
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(directory.users().await.len(), 2, "only the second fetch may resolve");
    assert_eq!(
        directory.store().state(|s| s.key.clone()).await,
        Some(QueryKey::new("users?page=2"))
    );
}

#[tokio::test]
async fn test_failure_is_surfaced_not_returned() {
    let directory = UserDirectory::new(Arc::new(BrokenSource));

    assert!(directory.fetch(QueryKey::users()).await.is_ok());

    assert!(!directory.is_loading().await);
    assert!(directory.users().await.is_empty());
    assert_eq!(
        directory.error().await.as_deref(),
        Some("Source unavailable (status 503): maintenance")
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_and_drop_discard_results() {
    let directory = UserDirectory::new(Arc::new(
        StaticUserSource::sample().with_latency(Duration::from_millis(300)),
    ));
    let store = directory.store().clone();

    directory.start_fetch(QueryKey::users()).await.unwrap();
    directory.cancel().await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!directory.is_loading().await);
    assert!(directory.users().await.is_empty());

    directory.start_fetch(QueryKey::users()).await.unwrap();
    drop(directory);
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Torn down mid-fetch: still loading, nothing resolved
    assert!(store.state(|s| s.is_loading()).await);
    assert!(store.state(|s| s.users.is_empty()).await);
    assert_eq!(store.in_flight(), 0);
}
