//! Load-once behaviour of the player API loader across many callers.

use anyhow::anyhow;
use async_trait::async_trait;
use autotube::loader::{ApiLoader, LoadState, ScriptInjector};
use autotube::AutotubeError;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::timeout;

/// Counts injections; fails them when `fail` is set
struct MockInjector {
    calls: AtomicUsize,
    fail: bool,
    injected: Notify,
}

impl MockInjector {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
            injected: Notify::new(),
        })
    }
}

#[async_trait]
impl ScriptInjector for MockInjector {
    async fn inject(&self, _url: &str) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.injected.notify_one();
        if self.fail {
            Err(anyhow!("404 Not Found"))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn many_callers_share_one_injection() {
    let injector = MockInjector::new(false);
    let loader = Arc::new(ApiLoader::new(
        "https://www.youtube.com/iframe_api",
        injector.clone(),
    ));

    let loads: Vec<_> = (0..5).map(|_| loader.load()).collect();
    injector.injected.notified().await;
    assert_eq!(loader.state(), LoadState::Pending);

    loader.readiness_port().signal_ready();

    let handles = timeout(Duration::from_secs(1), join_all(loads))
        .await
        .expect("every caller resolves after the signal");
    let first = handles[0].as_ref().unwrap().clone();
    for handle in handles {
        assert_eq!(handle.unwrap(), first);
    }
    assert_eq!(injector.calls.load(Ordering::SeqCst), 1);

    // Later callers get the settled outcome without another injection
    assert_eq!(loader.load().await.unwrap(), first);
    assert_eq!(injector.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn loader_shared_between_tasks() {
    let injector = MockInjector::new(false);
    let loader = Arc::new(ApiLoader::new("https://example.com/api.js", injector.clone()));
    let port = loader.readiness_port();

    let tasks: Vec<_> = (0..3)
        .map(|_| {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load().await })
        })
        .collect();

    injector.injected.notified().await;
    port.signal_ready();

    for task in tasks {
        let handle = task.await.unwrap().unwrap();
        assert_eq!(handle.script_url, "https://example.com/api.js");
    }
    assert_eq!(injector.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn injection_failure_reaches_every_caller() {
    let injector = MockInjector::new(true);
    let loader = ApiLoader::new("https://www.youtube.com/iframe_api", injector.clone());

    let early = loader.load();
    let err = early.await.unwrap_err();
    assert!(matches!(err, AutotubeError::ApiLoadFailure(ref reason) if reason.contains("404")));
    assert!(matches!(loader.state(), LoadState::Failed(_)));

    // No retry, and a late readiness signal doesn't overturn the failure
    assert!(!loader.readiness_port().signal_ready());
    let late = loader.load().await.unwrap_err();
    assert_eq!(late.to_string(), err.to_string());
    assert_eq!(injector.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn nothing_happens_until_requested() {
    let injector = MockInjector::new(false);
    let loader = ApiLoader::new("https://www.youtube.com/iframe_api", injector.clone());

    tokio::task::yield_now().await;
    assert_eq!(loader.state(), LoadState::NotRequested);
    assert_eq!(injector.calls.load(Ordering::SeqCst), 0);
}
