mod common;

use axum::http::StatusCode;
use blogforge::context::RequestContext;
use blogforge::domain::QuotaTier;
use blogforge::services::QuotaService;
use common::{get, open_store, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_fresh_user_sees_full_free_quota() {
    let app = spawn_app().await;

    let (status, body) = get(&app.router, "/api/quota", "fresh_user").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "allowed": true,
            "tier": "free",
            "currentCount": 0,
            "limit": 10,
            "remaining": 10,
        })
    );
}

#[tokio::test]
async fn test_increments_exhaust_free_tier() {
    let store = open_store().await;
    let quota = QuotaService::new(store);
    let ctx = RequestContext::new("busy_user", "req-1");

    let first = quota.check(&ctx).await.unwrap();
    assert!(first.allowed);
    assert_eq!(first.current_count, 0);

    for expected in 1..=10 {
        let inc = quota.increment(&ctx).await.unwrap();
        assert_eq!(inc.new_count, expected);
        assert_eq!(inc.remaining, 10 - expected);
    }

    let status = quota.check(&ctx).await.unwrap();
    assert!(!status.allowed);
    assert_eq!(status.remaining, 0);

    // Another user is unaffected.
    let other = quota
        .check(&RequestContext::new("other_user", "req-2"))
        .await
        .unwrap();
    assert!(other.allowed);
}

#[tokio::test]
async fn test_concurrent_increments_never_lose_counts() {
    let store = open_store().await;
    let quota = QuotaService::new(store);
    let ctx = RequestContext::new("racy_user", "req");
    quota.check(&ctx).await.unwrap();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let quota = quota.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move { quota.increment(&ctx).await })
        })
        .collect();

    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            applied += 1;
        }
    }

    // Stale increments are rejected rather than overwriting each other.
    let status = quota.check(&ctx).await.unwrap();
    assert_eq!(status.current_count, applied);
}

#[tokio::test]
async fn test_set_tier_and_reset() {
    let store = open_store().await;
    let quota = QuotaService::new(store);
    let ctx = RequestContext::new("upgraded_user", "req");

    for _ in 0..10 {
        quota.increment(&ctx).await.unwrap();
    }
    assert!(!quota.check(&ctx).await.unwrap().allowed);

    let status = quota.set_tier("upgraded_user", QuotaTier::Pro).await.unwrap();
    assert_eq!(status.tier, QuotaTier::Pro);
    assert_eq!(status.limit, 100);
    assert_eq!(status.current_count, 10);
    assert_eq!(status.remaining, 90);
    assert!(status.allowed);

    let status = quota.reset("upgraded_user").await.unwrap();
    assert_eq!(status.current_count, 0);
    assert_eq!(status.remaining, 100);
}
