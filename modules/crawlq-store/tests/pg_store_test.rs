//! Integration tests for PgArmStore.
//! Requires a Postgres instance. Set DATABASE_TEST_URL or these tests are skipped.
//!
//! Each test works on its own platform name so tests can share one table.

use crawlq_store::{ArmStore, BeliefDelta, PgArmStore};

/// Get a migrated store, or skip if no test DB is available.
async fn test_store() -> Option<PgArmStore> {
    let url = std::env::var("DATABASE_TEST_URL").ok()?;
    let store = PgArmStore::connect(&url, 10).await.ok()?;
    store.migrate().await.ok()?;
    Some(store)
}

/// Unique platform per test run, ≤32 chars.
fn platform(tag: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    format!("t{tag}{nanos}")
}

fn qs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let Some(store) = test_store().await else {
        return;
    };
    let p = platform("seed");

    assert_eq!(store.insert_if_absent(&p, &qs(&["a", "b"])).await.unwrap(), 2);
    store
        .apply_reward(&p, "a", BeliefDelta::from_report(1.0, 3))
        .await
        .unwrap();
    let mut before = store.arms_for_platform(&p).await.unwrap();

    assert_eq!(store.insert_if_absent(&p, &qs(&["a", "b"])).await.unwrap(), 0);
    let mut after = store.arms_for_platform(&p).await.unwrap();
    before.sort_by(|x, y| x.query_text.cmp(&y.query_text));
    after.sort_by(|x, y| x.query_text.cmp(&y.query_text));

    assert_eq!(before.len(), 2);
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.alpha, a.alpha);
        assert_eq!(b.beta, a.beta);
        assert_eq!(b.updated_at, a.updated_at, "re-seed must not touch updated_at");
    }
}

#[tokio::test]
async fn reward_on_unseeded_query_creates_arm() {
    let Some(store) = test_store().await else {
        return;
    };
    let p = platform("adhoc");

    store
        .apply_reward(&p, "x", BeliefDelta::from_report(0.5, 4))
        .await
        .unwrap();

    let arms = store.arms_for_platform(&p).await.unwrap();
    assert_eq!(arms.len(), 1);
    assert_eq!(arms[0].alpha, 3.0);
    assert_eq!(arms[0].beta, 3.0);
    assert_eq!(arms[0].last_reward, Some(0.5));
}

#[tokio::test]
async fn concurrent_rewards_are_not_lost() {
    let Some(store) = test_store().await else {
        return;
    };
    let p = platform("race");
    store.insert_if_absent(&p, &qs(&["hot"])).await.unwrap();

    let tasks = (0..20).map(|i| {
        let store = store.clone();
        let p = p.clone();
        tokio::spawn(async move {
            let reward = if i % 2 == 0 { 1.0 } else { 0.0 };
            store
                .apply_reward(&p, "hot", BeliefDelta::from_report(reward, 5))
                .await
        })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let arms = store.arms_for_platform(&p).await.unwrap();
    assert_eq!(arms[0].alpha, 1.0 + 50.0);
    assert_eq!(arms[0].beta, 1.0 + 50.0);
}

#[tokio::test]
async fn recent_arms_respects_limit_and_recency() {
    let Some(store) = test_store().await else {
        return;
    };
    let p = platform("recent");
    store.insert_if_absent(&p, &qs(&["a", "b", "c"])).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store
        .apply_reward(&p, "b", BeliefDelta::from_report(0.2, 1))
        .await
        .unwrap();

    let recent = store.recent_arms(&p, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].query_text, "b");
}
