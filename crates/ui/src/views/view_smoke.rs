use roadmap_core::model::Roadmap;
use storage::repository::{KeyValueStore, StorageError};

use super::test_harness::{failing_storage, setup_view_harness, setup_view_harness_with_store};

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(Roadmap::ui_ux_fundamentals());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Learning Path"), "missing header in {html}");
    assert!(
        html.contains("UI/UX Design Fundamentals"),
        "missing title in {html}"
    );
    assert!(
        html.contains("0 of 7 lessons completed"),
        "missing progress in {html}"
    );
    assert!(html.contains("Next Lesson"), "missing frontier in {html}");
    assert!(
        html.contains("Portfolio Projects"),
        "missing last lesson in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_renders_persisted_progress() {
    let mut harness = setup_view_harness(Roadmap::ui_ux_fundamentals());
    harness
        .storage
        .kv
        .set("uiux-progress", "2")
        .await
        .expect("seed progress");
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("2 of 7 lessons completed"),
        "missing progress in {html}"
    );
    assert_eq!(html.matches("Completed").count(), 2, "rows in {html}");
    assert!(html.contains("lesson-current"), "missing current row in {html}");
}

struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_falls_back_when_storage_fails() {
    let mut harness =
        setup_view_harness_with_store(Roadmap::ui_ux_fundamentals(), failing_storage(FailingStore));
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("0 of 7 lessons completed"),
        "missing fallback progress in {html}"
    );
    assert!(!html.contains("Something went wrong"), "unexpected error in {html}");
}
