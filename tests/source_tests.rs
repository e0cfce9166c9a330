//! Integration tests for record sources and fetch ordering

use medadmin::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Show the tracker's logs with `RUST_LOG=medadmin=debug`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Patient shaped like a backend list entry
fn patient(id: u32, name: &str) -> Patient {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "username": name,
        "age": 40,
        "gender": "Other",
        "case_id": format!("MRN-{id}"),
        "doctor_id": null,
        "create_time": "2024-05-01 09:30:00",
        "update_time": "2024-05-01 09:30:00",
        "attendingDoctorName": "N/A",
        "videoCount": 0,
        "analysisCount": 0
    }))
    .expect("deserialize")
}

/// Source answering after a fixed delay
struct DelayedSource {
    delay: Duration,
    records: Vec<Patient>,
}

#[async_trait]
impl RecordSource<Patient> for DelayedSource {
    async fn fetch(&self) -> Result<Vec<Patient>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.records.clone())
    }
}

#[tokio::test]
async fn test_slow_older_response_does_not_overwrite_newer() {
    init_tracing();
    let tracker = Arc::new(FetchTracker::new());
    let view = Arc::new(Mutex::new(CollectionView::<Patient>::new()));

    let slow = DelayedSource {
        delay: Duration::from_millis(80),
        records: vec![patient(1, "stale")],
    };
    let fast = DelayedSource {
        delay: Duration::from_millis(5),
        records: vec![patient(2, "fresh")],
    };

    let slow_ticket = tracker.begin();
    let fast_ticket = tracker.begin();

    let slow_task = {
        let tracker = tracker.clone();
        let view = view.clone();
        tokio::spawn(async move {
            let records = slow.fetch().await.expect("fetch");
            tracker.complete(slow_ticket, &mut *view.lock().await, records)
        })
    };
    let fast_task = {
        let tracker = tracker.clone();
        let view = view.clone();
        tokio::spawn(async move {
            let records = fast.fetch().await.expect("fetch");
            tracker.complete(fast_ticket, &mut *view.lock().await, records)
        })
    };

    assert!(fast_task.await.expect("join"));
    assert!(!slow_task.await.expect("join"));

    let view = view.lock().await;
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].username, "fresh");
}

#[tokio::test]
async fn test_refresh_keeps_view_inputs() {
    init_tracing();
    let source = InMemoryRecordSource::new(vec![patient(1, "Ann"), patient(2, "bob")]);
    let tracker = FetchTracker::new();
    let view = Mutex::new(CollectionView::new());
    view.lock().await.set_search_term("bo");

    tracker.refresh(&source, &view).await.expect("fetch");
    assert_eq!(view.lock().await.rows().len(), 1);

    source
        .replace(vec![patient(3, "Bobby"), patient(4, "bob"), patient(5, "Cy")])
        .await;
    tracker.refresh(&source, &view).await.expect("fetch");
    let view = view.lock().await;
    assert_eq!(view.rows().len(), 2);
    assert_eq!(view.search_term(), "bo");
}

#[tokio::test]
async fn test_overlapping_refreshes_keep_the_latest() {
    init_tracing();
    let tracker = FetchTracker::new();
    let view = Mutex::new(CollectionView::<Patient>::new());

    let older = DelayedSource {
        delay: Duration::from_millis(80),
        records: vec![patient(1, "stale")],
    };
    let newer = DelayedSource {
        delay: Duration::from_millis(5),
        records: vec![patient(2, "fresh")],
    };

    // The older refresh is polled first, so it takes the first ticket
    let (older_applied, newer_applied) = tokio::join!(
        tracker.refresh(&older, &view),
        tracker.refresh(&newer, &view)
    );
    assert!(!older_applied.expect("fetch"));
    assert!(newer_applied.expect("fetch"));

    let view = view.lock().await;
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].username, "fresh");
    assert_eq!(view.records()[0].id, "2");
}

#[tokio::test]
async fn test_refresh_through_trait_object() {
    let source: Arc<dyn RecordSource<Patient>> =
        Arc::new(InMemoryRecordSource::new(vec![patient(1, "Ann")]));
    let tracker = FetchTracker::new();
    let view = Mutex::new(CollectionView::new());

    assert!(tracker.refresh(source.as_ref(), &view).await.expect("fetch"));
    let view = view.lock().await;
    assert_eq!(view.find("1").map(|p| p.username.as_str()), Some("Ann"));
}
