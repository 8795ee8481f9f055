//! Memory log on a real SQLite database file

use jarvis_core::application::MemoryService;
use jarvis_core::domain::{MemoryKind, NewMemoryEntry};
use jarvis_core::error::AppError;
use jarvis_core::port::id_provider::UuidProvider;
use jarvis_core::port::time_provider::SystemTimeProvider;
use jarvis_infra_sqlite::{create_pool, run_migrations, SqliteMemoryStore};
use serde_json::json;
use std::sync::Arc;

async fn service_at(db_path: &str) -> (MemoryService, sqlx::SqlitePool) {
    let pool = create_pool(db_path).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let service = MemoryService::new(
        Arc::new(SqliteMemoryStore::new(pool.clone())),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );
    (service, pool)
}

#[tokio::test]
async fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("memory.db").display().to_string();

    let recorded = {
        let (service, pool) = service_at(&db_path).await;
        let entry = service
            .record(NewMemoryEntry {
                metadata: json!({"action": "lancer-evolution", "score": 7.5}),
                ..NewMemoryEntry::new(MemoryKind::Generation, "evolution applied 2 corrections")
            })
            .await
            .unwrap();
        pool.close().await;
        entry
    };

    let (service, _pool) = service_at(&db_path).await;
    let entries = service.list(None, None).await.unwrap();
    assert_eq!(entries, vec![recorded]);
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_newest_first_with_kind_filter_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("memory.db").display().to_string();
    let (service, _pool) = service_at(&db_path).await;

    for i in 0..5 {
        let kind = if i % 2 == 0 {
            MemoryKind::Feedback
        } else {
            MemoryKind::Learning
        };
        service
            .record(NewMemoryEntry::new(kind, format!("entry {}", i)))
            .await
            .unwrap();
    }

    let feedback = service.list(None, Some(MemoryKind::Feedback)).await.unwrap();
    let contents: Vec<&str> = feedback.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["entry 4", "entry 2", "entry 0"]);

    let latest = service.list(Some(2), None).await.unwrap();
    let contents: Vec<&str> = latest.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["entry 4", "entry 3"]);

    // Limit 0 is clamped to 1
    assert_eq!(service.list(Some(0), None).await.unwrap().len(), 1);
    assert_eq!(service.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_blank_content_is_rejected_and_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("memory.db").display().to_string();
    let (service, _pool) = service_at(&db_path).await;

    let err = service
        .record(NewMemoryEntry::new(MemoryKind::Feedback, "   "))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Domain(_)));
    assert!(err.is_client_error());
    assert_eq!(service.count().await.unwrap(), 0);
}
