//! History, recent listing and stats queries

mod common;

use common::database::seed_bimestre;
use common::fixtures::{adol_record, stage_batch};
use common::TestDatabase;
use planacad_rs::core::approval::ApprovalService;
use planacad_rs::core::types::OperationMode;
use planacad_rs::storage::{CommitEngine, HistoryFilters, HistoryService, StagingStore};
use planacad_rs::{BatchStatus, UploadType};

#[tokio::test]
async fn filters_are_conjunctive() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    seed_bimestre(&db, 2, "2025-2", true).await;

    stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    stage_batch(&db, UploadType::Adol, 2, BatchStatus::Exitoso).await;
    stage_batch(&db, UploadType::Dol, 1, BatchStatus::ConErrores).await;
    stage_batch(&db, UploadType::Adol, 1, BatchStatus::ConErrores).await;

    let history = HistoryService::new(db.conn());

    let (items, total) = history
        .list_history(
            1,
            20,
            &HistoryFilters {
                upload_type: Some("adol".to_string()),
                status: Some("Exitoso".to_string()),
                bimestre_id: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].upload_type, "adol");
    assert_eq!(items[0].status, "Exitoso");
    assert_eq!(items[0].bimestre_id, 1);

    // omitted filters match everything
    let (_, all) = history
        .list_history(1, 20, &HistoryFilters::default())
        .await
        .unwrap();
    assert_eq!(all, 4);
}

#[tokio::test]
async fn approval_status_filter_tracks_transitions() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;

    let a = stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;

    ApprovalService::new(db.conn()).approve(a, 9).await.unwrap();

    let history = HistoryService::new(db.conn());
    let (_, pending) = history
        .list_history(
            1,
            20,
            &HistoryFilters {
                approval_status: Some("Pendiente".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(pending, 1);

    let (_, approved) = history
        .list_history(
            1,
            20,
            &HistoryFilters {
                approval_status: Some("Aprobado".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(approved, 1);
}

#[tokio::test]
async fn total_reflects_filtered_count_regardless_of_page_size() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;

    for _ in 0..7 {
        stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    }

    let history = HistoryService::new(db.conn());
    for page_size in [2u64, 3, 50] {
        let (items, total) = history
            .list_history(1, page_size, &HistoryFilters::default())
            .await
            .unwrap();
        assert_eq!(total, 7, "total must be independent of page size");
        assert_eq!(items.len(), (page_size as usize).min(7));
    }

    // last page carries the remainder
    let (items, _) = history
        .list_history(4, 2, &HistoryFilters::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn history_is_newest_first() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;

    let first = stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    let last = stage_batch(&db, UploadType::Dol, 1, BatchStatus::Exitoso).await;

    let history = HistoryService::new(db.conn());
    let (items, _) = history
        .list_history(1, 20, &HistoryFilters::default())
        .await
        .unwrap();
    assert_eq!(items.first().map(|b| b.id), Some(last));
    assert_eq!(items.last().map(|b| b.id), Some(first));
}

#[tokio::test]
async fn recent_listing_caps_and_filters_by_bimestre() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    seed_bimestre(&db, 2, "2025-2", true).await;

    for _ in 0..22 {
        stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    }
    stage_batch(&db, UploadType::Adol, 2, BatchStatus::Exitoso).await;

    let staging = StagingStore::new(db.conn());
    let recent = staging.list_recent(None, 20).await.unwrap();
    assert_eq!(recent.len(), 20);

    let scoped = staging.list_recent(Some(2), 20).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].bimestre_id, 2);
}

#[tokio::test]
async fn stats_are_recomputed_from_the_tables() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;

    stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;
    stage_batch(&db, UploadType::Adol, 1, BatchStatus::ConErrores).await;
    stage_batch(&db, UploadType::Adol, 1, BatchStatus::Error).await;

    CommitEngine::new(db.conn())
        .commit(
            UploadType::Adol,
            1,
            OperationMode::Upsert,
            &[
                adol_record(2, "MAT101", "Algebra"),
                adol_record(3, "FIS100", "Física"),
            ],
        )
        .await
        .unwrap();

    let history = HistoryService::new(db.conn());
    let stats = history.stats().await.unwrap();

    assert_eq!(stats.total_batches, 3);
    assert_eq!(stats.batches_by_status.exitoso, 1);
    assert_eq!(stats.batches_by_status.con_errores, 1);
    assert_eq!(stats.batches_by_status.error, 1);
    assert_eq!(stats.pending_approvals, 3);
    assert_eq!(stats.production.adol_positions, 2);
    assert_eq!(stats.production.dol_positions, 0);
}

#[tokio::test]
async fn health_reports_database_and_pending_counters() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    stage_batch(&db, UploadType::Adol, 1, BatchStatus::Exitoso).await;

    let history = HistoryService::new(db.conn());
    let health = history.health().await.unwrap();

    assert_eq!(health.status, "healthy");
    assert!(health.database);
    assert_eq!(health.pending_approvals, 1);
    assert!(health.last_upload_at.is_some());
}
