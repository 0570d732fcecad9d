//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::approval::ApprovalService;
use crate::core::pipeline::{UploadLimits, UploadPipeline};
use crate::storage::{Database, HistoryService, StagingStore};
use std::sync::Arc;

/// HTTP server state shared across handlers.
///
/// Every service holds its own clone of the pooled connection, so the whole
/// struct is cheap to clone per worker.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Database facade (migrations, health checks)
    pub db: Arc<Database>,
    /// Upload dispatcher
    pub pipeline: Arc<UploadPipeline>,
    /// Staging store (batch detail, recent listing)
    pub staging: Arc<StagingStore>,
    /// Approval state machine
    pub approval: Arc<ApprovalService>,
    /// History and stats queries
    pub history: Arc<HistoryService>,
}

impl AppState {
    /// Create a new AppState wired to one database
    pub fn new(config: Config, database: Database) -> Self {
        let conn = database.connection().clone();
        let limits = UploadLimits {
            max_rows: config.uploads.max_rows,
        };

        Self {
            config: Arc::new(config),
            db: Arc::new(database),
            pipeline: Arc::new(UploadPipeline::with_limits(conn.clone(), limits)),
            staging: Arc::new(StagingStore::new(conn.clone())),
            approval: Arc::new(ApprovalService::new(conn.clone())),
            history: Arc::new(HistoryService::new(conn)),
        }
    }
}
