//! Database storage implementation using SeaORM

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;

mod commit;
mod db;
mod history;
mod staging;

pub use commit::{CommitEngine, CommitOutcome};
pub use db::Database;
pub use history::{
    HistoryFilters, HistoryService, ProductionCounts, StatusCounts, SystemHealth, SystemStats,
};
pub use staging::{BatchDetail, NewBatch, StagingStore};
