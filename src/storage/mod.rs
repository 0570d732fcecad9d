//! Storage layer
//!
//! Everything durable lives behind SeaORM: batches, staging rows, the
//! bimestre registry and the per-type production tables.

pub mod database;

pub use database::{
    BatchDetail, CommitEngine, CommitOutcome, Database, HistoryFilters, HistoryService, NewBatch,
    StagingStore, SystemHealth, SystemStats,
};
