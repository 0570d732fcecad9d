//! # planacad-rs
//!
//! Backend of an academic scheduling administration tool. Its core is the
//! upload pipeline: heterogeneous spreadsheet files (staffing rosters,
//! academic-structure catalogs, course-offering reports, optional-course
//! lists) are parsed, validated row by row, staged for inspection,
//! optionally committed to production tables, and gated behind a human
//! approve/reject workflow with full history.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use planacad_rs::config::Config;
//! use planacad_rs::server::HttpServer;
//! use planacad_rs::storage::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/planacad.yaml").await?;
//!     let database = Database::new(&config.database).await?;
//!     database.migrate().await?;
//!     HttpServer::new(&config, database).start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{AppError, Result};

pub use core::types::{
    ApprovalStatus, BatchStatus, OperationMode, UploadOptions, UploadOutcome, UploadSummary,
    UploadType,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
