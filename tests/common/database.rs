//! Test database utilities
//!
//! In-memory SQLite instances so tests run without external dependencies.
//! Each call creates an isolated, fully-migrated database.

use planacad_rs::config::DatabaseConfig;
use planacad_rs::storage::database::entities::bimestre;
use planacad_rs::storage::Database;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database and run all migrations
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            // in-memory DB only supports one connection
            max_connections: 1,
            connection_timeout: 5,
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Reference to the underlying database facade
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Clone of the pooled connection, for wiring services directly
    pub fn conn(&self) -> DatabaseConnection {
        self.inner.connection().clone()
    }
}

/// Insert a bimestre with a fixed id
pub async fn seed_bimestre(db: &TestDatabase, id: i32, nombre: &str, activo: bool) {
    bimestre::ActiveModel {
        id: Set(id),
        nombre: Set(nombre.to_string()),
        activo: Set(activo),
    }
    .insert(&db.conn())
    .await
    .expect("failed to seed bimestre");
}
