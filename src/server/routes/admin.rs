//! Admin endpoints: operational counters and pipeline health
//!
//! Counters are recomputed from the tables on every request so they can
//! never drift after a failed commit.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::debug;

/// `GET /uploads/admin/stats`: per-table row counts and batch rollups
pub async fn system_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    debug!("System stats requested");

    let stats = state.history.stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "Estadísticas del sistema obtenidas exitosamente",
    )))
}

/// `GET /uploads/admin/health`: database reachability + batch indicators
pub async fn system_health(state: web::Data<AppState>) -> Result<HttpResponse> {
    debug!("System health requested");

    let health = state.history.health().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        health,
        "Estado del sistema obtenido exitosamente",
    )))
}
