use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::error::ApiError;
use crate::models::*;
use crate::store::{Store, StoreError};

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Allocations
// ============================================================

/// Query parameters for listing allocations.
#[derive(Debug, Deserialize)]
pub struct ListAllocationsQuery {
    /// School year, exact match.
    pub ano: Option<String>,
    /// Subject name, case-insensitive match.
    pub disciplina: Option<String>,
}

pub async fn list_allocations(
    State(store): State<Store>,
    Query(query): Query<ListAllocationsQuery>,
) -> Result<Json<Vec<AllocationSummary>>, ApiError> {
    let filter = AllocationFilter::from_params(query.ano.as_deref(), query.disciplina.as_deref());
    Ok(Json(store.list_allocations(&filter)?))
}

pub async fn get_roster(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Roster>, ApiError> {
    Ok(Json(store.get_roster(&AllocationRef::new(id))?))
}

// ============================================================
// Login
// ============================================================

pub async fn get_login_info(State(store): State<Store>) -> Result<Json<LoginInfo>, ApiError> {
    Ok(Json(store.login_info()?))
}

// ============================================================
// Attendance
// ============================================================

pub async fn list_attendance(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
    Ok(Json(store.list_attendance(&AllocationRef::new(id))?))
}

pub async fn record_attendance(
    State(store): State<Store>,
    payload: Result<Json<RecordAttendanceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordAttendanceResponse>), ApiError> {
    let Json(input) = payload.map_err(|e| StoreError::InvalidInput(e.body_text()))?;
    let record = store.record_attendance(input)?;

    Ok((
        StatusCode::CREATED,
        Json(RecordAttendanceResponse {
            id: record.id,
            message: "Frequência registrada com sucesso.".to_string(),
        }),
    ))
}
