//! HTTP Route Handlers
//!
//! Thin adapters: decode the body, call the application service, wrap the
//! result in an envelope.

use crate::error::ApiError;
use crate::types::{
    AnalysisRequest, EvolutionRequest, HealthResponse, MemoryListQuery, MemoryListResponse,
    MemoryRecordResponse, ValidationRequest,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use jarvis_core::application::{Envelope, MemoryService, OperationService};
use jarvis_core::domain::{
    AnalysisReport, EvolutionReport, MemoryKind, NewMemoryEntry, ValidationReport,
};
use jarvis_core::error::AppError;
use std::sync::Arc;

/// Shared handler state
pub struct AppState {
    pub operations: Arc<OperationService>,
    pub memory: Arc<MemoryService>,
}

impl AppState {
    pub fn new(operations: Arc<OperationService>, memory: Arc<MemoryService>) -> Self {
        Self { operations, memory }
    }
}

type SharedState = State<Arc<AppState>>;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: jarvis_core::VERSION,
    })
}

/// POST /api/analyse
pub async fn analyse(
    State(state): SharedState,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<Envelope<AnalysisReport>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.operations.analyse(request.into()).await?;
    Ok(Json(Envelope::completed(outcome)))
}

/// POST /api/evolution
pub async fn evolution(
    State(state): SharedState,
    payload: Result<Json<EvolutionRequest>, JsonRejection>,
) -> Result<Json<Envelope<EvolutionReport>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.operations.evolve(request.into()).await?;
    Ok(Json(Envelope::completed(outcome)))
}

/// POST /api/validation
pub async fn validation(
    State(state): SharedState,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> Result<Json<Envelope<ValidationReport>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.operations.validate(request.into()).await?;
    Ok(Json(Envelope::completed(outcome)))
}

/// GET /api/memory?limit=&kind=
pub async fn list_memory(
    State(state): SharedState,
    query: Result<Query<MemoryListQuery>, QueryRejection>,
) -> Result<Json<MemoryListResponse>, ApiError> {
    let Query(query) = query?;
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<MemoryKind>)
        .transpose()
        .map_err(AppError::from)?;

    let entries = state.memory.list(query.limit, kind).await?;
    Ok(Json(MemoryListResponse {
        success: true,
        entries,
    }))
}

/// POST /api/memory
pub async fn record_memory(
    State(state): SharedState,
    payload: Result<Json<NewMemoryEntry>, JsonRejection>,
) -> Result<Json<MemoryRecordResponse>, ApiError> {
    let Json(new_entry) = payload?;
    let entry = state.memory.record(new_entry).await?;
    Ok(Json(MemoryRecordResponse {
        success: true,
        entry,
    }))
}
