use crate::{error::AppError, AppState};
use analytics::AnalysisReport;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub company_id: String,
    /// Lookback window in years; the configured default applies when omitted.
    #[serde(default)]
    pub lookback_years: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CompanyEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sources: BTreeMap<String, bool>,
}

/// # POST /api/analyze
/// Runs the full rate-sensitivity analysis for one company.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = state
        .engine
        .analyze(&request.company_id, request.lookback_years)
        .await?;
    Ok(Json(report))
}

/// # GET /api/companies
/// Returns the catalog of companies available for analysis.
pub async fn get_companies(State(state): State<Arc<AppState>>) -> Json<Vec<CompanyEntry>> {
    let companies = state
        .engine
        .config()
        .companies
        .iter()
        .map(|c| CompanyEntry {
            id: c.id.clone(),
            name: c.name.clone(),
        })
        .collect();
    Json(companies)
}

/// # GET /api/health
/// Pass-through reachability check, one boolean per upstream source.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sources = state.engine.health().await;
    let status = if sources.values().all(|&ok| ok) {
        "healthy"
    } else {
        "degraded"
    };
    Json(HealthResponse { status, sources })
}
