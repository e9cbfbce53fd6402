use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::models::{Analysis, TokenData};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

// Request types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckContractRequest {
    pub contract_id: Option<String>,
}

// Response types
#[derive(Debug, Serialize)]
pub struct CheckContractResponse {
    pub analysis: Analysis,
    pub risk_score: Option<f64>,
    pub data: TokenData,
}

#[derive(Debug, Serialize)]
pub struct NarrativeCheckResponse {
    pub analysis: Analysis,
    pub risk_score: Option<f64>,
    pub report: String,
    pub data: TokenData,
}

fn contract_id_from(payload: Result<Json<CheckContractRequest>, JsonRejection>) -> ApiResult<String> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected check-contract body: {}", rejection.body_text());
        ApiError::ValidationError("Contract ID is required".to_string())
    })?;

    request
        .contract_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::ValidationError("Contract ID is required".to_string()))
}

/// Fetch and score a contract with the rule engine
async fn assess_contract(state: &AppState, contract_id: &str) -> CheckContractResponse {
    let data = state.token_data.get_token_info(contract_id).await;

    if data.error.is_some() {
        return CheckContractResponse {
            analysis: Analysis::error(),
            risk_score: None,
            data,
        };
    }

    let assessment = state.risk_engine.assess(&data);
    CheckContractResponse {
        analysis: assessment.analysis,
        risk_score: assessment.risk_score,
        data,
    }
}

/// POST /api/check-contract
pub async fn check_contract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckContractRequest>, JsonRejection>,
) -> ApiResult<Json<CheckContractResponse>> {
    let contract_id = contract_id_from(payload)?;
    info!("Checking contract: {}", contract_id);

    let response = assess_contract(&state, &contract_id).await;
    info!(
        "Contract {} assessed as {}",
        contract_id, response.analysis.overall_risk
    );

    Ok(Json(response))
}

/// POST /api/check-contract/narrative
pub async fn check_contract_narrative(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckContractRequest>, JsonRejection>,
) -> ApiResult<Json<NarrativeCheckResponse>> {
    let contract_id = contract_id_from(payload)?;

    let narrative = state.narrative.clone().ok_or_else(|| {
        ApiError::AnalysisServiceError("Narrative analysis is not configured".to_string())
    })?;

    info!("Running narrative check for contract: {}", contract_id);
    let CheckContractResponse { mut analysis, data, .. } =
        assess_contract(&state, &contract_id).await;

    // Nothing to narrate without data
    if data.error.is_some() {
        warn!("Skipping narrative for {}: token data unavailable", contract_id);
        return Ok(Json(NarrativeCheckResponse {
            analysis,
            risk_score: None,
            report: String::new(),
            data,
        }));
    }

    let narrative_report = narrative.analyze(&data).await?;
    analysis.score = Some(narrative_report.score);

    Ok(Json(NarrativeCheckResponse {
        analysis,
        risk_score: Some(f64::from(narrative_report.score)),
        report: narrative_report.report,
        data,
    }))
}

/// OPTIONS preflight; CORS headers come from the router layer
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "narrative_enabled": state.narrative.is_some(),
        })),
    )
}
