use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::{ScoreDisplay, ScoreRequest, ScoreResult, ScoringConfig, SiteScorer};
use crate::reference::ReferenceData;

/// Shared, read-only inputs for the scoring endpoint.
#[derive(Debug, Clone)]
pub struct ScoringState {
    pub reference: Arc<ReferenceData>,
    pub config: ScoringConfig,
}

impl ScoringState {
    pub fn new(reference: Arc<ReferenceData>, config: ScoringConfig) -> Self {
        Self { reference, config }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub result: ScoreResult,
    pub display: ScoreDisplay,
}

/// Router builder exposing the site scoring endpoint.
pub fn scoring_router(state: ScoringState) -> Router {
    Router::new()
        .route("/api/v1/sites/score", post(score_handler))
        .with_state(state)
}

pub(crate) async fn score_handler(
    State(state): State<ScoringState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "score request body rejected");
            let payload = json!({ "error": rejection.body_text() });
            return (rejection.status(), Json(payload)).into_response();
        }
    };
    let scorer = SiteScorer::with_config(&state.reference, state.config);
    match scorer.score(request) {
        Ok(result) => {
            let display = result.display();
            (StatusCode::OK, Json(ScoreResponse { result, display })).into_response()
        }
        Err(error) => {
            tracing::warn!(
                latitude = request.latitude,
                longitude = request.longitude,
                %error,
                "site scoring failed"
            );
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
