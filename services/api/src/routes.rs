use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use eih_scorer::scoring::{scoring_router, ScoringState};
use serde_json::json;

pub(crate) fn with_site_routes(scoring: ScoringState) -> axum::Router {
    scoring_router(scoring)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use eih_scorer::reference::{PitSummary, ReferenceData, Tract};
    use eih_scorer::scoring::ScoringConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn scoring_state() -> ScoringState {
        let tracts = vec![Tract {
            id: "06085500100".to_string(),
            latitude: 37.3382,
            longitude: -121.8863,
            poverty_rate_pct: 25.0,
            unhoused_count: 200,
        }];
        ScoringState::new(
            Arc::new(ReferenceData::new(tracts, Vec::new(), PitSummary::default())),
            ScoringConfig::default(),
        )
    }

    fn app_router(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_site_routes(scoring_state()).layer(Extension(state))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = with_site_routes(scoring_state())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn score_route_is_mounted_alongside_probes() {
        let response = with_site_routes(scoring_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sites/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"latitude": 37.3382, "longitude": -121.8863}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"]["total_score"], 0.64);
        assert_eq!(body["display"]["headline_pct"], 64.0);
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let response = app_router(true)
            .oneshot(get("/ready"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ready");

        let response = app_router(false)
            .oneshot(get("/ready"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = app_router(true)
            .oneshot(get("/metrics"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        assert!(std::str::from_utf8(&bytes).is_ok());
    }
}
