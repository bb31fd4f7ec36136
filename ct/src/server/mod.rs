//! HTTP server exposing the feedback service
//!
//! Routes:
//! - `POST /api/analyze` - review a post
//! - `GET /api/examples` - generate example posts
//! - `GET /health` - liveness plus configuration status

use std::net::SocketAddr;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::api::{ANALYZE_PATH, AnalyzeRequest, AnalyzeResponse, EXAMPLES_PATH, ErrorResponse, HealthResponse};
use crate::domain::ExampleSet;
use crate::service::{FeedbackService, ServiceError};

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    service: FeedbackService,
}

impl AppState {
    pub fn new(service: FeedbackService) -> Self {
        Self { service }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(ANALYZE_PATH, post(analyze))
        .route(EXAMPLES_PATH, get(examples));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn serve(bind: &str, service: FeedbackService) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .context(format!("Failed to bind {}", bind))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, configured = service.is_configured(), "Contento feedback API listening");

    axum::serve(listener, router(AppState::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Contento feedback API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        configured: state.service.is_configured(),
    })
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ServiceError> {
    let content = match body {
        Ok(Json(AnalyzeRequest { content: Some(content) })) => content,
        Ok(_) => {
            debug!("analyze: content missing");
            return Err(ServiceError::ContentRequired);
        }
        Err(rejection) => {
            debug!(%rejection, "analyze: body rejected");
            return Err(ServiceError::ContentRequired);
        }
    };

    let feedback = state.service.analyze(&content).await?;
    Ok(Json(AnalyzeResponse { feedback }))
}

async fn examples(State(state): State<AppState>) -> Result<Json<ExampleSet>, ServiceError> {
    let set = state.service.examples().await?;
    Ok(Json(set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(responses: Vec<Result<String, u16>>) -> Router {
        let service = FeedbackService::new(Arc::new(MockLlmClient::new(responses)));
        router(AppState::new(service))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_analyze(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let response = router(AppState::new(FeedbackService::unconfigured()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["configured"], false);
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let response = app(vec![Ok("• Add a specific metric".to_string())])
            .oneshot(post_analyze(r#"{"content":"Great insight about leadership!"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["feedback"], "• Add a specific metric");
    }

    #[tokio::test]
    async fn test_analyze_missing_content() {
        let response = app(vec![]).oneshot(post_analyze("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Content is required");
    }

    #[tokio::test]
    async fn test_analyze_empty_content() {
        let response = app(vec![]).oneshot(post_analyze(r#"{"content":""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_non_string_content() {
        let response = app(vec![]).oneshot(post_analyze(r#"{"content":42}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_malformed_body() {
        let response = app(vec![]).oneshot(post_analyze("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_llm_failure() {
        let response = app(vec![Err(502)])
            .oneshot(post_analyze(r#"{"content":"Hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to analyze post");
    }

    #[tokio::test]
    async fn test_analyze_unconfigured() {
        let response = router(AppState::new(FeedbackService::unconfigured()))
            .oneshot(post_analyze(r#"{"content":"Hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_examples_success() {
        let json = r#"{"professional":"a","policyAlert":"b","minorIssues":"c"}"#;
        let response = app(vec![Ok(json.to_string())])
            .oneshot(Request::builder().uri("/api/examples").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["professional"], "a");
        assert_eq!(body["policyAlert"], "b");
        assert_eq!(body["minorIssues"], "c");
    }

    #[tokio::test]
    async fn test_examples_bad_output() {
        let response = app(vec![Ok("{\"professional\":\"a\"}".to_string())])
            .oneshot(Request::builder().uri("/api/examples").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "Failed to generate examples. Please try again."
        );
    }
}
