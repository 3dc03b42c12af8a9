//! HTTP surface: `POST /generate-chapter` and `GET /health`.

use crate::models::{GenerateChapterBody, GenerationRequest, GenerationResult};
use crate::orchestrator::ChapterOrchestrator;
use crate::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    orchestrator: ChapterOrchestrator,
}

pub fn router(orchestrator: ChapterOrchestrator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate-chapter", post(generate_chapter))
        .route("/health", get(health_check))
        .with_state(AppState { orchestrator })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve `app` on an already-bound listener until the process stops.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn generate_chapter(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateChapterBody>, JsonRejection>,
) -> (StatusCode, Json<GenerationResult>) {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected generate-chapter body: {}", rejection.body_text());
            let result = GenerationResult {
                ok: false,
                chapter: None,
                title: None,
                error: Some(format!("Invalid request body: {}", rejection.body_text())),
                raw_response: None,
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(result));
        }
    };

    let result = state
        .orchestrator
        .handle(&GenerationRequest::from(body))
        .await;

    let status = if result.ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockProvider;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(provider: &MockProvider) -> Router {
        router(ChapterOrchestrator::new(Arc::new(provider.clone())))
    }

    async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-chapter")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_first_chapter_scenario() {
        let provider = MockProvider::new()
            .with_text("Once upon a time...")
            .with_text("The Lost Map");

        let (status, body) = post_json(
            app(&provider),
            json!({
                "genre": "Fantasy",
                "characters": "a lost map",
                "previousChapters": [],
                "isFirstChapter": true
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "ok": true, "chapter": "Once upon a time...", "title": "The Lost Map" })
        );
    }

    #[tokio::test]
    async fn test_provider_rate_limit_is_500() {
        let provider = MockProvider::new().with_status(429, "Too Many Requests");

        let (status, body) = post_json(
            app(&provider),
            json!({ "prompt": "Continue", "isFirstChapter": false }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("429"));
        assert!(body.get("chapter").is_none());
    }

    #[tokio::test]
    async fn test_missing_text_returns_raw_response() {
        let payload = json!({ "candidates": [{ "content": { "parts": [] } }] });
        let provider = MockProvider::new().with_empty(payload.clone());

        let (status, body) = post_json(app(&provider), json!({}).to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "ok": false, "error": "No generated text found", "rawResponse": payload })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported_as_failure() {
        let provider = MockProvider::new();

        let (status, body) = post_json(app(&provider), "{not json".to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
        assert_eq!(provider.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(&MockProvider::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}
