//! Salesboard REST API
//!
//! HTTP API layer for the sales dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/controls` - Region options, default selection, date bounds
//! - `POST /api/v1/dashboard` - Charts, summary and export link for a selection
//!
//! ## Export
//! - `GET /api/v1/export` - Filtered records as a CSV attachment
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use salesboard::api::{serve, AppState};
//! use salesboard::config::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = Arc::new(config.dataset.loader().load("data/sales_data.csv".as_ref())?);
//!
//!     let state = AppState::new(dataset, config.api.clone(), config.dashboard.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/controls", get(routes::controls::get_controls))
        .route("/dashboard", post(routes::dashboard::render_dashboard))
        .route("/export", get(routes::export::export_data));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless explicit origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Salesboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Salesboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::DatasetLoader;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const SALES_CSV: &str = "Date,Region,Sales
2024-01-01,North,100
2024-01-01,South,50
2024-01-02,North,200";

    fn create_test_app_with(api_config: ApiConfig) -> Router {
        let dataset = DatasetLoader::new().load_str(SALES_CSV).unwrap();
        let state = AppState::new(Arc::new(dataset), api_config, DashboardConfig::default());
        build_router(state)
    }

    fn create_test_app() -> Router {
        create_test_app_with(ApiConfig::default())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_dashboard(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/dashboard")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["records"], 3);
    }

    #[tokio::test]
    async fn test_controls() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/controls")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["regions"], serde_json::json!(["North", "South"]));
        assert_eq!(json["default_regions"], serde_json::json!(["North"]));
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-01-02");
    }

    #[tokio::test]
    async fn test_dashboard_north() {
        let app = create_test_app();

        let response = app
            .oneshot(post_dashboard(
                r#"{"regions": ["North"], "start_date": "2024-01-01", "end_date": "2024-01-02"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["summary"]["total"], 300.0);
        assert_eq!(json["summary"]["average"], 150.0);
        assert_eq!(json["summary"]["maximum"], 200.0);
        assert_eq!(json["bar_chart"]["kind"], "bar");
        assert_eq!(json["line_chart"]["labels"], serde_json::json!(["2024-01-01", "2024-01-02"]));
        assert_eq!(
            json["export_url"],
            "/api/v1/export?regions=North&start=2024-01-01&end=2024-01-02"
        );
    }

    #[tokio::test]
    async fn test_dashboard_empty_selection() {
        let app = create_test_app();

        let response = app.oneshot(post_dashboard(r#"{"regions": []}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["summary"]["total"], 0.0);
        assert!(json["summary"]["average"].is_null());
        assert!(json["summary"]["maximum"].is_null());
        assert_eq!(
            json["summary_text"],
            "Total Sales: $0.00\nAverage Sales: N/A\nHighest Sales: N/A"
        );
    }

    #[tokio::test]
    async fn test_dashboard_invalid_date() {
        let app = create_test_app();

        let response = app
            .oneshot(post_dashboard(r#"{"regions": ["North"], "start_date": "soon"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_dashboard_invalid_json() {
        let app = create_test_app();

        let response = app.oneshot(post_dashboard("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?regions=North&start=2024-01-01&end=2024-01-02")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"sales_export_"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            String::from_utf8(bytes.to_vec()).unwrap(),
            "Date,Region,Sales\n2024-01-01,North,100\n2024-01-02,North,200\n"
        );
    }

    #[tokio::test]
    async fn test_export_link_round_trips_region_names() {
        let csv = "Date,Region,Sales
2024-01-01,\"North, Coast\",100
2024-01-01,North,7
2024-01-01,Coast,9
2024-01-02, South,11";
        let dataset = Arc::new(DatasetLoader::new().load_str(csv).unwrap());
        let state = AppState::new(
            Arc::clone(&dataset),
            ApiConfig::default(),
            DashboardConfig::default(),
        );

        let criteria = state.dashboard.criteria(["North, Coast", " South"], None, None);
        let view = state.dashboard.render(&criteria).unwrap();
        let expected = crate::engine::compute(&dataset, &criteria).unwrap().export;

        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .uri(view.export_url.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(body, expected);
        assert_eq!(body, view.export_csv);
        assert_eq!(body.lines().count(), 3);
        assert!(body.contains("\"North, Coast\",100"));
        assert!(!body.contains(",7\n"));
    }

    #[tokio::test]
    async fn test_export_repeated_regions() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(
                        "/api/v1/export?regions=North&regions=South\
                         &start=2024-01-01&end=2024-01-01",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            String::from_utf8(bytes.to_vec()).unwrap(),
            "Date,Region,Sales\n2024-01-01,North,100\n2024-01-01,South,50\n"
        );
    }

    #[tokio::test]
    async fn test_export_disabled() {
        let app = create_test_app_with(ApiConfig {
            enable_export: false,
            ..Default::default()
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?regions=North")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
