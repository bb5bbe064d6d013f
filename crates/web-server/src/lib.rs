// In crates/web-server/src/lib.rs

use app_config::types::ServerSettings;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Json},
    routing::get,
    Router,
};
use core_types::Interval;
use engine::{DashboardSnapshot, Engine, IntervalReport};
use std::sync::Arc;
use tokio::net::TcpListener;
use types::RowsParams;

pub mod error;
pub mod render;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The dashboard is read-only, so any origin may fetch the JSON views.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    // Define the API sub-router
    let api_router = Router::new()
        .route("/dashboard", get(dashboard_json_handler))
        .route("/intervals/{interval}", get(interval_handler));

    // The main router.
    Router::new()
        .route("/", get(dashboard_page_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`.
/// Re-runs every interval and renders the HTML dashboard.
async fn dashboard_page_handler(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.engine.run().await;
    let offset = state.engine.dashboard().utc_offset_minutes;
    Html(render::render_dashboard(&snapshot, offset))
}

/// Handler for `GET /api/dashboard`
async fn dashboard_json_handler(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.engine.run().await)
}

/// Handler for `GET /api/intervals/{interval}`
async fn interval_handler(
    State(state): State<AppState>,
    Path(interval): Path<String>,
    Query(params): Query<RowsParams>,
) -> Result<Json<IntervalReport>> {
    let interval: Interval = interval
        .parse()
        .map_err(|_| Error::UnknownInterval(interval.clone()))?;

    if !state.engine.dashboard().intervals.contains(&interval) {
        return Err(Error::NotFound(format!("Interval {interval} is not configured")));
    }

    let mut report = state.engine.run_interval(interval).await?;
    if let Some(n) = params.rows {
        report.rows = report.recent(n).to_vec();
    }

    Ok(Json(report))
}

/// The main entry point for running the web server.
///
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings, engine: Arc<Engine>) -> Result<()> {
    let app = create_router(AppState { engine });

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::Serve)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::SeriesProvider;
    use app_config::Settings;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Bar, Lookback, Series, Symbol};
    use tower::ServiceExt;

    /// Serves a short zigzag series, failing for 60m.
    struct StubProvider;

    #[async_trait]
    impl SeriesProvider for StubProvider {
        fn name(&self) -> &'static str {
            "Stub"
        }

        async fn fetch(
            &self,
            symbol: &Symbol,
            _lookback: Lookback,
            interval: Interval,
        ) -> api_client::Result<Series> {
            if interval == Interval::SixtyMinutes {
                return Err(api_client::Error::ApiError {
                    code: "Not Found".into(),
                    msg: "<no data>".into(),
                });
            }
            let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 45, 0).unwrap();
            let bars = (0..30)
                .map(|i| {
                    let close = if i % 2 == 0 { 48_000.0 } else { 48_050.0 };
                    Bar {
                        timestamp: start + Duration::minutes(5 * i),
                        open: close,
                        high: close,
                        low: close,
                        close,
                        volume: 0.0,
                    }
                })
                .collect();
            Ok(Series::new(symbol.clone(), interval, bars)?)
        }
    }

    fn app() -> Router {
        let engine = Engine::from_settings(Arc::new(StubProvider), &Settings::default()).unwrap();
        create_router(AppState {
            engine: Arc::new(engine),
        })
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_dashboard_page_renders_every_interval() {
        let (status, body) = get("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Bank Nifty Signal Dashboard"));
        assert!(body.contains("Timeframe: 5m"));
        assert!(body.contains("Timeframe: 15m"));
        assert!(body.contains("Timeframe: 1h"));
        assert!(body.contains("Backtest accuracy (2 bars ahead)"));
        // The failing interval is shown, escaped, without hiding the others.
        assert!(body.contains("&lt;no data&gt;"));
        // Ten rows per table, two tables.
        assert_eq!(body.matches("<td class=\"buy\">").count(), 20);
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let (status, body) = get("/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["symbol"], "^NSEBANK");
        assert_eq!(json["panels"].as_array().unwrap().len(), 3);
        assert_eq!(json["panels"][0]["outcome"]["status"], "ready");
        assert_eq!(json["panels"][2]["outcome"]["status"], "failed");
    }

    #[tokio::test]
    async fn test_interval_report_with_row_limit() {
        let (status, body) = get("/api/intervals/15m?rows=5").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["interval"], "15m");
        assert_eq!(json["rows"].as_array().unwrap().len(), 5);
        assert_eq!(json["accuracy"]["scored_rows"], 28);
    }

    #[tokio::test]
    async fn test_unknown_interval_is_bad_request() {
        let (status, body) = get("/api/intervals/2h").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Unknown interval"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway() {
        let (status, _) = get("/api/intervals/1h").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
