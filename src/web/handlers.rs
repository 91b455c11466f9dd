// Request handlers and application state.
// Each handler pulls a table through the cache (which delegates to the
// fetcher or the boundary loader on expiry) and hands it to the chart
// renderer.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::api::CovidClient;
use crate::cache::CacheStore;
use crate::chart;
use crate::config::{BOUNDARY_TTL, Config, STATS_TTL};
use crate::error::{CovidError, Result};
use crate::geo;

use super::pages;

/// Shared process-wide state: the HTTP client, the cache, and config.
pub struct AppState {
    pub client: CovidClient,
    pub cache: CacheStore,
    pub config: Config,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/figure/canada", get(canada_figure))
        .route("/figure/world", get(world_figure))
        .fallback(page)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct FigureParams {
    metric: String,
}

/// Serve a page layout, or an empty 404 for unrecognized paths.
async fn page(uri: Uri) -> Response {
    match pages::route(uri.path()) {
        Some(page) => Html(page.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn canada_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FigureParams>,
) -> std::result::Result<Json<Value>, CovidError> {
    let figure = render_canada(&state, &params.metric).await?;
    Ok(Json(figure))
}

async fn world_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FigureParams>,
) -> std::result::Result<Json<Value>, CovidError> {
    let figure = render_world(&state, &params.metric).await?;
    Ok(Json(figure))
}

async fn render_canada(state: &AppState, metric: &str) -> Result<Value> {
    let reports = state
        .cache
        .get_or_compute("canada_reports", STATS_TTL, || {
            state.client.fetch_canada_reports(&state.config.canada_url)
        })
        .await?;

    let boundaries = state
        .cache
        .get_or_compute("canada_geojson", BOUNDARY_TTL, || async {
            geo::load_boundaries(&state.config.geojson_path)
        })
        .await?;

    chart::canada_choropleth(&reports, &boundaries, metric)
}

async fn render_world(state: &AppState, metric: &str) -> Result<Value> {
    let countries = state
        .cache
        .get_or_compute("world_countries", STATS_TTL, || {
            state.client.fetch_world_countries(&state.config.world_url)
        })
        .await?;

    chart::world_choropleth(&countries, metric)
}

impl IntoResponse for CovidError {
    fn into_response(self) -> Response {
        let status = match &self {
            CovidError::MissingMetric(_) => StatusCode::BAD_REQUEST,
            CovidError::Api(_) | CovidError::NotFound(_) | CovidError::RateLimited => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("request failed: {}", self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn state(server: &mockito::Server, dir: &TempDir) -> Arc<AppState> {
        let geojson_path = dir.path().join("canada.geojson");
        let mut file = std::fs::File::create(&geojson_path).unwrap();
        file.write_all(br#"{"type": "FeatureCollection", "features": []}"#)
            .unwrap();

        let config = Config::from_lookup(|name| match name {
            "COVIDMAP_CANADA_URL" => Some(format!("{}/reports", server.url())),
            "COVIDMAP_WORLD_URL" => Some(format!("{}/countries", server.url())),
            "COVIDMAP_GEOJSON" => Some(geojson_path.display().to_string()),
            "COVIDMAP_CACHE_DIR" => Some(dir.path().join("cache").display().to_string()),
            _ => None,
        })
        .unwrap();

        Arc::new(AppState {
            client: CovidClient::new().unwrap(),
            cache: CacheStore::new(config.cache_dir.clone()),
            config,
        })
    }

    const REPORTS_BODY: &str = r#"{"data": [
        {"date": "2023-03-09", "confirmed": 100, "deaths": 1, "recovered": 0,
         "confirmed_diff": 0, "deaths_diff": 0, "recovered_diff": 0,
         "last_update": "2023-03-10 04:21:03", "active": 99, "active_diff": 0,
         "fatality_rate": 0.01,
         "region": {"iso": "CAN", "name": "Canada", "province": "Ontario",
                    "lat": null, "long": null}}
    ]}"#;

    #[tokio::test]
    async fn test_render_canada_uses_cache_across_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REPORTS_BODY)
            // One upstream fetch serves both renders.
            .expect(1)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let state = state(&server, &dir);

        let first = render_canada(&state, "confirmed").await.unwrap();
        let second = render_canada(&state, "active").await.unwrap();

        assert_eq!(first["data"][0]["locations"], serde_json::json!(["Ontario"]));
        assert_eq!(second["data"][0]["z"], serde_json::json!([99.0]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_render_canada_unknown_metric() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REPORTS_BODY)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let state = state(&server, &dir);

        let result = render_canada(&state, "cases").await;
        assert!(matches!(result, Err(CovidError::MissingMetric(_))));
    }

    #[tokio::test]
    async fn test_render_canada_propagates_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports")
            .with_status(500)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let state = state(&server, &dir);

        let result = render_canada(&state, "confirmed").await;
        assert!(result.is_err());
    }
}
