//! HTTP surface: the standings page, the standings proxy and the Excel export.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{AppError, FetchError};
use crate::excel_export::{ExportRequest, export_workbook};
use crate::leagues::{DEFAULT_LEAGUE, featured_leagues};
use crate::standings_fetch::fetch_standings;
use crate::state::{StandingsRow, StandingsSource};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct ServerState {
    pub client: Client,
    pub config: Arc<Config>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/standings", get(get_standings))
        .route("/api/excel", post(post_excel))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct PageLeague {
    id: &'static str,
    name: &'static str,
}

async fn index(State(state): State<ServerState>) -> Html<String> {
    let leagues = featured_leagues()
        .map(|l| PageLeague {
            id: l.key,
            name: l.display_name,
        })
        .collect::<Vec<_>>();
    let leagues = serde_json::to_string(&leagues).unwrap_or_else(|_| "[]".to_string());
    let refresh_ms = state.config.refresh_interval.as_millis().to_string();
    let season = serde_json::to_string(&state.config.season).unwrap_or_else(|_| "\"\"".to_string());

    Html(
        INDEX_HTML
            .replace("__LEAGUES__", &leagues)
            .replace("__DEFAULT_LEAGUE__", DEFAULT_LEAGUE)
            .replace("__REFRESH_MS__", &refresh_ms)
            .replace("__SEASON__", &season),
    )
}

#[derive(Debug, Deserialize)]
pub struct StandingsQuery {
    pub league: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Vec<StandingsRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<StandingsSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
}

/// GET /api/standings?league=<key>
///
/// Always answers 200; an unknown key is reported with `success: false`.
pub async fn get_standings(
    State(state): State<ServerState>,
    Query(query): Query<StandingsQuery>,
) -> Json<StandingsResponse> {
    let league = query
        .league
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEAGUE.to_string());

    match fetch_standings(&state.client, &state.config.espn_base_url, &league).await {
        Ok(report) => Json(StandingsResponse {
            success: true,
            error: None,
            data: report.rows,
            last_update: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            source: Some(report.source),
            league: Some(report.league),
        }),
        Err(FetchError::UnknownLeague(key)) => {
            tracing::info!(league = %key, "standings requested for unknown league");
            Json(StandingsResponse {
                success: false,
                error: Some("Bilinmeyen lig".to_string()),
                data: Vec::new(),
                last_update: None,
                source: None,
                league: None,
            })
        }
    }
}

/// POST /api/excel
///
/// The body is parsed by hand so a malformed table surfaces as the same 500
/// as any other export failure.
pub async fn post_excel(body: Bytes) -> Result<Response, AppError> {
    let request: ExportRequest =
        serde_json::from_slice(&body).context("invalid export request body")?;
    let workbook = export_workbook(&request, Utc::now().date_naive())?;
    tracing::info!(
        league = %request.league_name,
        teams = request.standings.len(),
        matches = request.matches.len(),
        bytes = workbook.bytes.len(),
        "excel export built"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        workbook.filename.replace('"', ""),
        urlencoding::encode(&workbook.filename)
    );
    let disposition =
        HeaderValue::from_bytes(disposition.as_bytes()).context("invalid content disposition")?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(workbook.content_type),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        workbook.bytes,
    )
        .into_response())
}
