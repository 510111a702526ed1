use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use namegender_db::NameReport;
use namegender_resolver::{Detector, ResolveError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct GenderQuery {
    pub name: String,
    pub country: Option<String>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Serialize)]
pub struct GenderResponse {
    name: String,
    country: Option<String>,
    strict: bool,
    gender: &'static str,
    code: &'static str,
}

#[derive(Serialize)]
pub struct NameResponse {
    name: String,
    labels: Vec<LabelResponse>,
}

#[derive(Serialize)]
struct LabelResponse {
    gender: &'static str,
    code: &'static str,
    countries: Vec<CountryCount>,
}

#[derive(Serialize)]
struct CountryCount {
    country: &'static str,
    count: u8,
}

#[derive(Serialize)]
struct ReloadResponse {
    names: usize,
    records: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/gender", get(gender))
        .route("/v1/names/{name}", get(dump_name))
        .route("/v1/reload", post(reload))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn gender(
    State(state): State<AppState>,
    Query(params): Query<GenderQuery>,
) -> Result<Response, ApiError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    let country = params.country.as_deref().filter(|c| !c.is_empty());

    let detector = Arc::clone(&state.detector);
    let query_name = name.to_string();
    let query_country = country.map(str::to_string);
    let strict = params.strict;
    let label = tokio::task::spawn_blocking(move || {
        detector.get_gender(&query_name, query_country.as_deref(), strict)
    })
    .await
    .map_err(|e| ApiError::internal(e.to_string()))??;

    let response = GenderResponse {
        name: name.to_string(),
        country: country.map(str::to_string),
        strict: params.strict,
        gender: label.as_str(),
        code: label.code(),
    };
    Ok(cached(&state, Json(response)))
}

async fn dump_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let detector = Arc::clone(&state.detector);
    let query_name = name.clone();
    let report = tokio::task::spawn_blocking(move || detector.dump_name(&query_name))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("no such name: {name}")))?;
    Ok(cached(&state, Json(name_response(report))))
}

async fn reload(State(state): State<AppState>) -> Result<Response, ApiError> {
    let detector = Arc::clone(&state.detector);
    let index = tokio::task::spawn_blocking(move || detector.reload())
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(|e| ApiError::internal(e.to_string()))?;
    info!("reloaded {} names", index.name_count());
    let response = ReloadResponse {
        names: index.name_count(),
        records: index.record_count(),
    };
    Ok(Json(response).into_response())
}

fn name_response(report: NameReport) -> NameResponse {
    NameResponse {
        name: report.name,
        labels: report
            .labels
            .into_iter()
            .map(|label| LabelResponse {
                gender: label.gender.as_str(),
                code: label.gender.code(),
                countries: label
                    .countries
                    .into_iter()
                    .map(|(country, count)| CountryCount {
                        country: country.name(),
                        count,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn cached(state: &AppState, body: impl IntoResponse) -> Response {
    if state.disable_cache {
        return body.into_response();
    }
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=300"),
        )],
        body,
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }

    fn internal(detail: String) -> Self {
        error!("{detail}");
        ApiError::Internal
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnrecognizedCountry(_) => ApiError::BadRequest(err.to_string()),
            ResolveError::Dataset(e) => ApiError::internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotFound(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
