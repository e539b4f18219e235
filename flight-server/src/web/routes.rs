//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

use crate::planner::{Planner, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Message returned when a required query parameter is absent or empty.
const MISSING_PARAMS: &str = "origin, destination, and date are required";

/// Create the application router.
///
/// Every response carries permissive CORS headers so browser front ends on
/// other origins can call the API.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", any(health))
        .route("/api/search", get(search_itineraries).fallback(search_method_fallback))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Search for itineraries between two airports on a date.
async fn search_itineraries(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let (Some(origin), Some(destination), Some(date)) = (
        present(params.origin),
        present(params.destination),
        present(params.date),
    ) else {
        return Err(AppError::BadRequest {
            message: MISSING_PARAMS.to_string(),
        });
    };

    let planner = Planner::new(&state.index, &state.config);
    let result = planner.search(&SearchRequest::new(origin, destination, date))?;

    Ok(Json(SearchResponse::from_result(&result)))
}

/// Answer `/api/search` requests that are not `GET`.
///
/// A bare `OPTIONS` (one without preflight headers, which the CORS layer
/// would have answered) gets an empty success.
async fn search_method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        AppError::MethodNotAllowed.into_response()
    }
}

/// Treat an empty parameter the same as a missing one.
fn present(param: Option<String>) -> Option<String> {
    param.filter(|p| !p.is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The caller's request was malformed
    BadRequest { message: String },

    /// The dataset could not answer the request
    DataIntegrity { message: String },

    /// The route exists but not for this method
    MethodNotAllowed,
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        if e.is_data_integrity() {
            AppError::DataIntegrity {
                message: e.to_string(),
            }
        } else {
            AppError::BadRequest {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Data problems are still reported to the caller as a bad request,
        // but they point at the dataset and are logged louder.
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected search request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::DataIntegrity { message } => {
                error!(%message, "search aborted on dataset error");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, String::from("method not allowed"))
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
