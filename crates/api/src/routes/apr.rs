//! APR tool routes.
//!
//! Both routes answer `200` with a tagged `ToolResult`; failures of the query
//! itself travel inside the body, not as HTTP errors.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use yieldlens_common::types::{AprQuery, ToolResult};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tools/apr", post(invoke_apr))
        .route("/api/apr", get(get_apr))
}

/// POST /api/tools/apr — Tool invocation with a JSON body.
async fn invoke_apr(State(state): State<AppState>, Json(query): Json<AprQuery>) -> Json<ToolResult> {
    Json(state.tool.invoke(&query).await)
}

/// GET /api/apr?chainName=..&account=.. — Same query for plain HTTP clients.
async fn get_apr(State(state): State<AppState>, Query(query): Query<AprQuery>) -> Json<ToolResult> {
    Json(state.tool.invoke(&query).await)
}
