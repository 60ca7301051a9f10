//! Request guard rejecting path traversal attempts.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use headerkind_traversal::contains_path_traversal_with;
use tracing::warn;

use crate::state::AppState;

/// Middleware: 400 for any request whose path decodes to a `..` segment.
pub async fn reject_traversal(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if contains_path_traversal_with(path, state.decode) {
        warn!(path, "rejected path traversal");
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Path traversal not allowed" })),
        )
            .into_response();
    }

    next.run(request).await
}
