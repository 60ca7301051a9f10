//! Classification, negotiation and echo routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use headerkind_content_type::{ContentKind, Is};
use headerkind_core::Kind;
use headerkind_wants::{AcceptKind, Wants};
use serde_json::{Map, Value};

use crate::state::AppState;

const GREETING: &str = "hello from headerkind";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/classify", get(classify))
        .route("/negotiate", get(negotiate))
        .route("/echo", post(echo))
}

fn kinds_json<K: Kind>(snapshot: Vec<(K, bool)>, negate: bool) -> Value {
    let kinds: Map<String, Value> = snapshot
        .into_iter()
        .map(|(kind, matched)| (kind.name().to_string(), Value::Bool(matched != negate)))
        .collect();
    Value::Object(kinds)
}

/// GET /api/classify: every content-type and accept kind for this request.
async fn classify(Is(is): Is, Wants(wants): Wants) -> Json<Value> {
    Json(serde_json::json!({
        "contentType": kinds_json(is.snapshot(), false),
        "wants": kinds_json(wants.snapshot(), false),
        "not": {
            "wants": kinds_json(wants.snapshot(), true),
        },
    }))
}

/// GET /api/negotiate: JSON, HTML or plain text depending on `accept`.
async fn negotiate(Wants(wants): Wants) -> Response {
    if wants.is(AcceptKind::Json) {
        Json(serde_json::json!({ "message": GREETING })).into_response()
    } else if wants.is(AcceptKind::Html) {
        Html(format!("<p>{GREETING}</p>")).into_response()
    } else {
        GREETING.into_response()
    }
}

/// POST /api/echo: echo a JSON body back; other content types are refused.
async fn echo(Is(is): Is, body: Bytes) -> Response {
    if is.not().is(ContentKind::Json) {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(serde_json::json!({ "error": "Expected a JSON body" })),
        )
            .into_response();
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
