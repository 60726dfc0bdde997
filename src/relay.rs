// src/relay.rs
//
// The relay service: one route, `POST /api/chat`, that forwards a user
// message to the Gemini generateContent endpoint with the server-held key
// and returns `{ "reply": ... }`. Stateless per request.

use crate::api;
use crate::config::RelayConfig;
use crate::constants::{CHAT_ROUTE, UPSTREAM_FETCH_ERROR};
use crate::errors::{FynoraqError, FynoraqResult};
use crate::logging::{log_api_call, summarize_request, ApiCallLog};
use axum::{
    extract::{Json, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone)]
pub struct RelayState {
    pub http: reqwest::Client,
    pub config: RelayConfig,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route(CHAT_ROUTE, post(chat).options(chat_preflight))
        .with_state(state)
}

/// Rejects requests whose `Origin` differs from the configured one.
/// Requests without an `Origin` header (curl, tests, the TUI) pass.
fn check_origin(headers: &HeaderMap, allowed: &Option<String>) -> Result<(), Response> {
    let Some(allowed) = allowed else {
        return Ok(());
    };

    match headers.get(header::ORIGIN) {
        None => Ok(()),
        Some(origin) if origin.to_str().map(|o| o == allowed).unwrap_or(false) => Ok(()),
        Some(_) => Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Origin not allowed".to_string(),
            }),
        )
            .into_response()),
    }
}

fn with_allow_origin(mut response: Response, allowed: &Option<String>) -> Response {
    if let Some(origin) = allowed {
        if let Ok(value) = HeaderValue::from_str(origin) {
            response
                .headers_mut()
                .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }
    response
}

async fn chat_preflight(State(state): State<RelayState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = check_origin(&headers, &state.config.allowed_origin) {
        return rejection;
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    with_allow_origin(response, &state.config.allowed_origin)
}

async fn chat(
    State(state): State<RelayState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Response {
    if let Err(rejection) = check_origin(&headers, &state.config.allowed_origin) {
        return rejection;
    }

    let started = Instant::now();
    let outcome = api::generate_reply(
        &state.http,
        &state.config.api_url,
        &state.config.api_key,
        &request.message,
    )
    .await;

    let response = match outcome {
        Ok(reply) => {
            log::info!("AI response: {}", reply);
            log_api_call(&ApiCallLog {
                timestamp: Utc::now(),
                endpoint: CHAT_ROUTE.to_string(),
                request_summary: summarize_request(&request.message),
                response_status: StatusCode::OK.as_u16(),
                response_time_ms: started.elapsed().as_millis(),
                reply: reply.clone(),
            });
            (StatusCode::OK, Json(ChatResponse { reply })).into_response()
        }
        Err(err) => {
            log::error!("upstream call failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: UPSTREAM_FETCH_ERROR.to_string(),
                }),
            )
                .into_response()
        }
    };

    with_allow_origin(response, &state.config.allowed_origin)
}

pub async fn serve(config: RelayConfig) -> FynoraqResult<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let state = RelayState {
        http: reqwest::Client::new(),
        config,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FynoraqError::relay_error(format!("failed to bind {}: {}", addr, e)))?;
    log::info!("relay listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| FynoraqError::relay_error(e.to_string()))?;

    Ok(())
}
