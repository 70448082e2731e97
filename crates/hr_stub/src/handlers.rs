use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cookie::Cookie;
use hr_core::AUTH_REQUIRED;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_string()))
        .filter_map(|cookie| cookie.ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn with_session_cookie(mut response: Response, token: Option<String>) -> Response {
    if let Some(token) = token {
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build();
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Charge one request against the caller's session, opening an anonymous
/// session if there is none.
///
/// Returns the user id and, for a new session, the token to hand back.
async fn admit(state: &AppState, headers: &HeaderMap) -> Result<(String, Option<String>), Response> {
    let mut store = state.store.write().await;

    if let Some(token) = session_token(headers) {
        if let Some(session) = store.sessions.get_mut(&token) {
            if !session.anonymous {
                return Ok((session.user_id.clone(), None));
            }
            if session.requests_remaining > 0 {
                session.requests_remaining -= 1;
                return Ok((session.user_id.clone(), None));
            }
            return Err(error(StatusCode::UNAUTHORIZED, AUTH_REQUIRED));
        }
    }

    let token = store.open_session(state.free_requests);
    let user_id = store.sessions[&token].user_id.clone();
    debug!("Opened anonymous session for {}", user_id);
    Ok((user_id, Some(token)))
}

async fn current_user(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    let store = state.store.read().await;
    store.sessions.get(&token).map(|s| s.user_id.clone())
}

pub async fn random_headline(State(state): State<Arc<AppState>>) -> Response {
    let store = state.store.read().await;
    Json(json!({ "headline": store.random_headline() })).into_response()
}

pub async fn submit_rewrite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let (user_id, new_token) = match admit(&state, &headers).await {
        Ok(admitted) => admitted,
        Err(response) => return response,
    };

    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();
    let headline_id = body
        .get("headline_id")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if text.is_empty() || headline_id.is_empty() {
        return with_session_cookie(
            error(StatusCode::BAD_REQUEST, "Malformed json request."),
            new_token,
        );
    }

    let mut store = state.store.write().await;
    let Some(headline) = store.headline(headline_id).cloned() else {
        return with_session_cookie(
            error(StatusCode::NOT_FOUND, "Headline not found."),
            new_token,
        );
    };
    let rewrite = store.add_rewrite(text, &headline, &user_id);
    info!("📝 Scored rewrite {} for headline {}", rewrite.id, headline.id);

    with_session_cookie(
        (StatusCode::CREATED, Json(json!({ "rewrite": rewrite }))).into_response(),
        new_token,
    )
}

pub async fn delete_rewrite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let user_id = current_user(&state, &headers).await;
    let mut store = state.store.write().await;

    let Some(index) = store.rewrites.iter().position(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Rewrite not found.");
    };
    if user_id.as_deref() != Some(store.rewrites[index].user_id.as_str()) {
        return error(StatusCode::FORBIDDEN, "You do not have access to this resource.");
    }
    store.rewrites.remove(index);
    info!("🗑️ Deleted rewrite {}", id);
    Json(json!({ "success": "Rewrite deleted." })).into_response()
}

pub async fn user_rewrites(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(user): Path<String>,
) -> Response {
    let Some(user_id) = current_user(&state, &headers).await else {
        return Json(Vec::<Value>::new()).into_response();
    };
    if user != "logged_in_user" && user != user_id {
        return error(StatusCode::FORBIDDEN, "You do not have access to this resource.");
    }
    let store = state.store.read().await;
    Json(store.history(&user_id)).into_response()
}
