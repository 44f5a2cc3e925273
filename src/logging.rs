//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of characters of a body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// Multipart bodies, i.e. uploaded bank statements, are never logged, only their size.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return (StatusCode::BAD_REQUEST, "Could not read request body").into_response();
        }
    };

    let display_text = display_body(&parts.headers, &body);
    tracing::info!(
        "Received request: {parts:#?}\nbody: {}",
        truncate(&display_text)
    );
    if display_text.chars().count() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full request body: {display_text:?}");
    }

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let display_text = display_body(&parts.headers, &body);
    tracing::info!(
        "Sending response: {parts:#?}\nbody: {}",
        truncate(&display_text)
    );
    if display_text.chars().count() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full response body: {display_text:?}");
    }

    Response::from_parts(parts, Body::from(body))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/"))
}

fn display_body(headers: &HeaderMap, body: &Bytes) -> String {
    if is_multipart(headers) {
        format!("<multipart body, {} bytes>", body.len())
    } else {
        String::from_utf8_lossy(body).to_string()
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => format!("{:?}...", &text[..end]),
        None => format!("{text:?}"),
    }
}
