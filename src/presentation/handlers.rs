// HTTP request handlers
use crate::domain::error::LoadError;
use crate::domain::upload::{check_content_type, UploadedFile};
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub name: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub fn load_error_status(error: &LoadError) -> StatusCode {
    match error {
        LoadError::FormatRejected(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        LoadError::Parse(_) | LoadError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        LoadError::Superseded => StatusCode::CONFLICT,
        LoadError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 413 when the body hit the upload limit, 400 for any other read failure
pub fn read_error_status(error: axum::Error) -> StatusCode {
    if error.into_inner().is::<LengthLimitError>() {
        StatusCode::PAYLOAD_TOO_LARGE
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Upload a heart-rate file and render it
pub async fn upload_chart(
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Response {
    let compress = accepts_brotli(&headers);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Rejected uploads never take the load slot
    if let Err(e) = check_content_type(content_type.as_deref()) {
        tracing::warn!("Rejected {}: {}", query.name.as_deref().unwrap_or("NOT SUPPORTED"), e);
        return error_response(load_error_status(&e), e.to_string(), compress).await;
    }

    // Claim the load slot before the body is read
    let ticket = state.chart_service.begin_load();

    let bytes = match axum::body::to_bytes(body, state.max_upload_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read upload: {}", e);
            return error_response(read_error_status(e), "could not read upload".to_string(), compress)
                .await;
        }
    };

    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text.trim().to_string(),
        Err(_) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "upload is not valid UTF-8 text".to_string(),
                compress,
            )
            .await;
        }
    };

    let upload = UploadedFile::new(query.name, content_type, text);
    match state.chart_service.complete_load(ticket, upload).await {
        Ok(request) => match json_response(StatusCode::CREATED, &request, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => error_response(load_error_status(&e), e.to_string(), compress).await,
    }
}

/// Currently rendered chart
pub async fn get_chart(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.chart_board.current().await {
        Some(request) => match json_response(StatusCode::OK, &request, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        None => error_response(StatusCode::NOT_FOUND, "no chart loaded".to_string(), compress).await,
    }
}

/// Tear down the chart and return to the idle state
pub async fn reset_chart(State(state): State<Arc<AppState>>) -> Response {
    match state.chart_service.reset().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Error resetting chart: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
