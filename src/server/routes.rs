//! HTTP handlers.

use super::AppState;
use super::stream::mjpeg_response;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Debug, Deserialize)]
pub struct ColorRequest {
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    #[serde(default)]
    pub size: Option<String>,
}

/// Normalised fingertip position; omit both fields to lift the finger.
#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(json!({ "status": "error", "message": message.to_string() })),
    )
        .into_response()
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn video_feed(State(state): State<AppState>) -> Response {
    mjpeg_response(
        state.engine.camera_frames(),
        state.closing.clone(),
        state.frame_interval,
    )
}

pub async fn canvas_feed(State(state): State<AppState>) -> Response {
    mjpeg_response(
        state.engine.canvas_frames(),
        state.closing.clone(),
        state.frame_interval,
    )
}

pub async fn set_color(
    State(state): State<AppState>,
    Json(request): Json<ColorRequest>,
) -> Response {
    let name = request.color.as_deref().unwrap_or_default();
    match state.engine.set_color(name) {
        Ok(()) => Json(json!({ "status": "success", "color": request.color })).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err),
    }
}

pub async fn set_size(State(state): State<AppState>, Json(request): Json<SizeRequest>) -> Response {
    let name = request.size.as_deref().unwrap_or_default();
    match state.engine.set_size(name) {
        Ok(()) => Json(json!({ "status": "success", "size": request.size })).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err),
    }
}

pub async fn clear(State(state): State<AppState>) -> Response {
    match state.engine.clear() {
        Ok(()) => Json(json!({ "status": "success" })).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err),
    }
}

pub async fn save(State(state): State<AppState>) -> Response {
    match state.engine.save().await {
        Ok(saved) => {
            let filename = saved.path.display().to_string();
            Json(json!({ "status": "success", "filename": filename })).into_response()
        }
        Err(err) => {
            log::error!("Save request failed: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
    }
}

/// Latest saved painting, whether it was saved over HTTP or from the toolbar.
pub async fn download(State(state): State<AppState>) -> Response {
    let last_saved = state.last_saved.borrow().clone();
    let Some(path) = last_saved else {
        return error_response(StatusCode::NOT_FOUND, "No painting has been saved yet");
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "image/jpeg".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", state.download_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            log::warn!("Saved painting {} unavailable: {}", path.display(), err);
            error_response(StatusCode::NOT_FOUND, "Saved painting is no longer available")
        }
    }
}

pub async fn pointer(
    State(state): State<AppState>,
    Json(request): Json<PointerRequest>,
) -> Response {
    if !state.simulate {
        return error_response(
            StatusCode::CONFLICT,
            "Pointer input is only available with --simulate",
        );
    }

    let position = request.x.zip(request.y);
    match state.engine.pointer(position) {
        Ok(()) => Json(json!({ "status": "success" })).into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err),
    }
}
