use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{Html, IntoResponse},
};
use serde_json::Value;

use crate::{
    error::AppError,
    page::{action::Action, view::PageView},
    state::AppState,
    utils::html::render_page,
};

/// Opens post `id`, loading it if the route changed (or a previous load
/// failed), and returns the resulting snapshot.
async fn open_page(state: &AppState, id: &str) -> Result<PageView, AppError> {
    let mut page = state.page.lock().await;

    if page.navigate(id) || page.is_loading() {
        let payload = state.source.load(id).await.map_err(|e| {
            tracing::error!("Failed to load post {}: {:?}", id, e);
            e
        })?;
        page.finish_load(payload);
    }

    Ok(page.view())
}

/// Get the page for a post as JSON.
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = open_page(&state, &id).await?;
    Ok(Json(view))
}

/// Get the page for a post as HTML.
pub async fn render_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = open_page(&state, &id).await?;
    Ok(Html(render_page(&view)))
}

/// Apply one user action to the open page.
/// Requires: `id` is the post currently open.
pub async fn apply_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Parse and validate payload
    let Json(body) = payload?;
    let action: Action = serde_json::from_value(body)?;
    action.validate()?;

    // 2. Check the viewer is on this page
    let mut page = state.page.lock().await;
    if page.route() != Some(id.as_str()) {
        return Err(AppError::Conflict(format!(
            "Post {} is not the page currently open",
            id
        )));
    }

    // 3. Apply
    let name = action.name();
    page.apply(action).map_err(|e| {
        tracing::warn!("Rejected {} on post {}: {:?}", name, id, e);
        e
    })?;

    Ok(Json(page.view()))
}
