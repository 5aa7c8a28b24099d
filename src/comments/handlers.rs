use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::dto::MessageResponse, error::ApiError, extract::ValidJson, state::AppState,
};

use super::{dto::NewCommentRequest, repo::Comment};

pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments", post(create_comment).get(list_comments))
}

#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewCommentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(ApiError::Validation("Name and message are required".into()));
    }

    let comment = Comment::create(&state.db, &payload.name, &payload.message).await?;

    info!(comment_id = comment.id, "comment posted");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Comment added successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = Comment::list(&state.db).await?;
    Ok(Json(comments))
}
