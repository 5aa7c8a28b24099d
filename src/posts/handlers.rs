use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::{
    dto::{CreatePostResponse, PostData, PostSummary},
    repo::{NewPost, Post},
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/postsa", get(list_posts))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}

/// Multipart body: text fields name/age/gender/adopt/phone/price plus an
/// optional `image` part. The uploaded filename is never used; the store
/// generates its own.
#[instrument(skip(state, multipart))]
pub async fn create_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreatePostResponse>, ApiError> {
    let mut name = None;
    let mut age = None;
    let mut gender = None;
    let mut adopt = None;
    let mut phone = None;
    let mut price = None;
    let mut image: Option<(Bytes, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("image") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                image = Some((data, content_type));
            }
            Some(text_field) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                match text_field {
                    "name" => name = Some(value),
                    "age" => age = Some(value),
                    "gender" => gender = Some(value),
                    "adopt" => adopt = Some(value),
                    "phone" => phone = Some(value),
                    "price" => price = Some(value),
                    _ => {}
                }
            }
            None => {}
        }
    }

    let missing = || ApiError::Validation("All fields are required".into());
    let name = name.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let gender = gender.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let adopt = adopt.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let phone = phone.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let age: i32 = age
        .ok_or_else(missing)?
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("Invalid age".into()))?;
    let price: i64 = price
        .ok_or_else(missing)?
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("Invalid price".into()))?;

    let image_path = match image {
        Some((data, content_type)) => Some(state.storage.store(data, &content_type).await?),
        None => None,
    };

    let new = NewPost {
        name: &name,
        age,
        gender: &gender,
        adopt: &adopt,
        phone: &phone,
        price,
        image_path: image_path.as_deref(),
    };
    let saved = Post::create(&state.db, &new).await?;

    info!(post_id = saved.id, "post created");
    Ok(Json(CreatePostResponse {
        message: "Data saved successfully!",
        data: PostData {
            name: saved.name,
            age: saved.age,
            gender: saved.gender,
            adopt: saved.adopt,
            phone: saved.phone,
            price: saved.price,
            image: saved.image_path,
        },
    }))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostSummary>>, ApiError> {
    let posts = Post::list(&state.db).await?;
    if posts.is_empty() {
        return Err(ApiError::NotFound("No posts found"));
    }

    let items = posts
        .into_iter()
        .map(|p| PostSummary {
            name: p.name,
            age: p.age,
            gender: p.gender,
            adopt: p.adopt,
            phone: p.phone,
            price: p.price,
            image_path: p.image_path,
        })
        .collect();
    Ok(Json(items))
}
