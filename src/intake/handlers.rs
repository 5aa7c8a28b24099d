use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::dto::MessageResponse,
    error::{is_unique_violation, ApiError},
    extract::ValidJson,
    state::AppState,
    validate::is_valid_email,
};

use super::{
    dto::{IntakeForm, OwnerFilter},
    repo::{NewPetOwner, PetOwner},
};

pub fn intake_routes() -> Router<AppState> {
    Router::new()
        .route("/submit-form", post(submit_form))
        .route("/pet-owners", get(list_pet_owners))
}

#[instrument(skip(state, form))]
pub async fn submit_form(
    State(state): State<AppState>,
    ValidJson(form): ValidJson<IntakeForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let required = [
        &form.name,
        &form.pet_name,
        &form.age,
        &form.gender,
        &form.category,
        &form.phone,
        &form.email,
        &form.pickup_date,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(ApiError::Validation("All fields are required".into()));
    }

    if !is_valid_email(&form.email) {
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    let new = NewPetOwner {
        name: &form.name,
        pet_name: &form.pet_name,
        age_group: &form.age,
        gender: &form.gender,
        category: &form.category,
        phone: &form.phone,
        email: &form.email,
        pick_up_date: &form.pickup_date,
    };

    let owner = match PetOwner::create(&state.db, &new).await {
        Ok(owner) => owner,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("Email already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    info!(owner_id = owner.id, "intake form submitted");
    Ok(Json(MessageResponse {
        message: "Form submitted successfully",
    }))
}

#[instrument(skip(state))]
pub async fn list_pet_owners(
    State(state): State<AppState>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<Vec<PetOwner>>, ApiError> {
    let owners = PetOwner::list(&state.db, filter.email.as_deref()).await?;
    Ok(Json(owners))
}
