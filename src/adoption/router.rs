use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;

use super::catalog::PetCatalog;
use super::domain::{ApplicationForm, PetFilter, PetForm, PetStatus};
use super::error::AdoptionError;
use super::registry::ApplicationRegistry;

/// Shared handle passed to every adoption endpoint.
#[derive(Clone)]
pub struct AdoptionState {
    pub catalog: PetCatalog,
    pub registry: ApplicationRegistry,
}

/// Router builder exposing the pet catalog and the application workflow.
pub fn adoption_router(catalog: PetCatalog, registry: ApplicationRegistry) -> Router {
    let state = AdoptionState { catalog, registry };

    Router::new()
        .route("/api/v1/pets", post(register_pet).get(find_pets))
        .route("/api/v1/pets/search", get(search_pets))
        .route("/api/v1/pets/:pet_id", get(get_pet))
        .route("/api/v1/pets/:pet_id/status", put(set_pet_status))
        .route("/api/v1/pets/:pet_id/comments", put(update_pet_comments))
        .route(
            "/api/v1/applications",
            post(submit_application).get(list_applications),
        )
        .route("/api/v1/applications/:app_id", get(get_application))
        .route(
            "/api/v1/applications/:app_id/approve",
            post(approve_application),
        )
        .route("/api/v1/applications/:app_id/deny", post(deny_application))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    term: String,
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: PetStatus,
}

#[derive(Debug, Deserialize)]
struct CommentsChange {
    comments: String,
}

async fn register_pet(
    State(state): State<AdoptionState>,
    axum::Json(form): axum::Json<PetForm>,
) -> Response {
    match state.catalog.register_or_update(form).await {
        Ok(pet) => (StatusCode::OK, axum::Json(pet)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn find_pets(
    State(state): State<AdoptionState>,
    Query(filter): Query<PetFilter>,
) -> Response {
    match state.catalog.find(&filter).await {
        Ok(pets) => (StatusCode::OK, axum::Json(pets)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn search_pets(
    State(state): State<AdoptionState>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.catalog.search(&params.term).await {
        Ok(pets) => (StatusCode::OK, axum::Json(pets)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn get_pet(State(state): State<AdoptionState>, Path(pet_id): Path<i64>) -> Response {
    match state.catalog.get(pet_id).await {
        Ok(Some(pet)) => (StatusCode::OK, axum::Json(pet)).into_response(),
        Ok(None) => AdoptionError::PetNotFound { pet_id }.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn set_pet_status(
    State(state): State<AdoptionState>,
    Path(pet_id): Path<i64>,
    axum::Json(change): axum::Json<StatusChange>,
) -> Response {
    match state.catalog.set_status(pet_id, change.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn update_pet_comments(
    State(state): State<AdoptionState>,
    Path(pet_id): Path<i64>,
    axum::Json(change): axum::Json<CommentsChange>,
) -> Response {
    match state.catalog.update_comments(pet_id, &change.comments).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn submit_application(
    State(state): State<AdoptionState>,
    axum::Json(form): axum::Json<ApplicationForm>,
) -> Response {
    match state.registry.submit(form).await {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn list_applications(State(state): State<AdoptionState>) -> Response {
    match state.registry.list().await {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn get_application(State(state): State<AdoptionState>, Path(app_id): Path<i64>) -> Response {
    match state.registry.get(app_id).await {
        Ok(Some(application)) => (StatusCode::OK, axum::Json(application)).into_response(),
        Ok(None) => AdoptionError::ApplicationNotFound { app_id }.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn approve_application(
    State(state): State<AdoptionState>,
    Path(app_id): Path<i64>,
) -> Response {
    match state.registry.approve(app_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn deny_application(State(state): State<AdoptionState>, Path(app_id): Path<i64>) -> Response {
    match state.registry.deny(app_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
