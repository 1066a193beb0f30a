//! HTTP handlers for the record store service.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::config::DbConfig;
use crate::contact::{Contact, ContactPatch, Message, NewContact};
use crate::db;
use crate::error::ApiError;

/// Shared state across handlers: just the immutable database settings.
/// Each handler opens and closes its own connection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConfig,
}

/// Builds the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/filter", get(filter_contacts))
        .route("/api/contacts/export", get(export_contacts))
        .route(
            "/api/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = db::list(&state.db).await?;
    Ok(Json(contacts))
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    if payload.name.is_none() || payload.email.is_none() {
        return Err(ApiError::Validation("Missing required fields (name, email)"));
    }
    let created = db::insert(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    match db::fetch(&state.db, id).await? {
        Some(contact) => Ok(Json(contact)),
        None => Err(ApiError::NotFound("Contact not found")),
    }
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<Message>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::Validation("No valid fields to update"));
    }
    let affected = db::update(&state.db, id, &patch).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("Contact not found"));
    }
    Ok(Json(Message::new("Contact updated successfully")))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, ApiError> {
    let affected = db::delete(&state.db, id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("Contact not found"));
    }
    Ok(Json(Message::new("Contact deleted successfully")))
}

#[derive(Debug, Deserialize)]
struct FilterParams {
    relation: Option<String>,
}

async fn filter_contacts(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let relation = match params.relation.as_deref() {
        Some(relation) if !relation.is_empty() => relation,
        _ => return Err(ApiError::Validation("Relation parameter is required")),
    };
    let contacts = db::filter_by_relation(&state.db, relation).await?;
    if contacts.is_empty() {
        return Err(ApiError::NotFound(
            "No contacts found with the specified relation",
        ));
    }
    Ok(Json(contacts))
}

async fn export_contacts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let contacts = db::list(&state.db).await?;
    if contacts.is_empty() {
        return Err(ApiError::NotFound("No contacts available to export"));
    }
    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"contacts.json\"",
        )],
        Json(contacts),
    ))
}
