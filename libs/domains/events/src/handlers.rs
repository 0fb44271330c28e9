//! HTTP handlers for the events API

use crate::error::{EventError, Result};
use crate::models::{Event, EventFields, EventPage, EventsQuery};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_helpers::FormData;
use axum_helpers::errors::responses::{
    BadRequestIdResponse, BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};
use bson::Binary;
use bson::spec::BinarySubtype;
use std::sync::Arc;
use utoipa::OpenApi;

/// Form field carrying the uploaded image in multipart requests
const IMAGE_FIELD: &str = "files[image]";

/// OpenAPI documentation for the Events API
#[derive(OpenApi)]
#[openapi(
    paths(get_events, create_event, update_event, delete_event),
    components(
        schemas(Event, EventPage, CreatedResponse, MessageResponse),
        responses(
            BadRequestResponse,
            BadRequestIdResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_events::<R>).post(create_event::<R>))
        .route("/{id}", put(update_event::<R>).delete(delete_event::<R>))
        .with_state(shared_service)
}

/// Split a decoded form into text fields and the optional image payload.
fn split_form(mut form: FormData) -> (EventFields, Option<Binary>) {
    let image = form.files.remove(IMAGE_FIELD).map(|file| Binary {
        subtype: BinarySubtype::Generic,
        bytes: file.data.to_vec(),
    });

    let fields = EventFields {
        name: form.fields.remove("name"),
        tagline: form.fields.remove("tagline"),
        schedule: form.fields.remove("schedule"),
        description: form.fields.remove("description"),
        moderator: form.fields.remove("moderator"),
        category: form.fields.remove("category"),
        sub_category: form.fields.remove("sub_category"),
        rigor_rank: form.fields.remove("rigor_rank"),
    };

    (fields, image)
}

/// Get a single event by id, or page through the latest events
///
/// The two modes are selected by query parameters: `?id=` returns one
/// document, `?type=latest&page=&limit=` returns a paginated envelope.
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Event document or paginated envelope", body = EventPage),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(query): Query<EventsQuery>,
) -> Result<Response> {
    if let Some(id) = query.id.filter(|id| !id.is_empty()) {
        let event = service.get(&id).await?;
        return Ok(Json(event).into_response());
    }

    if query.query_type.as_deref() == Some("latest") {
        let page = service
            .latest(query.page.as_deref(), query.limit.as_deref())
            .await?;
        return Ok(Json(page).into_response());
    }

    Err(EventError::validation(
        "Invalid query. Use ?id= or ?type=latest.",
    ))
}

/// Create a new event
///
/// Accepts urlencoded or multipart form fields, with an optional image
/// under `files[image]`.
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    responses(
        (status = 201, description = "Event created", body = CreatedResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    form: FormData,
) -> Result<impl IntoResponse> {
    let (fields, image) = split_form(form);
    let id = service.create(fields, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_hex() }),
    ))
}

/// Update an event
///
/// Applies the supplied fields as full-value replacements; fields not in
/// the payload are left untouched.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event updated", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    form: FormData,
) -> Result<Json<MessageResponse>> {
    let (fields, image) = split_form(form);
    service.update(&id, fields, image).await?;

    Ok(Json(MessageResponse {
        message: "Event updated successfully.".to_string(),
    }))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Event deleted successfully.".to_string(),
    }))
}

/// Body of a successful create response
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    /// Identifier of the new event
    pub id: String,
}

/// Confirmation body for update/delete
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
