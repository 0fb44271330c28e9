//! Event domain models

use bson::Binary;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Discriminator stored on every document this domain creates.
pub const EVENT_TYPE: &str = "event";

/// Main Event entity, stored as a document in the `events` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier, assigned at creation
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "665f1f77bcf86cd799439011")]
    pub id: ObjectId,

    /// Document discriminator, always `"event"`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Creator identifier. No authentication is wired in, so always null.
    #[schema(value_type = Option<String>)]
    pub uid: Option<ObjectId>,

    /// Event name
    pub name: String,

    /// Short tagline
    pub tagline: String,

    /// When the event takes place, stored as a native BSON datetime
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub schedule: DateTime<Utc>,

    /// Full description
    pub description: String,

    /// Inline image bytes, if one was uploaded
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Binary>,

    /// Event moderator
    pub moderator: Option<String>,

    /// Category label
    pub category: Option<String>,

    /// Sub-category label
    pub sub_category: Option<String>,

    /// Rigor ranking. Unparseable or absent input is stored as null.
    pub rigor_rank: Option<i64>,

    /// Attendee identifiers. Empty at creation; no exposed operation
    /// populates it.
    #[schema(value_type = Vec<String>)]
    pub attendees: Vec<ObjectId>,
}

/// Validated and coerced input for creating an event.
///
/// Built by the service from raw form fields; required fields are already
/// checked for presence, `schedule` and `rigor_rank` already coerced.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub name: String,
    pub tagline: String,
    pub schedule: DateTime<Utc>,
    pub description: String,
    pub moderator: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub rigor_rank: Option<i64>,
    pub image: Option<Binary>,
}

impl From<CreateEvent> for Event {
    fn from(create: CreateEvent) -> Self {
        Self {
            id: ObjectId::new(),
            event_type: EVENT_TYPE.to_string(),
            uid: None,
            name: create.name,
            tagline: create.tagline,
            schedule: create.schedule,
            description: create.description,
            image: create.image,
            moderator: create.moderator,
            category: create.category,
            sub_category: create.sub_category,
            rigor_rank: create.rigor_rank,
            attendees: Vec::new(),
        }
    }
}

/// Raw text fields of a create/update form, before validation and coercion.
#[derive(Debug, Clone, Default)]
pub struct EventFields {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub schedule: Option<String>,
    pub description: Option<String>,
    pub moderator: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub rigor_rank: Option<String>,
}

/// Coerced partial update. Each `Some` field is written as a full-value
/// replacement of the stored top-level field.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub schedule: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub moderator: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    /// `Some(None)` writes the null sentinel for unparseable input.
    pub rigor_rank: Option<Option<i64>>,
    pub image: Option<Binary>,
}

impl EventPatch {
    /// True when the patch would not write any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tagline.is_none()
            && self.schedule.is_none()
            && self.description.is_none()
            && self.moderator.is_none()
            && self.category.is_none()
            && self.sub_category.is_none()
            && self.rigor_rank.is_none()
            && self.image.is_none()
    }
}

/// Query parameters of `GET /events`, kept as raw strings so the service
/// can apply the documented coercion rules.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EventsQuery {
    /// Event identifier for by-id lookup
    pub id: Option<String>,

    /// Query mode selector; only `latest` is recognized
    #[serde(rename = "type")]
    pub query_type: Option<String>,

    /// Page number, 1-based (default 1)
    pub page: Option<String>,

    /// Page size (default 5)
    pub limit: Option<String>,
}

/// Paginated envelope returned by the `type=latest` query.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    /// Requested page number
    pub page: i64,
    /// Requested page size
    pub limit: i64,
    /// Total number of pages at this page size
    pub total_pages: u64,
    /// Total number of event documents
    pub total_events: u64,
    /// Events on this page, most recent schedule first
    pub events: Vec<Event>,
}
