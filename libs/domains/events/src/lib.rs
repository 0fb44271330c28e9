//! Events Domain
//!
//! A thin HTTP-to-MongoDB translation layer over a single `events`
//! collection, with optional inline image upload.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request decoding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, coercion, pagination math
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, mongodb::MongoEventRepository, service::EventService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoEventRepository::new(&db);
//! let service = EventService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EventError, Result};
pub use handlers::{ApiDoc, CreatedResponse, MessageResponse};
pub use models::{CreateEvent, Event, EventFields, EventPage, EventPatch, EventsQuery};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
