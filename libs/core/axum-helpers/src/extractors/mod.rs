//! Custom Axum extractors.

pub mod form_data;

pub use form_data::{FormData, UploadedFile};
