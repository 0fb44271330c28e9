//! Event repository trait

use crate::error::Result;
use crate::models::{Event, EventPatch};
use async_trait::async_trait;
use bson::oid::ObjectId;

/// Repository trait for event storage operations.
///
/// This is the document-store surface the domain needs: single-document
/// insert/find/update/delete plus the sorted skip/limit query and count
/// backing the `latest` listing.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event, returning its identifier
    async fn insert(&self, event: Event) -> Result<ObjectId>;

    /// Get an event by ID
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>>;

    /// List events sorted by schedule descending, skipping `skip` and
    /// taking at most `limit`
    async fn find_latest(&self, skip: u64, limit: i64) -> Result<Vec<Event>>;

    /// Count all event documents
    async fn count(&self) -> Result<u64>;

    /// Apply a partial update; returns false when no document matched
    async fn update(&self, id: &ObjectId, patch: &EventPatch) -> Result<bool>;

    /// Delete an event by ID; returns false when nothing was deleted
    async fn delete(&self, id: &ObjectId) -> Result<bool>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventRepository {}

        #[async_trait]
        impl EventRepository for EventRepository {
            async fn insert(&self, event: Event) -> Result<ObjectId>;
            async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>>;
            async fn find_latest(&self, skip: u64, limit: i64) -> Result<Vec<Event>>;
            async fn count(&self) -> Result<u64>;
            async fn update(&self, id: &ObjectId, patch: &EventPatch) -> Result<bool>;
            async fn delete(&self, id: &ObjectId) -> Result<bool>;
        }
    }
}
