//! MongoDB implementation of EventRepository

use crate::error::Result;
use crate::models::{EVENT_TYPE, Event, EventPatch};
use crate::repository::EventRepository;
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    /// Create a new MongoDB event repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("events"),
        }
    }

    /// Create indexes backing the `latest` query.
    pub async fn create_indexes(&self) -> Result<()> {
        let indexes = vec![
            // Compound index for the type=latest listing
            IndexModel::builder()
                .keys(doc! { "type": 1, "schedule": -1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build the `$set` document for a partial update.
    fn set_document(patch: &EventPatch) -> Document {
        let mut set = Document::new();

        if let Some(name) = &patch.name {
            set.insert("name", name);
        }
        if let Some(tagline) = &patch.tagline {
            set.insert("tagline", tagline);
        }
        if let Some(schedule) = patch.schedule {
            set.insert("schedule", Bson::DateTime(schedule.into()));
        }
        if let Some(description) = &patch.description {
            set.insert("description", description);
        }
        if let Some(moderator) = &patch.moderator {
            set.insert("moderator", moderator);
        }
        if let Some(category) = &patch.category {
            set.insert("category", category);
        }
        if let Some(sub_category) = &patch.sub_category {
            set.insert("sub_category", sub_category);
        }
        match &patch.rigor_rank {
            Some(Some(rank)) => {
                set.insert("rigor_rank", rank);
            }
            Some(None) => {
                set.insert("rigor_rank", Bson::Null);
            }
            None => {}
        }
        if let Some(image) = &patch.image {
            set.insert("image", Bson::Binary(image.clone()));
        }

        set
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: Event) -> Result<ObjectId> {
        let id = event.id;
        self.collection.insert_one(&event).await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>> {
        let event = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_latest(&self, skip: u64, limit: i64) -> Result<Vec<Event>> {
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "schedule": -1 })
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(doc! { "type": EVENT_TYPE })
            .with_options(options)
            .await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        let count = self
            .collection
            .count_documents(doc! { "type": EVENT_TYPE })
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &ObjectId, patch: &EventPatch) -> Result<bool> {
        let set = Self::set_document(patch);
        if set.is_empty() {
            // $set rejects an empty document; an empty patch is a no-op,
            // so only the existence check remains
            return Ok(self.find_by_id(id).await?.is_some());
        }

        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ObjectId) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Binary;
    use bson::spec::BinarySubtype;

    #[test]
    fn test_set_document_skips_absent_fields() {
        let patch = EventPatch {
            tagline: Some("new tagline".to_string()),
            ..Default::default()
        };

        let set = MongoEventRepository::set_document(&patch);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("tagline").unwrap(), "new tagline");
    }

    #[test]
    fn test_set_document_writes_null_sentinel() {
        let patch = EventPatch {
            rigor_rank: Some(None),
            ..Default::default()
        };

        let set = MongoEventRepository::set_document(&patch);
        assert_eq!(set.get("rigor_rank"), Some(&Bson::Null));
    }

    #[test]
    fn test_set_document_schedule_is_bson_datetime() {
        let patch = EventPatch {
            schedule: Some("2025-01-01T10:00:00Z".parse().unwrap()),
            ..Default::default()
        };

        let set = MongoEventRepository::set_document(&patch);
        assert!(matches!(set.get("schedule"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_set_document_image_bytes() {
        let patch = EventPatch {
            image: Some(Binary {
                subtype: BinarySubtype::Generic,
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };

        let set = MongoEventRepository::set_document(&patch);
        match set.get("image") {
            Some(Bson::Binary(binary)) => assert_eq!(binary.bytes, vec![1, 2, 3]),
            other => panic!("expected binary, got {:?}", other),
        }
    }
}
