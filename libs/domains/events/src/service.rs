//! Event service layer: validation, coercion, and pagination math.

use crate::error::{EventError, Result};
use crate::models::{CreateEvent, Event, EventFields, EventPage, EventPatch};
use crate::repository::EventRepository;
use bson::Binary;
use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{info, instrument};

/// Default page number for the `latest` listing
const DEFAULT_PAGE: i64 = 1;
/// Default page size for the `latest` listing
const DEFAULT_LIMIT: i64 = 5;

/// Event service wrapping a document store.
///
/// Stateless between calls; the repository handle is injected so tests can
/// substitute the store.
pub struct EventService<R: EventRepository> {
    repository: R,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new event service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate and coerce create input, then insert a new event document.
    #[instrument(skip(self, fields, image))]
    pub async fn create(&self, fields: EventFields, image: Option<Binary>) -> Result<ObjectId> {
        let create = CreateEvent {
            name: required(fields.name)?,
            tagline: required(fields.tagline)?,
            schedule: parse_schedule(&required(fields.schedule)?)?,
            description: required(fields.description)?,
            moderator: fields.moderator,
            category: fields.category,
            sub_category: fields.sub_category,
            // Lenient by design: unparseable input becomes the null sentinel
            rigor_rank: fields.rigor_rank.as_deref().and_then(parse_int),
            image,
        };

        let id = self.repository.insert(create.into()).await?;
        info!(event_id = %id, "Event created");
        Ok(id)
    }

    /// Get a single event by its (string) identifier.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Event> {
        let id = ObjectId::parse_str(id)?;
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(EventError::NotFound)
    }

    /// Page through events, most recent schedule first.
    ///
    /// `page` and `limit` arrive as raw query strings; absent, non-numeric,
    /// or non-positive values fall back to the defaults (1 and 5).
    #[instrument(skip(self))]
    pub async fn latest(&self, page: Option<&str>, limit: Option<&str>) -> Result<EventPage> {
        let page = positive_or(page, DEFAULT_PAGE);
        let limit = positive_or(limit, DEFAULT_LIMIT);
        let skip = ((page - 1) * limit) as u64;

        let events = self.repository.find_latest(skip, limit).await?;
        let total_events = self.repository.count().await?;
        let total_pages = total_events.div_ceil(limit as u64);

        Ok(EventPage {
            page,
            limit,
            total_pages,
            total_events,
            events,
        })
    }

    /// Apply a partial update to an existing event.
    ///
    /// Supplied fields replace the stored values outright; required-field
    /// presence is not re-validated here (create-time contract only).
    #[instrument(skip(self, fields, image))]
    pub async fn update(
        &self,
        id: &str,
        fields: EventFields,
        image: Option<Binary>,
    ) -> Result<()> {
        let id = ObjectId::parse_str(id)?;

        let mut patch = EventPatch {
            name: fields.name,
            tagline: fields.tagline,
            description: fields.description,
            moderator: fields.moderator,
            category: fields.category,
            sub_category: fields.sub_category,
            image,
            ..Default::default()
        };

        // Empty strings are skipped for the coerced fields: the schedule
        // invariant requires a real timestamp or no write at all
        if let Some(raw) = fields.schedule.filter(|s| !s.is_empty()) {
            patch.schedule = Some(parse_schedule(&raw)?);
        }
        if let Some(raw) = fields.rigor_rank.filter(|s| !s.is_empty()) {
            patch.rigor_rank = Some(parse_int(&raw));
        }

        if !self.repository.update(&id, &patch).await? {
            return Err(EventError::NotFound);
        }

        info!(event_id = %id, "Event updated");
        Ok(())
    }

    /// Delete an event by its (string) identifier.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = ObjectId::parse_str(id)?;

        if !self.repository.delete(&id).await? {
            return Err(EventError::NotFound);
        }

        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

/// `parse_int(x)` with a floor of 1: absent, non-numeric, and non-positive
/// raw query values all fall back to the default.
fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_int).filter(|v| *v > 0).unwrap_or(default)
}

/// Presence check for required create fields: absent and empty both fail.
fn required(value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(EventError::missing_fields)
}

/// Base-10 integer coercion with `parseInt` semantics: leading whitespace
/// skipped, optional sign, then decimal digits; trailing garbage ignored.
/// Returns None when no leading digits exist.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|v| if negative { -v } else { v })
}

/// Parse a schedule timestamp.
///
/// Accepts RFC 3339 first, then a few common date-time renderings assumed
/// to be UTC. The stored value is always a real timestamp, never the input
/// string.
pub(crate) fn parse_schedule(raw: &str) -> Result<DateTime<Utc>> {
    let input = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(EventError::validation("Invalid schedule timestamp."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockEventRepository;
    use chrono::TimeZone;

    fn valid_fields() -> EventFields {
        EventFields {
            name: Some("Rust Meetup".to_string()),
            tagline: Some("Monthly systems talk".to_string()),
            schedule: Some("2025-01-01T10:00:00Z".to_string()),
            description: Some("Talks and pizza".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("7"), Some(7));
        assert_eq!(parse_int("-12"), Some(-12));
        assert_eq!(parse_int("+3"), Some(3));
    }

    #[test]
    fn test_parse_int_trailing_garbage_ignored() {
        assert_eq!(parse_int("7abc"), Some(7));
        assert_eq!(parse_int("10.5"), Some(10));
        assert_eq!(parse_int(" 42 "), Some(42));
    }

    #[test]
    fn test_parse_int_non_numeric() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_positive_or_defaults() {
        assert_eq!(positive_or(None, 5), 5);
        assert_eq!(positive_or(Some("abc"), 5), 5);
        assert_eq!(positive_or(Some("0"), 1), 1);
        assert_eq!(positive_or(Some("-2"), 1), 1);
        assert_eq!(positive_or(Some("3"), 1), 3);
    }

    #[test]
    fn test_parse_schedule_rfc3339() {
        let dt = parse_schedule("2025-01-01T10:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());

        let offset = parse_schedule("2025-01-01T12:00:00+02:00").unwrap();
        assert_eq!(offset, dt);
    }

    #[test]
    fn test_parse_schedule_naive_forms() {
        assert_eq!(
            parse_schedule("2025-01-01T10:00:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            parse_schedule("2025-01-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_schedule_rejects_garbage() {
        assert!(parse_schedule("not-a-date").is_err());
        assert!(parse_schedule("").is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_required_field() {
        let repo = MockEventRepository::new();
        let service = EventService::new(repo);

        for missing in ["name", "tagline", "schedule", "description"] {
            let mut fields = valid_fields();
            match missing {
                "name" => fields.name = None,
                "tagline" => fields.tagline = Some(String::new()),
                "schedule" => fields.schedule = None,
                _ => fields.description = Some(String::new()),
            }

            let err = service.create(fields, None).await.unwrap_err();
            assert_eq!(err.to_string(), "Missing required fields.");
        }
    }

    #[tokio::test]
    async fn test_create_coerces_rigor_rank_leniently() {
        let mut repo = MockEventRepository::new();
        repo.expect_insert()
            .withf(|event: &Event| event.rigor_rank.is_none() && event.event_type == "event")
            .returning(|event| Ok(event.id));
        let service = EventService::new(repo);

        let mut fields = valid_fields();
        fields.rigor_rank = Some("not-a-number".to_string());

        service.create(fields, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_latest_defaults_and_skip() {
        let mut repo = MockEventRepository::new();
        repo.expect_find_latest()
            .withf(|skip, limit| *skip == 0 && *limit == 5)
            .returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Ok(12));
        let service = EventService::new(repo);

        let page = service.latest(None, Some("junk")).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 5);
        assert_eq!(page.total_events, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_latest_page_three() {
        let mut repo = MockEventRepository::new();
        repo.expect_find_latest()
            .withf(|skip, limit| *skip == 10 && *limit == 5)
            .returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Ok(12));
        let service = EventService::new(repo);

        let page = service.latest(Some("3"), Some("5")).await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_update_invalid_id_skips_store() {
        // No expectations set: any repository call would panic
        let repo = MockEventRepository::new();
        let service = EventService::new(repo);

        let err = service
            .update("definitely-not-an-oid", valid_fields(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidId));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_update().returning(|_, _| Ok(false));
        let service = EventService::new(repo);

        let err = service
            .update(
                &ObjectId::new().to_hex(),
                EventFields {
                    tagline: Some("new".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::NotFound));
    }

    #[tokio::test]
    async fn test_update_skips_empty_coerced_fields() {
        let mut repo = MockEventRepository::new();
        repo.expect_update()
            .withf(|_, patch: &EventPatch| {
                patch.schedule.is_none() && patch.rigor_rank.is_none()
            })
            .returning(|_, _| Ok(true));
        let service = EventService::new(repo);

        service
            .update(
                &ObjectId::new().to_hex(),
                EventFields {
                    schedule: Some(String::new()),
                    rigor_rank: Some(String::new()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_delete().returning(|_| Ok(false));
        let service = EventService::new(repo);

        let err = service.delete(&ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound));
    }
}
