//! Activity-stream endpoint and its heterogeneous item decoder.
//!
//! The wire format is a JSON array of loosely-typed objects carrying a
//! `"type"` discriminator. Each item is classified by that field and
//! decoded into its concrete record; fields the API omits (or sends as
//! `null`) fall back to their default values instead of failing the
//! whole stream, while a genuinely mismatched field yields a
//! recoverable [`Error::Stream`] naming the offending item type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::CanvasClient;
use crate::error::Error;

// ── Serde helpers ────────────────────────────────────────────────────

/// Treat an explicit `null` the same as an absent field.
///
/// Canvas sends `"group_id": null` for course-scoped items and
/// `"course_id": null` for group-scoped ones.
fn default_on_null<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Variant records ──────────────────────────────────────────────────

/// A discussion topic in the activity stream; id comes from the
/// `discussion_topic_id` wire field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscussionTopic {
    #[serde(rename = "discussion_topic_id", default, deserialize_with = "default_on_null")]
    pub id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub total_root_discussion_entries: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub require_initial_post: bool,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    /// Zero when the item is not group-scoped.
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,

    #[serde(default)]
    pub user_has_posted: Value,
    #[serde(default)]
    pub root_discussion_entries: Value,
}

/// An announcement; same shape as a discussion topic plus the context
/// type, with id from `announcement_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "announcement_id", default, deserialize_with = "default_on_null")]
    pub id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub total_root_discussion_entries: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub context_type: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub require_initial_post: bool,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,

    #[serde(default)]
    pub user_has_posted: Value,
    #[serde(default)]
    pub root_discussion_entries: Value,
}

/// A conversation (inbox thread).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default, deserialize_with = "default_on_null")]
    pub id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub private: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub participant_count: i64,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default)]
    pub latest_messages: Value,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,
}

/// A notification message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "default_on_null")]
    pub id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub notification_category: String,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,
}

/// A web conference; id comes from `web_conference_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conference {
    #[serde(rename = "web_conference_id", default, deserialize_with = "default_on_null")]
    pub id: i64,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,
}

/// A collaboration; id comes from `collaboration_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collaboration {
    #[serde(rename = "collaboration_id", default, deserialize_with = "default_on_null")]
    pub id: i64,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,
}

/// A peer-review assessment request; id comes from
/// `assessment_request_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(rename = "assessment_request_id", default, deserialize_with = "default_on_null")]
    pub id: i64,

    #[serde(default, deserialize_with = "default_on_null")]
    pub created_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub message: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub read_state: bool,
    #[serde(default, deserialize_with = "default_on_null")]
    pub course_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub group_id: i64,
    #[serde(default, deserialize_with = "default_on_null")]
    pub html_url: String,
}

// ── Aggregate ────────────────────────────────────────────────────────

/// The decoded activity stream, one sequence per item kind, each in
/// wire encounter order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActivityStream {
    pub discussion_topics: Vec<DiscussionTopic>,
    pub announcements: Vec<Announcement>,
    pub conversations: Vec<Conversation>,
    pub messages: Vec<Message>,
    pub conferences: Vec<Conference>,
    pub collaborations: Vec<Collaboration>,
    pub assessment_requests: Vec<AssessmentRequest>,
}

impl ActivityStream {
    /// Total number of decoded items across all kinds.
    pub fn len(&self) -> usize {
        self.discussion_topics.len()
            + self.announcements.len()
            + self.conversations.len()
            + self.messages.len()
            + self.conferences.len()
            + self.collaborations.len()
            + self.assessment_requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Query options ────────────────────────────────────────────────────

/// Query options for [`CanvasClient::get_activity_stream`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityStreamQuery {
    only_active_courses: bool,
}

impl ActivityStreamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the stream to currently active courses.
    pub fn only_active_courses(mut self, only: bool) -> Self {
        self.only_active_courses = only;
        self
    }
}

// ── Classification ───────────────────────────────────────────────────

/// Classify raw stream items by their `"type"` discriminator and decode
/// each into its concrete record.
///
/// `Submission` items are not modeled and are skipped; unrecognized
/// types are dropped. Both cases are logged at debug level.
fn classify(items: Vec<Value>) -> Result<ActivityStream, Error> {
    let mut stream = ActivityStream::default();

    for item in items {
        let Some(kind) = item.get("type").and_then(Value::as_str).map(str::to_owned) else {
            debug!("stream item without type discriminator, skipping");
            continue;
        };

        match kind.as_str() {
            "DiscussionTopic" => stream.discussion_topics.push(decode(&kind, item)?),
            "Announcement" => stream.announcements.push(decode(&kind, item)?),
            "Conversation" => stream.conversations.push(decode(&kind, item)?),
            "Message" => stream.messages.push(decode(&kind, item)?),
            "Conference" => stream.conferences.push(decode(&kind, item)?),
            "Collaboration" => stream.collaborations.push(decode(&kind, item)?),
            "AssessmentRequest" => stream.assessment_requests.push(decode(&kind, item)?),
            "Submission" => {
                // Submissions carry a distinct, much larger shape and are
                // out of scope for the stream model.
                debug!("Submission stream item, skipping");
            }
            other => debug!(item_type = other, "unrecognized stream item type, skipping"),
        }
    }

    Ok(stream)
}

fn decode<T: DeserializeOwned>(kind: &str, item: Value) -> Result<T, Error> {
    serde_path_to_error::deserialize(item).map_err(|e| Error::Stream {
        item_type: kind.to_owned(),
        field: e.path().to_string(),
        message: e.into_inner().to_string(),
    })
}

// ── Endpoint ─────────────────────────────────────────────────────────

impl CanvasClient {
    /// Fetch and decode the authenticated user's activity stream.
    ///
    /// `GET /api/v1/users/self/activity_stream`
    pub async fn get_activity_stream(
        &self,
        query: &ActivityStreamQuery,
    ) -> Result<ActivityStream, Error> {
        let mut params = Vec::new();
        if query.only_active_courses {
            params.push(("only_active_courses", "true".to_string()));
        }

        let items: Vec<Value> = self
            .get_with_params("users/self/activity_stream", &params)
            .await?;
        debug!(items = items.len(), "classifying activity stream");
        classify(items)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn message_without_group_id_defaults_to_zero() {
        let items = vec![json!({
            "type": "Message",
            "id": 5,
            "created_at": "2019-04-01T12:00:00Z",
            "updated_at": "2019-04-01T12:30:00Z",
            "title": "t",
            "message": "m",
            "read_state": true,
            "course_id": 10,
            "html_url": "u",
            "notification_category": "c"
        })];

        let stream = classify(items).expect("decodes");
        assert_eq!(stream.messages.len(), 1);

        let msg = &stream.messages[0];
        assert_eq!(msg.id, 5);
        assert_eq!(msg.group_id, 0);
        assert_eq!(msg.course_id, 10);
        assert_eq!(msg.title, "t");
        assert_eq!(msg.message, "m");
        assert_eq!(msg.html_url, "u");
        assert_eq!(msg.notification_category, "c");
        assert!(msg.read_state);
    }

    #[test]
    fn null_ids_fall_back_to_defaults() {
        let items = vec![json!({
            "type": "Conversation",
            "id": 9,
            "private": true,
            "participant_count": 3,
            "title": "thread",
            "course_id": null,
            "group_id": null,
            "read_state": false
        })];

        let stream = classify(items).expect("decodes");
        let conv = &stream.conversations[0];
        assert_eq!(conv.id, 9);
        assert_eq!(conv.course_id, 0);
        assert_eq!(conv.group_id, 0);
        assert_eq!(conv.participant_count, 3);
    }

    #[test]
    fn submission_and_unknown_items_are_dropped_without_error() {
        let items = vec![
            json!({"type": "Submission", "id": 1, "score": 98.5}),
            json!({"type": "WebConferenceInvite", "id": 2}),
            json!({"no_type_at_all": true}),
            json!({"type": "Message", "id": 3}),
        ];

        let stream = classify(items).expect("decodes");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.messages[0].id, 3);
    }

    #[test]
    fn variant_ids_come_from_their_own_wire_fields() {
        let items = vec![
            json!({"type": "Announcement", "announcement_id": 11, "id": 900}),
            json!({"type": "DiscussionTopic", "discussion_topic_id": 12, "id": 901}),
            json!({"type": "Conference", "web_conference_id": 13, "id": 902}),
            json!({"type": "Collaboration", "collaboration_id": 14, "id": 903}),
            json!({"type": "AssessmentRequest", "assessment_request_id": 15, "id": 904}),
        ];

        let stream = classify(items).expect("decodes");
        assert_eq!(stream.announcements[0].id, 11);
        assert_eq!(stream.discussion_topics[0].id, 12);
        assert_eq!(stream.conferences[0].id, 13);
        assert_eq!(stream.collaborations[0].id, 14);
        assert_eq!(stream.assessment_requests[0].id, 15);
    }

    #[test]
    fn mismatched_field_yields_recoverable_stream_error() {
        let items = vec![json!({
            "type": "Message",
            "id": "not-a-number"
        })];

        let err = classify(items).expect_err("must reject string id");
        match err {
            Error::Stream {
                item_type,
                field,
                message,
            } => {
                assert_eq!(item_type, "Message");
                assert_eq!(field, "id");
                assert!(!message.is_empty());
            }
            other => panic!("expected Stream error, got: {other:?}"),
        }
    }

    #[test]
    fn encounter_order_is_preserved_per_kind() {
        let items = vec![
            json!({"type": "Message", "id": 1}),
            json!({"type": "Announcement", "announcement_id": 7}),
            json!({"type": "Message", "id": 2}),
            json!({"type": "Message", "id": 3}),
        ];

        let stream = classify(items).expect("decodes");
        let ids: Vec<i64> = stream.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(stream.announcements[0].id, 7);
    }
}
