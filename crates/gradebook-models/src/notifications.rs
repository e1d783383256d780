//! Notification record written by the publish workflow. Delivery beyond
//! the store is another subsystem's concern; from this side the send is
//! fire-and-forget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification priority.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "notification_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A stored notification. The publish workflow only ever emits class-wide
/// EXAM notifications; the other fields mirror the notification subsystem's
/// own schema.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    /// GENERAL, FEE_REMINDER, EXAM, EVENT, HOLIDAY, EMERGENCY
    #[serde(rename = "type")]
    pub notification_type: String,
    /// ALL, CLASS_SPECIFIC, INDIVIDUAL
    pub target_audience: String,
    pub target_class: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Class-wide exam notification, the only shape the publish workflow
    /// produces.
    pub fn exam_for_class(
        title: impl Into<String>,
        message: impl Into<String>,
        target_class: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            notification_type: "EXAM".to_string(),
            target_audience: "CLASS_SPECIFIC".to_string(),
            target_class: Some(target_class.into()),
            priority,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_notification_serializes_with_the_type_alias() {
        let notification = Notification::exam_for_class(
            "Results Published",
            "Results for Class 10 - A are out",
            "Class 10 - A",
            Priority::High,
        );

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "EXAM");
        assert_eq!(json["target_audience"], "CLASS_SPECIFIC");
        assert_eq!(json["target_class"], "Class 10 - A");
        assert_eq!(json["priority"], "HIGH");
        assert!(json.get("notification_type").is_none());
    }
}
