//! Collaborators the survey talks to: routing, notifications, and the
//! analytics transport. All are injected so hosts and tests can swap them.

use async_trait::async_trait;
use serde::Serialize;

use super::model::SubmissionReport;
use crate::error::ReportError;

/// A translatable message: an id plus the text shown when no translation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: &'static str,
    pub default_message: &'static str,
}

impl Message {
    pub const fn new(id: &'static str, default_message: &'static str) -> Self {
        Self {
            id,
            default_message,
        }
    }
}

/// Shown once the survey is submitted or skipped.
pub const SUBMITTED: Message = Message::new(
    "Usecase.notification.success.project-created",
    "Project has been successfully created",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: Message,
}

impl Notification {
    pub fn success(message: Message) -> Self {
        Self {
            kind: NotificationKind::Success,
            message,
        }
    }
}

/// Routing collaborator.
pub trait Navigator: Send + Sync {
    /// Replace the current location with `path`.
    fn push(&self, path: &str);
}

/// Notification collaborator.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Delivers a report to the analytics endpoint.
///
/// Implementations must be cancel-safe: the future may be dropped at any
/// await point when the owning session is torn down.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn send(&self, report: &SubmissionReport) -> Result<(), ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_serializes_like_a_toast() {
        let json = serde_json::to_value(Notification::success(SUBMITTED)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "success",
                "message": {
                    "id": "Usecase.notification.success.project-created",
                    "defaultMessage": "Project has been successfully created",
                }
            })
        );
    }
}
