use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outbound email handed to the SMTP collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachment: Option<PdfAttachment>,
}

/// One in-app notification row; the dispatcher inserts one per recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InAppNotificationModel {
    pub user_id: Uuid,
    pub type_: String,
    pub title: String,
    pub message: String,
    pub metadata: Value,
}

/// Subject and body produced by the template renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}
