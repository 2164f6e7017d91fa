//! Records that own a document body.
//!
//! A blog post owns its body directly and needs nothing beyond
//! [`OwnerId::BlogPost`]. A contact reply also carries the HTML rendered from
//! its body at send time, and marks the message it answers as replied.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{Document, ValidationError};
use crate::render::{RenderOptions, render_with};
use crate::store::{ContentId, ContentStore, OwnerId, StorageError};

/// Sender recorded when none is given
pub const DEFAULT_SENDER: &str = "admin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    #[default]
    Pending,
    Replied,
}

/// An inbound message from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub subject: String,
    #[serde(default)]
    pub reply_status: ReplyStatus,
}

impl ContactMessage {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            reply_status: ReplyStatus::Pending,
        }
    }

    /// Subject line for a reply, e.g. `Re: Hello`
    pub fn reply_subject(&self) -> String {
        format!("Re: {}", self.subject)
    }
}

/// A reply to a contact message, with its body rendered once at compose time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub message_id: Uuid,
    pub body: Document,
    pub html: String,
    pub sent_by: String,
}

impl ContactReply {
    /// Builds a reply. An empty body is rejected.
    pub fn compose(
        message_id: Uuid,
        body: Document,
        sent_by: Option<&str>,
        options: &RenderOptions,
    ) -> Result<Self, ValidationError> {
        if body.is_empty() {
            return Err(ValidationError::EmptyReply);
        }
        let sent_by = sent_by
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SENDER)
            .to_string();

        Ok(Self {
            message_id,
            html: render_with(&body, options),
            body,
            sent_by,
        })
    }

    pub fn owner(&self) -> OwnerId {
        OwnerId::ContactReply(self.message_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Composes a reply to `message`, stores its body and marks the message
/// replied. The message is left pending if either step fails.
pub fn send_reply(
    store: &mut impl ContentStore,
    message: &mut ContactMessage,
    body: Document,
    sent_by: Option<&str>,
    options: &RenderOptions,
) -> Result<(ContentId, ContactReply), RecordError> {
    let reply = ContactReply::compose(message.id, body, sent_by, options)?;
    let id = store.save(&reply.owner(), &reply.body)?;
    message.reply_status = ReplyStatus::Replied;
    log::info!("Replied to contact message {} as {id}", message.id);
    Ok((id, reply))
}
