//! Feedback via the platform mail handler.
//!
//! A `mailto:` link with a fixed recipient and subject is composed and handed
//! to the OS. Nothing is awaited: whether a mail is actually sent is not
//! observable from here.

use tracing::info;

use crate::error::{Result, ValidationError};

pub const FEEDBACK_RECIPIENT: &str = "feedback@dailythree.app";
pub const FEEDBACK_SUBJECT: &str = "dailythree feedback";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    body: String,
}

impl FeedbackMessage {
    /// Rejects bodies that are empty after trimming.
    pub fn new(body: impl Into<String>) -> Result<Self, ValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::EmptyText {
                field: "feedback".into(),
            });
        }
        Ok(Self { body })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            FEEDBACK_RECIPIENT,
            urlencoding::encode(FEEDBACK_SUBJECT),
            urlencoding::encode(&self.body),
        )
    }

    /// Hand the link to the default mail client.
    pub fn send(&self) -> Result<()> {
        let url = self.mailto_url();
        open::that(&url)?;
        info!("feedback handed off to mail handler");
        Ok(())
    }
}
