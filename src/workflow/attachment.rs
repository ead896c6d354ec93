// Copyright 2025 Cowboy AI, LLC.

//! Attachments accompanying a state transition

use crate::config::FieldLimits;
use crate::entity::{AttachmentMarker, DomainEntity};
use crate::errors::DomainResult;
use crate::governance::access::{TrackingAccess, UserOwnershipAccess};
use crate::governance::ownership::{Ownership, UserTracking, UserTrackingEntity};
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::identifiers::{AttachmentContentId, AttachmentId};
use crate::user::User;
use crate::validation::{limit_optional_text, Validate};
use serde::{Deserialize, Serialize};

/// A note or document attached to a transition
///
/// The content itself is stored elsewhere and referenced by key.
///
/// Ownership is tracked per user only. Attachments carry no owning user
/// group; sharing with a group goes through the transition they accompany.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// The key, present once stored
    pub id: AttachmentId,
    /// Application-defined attachment type
    pub attachment_type: i32,
    /// Optional title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Key of the stored content, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<AttachmentContentId>,
    user_tracking: UserTracking,
}

impl Attachment {
    /// Create an attachment of the given application type
    pub fn new(attachment_type: i32) -> Self {
        Self {
            id: AttachmentId::UNSET,
            attachment_type,
            title: None,
            text: None,
            content_id: None,
            user_tracking: UserTracking::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl DomainEntity for Attachment {
    type IdType = AttachmentMarker;

    fn id(&self) -> AttachmentId {
        self.id
    }
}

impl TrackingEntity for Attachment {
    fn tracking(&self) -> &Tracking {
        self.user_tracking.tracking()
    }
}

impl TrackingAccess for Attachment {
    fn tracking_mut(&mut self) -> &mut Tracking {
        self.user_tracking.tracking_mut()
    }
}

impl UserTrackingEntity for Attachment {
    fn user_ownership(&self) -> &Ownership<User> {
        self.user_tracking.user_ownership()
    }
}

impl UserOwnershipAccess for Attachment {
    fn user_ownership_mut(&mut self) -> &mut Ownership<User> {
        self.user_tracking.user_ownership_mut()
    }
}

impl Validate for Attachment {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        limit_optional_text("attachment.title", self.title.as_deref(), limits.attachment_title)
    }
}
