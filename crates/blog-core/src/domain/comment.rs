use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader's reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Moderation flag. Inactive comments are hidden.
    pub active: bool,
}

/// Submitter-provided fields of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Comment {
    /// Create an active comment bound to `post_id`.
    pub fn new(post_id: Uuid, fields: NewComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name: fields.name,
            email: fields.email,
            body: fields.body,
            created_at: now,
            updated_at: now,
            active: true,
        }
    }
}
