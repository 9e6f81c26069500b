//! Shared in-process tables backing the in-memory repositories.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag, User};

/// Rows of every blog table, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: Vec<User>,
    pub(crate) posts: Vec<Post>,
    pub(crate) tags: Vec<Tag>,
    /// `(post_id, tag_id)` pairs.
    pub(crate) post_tags: BTreeSet<(Uuid, Uuid)>,
    pub(crate) comments: Vec<Comment>,
}

impl Tables {
    /// Remove a post with its comments and tag links.
    pub(crate) fn delete_post(&mut self, id: Uuid) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            return false;
        }

        self.comments.retain(|c| c.post_id != id);
        self.post_tags.retain(|(post_id, _)| *post_id != id);
        true
    }

    /// Remove a user with every post they wrote.
    pub(crate) fn delete_user(&mut self, id: Uuid) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return false;
        }

        let authored: Vec<Uuid> = self
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in authored {
            self.delete_post(post_id);
        }
        true
    }

    pub(crate) fn delete_tag(&mut self, id: Uuid) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        if self.tags.len() == before {
            return false;
        }

        self.post_tags.retain(|(_, tag_id)| *tag_id != id);
        true
    }
}

/// In-memory database shared by the in-memory repositories.
///
/// Cloning is cheap and every clone sees the same tables.
/// Note: Data is lost on process restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    pub(crate) tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}
