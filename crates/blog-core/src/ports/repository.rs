use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, NewComment, Page, PageRequest, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User directory. Deleting a user deletes their posts.
pub trait UserRepository: BaseRepository<User, Uuid> {}

/// Tag directory.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}

/// Post store.
///
/// `find_by_id` sees every post; the `*_published*` methods only see posts
/// whose status is published. Listings are ordered newest `publish` first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post of any status.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Insert or update a post, refreshing `updated_at`.
    ///
    /// Fails with [`RepoError::Constraint`] when another post already uses
    /// the slug on the same publish date.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post together with its comments.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// All published posts, optionally only those tagged with `tag`.
    async fn list_published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, RepoError>;

    /// One page of [`list_published`](Self::list_published).
    async fn published_page(
        &self,
        tag: Option<&Tag>,
        request: &PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// The published post with this slug on this UTC publish date.
    ///
    /// [`RepoError::NotFound`] when the date is invalid or when zero or
    /// several posts match.
    async fn get_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, RepoError>;

    async fn get_published_by_id(&self, id: Uuid) -> Result<Post, RepoError>;

    /// Replace the tag set of a post.
    async fn set_tags(&self, post_id: Uuid, tags: &[Tag]) -> Result<(), RepoError>;

    /// Tags of a post, ordered by name.
    async fn tags_for(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;
}

/// Comment store.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Active comments of a post, oldest first.
    async fn list_active(&self, post: &Post) -> Result<Vec<Comment>, RepoError>;

    /// Persist a new active comment on `post`.
    async fn append(&self, post: &Post, fields: NewComment) -> Result<Comment, RepoError>;
}
