//! In-memory repository implementations - used when no database is configured
//! and as test doubles. Foreign keys and cascades follow the SQL schema.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_core::domain::{
    Comment, DateSlugKey, NewComment, Page, PageRequest, Post, Tag, User,
};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};

use super::store::{MemoryDatabase, Tables};

/// Insert `row`, or replace the row with the same key.
fn upsert_row<T>(rows: &mut Vec<T>, row: T, same: impl Fn(&T) -> bool) {
    match rows.iter_mut().find(|r| same(r)) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

/// Published posts, newest first, optionally restricted to one tag.
fn published(tables: &Tables, tag: Option<&Tag>) -> Vec<Post> {
    let mut posts: Vec<Post> = tables
        .posts
        .iter()
        .filter(|p| p.is_published())
        .filter(|p| tag.is_none_or(|t| tables.post_tags.contains(&(p.id, t.id))))
        .cloned()
        .collect();

    posts.sort_by(|a, b| b.publish.cmp(&a.publish));
    posts
}

/// In-memory user directory.
pub struct InMemoryUserRepository {
    db: MemoryDatabase,
}

impl InMemoryUserRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        user.updated_at = Utc::now();
        upsert_row(&mut tables.users, user.clone(), |u| u.id == user.id);
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.delete_user(id) {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(user_id = %id, "User deleted with their posts");
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {}

/// In-memory tag directory.
pub struct InMemoryTagRepository {
    db: MemoryDatabase,
}

impl InMemoryTagRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn save(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.db.tables.write().await;

        if tables
            .tags
            .iter()
            .any(|t| t.id != tag.id && t.slug == tag.slug)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        upsert_row(&mut tables.tags, tag.clone(), |t| t.id == tag.id);
        Ok(tag)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.delete_tag(id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.slug == slug).cloned())
    }
}

/// In-memory post store.
pub struct InMemoryPostRepository {
    db: MemoryDatabase,
}

impl InMemoryPostRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;

        if !tables.users.iter().any(|u| u.id == post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        if tables.posts.iter().any(|p| p.conflicts_with(&post)) {
            return Err(RepoError::Constraint(format!(
                "slug already used on this publish date: {}/{}",
                post.publish_date(),
                post.slug
            )));
        }

        if let Some(stored) = tables.posts.iter().find(|p| p.id == post.id) {
            post.created_at = stored.created_at;
        }
        post.updated_at = Utc::now();
        upsert_row(&mut tables.posts, post.clone(), |p| p.id == post.id);

        tracing::debug!(post_id = %post.id, slug = %post.slug, "Post saved");
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.delete_post(id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn list_published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(published(&tables, tag))
    }

    async fn published_page(
        &self,
        tag: Option<&Tag>,
        request: &PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(Page::from_items(published(&tables, tag), request))
    }

    async fn get_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, RepoError> {
        let key = DateSlugKey::new(year, month, day, slug).ok_or(RepoError::NotFound)?;
        let tables = self.db.tables.read().await;

        let mut found = tables
            .posts
            .iter()
            .filter(|p| p.is_published() && key.matches(p));

        match (found.next(), found.next()) {
            (Some(post), None) => Ok(post.clone()),
            _ => Err(RepoError::NotFound),
        }
    }

    async fn get_published_by_id(&self, id: Uuid) -> Result<Post, RepoError> {
        let tables = self.db.tables.read().await;
        tables
            .posts
            .iter()
            .find(|p| p.id == id && p.is_published())
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn set_tags(&self, post_id: Uuid, tags: &[Tag]) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;

        if !tables.posts.iter().any(|p| p.id == post_id) {
            return Err(RepoError::Constraint(format!("post {post_id} does not exist")));
        }
        if let Some(missing) = tags
            .iter()
            .find(|tag| !tables.tags.iter().any(|t| t.id == tag.id))
        {
            return Err(RepoError::Constraint(format!(
                "tag {} does not exist",
                missing.slug
            )));
        }

        tables.post_tags.retain(|(id, _)| *id != post_id);
        tables
            .post_tags
            .extend(tags.iter().map(|tag| (post_id, tag.id)));
        Ok(())
    }

    async fn tags_for(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tables = self.db.tables.read().await;

        let mut tags: Vec<Tag> = tables
            .tags
            .iter()
            .filter(|t| tables.post_tags.contains(&(post_id, t.id)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

/// In-memory comment store.
pub struct InMemoryCommentRepository {
    db: MemoryDatabase,
}

impl InMemoryCommentRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_active(&self, post: &Post) -> Result<Vec<Comment>, RepoError> {
        let tables = self.db.tables.read().await;

        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post.id && c.active)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn append(&self, post: &Post, fields: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.db.tables.write().await;

        if !tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("post {} does not exist", post.id)));
        }

        let comment = Comment::new(post.id, fields);
        tables.comments.push(comment.clone());

        tracing::info!(post_id = %post.id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }
}
