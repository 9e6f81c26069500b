//! Template view models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use blog_core::domain::{Page, Post, Tag};
use blog_core::ports::{BaseRepository, PostRepository};

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TagView {
    pub name: String,
    pub slug: String,
    pub url: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            url: format!("/tag/{}/", tag.slug),
            name: tag.name,
            slug: tag.slug,
        }
    }
}

/// A post with everything its templates link to.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: String,
    pub publish: DateTime<Utc>,
    pub url: String,
    pub share_url: String,
    pub comment_url: String,
    pub tags: Vec<TagView>,
}

impl PostView {
    /// Resolve the author and tags of `post`.
    pub async fn load(state: &AppState, post: Post) -> AppResult<Self> {
        let author = state
            .users
            .find_by_id(post.author_id)
            .await?
            .map(|user| user.username)
            .unwrap_or_default();
        let tags = state.posts.tags_for(post.id).await?;

        Ok(Self {
            id: post.id,
            url: post.absolute_path(),
            share_url: format!("/{}/share/", post.id),
            comment_url: format!("/{}/comment/", post.id),
            title: post.title,
            slug: post.slug,
            body: post.body,
            author,
            publish: post.publish,
            tags: tags.into_iter().map(TagView::from).collect(),
        })
    }

    pub async fn load_all(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<Self>> {
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(Self::load(state, post).await?);
        }
        Ok(views)
    }
}

/// Page links of a listing.
#[derive(Debug, Serialize)]
pub struct PaginationView {
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl<T> From<&Page<T>> for PaginationView {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            total_items: page.total_items,
            previous: page.has_previous().then(|| page.number - 1),
            next: page.has_next().then(|| page.number + 1),
        }
    }
}
