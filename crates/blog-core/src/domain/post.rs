use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::is_valid_slug;
use crate::error::DomainError;

/// Maximum title length accepted by the post table.
pub const MAX_TITLE_LENGTH: usize = 250;

/// Publication state of a post. Only published posts are publicly visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Two-letter code stored in the database.
    pub fn code(self) -> &'static str {
        match self {
            PostStatus::Draft => "DF",
            PostStatus::Published => "PB",
        }
    }

    pub fn is_published(self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

/// Post entity - a blog article written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post published "now".
    pub fn new(
        author_id: Uuid,
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let slug = slug.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title cannot be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::Validation(format!(
                "title exceeds the maximum length: {MAX_TITLE_LENGTH}"
            )));
        }
        if !is_valid_slug(&slug) {
            return Err(DomainError::Validation(format!("invalid slug: {slug:?}")));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body: body.into(),
            publish: now,
            status: PostStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the publish timestamp.
    pub fn published_at(mut self, publish: DateTime<Utc>) -> Self {
        self.publish = publish;
        self
    }

    /// Mark the post as published.
    pub fn publish(mut self) -> Self {
        self.status = PostStatus::Published;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// Calendar day (UTC) the post is published on.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical path of the detail page: `/{year}/{month}/{day}/{slug}/`.
    pub fn absolute_path(&self) -> String {
        let date = self.publish_date();
        format!(
            "/{}/{}/{}/{}/",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }

    /// Whether `other` would collide with this post on the per-day slug key.
    pub fn conflicts_with(&self, other: &Post) -> bool {
        self.id != other.id
            && self.slug == other.slug
            && self.publish_date() == other.publish_date()
    }
}

/// Composite lookup key of a post: the UTC publish date and the slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSlugKey {
    pub date: NaiveDate,
    pub slug: String,
}

impl DateSlugKey {
    /// Build a key from URL components. Returns `None` for impossible dates.
    pub fn new(year: i32, month: u32, day: u32, slug: impl Into<String>) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            date,
            slug: slug.into(),
        })
    }

    /// Half-open `[start, end)` range of publish timestamps on this day.
    pub fn day_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.date.and_time(NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_days(Days::new(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (start, end)
    }

    pub fn matches(&self, post: &Post) -> bool {
        post.slug == self.slug && post.publish_date() == self.date
    }
}

impl std::fmt::Display for DateSlugKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.date, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_on(y: i32, m: u32, d: u32, slug: &str) -> Post {
        Post::new(Uuid::new_v4(), "Title", slug, "Body")
            .unwrap()
            .published_at(Utc.with_ymd_and_hms(y, m, d, 15, 30, 0).unwrap())
    }

    #[test]
    fn new_post_is_draft() {
        let post = Post::new(Uuid::new_v4(), "Hello", "hello", "...").unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert!(!post.is_published());
        assert!(post.publish().is_published());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Post::new(Uuid::new_v4(), "  ", "slug", "").is_err());
        assert!(Post::new(Uuid::new_v4(), "Title", "bad slug", "").is_err());
        assert!(Post::new(Uuid::new_v4(), "x".repeat(MAX_TITLE_LENGTH + 1), "s", "").is_err());
    }

    #[test]
    fn absolute_path_uses_unpadded_date() {
        let post = post_on(2024, 1, 5, "new-year");
        assert_eq!(post.absolute_path(), "/2024/1/5/new-year/");
    }

    #[test]
    fn slug_conflicts_only_on_same_day() {
        let a = post_on(2024, 3, 1, "weekly");
        let b = post_on(2024, 3, 1, "weekly");
        let c = post_on(2024, 3, 8, "weekly");
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        assert!(!a.conflicts_with(&a.clone()));
    }

    #[test]
    fn date_slug_key() {
        let post = post_on(2024, 2, 29, "leap");
        let key = DateSlugKey::new(2024, 2, 29, "leap").unwrap();
        assert!(key.matches(&post));
        assert!(!DateSlugKey::new(2024, 2, 28, "leap").unwrap().matches(&post));
        assert!(!DateSlugKey::new(2024, 2, 29, "other").unwrap().matches(&post));
        assert!(DateSlugKey::new(2023, 2, 29, "leap").is_none());
        assert!(DateSlugKey::new(2024, 13, 1, "leap").is_none());

        let (start, end) = key.day_range();
        assert!(start <= post.publish && post.publish < end);
        assert_eq!(end - start, chrono::Duration::days(1));
    }

    #[test]
    fn status_codes() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
        assert_eq!(PostStatus::Draft.code(), "DF");
        assert_eq!(PostStatus::Published.code(), "PB");
    }
}
