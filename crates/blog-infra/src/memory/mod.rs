//! In-memory storage - fallback when no database is configured.
//!
//! Works within a single process only.

mod repositories;
mod store;

pub use repositories::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository,
    InMemoryUserRepository,
};
pub use store::MemoryDatabase;

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{
        NewComment, POSTS_PER_PAGE, Page, PageRequest, Post, PostStatus, Tag, User,
    };
    use blog_core::error::RepoError;
    use blog_core::ports::{BaseRepository, CommentRepository, PostRepository};
    use chrono::{Duration, TimeZone, Utc};

    struct Fixture {
        users: InMemoryUserRepository,
        tags: InMemoryTagRepository,
        posts: InMemoryPostRepository,
        comments: InMemoryCommentRepository,
        author: User,
    }

    async fn fixture() -> Fixture {
        let db = MemoryDatabase::new();
        let users = InMemoryUserRepository::new(db.clone());
        let author = users.save(User::new("admin", "admin@example.com")).await.unwrap();

        Fixture {
            users,
            tags: InMemoryTagRepository::new(db.clone()),
            posts: InMemoryPostRepository::new(db.clone()),
            comments: InMemoryCommentRepository::new(db),
            author,
        }
    }

    fn post(author: &User, slug: &str, day: u32, status: PostStatus) -> Post {
        let mut post = Post::new(author.id, slug.to_uppercase(), slug, "Body")
            .unwrap()
            .published_at(Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap());
        post.status = status;
        post
    }

    fn comment(name: &str) -> NewComment {
        NewComment {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            body: "Nice post".to_string(),
        }
    }

    #[tokio::test]
    async fn drafts_are_never_listed() {
        let f = fixture().await;
        f.posts.save(post(&f.author, "one", 1, PostStatus::Published)).await.unwrap();
        let draft = f.posts.save(post(&f.author, "two", 2, PostStatus::Draft)).await.unwrap();

        let listed = f.posts.list_published(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|p| p.status == PostStatus::Published));

        assert!(matches!(
            f.posts.get_published_by_id(draft.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            f.posts.get_published_by_date_slug(2024, 3, 2, "two").await,
            Err(RepoError::NotFound)
        ));
        assert!(f.posts.find_by_id(draft.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let f = fixture().await;
        for (slug, day) in [("b", 2), ("c", 3), ("a", 1)] {
            f.posts.save(post(&f.author, slug, day, PostStatus::Published)).await.unwrap();
        }

        let slugs: Vec<String> = f
            .posts
            .list_published(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn tag_filter() {
        let f = fixture().await;
        let jazz = f.tags.save(Tag::new("Jazz")).await.unwrap();
        let music = f.tags.save(Tag::new("Music")).await.unwrap();

        let tagged = f.posts.save(post(&f.author, "tagged", 1, PostStatus::Published)).await.unwrap();
        f.posts.save(post(&f.author, "plain", 2, PostStatus::Published)).await.unwrap();
        f.posts.set_tags(tagged.id, &[music.clone(), jazz.clone()]).await.unwrap();

        let listed = f.posts.list_published(Some(&jazz)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, tagged.id);

        let names: Vec<String> = f
            .posts
            .tags_for(tagged.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Jazz", "Music"]);

        f.posts.set_tags(tagged.id, &[]).await.unwrap();
        assert!(f.posts.list_published(Some(&jazz)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn date_slug_lookup() {
        let f = fixture().await;
        let saved = f.posts.save(post(&f.author, "hello", 5, PostStatus::Published)).await.unwrap();

        let found = f.posts.get_published_by_date_slug(2024, 3, 5, "hello").await.unwrap();
        assert_eq!(found.id, saved.id);

        for (y, m, d, slug) in [
            (2023, 3, 5, "hello"),
            (2024, 4, 5, "hello"),
            (2024, 3, 6, "hello"),
            (2024, 3, 5, "other"),
            (2024, 3, 32, "hello"),
        ] {
            assert!(matches!(
                f.posts.get_published_by_date_slug(y, m, d, slug).await,
                Err(RepoError::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn slug_unique_per_publish_date() {
        let f = fixture().await;
        f.posts.save(post(&f.author, "weekly", 1, PostStatus::Published)).await.unwrap();

        let same_day = f.posts.save(post(&f.author, "weekly", 1, PostStatus::Draft)).await;
        assert!(matches!(same_day, Err(RepoError::Constraint(_))));

        let next_week = f.posts.save(post(&f.author, "weekly", 8, PostStatus::Published)).await;
        assert!(next_week.is_ok());
    }

    #[tokio::test]
    async fn save_updates_in_place() {
        let f = fixture().await;
        let mut saved = f.posts.save(post(&f.author, "edit-me", 1, PostStatus::Draft)).await.unwrap();
        let first_update = saved.updated_at;

        saved.title = "Edited".to_string();
        saved.status = PostStatus::Published;
        let saved = f.posts.save(saved).await.unwrap();

        assert!(saved.updated_at >= first_update);
        let listed = f.posts.list_published(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Edited");
    }

    #[tokio::test]
    async fn save_keeps_created_at() {
        let f = fixture().await;
        let mut saved = f.posts.save(post(&f.author, "dated", 1, PostStatus::Draft)).await.unwrap();
        let created = saved.created_at;

        saved.created_at = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        let resaved = f.posts.save(saved).await.unwrap();
        assert_eq!(resaved.created_at, created);

        let stored = f.posts.find_by_id(resaved.id).await.unwrap().unwrap();
        assert_eq!(stored.created_at, created);
    }

    #[tokio::test]
    async fn pagination_clamps() {
        let f = fixture().await;
        for day in 1..=7 {
            let slug = format!("post-{day}");
            f.posts.save(post(&f.author, &slug, day, PostStatus::Published)).await.unwrap();
        }

        let first = page(&f.posts, "1").await;
        assert_eq!(page(&f.posts, "abc").await, first);
        assert_eq!(first.items.len(), 3);
        assert_eq!(first.items[0].slug, "post-7");

        let last = page(&f.posts, "99").await;
        assert_eq!(last, page(&f.posts, "3").await);
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].slug, "post-1");
    }

    #[tokio::test]
    async fn comments_are_active_and_chronological() {
        let f = fixture().await;
        let post = f.posts.save(post(&f.author, "talk", 1, PostStatus::Published)).await.unwrap();

        let first = f.comments.append(&post, comment("ann")).await.unwrap();
        assert!(first.active);
        f.comments.append(&post, comment("bob")).await.unwrap();

        let listed = f.comments.list_active(&post).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["ann", "bob"]);
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn inactive_comments_are_hidden() {
        let db = MemoryDatabase::new();
        let users = InMemoryUserRepository::new(db.clone());
        let posts = InMemoryPostRepository::new(db.clone());
        let comments = InMemoryCommentRepository::new(db.clone());

        let author = users.save(User::new("admin", "admin@example.com")).await.unwrap();
        let post = posts.save(post(&author, "moderated", 1, PostStatus::Published)).await.unwrap();
        let hidden = comments.append(&post, comment("spam")).await.unwrap();
        comments.append(&post, comment("ann")).await.unwrap();

        {
            let mut tables = db.tables.write().await;
            let row = tables.comments.iter_mut().find(|c| c.id == hidden.id).unwrap();
            row.active = false;
            row.created_at -= Duration::minutes(1);
        }

        let listed = comments.list_active(&post).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "ann");
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_posts_and_comments() {
        let f = fixture().await;
        let post = f.posts.save(post(&f.author, "doomed", 1, PostStatus::Published)).await.unwrap();
        f.comments.append(&post, comment("ann")).await.unwrap();

        let other = f.users.save(User::new("guest", "guest@example.com")).await.unwrap();
        let kept = f.posts.save(post_by(&other, "kept")).await.unwrap();

        f.users.delete(f.author.id).await.unwrap();

        assert!(f.posts.find_by_id(post.id).await.unwrap().is_none());
        assert!(f.comments.list_active(&post).await.unwrap().is_empty());
        assert!(f.posts.find_by_id(kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_post_cascades_to_comments() {
        let f = fixture().await;
        let post = f.posts.save(post(&f.author, "short-lived", 1, PostStatus::Published)).await.unwrap();
        f.comments.append(&post, comment("ann")).await.unwrap();
        f.comments.append(&post, comment("bob")).await.unwrap();

        f.posts.delete(post.id).await.unwrap();

        assert!(f.comments.list_active(&post).await.unwrap().is_empty());
        assert!(matches!(f.posts.delete(post.id).await, Err(RepoError::NotFound)));
        assert!(matches!(
            f.comments.append(&post, comment("late")).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn post_requires_existing_author() {
        let f = fixture().await;
        let stranger = User::new("ghost", "ghost@example.com");
        let result = f.posts.save(post_by(&stranger, "orphan")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    async fn page(posts: &InMemoryPostRepository, raw: &str) -> Page<Post> {
        let request = PageRequest::parse(Some(raw), POSTS_PER_PAGE);
        posts.published_page(None, &request).await.unwrap()
    }

    fn post_by(author: &User, slug: &str) -> Post {
        post(author, slug, 20, PostStatus::Published)
    }
}
