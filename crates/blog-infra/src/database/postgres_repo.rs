//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use blog_core::domain::{Comment, DateSlugKey, NewComment, Page, PageRequest, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity, Status};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::Entity as UserEntity;
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

impl UserRepository for PostgresUserRepository {}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL post store.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Published posts, newest first, optionally restricted to one tag.
    fn published(tag: Option<&Tag>) -> Select<PostEntity> {
        let query = PostEntity::find().filter(post::Column::Status.eq(Status::Published));

        let query = match tag {
            Some(tag) => query
                .join(JoinType::InnerJoin, post::Relation::PostTag.def())
                .filter(post_tag::Column::TagId.eq(tag.id)),
            None => query,
        };

        query.order_by_desc(post::Column::Publish)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let key = DateSlugKey {
            date: post.publish_date(),
            slug: post.slug.clone(),
        };
        let (start, end) = key.day_range();

        let clash = PostEntity::find()
            .filter(post::Column::Slug.eq(post.slug.as_str()))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end))
            .filter(post::Column::Id.ne(post.id))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        if clash.is_some() {
            return Err(RepoError::Constraint(format!(
                "slug already used on this publish date: {key}"
            )));
        }

        post.updated_at = Utc::now();
        let mut active = post::ActiveModel::from(post);
        // `created_at` is only written on insert
        let created_at = active.created_at.take();

        let model = match active.clone().update(&self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => {
                if let Some(created_at) = created_at {
                    active.created_at = Set(created_at);
                }
                active.insert(&self.db).await.map_err(write_error)?
            }
            Err(e) => return Err(write_error(e)),
        };

        tracing::debug!(post_id = %model.id, slug = %model.slug, "Post saved");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn list_published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, RepoError> {
        let result = Self::published(tag)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn published_page(
        &self,
        tag: Option<&Tag>,
        request: &PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = Self::published(tag).paginate(&self.db, request.per_page());

        let total_items = paginator.num_items().await.map_err(query_error)?;
        let num_pages = request.num_pages(total_items);
        let number = request.resolve(num_pages);

        let items = paginator
            .fetch_page(number - 1)
            .await
            .map_err(query_error)?;

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
            number,
            num_pages,
            total_items,
            per_page: request.per_page(),
        })
    }

    async fn get_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, RepoError> {
        let key = DateSlugKey::new(year, month, day, slug).ok_or(RepoError::NotFound)?;
        let (start, end) = key.day_range();

        let mut found = Self::published(None)
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end))
            .limit(2)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if found.len() != 1 {
            tracing::debug!(key = %key, matches = found.len(), "No unique post for date and slug");
            return Err(RepoError::NotFound);
        }

        Ok(found.remove(0).into())
    }

    async fn get_published_by_id(&self, id: Uuid) -> Result<Post, RepoError> {
        PostEntity::find_by_id(id)
            .filter(post::Column::Status.eq(Status::Published))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn set_tags(&self, post_id: Uuid, tags: &[Tag]) -> Result<(), RepoError> {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if tags.is_empty() {
            return Ok(());
        }

        let rows = tags.iter().map(|tag| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag.id),
        });

        PostTagEntity::insert_many(rows)
            .exec_without_returning(&self.db)
            .await
            .map_err(write_error)?;

        Ok(())
    }

    async fn tags_for(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTag.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL comment store.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_active(&self, post: &Post) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post.id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn append(&self, post: &Post, fields: NewComment) -> Result<Comment, RepoError> {
        let comment = Comment::new(post.id, fields);
        let model = comment::ActiveModel::from(comment)
            .insert(&self.db)
            .await
            .map_err(write_error)?;

        tracing::info!(post_id = %post.id, comment_id = %model.id, "Comment added");
        Ok(model.into())
    }
}
