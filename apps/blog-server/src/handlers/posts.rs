//! Post listing and detail pages.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;

use blog_core::domain::{POSTS_PER_PAGE, PageRequest, Tag};
use blog_core::error::DomainError;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository};
use blog_shared::{CommentForm, FormErrors};

use super::render;
use super::views::{PaginationView, PostView, TagView};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Raw `page` value of the query string. The last one wins when repeated.
fn raw_page(req: &HttpRequest) -> Option<String> {
    web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .ok()?
        .into_inner()
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "page").then_some(value))
}

/// Published posts, newest first.
///
/// GET /
pub async fn post_list(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    render_list(&state, None, raw_page(&req).as_deref()).await
}

/// Published posts carrying one tag.
///
/// GET /tag/{tag_slug}/
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Tag", &slug))?;

    render_list(&state, Some(tag), raw_page(&req).as_deref()).await
}

async fn render_list(
    state: &AppState,
    tag: Option<Tag>,
    raw_page: Option<&str>,
) -> AppResult<HttpResponse> {
    let request = PageRequest::parse(raw_page, POSTS_PER_PAGE);
    let page = state.posts.published_page(tag.as_ref(), &request).await?;

    tracing::debug!(
        tag = tag.as_ref().map(|t| t.slug.as_str()),
        page = page.number,
        num_pages = page.num_pages,
        "Listing posts"
    );

    let pagination = PaginationView::from(&page);
    let posts = PostView::load_all(state, page.items).await?;

    let mut context = Context::new();
    context.insert("posts", &posts);
    context.insert("pagination", &pagination);
    context.insert("tag", &tag.map(TagView::from));
    render(state, "blog/post/list.html", &context)
}

/// One published post with its active comments and an empty comment form.
///
/// GET /{year}/{month}/{day}/{slug}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();

    let post = state
        .posts
        .get_published_by_date_slug(year, month, day, &slug)
        .await
        .map_err(AppError::lookup("Post", format!("{year}/{month}/{day}/{slug}")))?;
    let comments = state.comments.list_active(&post).await?;

    let mut context = Context::new();
    context.insert("post", &PostView::load(&state, post).await?);
    context.insert("comments", &comments);
    context.insert("form", &CommentForm::default());
    context.insert("errors", &FormErrors::default());
    render(&state, "blog/post/detail.html", &context)
}
