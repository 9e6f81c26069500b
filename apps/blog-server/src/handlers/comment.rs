//! Comment submission.

use actix_web::{HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::NewComment;
use blog_core::ports::{CommentRepository, PostRepository};
use blog_shared::{CommentForm, FormErrors};

use super::render;
use super::views::PostView;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Store the comment if the form is valid; the page is rendered either way.
///
/// POST /{post_id}/comment/
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .get_published_by_id(post_id)
        .await
        .map_err(AppError::lookup("Post", post_id))?;
    let form = form.into_inner();

    let (comment, errors) = match FormErrors::check(&form) {
        Ok(()) => {
            let fields = NewComment {
                name: form.name.clone(),
                email: form.email.clone(),
                body: form.body.clone(),
            };
            (Some(state.comments.append(&post, fields).await?), FormErrors::default())
        }
        Err(errors) => {
            tracing::debug!(post_id = %post.id, ?errors, "Comment form rejected");
            (None, errors)
        }
    };

    let mut context = Context::new();
    context.insert("post", &PostView::load(&state, post).await?);
    context.insert("form", &form);
    context.insert("errors", &errors);
    context.insert("comment", &comment);
    render(&state, "blog/post/comment.html", &context)
}
