//! "Email this post" form.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::{MailMessage, Post};
use blog_core::ports::{Mailer, PostRepository};
use blog_shared::{EmailPostForm, FormErrors};

use super::render;
use super::views::PostView;
use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /{post_id}/share/
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    render_share(&state, post, &EmailPostForm::default(), &FormErrors::default(), false).await
}

/// Validate the form and mail the recommendation.
///
/// POST /{post_id}/share/
pub async fn share_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<EmailPostForm>,
    request_id: RequestId,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let form = form.into_inner();

    if let Err(errors) = FormErrors::check(&form) {
        tracing::debug!(post_id = %post.id, ?errors, "Share form rejected");
        return render_share(&state, post, &form, &errors, false).await;
    }

    let post_url = absolute_url(&req, &post.absolute_path());
    let message = MailMessage::recommend_post(
        &post,
        &post_url,
        &form.name,
        &form.comments,
        &state.mail_from,
        &form.to,
    );
    state.mailer.send(message).await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %post.id,
        to = %form.to,
        "Post recommendation sent"
    );

    render_share(&state, post, &form, &FormErrors::default(), true).await
}

async fn published_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .get_published_by_id(id)
        .await
        .map_err(AppError::lookup("Post", id))
}

/// Absolute URL of `path` as seen by the client.
fn absolute_url(req: &HttpRequest, path: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), path)
}

async fn render_share(
    state: &AppState,
    post: Post,
    form: &EmailPostForm,
    errors: &FormErrors,
    sent: bool,
) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("post", &PostView::load(state, post).await?);
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("sent", &sent);
    render(state, "blog/post/share.html", &context)
}
