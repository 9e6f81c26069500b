//! Domain entities - the core business objects.

mod comment;
mod mail;
mod pagination;
mod post;
mod slug;
mod tag;
mod user;

pub use comment::{Comment, NewComment};
pub use mail::MailMessage;
pub use pagination::{POSTS_PER_PAGE, Page, PageRequest};
pub use post::{DateSlugKey, MAX_TITLE_LENGTH, Post, PostStatus};
pub use slug::{MAX_SLUG_LENGTH, is_valid_slug, slugify};
pub use tag::Tag;
pub use user::User;
