//! # Blog Shared
//!
//! Types exchanged over HTTP: submitted forms with their validation rules,
//! and the problem-details body used for error responses.

pub mod forms;
pub mod response;

pub use forms::{CommentForm, EmailPostForm, FormErrors};
pub use response::ErrorResponse;
