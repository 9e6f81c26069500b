//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the post/comment model, publishing rules and the
//! ports that infrastructure implements. No database or HTTP code lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
