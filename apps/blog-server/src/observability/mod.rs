//! Observability module - request IDs for correlating log lines.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};
