//! Mail delivery backends.
//!
//! - [`LogMailer`] writes messages to the log (development default)
//! - [`InMemoryMailer`] keeps an outbox for inspection
//! - `HttpMailer` posts messages to a mail relay API (`http-mail` feature)

mod log;
mod memory;

#[cfg(feature = "http-mail")]
mod http;

pub use log::LogMailer;
pub use memory::InMemoryMailer;

#[cfg(feature = "http-mail")]
pub use http::HttpMailer;
