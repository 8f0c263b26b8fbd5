//! # Database module: PostgreSQL access
//!
//! Everything here is gated behind `#[cfg(feature = "server")]` so client (WASM)
//! builds never pull in SQLx or Tokio networking code.
//!
//! - [`get_pool`]: the lazy, process-wide connection pool. The first call reads the
//!   database URL and connection limit from [`crate::settings`] and caches the pool in a
//!   [`tokio::sync::OnceCell`].
//! - [`posts`]: feed, single-post and per-author queries, plus inserts.
//! - [`users`]: user lookups and the OAuth upsert.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
pub mod posts;
#[cfg(feature = "server")]
pub mod users;

#[cfg(feature = "server")]
pub use pool::get_pool;
