//! Carrying a container to the consumers that need it.
//!
//! Three propagation styles share the same override rule: a subtree gets a
//! snapshot with one binding changed, while ancestors and siblings keep the
//! snapshot they already hold.
//!
//! - [`Scope`]: explicit context passing through a tree of consumers.
//! - [`ambient`]: a container carried by the current tokio task (or a
//!   synchronous call stack).
//! - `extractor` (feature `axum`): the container travels with the request.

pub mod ambient;
#[cfg(feature = "axum")]
mod extractor;
mod scope;

#[cfg(feature = "axum")]
pub use extractor::{Ambient, Dep, HasContainer};
pub use scope::Scope;
