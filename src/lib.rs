//! # Ambit
//!
//! A typed dependency container with default fallback and scoped overrides.
//!
//! Each dependency is declared as a key type that fixes the value type and a
//! default. A [`Container`] maps keys to values and never fails a lookup: an
//! unbound key resolves to its default. Containers are cheap snapshots, so a
//! subtree of consumers can be handed a copy with one binding replaced
//! (typically a test double) while the rest of the tree keeps the original.
//!
//! ## Features
//!
//! - **Type-keyed bindings**: key identity is the key's `TypeId`; the value
//!   type is fixed by the key, so mismatched writes do not compile
//! - **Memoized defaults**: each key's default is built once per process
//! - **Copy-on-write snapshots**: clones are O(1) and isolated from later writes
//! - **Scoped overrides**: through a [`Scope`] tree, the ambient task-local
//!   container, or nested axum routers
//! - **Derives**: `#[derive(DependencyKey)]` and `#[derive(Injectable)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use ambit::{Container, DependencyKey, Injectable, Scope};
//! use std::sync::Arc;
//!
//! pub trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct SystemClock;
//! struct FrozenClock(u64);
//!
//! impl Clock for SystemClock {
//!     fn now(&self) -> u64 { 1_700_000_000 }
//! }
//!
//! impl Clock for FrozenClock {
//!     fn now(&self) -> u64 { self.0 }
//! }
//!
//! fn system_clock() -> Arc<dyn Clock> {
//!     Arc::new(SystemClock)
//! }
//!
//! // 1. Declare a key
//! #[derive(DependencyKey)]
//! #[key(value = "Arc<dyn Clock>", default = "system_clock")]
//! pub struct ClockKey;
//!
//! // 2. Declare a consumer
//! #[derive(Injectable)]
//! pub struct Scheduler {
//!     #[inject(ClockKey)]
//!     clock: Arc<dyn Clock>,
//! }
//!
//! // 3. Override the clock for one subtree and attach consumers
//! let root = Scope::root(Container::new());
//! let tests = root.with_override::<ClockKey>(Arc::new(FrozenClock(42)));
//!
//! let mut live = Scheduler { clock: system_clock() };
//! let mut frozen = Scheduler { clock: system_clock() };
//! root.attach(&mut live);
//! tests.attach(&mut frozen);
//!
//! assert_eq!(live.clock.now(), 1_700_000_000);
//! assert_eq!(frozen.clock.now(), 42);
//! ```
//!
//! ```rust
//! use ambit::{Container, DependencyKey, Scope};
//!
//! #[derive(DependencyKey)]
//! #[key(value = "String")]
//! pub struct GreetingKey;
//!
//! let root = Scope::root(Container::new().with::<GreetingKey>("hi".to_string()));
//! let quiet = root.with_override::<GreetingKey>(String::new());
//!
//! assert_eq!(root.container().get::<GreetingKey>(), "hi");
//! assert_eq!(quiet.container().get::<GreetingKey>(), "");
//! ```

extern crate self as ambit;

pub mod config;
pub mod di;
pub mod env;
pub mod error;

// Re-export core types
pub use config::{ConfigSource, EnvKey};
pub use di::{Container, ContainerBuilder, DependencyKey, Injectable, default_of};
pub use env::{Scope, ambient};
#[cfg(feature = "axum")]
pub use env::{Ambient, Dep, HasContainer};
pub use error::{AmbitError, Result};

// Re-export macros
pub use ambit_macro::{DependencyKey, Injectable};

/// Prelude module for convenient imports
///
/// ```
/// use ambit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigSource, EnvKey};
    pub use crate::di::{Container, ContainerBuilder, DependencyKey, Injectable};
    pub use crate::env::{Scope, ambient};
    #[cfg(feature = "axum")]
    pub use crate::env::{Ambient, Dep, HasContainer};
    pub use crate::error::{AmbitError, Result};
    pub use ambit_macro::{DependencyKey, Injectable};
    pub use std::sync::Arc;
}
