//! A small dependency-injection container.
//!
//! Services are registered under a [`ServiceKey`] (a type, possibly a trait
//! object, or a name) together with a [`Provider`] deciding whether the
//! instance is shared ([`Singleton`]) or rebuilt per request
//! ([`Transient`]). Instances are handed out as `Arc<T>`.
//!
//! Containers are ordinary values. Code that needs isolated registries
//! creates one container per scope.
//!
//! ```
//! use std::sync::Arc;
//! use amir_dev_studio::di::ServiceContainer;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         42
//!     }
//! }
//!
//! let container = ServiceContainer::new();
//! container
//!     .register_singleton::<dyn Clock, _>(|| Arc::new(FixedClock))
//!     .unwrap();
//!
//! let clock = container.resolve::<dyn Clock>().unwrap();
//! assert_eq!(clock.now(), 42);
//! ```

mod container;
mod key;
mod provider;

pub use container::ServiceContainer;
pub use key::ServiceKey;
pub use provider::{Lifetime, Provider, Singleton, Transient};
