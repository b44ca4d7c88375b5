//! amir_dev_studio: small building blocks for vision tooling.
//!
//! The crate bundles a few independent pieces that applications compose as
//! they see fit:
//!
//! # Modules
//!
//! - [`cv`]: Geometry value types, colors and a mutable [`cv::Image`] with
//!   pixel transforms and eager shape drawing
//! - [`di`]: A dependency-injection container with singleton and transient
//!   providers keyed by type or name
//! - [`events`]: Name-keyed publish/subscribe
//! - [`mutate`]: Copy-then-mutate helper for any `Clone` type
//! - [`number`]: An `f64` wrapper with range and rounding helpers
//! - [`error`]: The crate error type
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod cv;
pub mod di;
pub mod error;
pub mod events;
pub mod mutate;
pub mod number;

pub use error::StudioError;
