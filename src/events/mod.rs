//! Name-keyed publish/subscribe.

mod broker;

pub use broker::{Event, EventBroker, Subscriber};
