//! Providers produce service instances on behalf of the container.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// Whether a provider reuses its instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    Singleton,
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Singleton => f.write_str("singleton"),
            Lifetime::Transient => f.write_str("transient"),
        }
    }
}

/// Type-erased source of service instances.
///
/// [`provide`](Provider::provide) returns a boxed `Arc<T>` where `T` is the
/// service type named by [`service_type`](Provider::service_type).
pub trait Provider: Send + Sync {
    fn lifetime(&self) -> Lifetime;

    fn service_type(&self) -> &'static str;

    fn provide(&self) -> Box<dyn Any + Send + Sync>;
}

/// Builds its instance on first use and hands out that same instance after.
///
/// The factory runs at most once, even when several threads ask for the
/// instance at the same time. A factory must not resolve its own service.
pub struct Singleton<T: ?Sized> {
    factory: Box<dyn Fn() -> Arc<T> + Send + Sync>,
    instance: Mutex<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Singleton<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: Mutex::new(None),
        }
    }

    /// A singleton around an instance that already exists.
    pub fn from_instance(instance: Arc<T>) -> Self {
        let cached = Arc::clone(&instance);
        Self {
            factory: Box::new(move || Arc::clone(&instance)),
            instance: Mutex::new(Some(cached)),
        }
    }

    pub fn get(&self) -> Arc<T> {
        let mut slot = self.instance.lock();
        match slot.as_ref() {
            Some(instance) => Arc::clone(instance),
            None => {
                let instance = (self.factory)();
                *slot = Some(Arc::clone(&instance));
                instance
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.lock().is_some()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Provider for Singleton<T> {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }

    fn service_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn provide(&self) -> Box<dyn Any + Send + Sync> {
        Box::new(self.get())
    }
}

/// Builds a fresh instance on every request.
///
/// Construction is serialized through a lock; the instances themselves are
/// independent.
pub struct Transient<T: ?Sized> {
    factory: Box<dyn Fn() -> Arc<T> + Send + Sync>,
    lock: Mutex<()>,
}

impl<T: ?Sized + Send + Sync + 'static> Transient<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            lock: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Arc<T> {
        let _guard = self.lock.lock();
        (self.factory)()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Provider for Transient<T> {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }

    fn service_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn provide(&self) -> Box<dyn Any + Send + Sync> {
        Box::new(self.get())
    }
}
