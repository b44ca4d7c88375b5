use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::key::ServiceKey;
use super::provider::{Lifetime, Provider, Singleton, Transient};
use crate::error::StudioError;

/// A registry of service providers.
///
/// Each key is registered at most once. Lookups clone the provider out of
/// the registry before building the instance, so factories may resolve
/// other services from the same container.
#[derive(Default)]
pub struct ServiceContainer {
    providers: RwLock<HashMap<ServiceKey, Arc<dyn Provider>>>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under `key`.
    ///
    /// # Errors
    /// [`StudioError::DuplicateRegistration`] if the key is taken; the
    /// existing provider is kept.
    pub fn register<P>(&self, key: ServiceKey, provider: P) -> Result<(), StudioError>
    where
        P: Provider + 'static,
    {
        let mut providers = self.providers.write();
        if providers.contains_key(&key) {
            return Err(StudioError::DuplicateRegistration {
                key: key.to_string(),
            });
        }

        info!(
            %key,
            lifetime = %provider.lifetime(),
            service = provider.service_type(),
            "registered service"
        );
        providers.insert(key, Arc::new(provider));
        Ok(())
    }

    /// Registers a singleton for service type `T`.
    ///
    /// `T` may be a trait object: `register_singleton::<dyn Store, _>(||
    /// Arc::new(MemoryStore::default()))` binds the abstraction to a
    /// concrete implementation.
    pub fn register_singleton<T, F>(&self, factory: F) -> Result<(), StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.register(ServiceKey::of::<T>(), Singleton::new(factory))
    }

    pub fn register_transient<T, F>(&self, factory: F) -> Result<(), StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.register(ServiceKey::of::<T>(), Transient::new(factory))
    }

    /// Registers an already built instance as the singleton for `T`.
    pub fn register_instance<T>(&self, instance: Arc<T>) -> Result<(), StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register(ServiceKey::of::<T>(), Singleton::from_instance(instance))
    }

    pub fn register_named_singleton<T, F>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.register(ServiceKey::named(name), Singleton::new(factory))
    }

    pub fn register_named_transient<T, F>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.register(ServiceKey::named(name), Transient::new(factory))
    }

    fn provider(&self, key: &ServiceKey) -> Option<Arc<dyn Provider>> {
        self.providers.read().get(key).cloned()
    }

    fn resolve_key<T>(&self, key: &ServiceKey) -> Result<Arc<T>, StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let provider = self.provider(key).ok_or_else(|| StudioError::NotFound {
            key: key.to_string(),
        })?;

        debug!(%key, lifetime = %provider.lifetime(), "resolving service");
        provider
            .provide()
            .downcast::<Arc<T>>()
            .map(|instance| *instance)
            .map_err(|_| StudioError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Resolves the service registered for type `T`.
    pub fn resolve<T>(&self) -> Result<Arc<T>, StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&ServiceKey::of::<T>())
    }

    /// Resolves the service for `T`, or returns `default` when none is registered.
    pub fn resolve_or<T>(&self, default: Arc<T>) -> Arc<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>().unwrap_or(default)
    }

    /// Resolves a named service as type `T`.
    ///
    /// # Errors
    /// [`StudioError::NotFound`] for an unknown name,
    /// [`StudioError::TypeMismatch`] if the name holds another type.
    pub fn resolve_named<T>(&self, name: &str) -> Result<Arc<T>, StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&ServiceKey::named(name))
    }

    /// Like [`resolve_named`](Self::resolve_named), but an unknown name
    /// yields `default`. A type mismatch is still an error.
    pub fn resolve_named_or<T>(&self, name: &str, default: Arc<T>) -> Result<Arc<T>, StudioError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.resolve_named::<T>(name) {
            Err(StudioError::NotFound { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.providers.read().contains_key(key)
    }

    pub fn lifetime_of(&self, key: &ServiceKey) -> Option<Lifetime> {
        self.providers.read().get(key).map(|p| p.lifetime())
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers = self.providers.read();
        let mut keys: Vec<String> = providers.keys().map(|k| k.to_string()).collect();
        keys.sort();
        f.debug_struct("ServiceContainer").field("keys", &keys).finish()
    }
}
