use std::any::{type_name, TypeId};
use std::fmt;

/// What a service is registered under: its type or a free-form name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    Type { id: TypeId, name: &'static str },
    Name(String),
}

impl ServiceKey {
    /// The key for service type `T`, which may be a trait object.
    pub fn of<T: ?Sized + 'static>() -> Self {
        ServiceKey::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        ServiceKey::Name(name.into())
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Type { name, .. } => write!(f, "ServiceKey::Type({})", name),
            ServiceKey::Name(name) => write!(f, "ServiceKey::Name({:?})", name),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Type { name, .. } => f.write_str(name),
            ServiceKey::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl From<&str> for ServiceKey {
    fn from(name: &str) -> Self {
        ServiceKey::named(name)
    }
}

impl From<String> for ServiceKey {
    fn from(name: String) -> Self {
        ServiceKey::Name(name)
    }
}
