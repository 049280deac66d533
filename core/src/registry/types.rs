use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::registry::resolver::Resolver;

/// Type-erased service instance. Always wraps an `Arc<S>` for the registered service `S`.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type Factory = Arc<dyn Fn(&dyn Resolver) -> Instance + Send + Sync>;

/// **SERVICE KEY**
///
/// **IDENTITY**: abstract service type plus an optional registration name
/// **UNIQUENESS**: none enforced, several registrations may answer one key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    name: Option<String>,
}

impl ServiceKey {
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: std::any::type_name::<S>(),
            name: None,
        }
    }

    pub fn named<S: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::of::<S>()
        }
    }

    pub(crate) fn with_name<S: ?Sized + 'static>(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::named::<S>(name),
            None => Self::of::<S>(),
        }
    }

    pub fn service_type(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}[{}]", self.type_name, name),
            None => f.write_str(self.type_name),
        }
    }
}

/// Lifetime of instances produced through a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectScope {
    /// A new instance on every resolution.
    #[default]
    Transient,
    /// First instance is kept by the registration and shared afterwards.
    Container,
}

/// **REGISTRATION**
///
/// **CONTENT**: factory + key + scope, fixed at creation
/// **CACHE**: only `ObjectScope::Container` registrations fill `cached`, once
pub struct Registration {
    key: ServiceKey,
    scope: ObjectScope,
    factory: Factory,
    cached: OnceCell<Instance>,
}

impl Registration {
    pub fn new<S>(
        name: Option<&str>,
        scope: ObjectScope,
        factory: impl Fn(&dyn Resolver) -> Arc<S> + Send + Sync + 'static,
    ) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        Self {
            key: ServiceKey::with_name::<S>(name),
            scope,
            factory: Arc::new(move |resolver: &dyn Resolver| -> Instance {
                Arc::new(factory(resolver))
            }),
            cached: OnceCell::new(),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    pub fn scope(&self) -> ObjectScope {
        self.scope
    }

    /// Runs the factory against `resolver`, honoring the object scope.
    ///
    /// Callers reject cycles before getting here; a container-scoped factory
    /// re-entering its own `get_or_init` would block forever.
    pub(crate) fn instantiate(&self, resolver: &dyn Resolver) -> Instance {
        match self.scope {
            ObjectScope::Transient => (self.factory)(resolver),
            ObjectScope::Container => self
                .cached
                .get_or_init(|| (self.factory)(resolver))
                .clone(),
        }
    }

    pub(crate) fn info(&self, position: usize) -> RegistrationInfo {
        RegistrationInfo {
            position,
            key: self.key.clone(),
            scope: self.scope,
            instantiated: self.cached.get().is_some(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .field("instantiated", &self.cached.get().is_some())
            .finish_non_exhaustive()
    }
}

/// Read-only snapshot of one registration, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub position: usize,
    pub key: ServiceKey,
    pub scope: ObjectScope,
    pub instantiated: bool,
}
