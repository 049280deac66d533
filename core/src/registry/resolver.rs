use std::sync::Arc;

use log::error;

use crate::errors::RegistryError;
use crate::registry::types::{Instance, ObjectScope, Registration, RegistrationInfo, ServiceKey};

/// **RESOLVER CAPABILITY**
///
/// **PURPOSE**: read-only view of a registry, handed to factories and consumers
/// **CONTRACT**: last matching local registration wins, then the parent chain
pub trait Resolver: Send + Sync {
    fn resolve_instance(&self, key: &ServiceKey) -> Option<Instance>;
}

/// **REGISTRAR CAPABILITY**
///
/// **PURPOSE**: read/write view of a registry, handed to assemblies
pub trait Registrar: Resolver {
    /// Appends a registration. Existing registrations for the same key stay.
    fn add_registration(&self, registration: Registration);

    /// Every local registration in insertion order, duplicates included.
    fn registrations(&self) -> Vec<RegistrationInfo>;
}

fn downcast<S>(key: &ServiceKey, instance: Instance) -> Option<Arc<S>>
where
    S: ?Sized + Send + Sync + 'static,
{
    match instance.downcast::<Arc<S>>() {
        Ok(service) => Some(Arc::clone(&*service)),
        Err(_) => {
            error!("Instance produced for {} has an unexpected type", key);
            None
        }
    }
}

/// Typed accessors available on every [`Resolver`], trait objects included.
pub trait ResolverExt: Resolver {
    fn resolve_key<S>(&self, key: &ServiceKey) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_instance(key)?;
        downcast::<S>(key, instance)
    }

    /// Optional resolution: `None` when nothing in the chain answers `S`.
    fn resolve<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&ServiceKey::of::<S>())
    }

    fn resolve_named<S>(&self, name: &str) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&ServiceKey::named::<S>(name))
    }

    fn require<S>(&self) -> Result<Arc<S>, RegistryError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<S>()
            .ok_or_else(|| RegistryError::unregistered(std::any::type_name::<S>(), None))
    }

    fn require_named<S>(&self, name: &str) -> Result<Arc<S>, RegistryError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolve_named::<S>(name)
            .ok_or_else(|| RegistryError::unregistered(std::any::type_name::<S>(), Some(name)))
    }

    /// **RESOLVE OR ABORT**
    ///
    /// **PANICS**: when `S` is not registered anywhere in the chain. A missing
    /// mandatory dependency is a wiring mistake, not a runtime condition.
    fn resolve_or_abort<S>(&self) -> Arc<S>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        match self.require::<S>() {
            Ok(service) => service,
            Err(err) => panic!("{err}"),
        }
    }

    /// Named variant of [`ResolverExt::resolve_or_abort`].
    fn resolve_named_or_abort<S>(&self, name: &str) -> Arc<S>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        match self.require_named::<S>(name) {
            Ok(service) => service,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

/// Typed registration helpers available on every [`Registrar`].
pub trait RegistrarExt: Registrar {
    fn register<S>(&self, factory: impl Fn(&dyn Resolver) -> Arc<S> + Send + Sync + 'static)
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.add_registration(Registration::new::<S>(None, ObjectScope::Transient, factory));
    }

    fn register_named<S>(
        &self,
        name: &str,
        factory: impl Fn(&dyn Resolver) -> Arc<S> + Send + Sync + 'static,
    ) where
        S: ?Sized + Send + Sync + 'static,
    {
        self.add_registration(Registration::new::<S>(
            Some(name),
            ObjectScope::Transient,
            factory,
        ));
    }

    fn register_in_scope<S>(
        &self,
        name: Option<&str>,
        scope: ObjectScope,
        factory: impl Fn(&dyn Resolver) -> Arc<S> + Send + Sync + 'static,
    ) where
        S: ?Sized + Send + Sync + 'static,
    {
        self.add_registration(Registration::new::<S>(name, scope, factory));
    }
}

impl<R: Registrar + ?Sized> RegistrarExt for R {}
