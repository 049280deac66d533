use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use log::{debug, trace, warn};
use parking_lot::RwLock;

use crate::assembly::Assembly;
use crate::errors::RegistryError;
use crate::registry::resolver::{Registrar, Resolver};
use crate::registry::types::{Instance, Registration, RegistrationInfo, ServiceKey};

// Registry counter for log correlation
static REGISTRY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Nested resolutions deeper than this abort.
pub const MAX_RESOLUTION_DEPTH: usize = 200;

/// Shared state behind every clone of a [`Container`].
struct Registry {
    id: u64,
    registrations: RwLock<Vec<Arc<Registration>>>,
    parent: Option<Weak<Registry>>,
}

impl Registry {
    fn new(parent: Option<Weak<Registry>>) -> Self {
        Self {
            id: REGISTRY_COUNTER.fetch_add(1, Ordering::SeqCst),
            registrations: RwLock::new(Vec::new()),
            parent,
        }
    }

    /// Last local registration for `key`. The read lock is released on return.
    fn lookup(&self, key: &ServiceKey) -> Option<Arc<Registration>> {
        self.registrations
            .read()
            .iter()
            .rev()
            .find(|registration| registration.key() == key)
            .cloned()
    }

    /// Last registration for `key` here, else in the nearest ancestor that has one.
    fn find(&self, key: &ServiceKey) -> Option<Arc<Registration>> {
        if let Some(registration) = self.lookup(key) {
            return Some(registration);
        }

        let mut child_id = self.id;
        let mut link = self.parent.clone();
        while let Some(weak) = link {
            let Some(parent) = weak.upgrade() else {
                warn!(
                    "Registry {}: parent dropped, {} resolves to nothing",
                    child_id, key
                );
                return None;
            };
            trace!(
                "Registry {}: {} not registered locally, asking parent {}",
                child_id,
                key,
                parent.id
            );
            if let Some(registration) = parent.lookup(key) {
                return Some(registration);
            }
            child_id = parent.id;
            link = parent.parent.clone();
        }
        None
    }

    /// **RESOLVE FROM THIS REGISTRY**
    ///
    /// **ORIGIN**: the factory always receives a resolver bound to `self`,
    /// even when the registration was found in an ancestor
    /// **PANICS**: on a circular dependency or past [`MAX_RESOLUTION_DEPTH`]
    fn resolve(&self, key: &ServiceKey, outer: Option<&Resolution<'_>>) -> Option<Instance> {
        let depth = match outer {
            Some(outer) => {
                outer.check(key);
                outer.depth + 1
            }
            None => 0,
        };

        let registration = self.find(key)?;
        trace!("Registry {}: resolving {} at depth {}", self.id, key, depth);
        let frame = Resolution {
            origin: self,
            key,
            depth,
            outer,
        };
        Some(registration.instantiate(&frame))
    }
}

/// Resolver handed to a running factory: the registry the resolution started
/// in plus the keys currently under construction.
struct Resolution<'a> {
    origin: &'a Registry,
    key: &'a ServiceKey,
    depth: usize,
    outer: Option<&'a Resolution<'a>>,
}

impl Resolution<'_> {
    fn check(&self, key: &ServiceKey) {
        if self.depth + 1 >= MAX_RESOLUTION_DEPTH {
            panic!("{}", RegistryError::depth_exceeded(key, MAX_RESOLUTION_DEPTH));
        }

        let mut frame = Some(self);
        while let Some(current) = frame {
            if current.key == key {
                panic!("{}", RegistryError::circular(&self.path(key)));
            }
            frame = current.outer;
        }
    }

    /// `first -> ... -> key`, outermost first.
    fn path(&self, key: &ServiceKey) -> String {
        let mut keys = vec![key.to_string()];
        let mut frame = Some(self);
        while let Some(current) = frame {
            keys.push(current.key.to_string());
            frame = current.outer;
        }
        keys.reverse();
        keys.join(" -> ")
    }
}

impl Resolver for Resolution<'_> {
    fn resolve_instance(&self, key: &ServiceKey) -> Option<Instance> {
        self.origin.resolve(key, Some(self))
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        debug!(
            "Dropping registry {} with {} registrations",
            self.id,
            self.registrations.get_mut().len()
        );
    }
}

/// **SERVICE CONTAINER**
///
/// **PURPOSE**: ordered registrations with optional parent fallback
/// **SHARING**: clones (and [`Container::synchronize`]) share one registry
/// **THREADING**: registration and resolution may run from any thread; a
/// registration racing a resolution is either fully visible or not at all
#[derive(Clone)]
pub struct Container {
    registry: Arc<Registry>,
}

impl Container {
    /// Empty root container.
    pub fn new() -> Self {
        let container = Self {
            registry: Arc::new(Registry::new(None)),
        };
        debug!("Created root registry {}", container.id());
        container
    }

    /// Empty child container. The parent is held weakly and fixed for life.
    pub fn with_parent(parent: &Container) -> Self {
        let container = Self {
            registry: Arc::new(Registry::new(Some(Arc::downgrade(&parent.registry)))),
        };
        debug!(
            "Created registry {} with parent {}",
            container.id(),
            parent.id()
        );
        container
    }

    pub fn id(&self) -> u64 {
        self.registry.id
    }

    /// Parent container, if one was given and it is still alive.
    pub fn parent(&self) -> Option<Container> {
        self.registry
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|registry| Container { registry })
    }

    /// Thread-safe view of this container: the container itself.
    pub fn synchronize(&self) -> Container {
        self.clone()
    }

    /// True when both handles point at the same registry.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }

    /// Narrow read-only capability of this container.
    pub fn resolver(&self) -> &dyn Resolver {
        self
    }

    /// **APPLY ASSEMBLY**
    ///
    /// Runs `assembly.assemble` against this container. Applying the same
    /// assembly twice registers everything twice.
    pub fn apply(&self, assembly: &dyn Assembly) {
        let before = self.len();
        assembly.assemble(self);
        debug!(
            "Registry {}: assembly {} added {} registrations",
            self.id(),
            assembly.name(),
            self.len().saturating_sub(before)
        );
    }

    /// Number of local registrations, duplicates included.
    pub fn len(&self) -> usize {
        self.registry.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id())
            .field("registrations", &self.len())
            .field("parent", &self.parent().map(|parent| parent.id()))
            .finish()
    }
}

impl Resolver for Container {
    fn resolve_instance(&self, key: &ServiceKey) -> Option<Instance> {
        self.registry.resolve(key, None)
    }
}

impl Registrar for Container {
    fn add_registration(&self, registration: Registration) {
        trace!(
            "Registry {}: registering {} ({:?})",
            self.id(),
            registration.key(),
            registration.scope()
        );
        self.registry.registrations.write().push(Arc::new(registration));
    }

    fn registrations(&self) -> Vec<RegistrationInfo> {
        self.registry
            .registrations
            .read()
            .iter()
            .enumerate()
            .map(|(position, registration)| registration.info(position))
            .collect()
    }
}
