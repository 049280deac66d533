use log::debug;

use crate::registry::{Container, Registrar, Resolver};

/// **ASSEMBLY**
///
/// **PURPOSE**: group related registrations so they are applied together
/// **CONTRACT**: `assemble` only appends; the assembly itself is not retained
pub trait Assembly {
    fn assemble(&self, registrar: &dyn Registrar);

    /// Called once the batch this assembly was applied in is complete, so
    /// services registered by sibling assemblies are resolvable.
    fn loaded(&self, _resolver: &dyn Resolver) {}

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// **ASSEMBLER**
///
/// **PURPOSE**: composition root owning one container
/// **HIERARCHY**: a child assembler's container falls back to its parent's
pub struct Assembler {
    container: Container,
}

impl Assembler {
    pub fn new(assemblies: &[&dyn Assembly]) -> Self {
        Self::from_container(Container::new(), assemblies)
    }

    pub fn with_parent(assemblies: &[&dyn Assembly], parent: &Assembler) -> Self {
        Self::from_container(Container::with_parent(&parent.container), assemblies)
    }

    pub fn from_container(container: Container, assemblies: &[&dyn Assembly]) -> Self {
        let assembler = Self { container };
        assembler.apply_all(assemblies);
        assembler
    }

    /// Applies one assembly after construction, then runs its `loaded` hook.
    pub fn apply(&self, assembly: &dyn Assembly) {
        self.apply_all(&[assembly]);
    }

    /// Applies `assemblies` in order; `loaded` hooks run after all of them.
    pub fn apply_all(&self, assemblies: &[&dyn Assembly]) {
        if assemblies.is_empty() {
            return;
        }

        for assembly in assemblies {
            self.container.apply(*assembly);
        }
        for assembly in assemblies {
            assembly.loaded(self.resolver());
        }

        debug!(
            "Assembler for registry {}: applied {} assemblies",
            self.container.id(),
            assemblies.len()
        );
    }

    /// Read-only view handed to consumers.
    pub fn resolver(&self) -> &dyn Resolver {
        self.container.resolver()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }
}
