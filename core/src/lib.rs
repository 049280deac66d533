//! # REGISTRY CORE LIBRARY
//!
//! **HIERARCHICAL SERVICE REGISTRY FOR DEPENDENCY INJECTION**
//!
//! **ARCHITECTURE**: Containers hold ordered registrations; assemblies group them
//! **GUARANTEE**: Last registration wins; a child falls back to its parent only
//! when it has no registration for the key at all
//! **CAPABILITIES**: `Resolver` (read-only) and `Registrar` (read/write), both
//! implemented by `Container`
//!
//! ```
//! use std::sync::Arc;
//! use registry_core::{Container, RegistrarExt, ResolverExt};
//!
//! let parent = Container::new();
//! parent.register::<String>(|_| Arc::new("parent".to_string()));
//!
//! let child = Container::with_parent(&parent);
//! assert_eq!(*child.resolve::<String>().unwrap(), "parent");
//!
//! child.register::<String>(|_| Arc::new("child".to_string()));
//! assert_eq!(*child.resolve::<String>().unwrap(), "child");
//! assert_eq!(*parent.resolve::<String>().unwrap(), "parent");
//! ```

pub mod assembly;
pub mod errors;
pub mod registry;

pub use assembly::{Assembler, Assembly};
pub use errors::RegistryError;
pub use registry::{
    Container, Instance, ObjectScope, Registrar, RegistrarExt, Registration, RegistrationInfo,
    Resolver, ResolverExt, ServiceKey,
};
