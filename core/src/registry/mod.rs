pub mod container;
pub mod resolver;
pub mod types;

pub use container::{Container, MAX_RESOLUTION_DEPTH};
pub use resolver::{Registrar, RegistrarExt, Resolver, ResolverExt};
pub use types::{Instance, ObjectScope, Registration, RegistrationInfo, ServiceKey};
