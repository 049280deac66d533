use std::sync::Arc;

use log::{debug, info};
use registry_core::{
    Assembler, Assembly, ObjectScope, Registrar, RegistrarExt, Resolver, ResolverExt,
};

use crate::api::{Api, FixtureApi};
use crate::config::DemoConfig;
use crate::errors::DemoError;
use crate::fetcher::{DogFetcher, FetchesDogs};
use crate::swipe::{SwipeController, DEFAULT_PAGE_SIZE};

/// Registers the demo configuration as a shared instance.
pub struct ConfigAssembly {
    config: DemoConfig,
}

impl ConfigAssembly {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Assembly for ConfigAssembly {
    fn assemble(&self, registrar: &dyn Registrar) {
        let config = self.config.clone();
        registrar.register_in_scope::<DemoConfig>(None, ObjectScope::Container, move |_| {
            Arc::new(config.clone())
        });
    }
}

/// Registers one API instance under both its concrete type and `dyn Api`.
pub struct ApiAssembly {
    api: Arc<FixtureApi>,
}

impl ApiAssembly {
    pub fn new(api: Arc<FixtureApi>) -> Self {
        Self { api }
    }
}

impl Assembly for ApiAssembly {
    fn assemble(&self, registrar: &dyn Registrar) {
        let api = Arc::clone(&self.api);
        registrar.register::<FixtureApi>(move |_| Arc::clone(&api));
        let api: Arc<dyn Api> = self.api.clone();
        registrar.register::<dyn Api>(move |_| Arc::clone(&api));
    }
}

/// **DOG ASSEMBLY**
///
/// **SERVICES**: `SwipeController`, `dyn FetchesDogs`
/// **REQUIRES**: `dyn Api`; `DemoConfig` is optional
pub struct DogAssembly;

impl Assembly for DogAssembly {
    fn assemble(&self, registrar: &dyn Registrar) {
        registrar.register::<SwipeController>(|resolver| {
            let page_size = resolver
                .resolve::<DemoConfig>()
                .map_or(DEFAULT_PAGE_SIZE, |config| config.profile_count);
            Arc::new(SwipeController::with_page_size(
                resolver.resolve_or_abort::<dyn FetchesDogs>(),
                page_size,
            ))
        });
        registrar.register::<dyn FetchesDogs>(|resolver| {
            Arc::new(DogFetcher::new(resolver.resolve_or_abort::<dyn Api>()))
        });
    }

    fn loaded(&self, resolver: &dyn Resolver) {
        let api_ready = resolver.resolve::<dyn Api>().is_some();
        debug!("Dog assembly loaded, api registered: {}", api_ready);
    }
}

/// **COMPOSITION ROOT**
///
/// **PURPOSE**: owns the one container of the demo; built in `main` and
/// passed down, never reachable through a global
pub struct DogAssembler {
    assembler: Assembler,
}

impl DogAssembler {
    pub fn new(config: DemoConfig) -> Result<Self, DemoError> {
        Self::with_overrides(config, &[])
    }

    /// Builds the standard wiring, then applies `overrides` so their
    /// registrations win over the standard ones.
    pub fn with_overrides(
        config: DemoConfig,
        overrides: &[&dyn Assembly],
    ) -> Result<Self, DemoError> {
        let api = Arc::new(FixtureApi::from_json(&config.fixture_json()?)?);
        let assembler = Assembler::new(&[
            &ConfigAssembly::new(config),
            &ApiAssembly::new(api),
            &DogAssembly,
        ]);
        assembler.apply_all(overrides);
        info!(
            "Dog assembler ready with {} registrations",
            assembler.container().len()
        );
        Ok(Self { assembler })
    }

    /// Read-only resolver over the shared container.
    pub fn resolver(&self) -> &dyn Resolver {
        self.assembler.resolver()
    }

    pub fn resolve<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolver().resolve::<S>()
    }

    pub fn apply(&self, assembly: &dyn Assembly) {
        self.assembler.apply(assembly);
    }

    pub fn swipe_controller(&self) -> Result<Arc<SwipeController>, DemoError> {
        Ok(self.resolver().require::<SwipeController>()?)
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }
}
