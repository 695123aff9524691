//! # Router Center
//!
//! The single entry point for navigation. A center owns its [`HostRegistry`]
//! and answers every request with a first-match-wins scan in registration
//! order:
//!
//! 1. Walk the registered host routers in order.
//! 2. Ask each one whether it accepts the URI.
//! 3. The first that does wins: its interceptor chain runs, then its action.
//! 4. If none does, the dispatch fails with [`RouteError::TargetNotFound`].
//!
//! Only the scan is locked. The chain and the action run afterwards, outside
//! the lock, on whatever context drives the `dispatch` future. That context is
//! expected to be the one owning navigation state.
//!
//! # Example
//!
//! ```rust,ignore
//! let center = RouterCenter::builder()
//!     .resolver(FactoryTable::new().with("user", || Ok(UserRouter::default())))
//!     .build();
//!
//! center.register(SystemRouter)?;
//! center.register_host("user");
//!
//! center.dispatch(RoutingRequest::new("router://user/profile")).await?;
//! ```

use crate::registry::HostRegistry;
use navhost_core::{
    Chain, DispatchOutcome, HostMatcher, HostResolver, HostRouter, RegistryError, RouteError,
    RoutingRequest, SharedHostRouter, SharedInterceptor, Uri,
};
use tracing::Instrument;

/// Tunables for a [`RouterCenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterConfig {
    /// Warn when more than one host accepts a dispatched URI.
    ///
    /// Defaults to on in debug builds. The first host still wins either way,
    /// but while this is on every dispatch also asks the hosts registered
    /// after the winner whether they accept the URI. Predicates with side
    /// effects therefore see more calls in debug builds than in release.
    pub detect_conflicts: bool,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            detect_conflicts: cfg!(debug_assertions),
        }
    }
}

impl CenterConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the overlapping-host diagnostic on or off.
    pub fn with_conflict_detection(mut self, enabled: bool) -> Self {
        self.detect_conflicts = enabled;
        self
    }
}

/// The dispatch entry point.
pub struct RouterCenter {
    registry: HostRegistry,
    resolver: Option<Box<dyn HostResolver>>,
    config: CenterConfig,
}

impl RouterCenter {
    /// A center with an empty registry, no resolver and default config.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a center.
    pub fn builder() -> RouterCenterBuilder {
        RouterCenterBuilder::default()
    }

    /// The registry this center dispatches over.
    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    /// See [`HostRegistry::register`].
    pub fn register<R: HostRouter>(
        &self,
        router: R,
    ) -> Result<Option<SharedHostRouter>, RegistryError> {
        self.registry.register(router)
    }

    /// See [`HostRegistry::register_shared`].
    pub fn register_shared(
        &self,
        router: SharedHostRouter,
    ) -> Result<Option<SharedHostRouter>, RegistryError> {
        self.registry.register_shared(router)
    }

    /// Register `host` through the configured resolver.
    ///
    /// Returns `false`, without error, when no resolver is configured or the
    /// resolver has nothing for `host`.
    pub fn register_host(&self, host: &str) -> bool {
        match &self.resolver {
            Some(resolver) => self.registry.register_host(host, resolver.as_ref()),
            None => {
                tracing::debug!(%host, "no resolver configured, registration skipped");
                false
            }
        }
    }

    /// See [`HostRegistry::unregister`].
    pub fn unregister(&self, host: &str) -> Option<SharedHostRouter> {
        self.registry.unregister(host)
    }

    /// See [`HostRegistry::unregister_router`].
    pub fn unregister_router<R: HostMatcher + ?Sized>(&self, router: &R) -> Option<SharedHostRouter> {
        self.registry.unregister_router(router)
    }

    /// Whether any registered host accepts `uri`.
    pub fn matches(&self, uri: &Uri) -> bool {
        self.registry
            .scan(|entries| entries.iter().any(|entry| entry.is_match(uri)))
    }

    /// Interceptors the winning host would run for `uri`, or `None` when no
    /// host accepts it.
    pub fn interceptors_for(&self, uri: &Uri) -> Option<Vec<SharedInterceptor>> {
        self.registry.interceptors_for(uri)
    }

    /// Every host accepting `uri`, in the order they would be tried. More than
    /// one entry means all but the first are shadowed.
    pub fn conflicts(&self, uri: &Uri) -> Vec<String> {
        self.registry
            .find_all(uri)
            .iter()
            .map(|router| router.host_name().to_owned())
            .collect()
    }

    /// Route `request` to the first host accepting its URI, run that host's
    /// interceptors and finally its action.
    ///
    /// Must be driven on the context that owns navigation state. Failures are
    /// reported once; nothing is retried.
    pub async fn dispatch(&self, request: RoutingRequest) -> Result<DispatchOutcome, RouteError> {
        let Some(uri) = request.uri().cloned() else {
            tracing::debug!("request without uri cannot match any host");
            return Err(RouteError::TargetNotFound(String::new()));
        };

        let Some(router) = self.select(&uri) else {
            tracing::debug!(%uri, "no host router accepts uri");
            return Err(RouteError::TargetNotFound(uri.to_string()));
        };

        let span = tracing::debug_span!("dispatch", %uri, host = %router.host_name());
        async move {
            let interceptors = router.interceptors(&uri);
            tracing::trace!(interceptors = interceptors.len(), "running interceptor chain");

            let result = Chain::new(router, interceptors).proceed(request).await;
            match &result {
                Ok(outcome) => tracing::debug!(?outcome, "dispatch finished"),
                Err(err) => tracing::debug!(error = %err, "dispatch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    // Snapshot of the winning router; the lock is released on return.
    fn select(&self, uri: &Uri) -> Option<SharedHostRouter> {
        if !self.config.detect_conflicts {
            return self.registry.find(uri);
        }

        let mut accepting = self.registry.find_all(uri).into_iter();
        let winner = accepting.next()?;
        let shadowed: Vec<String> = accepting
            .map(|router| router.host_name().to_owned())
            .collect();
        if !shadowed.is_empty() {
            tracing::warn!(
                %uri,
                winner = %winner.host_name(),
                ?shadowed,
                "several host routers accept the same uri; first registered wins"
            );
        }
        Some(winner)
    }
}

impl Default for RouterCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RouterCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterCenter")
            .field("registry", &self.registry)
            .field("has_resolver", &self.resolver.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`RouterCenter`].
#[derive(Default)]
pub struct RouterCenterBuilder {
    resolver: Option<Box<dyn HostResolver>>,
    config: CenterConfig,
}

impl RouterCenterBuilder {
    /// Resolver used by [`RouterCenter::register_host`].
    pub fn resolver<R: HostResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CenterConfig) -> Self {
        self.config = config;
        self
    }

    /// See [`CenterConfig::detect_conflicts`].
    pub fn detect_conflicts(mut self, enabled: bool) -> Self {
        self.config.detect_conflicts = enabled;
        self
    }

    /// Build the center with an empty registry.
    pub fn build(self) -> RouterCenter {
        RouterCenter {
            registry: HostRegistry::new(),
            resolver: self.resolver,
            config: self.config,
        }
    }
}
