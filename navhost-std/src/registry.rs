//! Host registry: the single mapping from host name to host router.
//!
//! Entries keep insertion order. Re-registering a host replaces its router in
//! place; unregistering and registering again moves it to the end. Every read
//! and write takes the same lock, so a scan never observes a half-applied
//! mutation.

use navhost_core::{
    HostMatcher, HostResolver, HostRouter, RegistryError, SharedHostRouter, SharedInterceptor, Uri,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A thread-safe registry of host routers.
///
/// # Example
/// ```ignore
/// let registry = HostRegistry::new();
/// registry.register(SystemRouter)?;
///
/// assert!(registry.contains("system"));
/// let router = registry.find(&Uri::from("system://call_phone"));
/// ```
#[derive(Default)]
pub struct HostRegistry {
    entries: Mutex<Vec<SharedHostRouter>>,
}

impl HostRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are plain `Arc`s replaced atomically under the guard, so a
    // poisoned lock still holds a consistent list.
    fn lock(&self) -> MutexGuard<'_, Vec<SharedHostRouter>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a router under its host name, replacing any previous router
    /// for that host. Returns the replaced router.
    pub fn register<R: HostRouter>(
        &self,
        router: R,
    ) -> Result<Option<SharedHostRouter>, RegistryError> {
        self.register_shared(Arc::new(router))
    }

    /// Register an already shared router. See [`HostRegistry::register`].
    pub fn register_shared(
        &self,
        router: SharedHostRouter,
    ) -> Result<Option<SharedHostRouter>, RegistryError> {
        if router.host_name().is_empty() {
            return Err(RegistryError::InvalidArgument("host name must not be empty"));
        }

        let mut entries = self.lock();
        let slot = entries
            .iter()
            .position(|entry| entry.host_name() == router.host_name());

        match slot {
            Some(index) => {
                tracing::debug!(host = %router.host_name(), "replacing host router");
                Ok(Some(std::mem::replace(&mut entries[index], router)))
            }
            None => {
                tracing::debug!(host = %router.host_name(), "registering host router");
                entries.push(router);
                Ok(None)
            }
        }
    }

    /// Resolve a router for `host` and register it.
    ///
    /// When the resolver has nothing for `host` the registration is skipped
    /// and `false` is returned; this is not an error, modules may be absent
    /// from a given build.
    pub fn register_host(&self, host: &str, resolver: &dyn HostResolver) -> bool {
        let Some(router) = resolver.resolve(host) else {
            tracing::debug!(%host, "no router resolved, registration skipped");
            return false;
        };

        match self.register_shared(router) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(%host, error = %err, "resolved router rejected, registration skipped");
                false
            }
        }
    }

    /// Remove the router registered for `host`. Removing an absent host is a
    /// no-op.
    pub fn unregister(&self, host: &str) -> Option<SharedHostRouter> {
        let mut entries = self.lock();
        let index = entries.iter().position(|entry| entry.host_name() == host)?;
        tracing::debug!(%host, "unregistering host router");
        Some(entries.remove(index))
    }

    /// Remove whatever router is registered under `router`'s host name.
    pub fn unregister_router<R: HostMatcher + ?Sized>(&self, router: &R) -> Option<SharedHostRouter> {
        self.unregister(router.host_name())
    }

    /// Whether a router is registered for `host`.
    pub fn contains(&self, host: &str) -> bool {
        self.lock().iter().any(|entry| entry.host_name() == host)
    }

    /// The router registered for `host`.
    pub fn get(&self, host: &str) -> Option<SharedHostRouter> {
        self.lock()
            .iter()
            .find(|entry| entry.host_name() == host)
            .cloned()
    }

    /// Registered host names, in iteration order.
    pub fn hosts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|entry| entry.host_name().to_owned())
            .collect()
    }

    /// Number of registered hosts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no host is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The first router, in iteration order, whose predicate accepts `uri`.
    pub fn find(&self, uri: &Uri) -> Option<SharedHostRouter> {
        self.scan(|entries| entries.iter().find(|entry| entry.is_match(uri)).cloned())
    }

    /// Every router whose predicate accepts `uri`, in iteration order.
    pub fn find_all(&self, uri: &Uri) -> Vec<SharedHostRouter> {
        self.scan(|entries| {
            entries
                .iter()
                .filter(|entry| entry.is_match(uri))
                .cloned()
                .collect()
        })
    }

    /// Interceptors of the first router accepting `uri`.
    pub fn interceptors_for(&self, uri: &Uri) -> Option<Vec<SharedInterceptor>> {
        self.scan(|entries| {
            entries
                .iter()
                .find(|entry| entry.is_match(uri))
                .map(|entry| entry.interceptors(uri))
        })
    }

    /// Run `f` over the entries while holding the lock.
    pub(crate) fn scan<T>(&self, f: impl FnOnce(&[SharedHostRouter]) -> T) -> T {
        let entries = self.lock();
        f(&entries)
    }
}

impl std::fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRegistry")
            .field("hosts", &self.hosts())
            .finish()
    }
}
