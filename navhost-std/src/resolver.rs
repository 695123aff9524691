//! Host resolvers.
//!
//! Name-based registration needs something that turns a host name into a
//! router. Two implementations are provided:
//!
//! - [`FactoryTable`]: an explicit table filled by each module's init code
//!   at startup.
//! - `InventoryResolver` (feature `inventory`): factories submitted from
//!   anywhere in the binary with [`submit_host_router!`](crate::submit_host_router)
//!   and collected at link time.
//!
//! Both absorb every failure into `None`.

use navhost_core::{BoxError, HostResolver, HostRouter, SharedHostRouter};
use std::{collections::HashMap, sync::Arc};

type Factory = Box<dyn Fn() -> Result<SharedHostRouter, BoxError> + Send + Sync>;

/// A startup-time table from host name to router factory.
///
/// # Example
///
/// ```rust,ignore
/// let table = FactoryTable::new()
///     .with("user", || Ok(UserRouter::default()))
///     .with("order", OrderRouter::from_env);
///
/// let center = RouterCenter::builder().resolver(table).build();
/// center.register_host("user");
/// ```
#[derive(Default)]
pub struct FactoryTable {
    factories: HashMap<String, Factory>,
}

impl FactoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the factory for `host`.
    pub fn insert<F, R>(&mut self, host: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<R, BoxError> + Send + Sync + 'static,
        R: HostRouter,
    {
        let factory: Factory = Box::new(move || {
            let router = factory()?;
            Ok(Arc::new(router) as SharedHostRouter)
        });
        self.factories.insert(host.into(), factory);
        self
    }

    /// Builder-style [`FactoryTable::insert`].
    pub fn with<F, R>(mut self, host: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<R, BoxError> + Send + Sync + 'static,
        R: HostRouter,
    {
        self.insert(host, factory);
        self
    }

    /// Whether a factory exists for `host`.
    pub fn contains(&self, host: &str) -> bool {
        self.factories.contains_key(host)
    }

    /// Number of factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl HostResolver for FactoryTable {
    fn resolve(&self, host: &str) -> Option<SharedHostRouter> {
        let Some(factory) = self.factories.get(host) else {
            tracing::debug!(%host, "no factory for host");
            return None;
        };

        match factory() {
            Ok(router) => Some(router),
            Err(err) => {
                tracing::debug!(%host, error = %err, "host router factory failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryTable")
            .field("hosts", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(feature = "inventory")]
pub use self::collected::{HostRegistration, InventoryResolver};

#[cfg(feature = "inventory")]
mod collected {
    use navhost_core::{BoxError, HostResolver, SharedHostRouter};

    /// A router factory collected via `inventory`.
    ///
    /// Submit one with [`submit_host_router!`](crate::submit_host_router).
    pub struct HostRegistration {
        /// Host the factory builds a router for.
        pub host: &'static str,
        /// Builds the router.
        pub factory: fn() -> Result<SharedHostRouter, BoxError>,
    }

    impl HostRegistration {
        /// Create a registration entry.
        pub const fn new(
            host: &'static str,
            factory: fn() -> Result<SharedHostRouter, BoxError>,
        ) -> Self {
            Self { host, factory }
        }
    }

    inventory::collect!(HostRegistration);

    /// Resolves hosts from every [`HostRegistration`] linked into the binary.
    ///
    /// If several registrations share a host, the first one found wins.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct InventoryResolver;

    impl InventoryResolver {
        /// Hosts with a collected registration.
        pub fn hosts() -> Vec<&'static str> {
            inventory::iter::<HostRegistration>
                .into_iter()
                .map(|entry| entry.host)
                .collect()
        }
    }

    impl HostResolver for InventoryResolver {
        fn resolve(&self, host: &str) -> Option<SharedHostRouter> {
            let entry = inventory::iter::<HostRegistration>
                .into_iter()
                .find(|entry| entry.host == host)?;

            match (entry.factory)() {
                Ok(router) => Some(router),
                Err(err) => {
                    tracing::debug!(%host, error = %err, "collected host router factory failed");
                    None
                }
            }
        }
    }
}

/// Submit a host router factory for [`InventoryResolver`].
///
/// ```rust,ignore
/// navhost_std::submit_host_router!("user", UserRouter::default());
/// ```
#[cfg(feature = "inventory")]
#[macro_export]
macro_rules! submit_host_router {
    ($host:expr, $router:expr) => {
        $crate::inventory::submit! {
            $crate::resolver::HostRegistration::new($host, || {
                ::std::result::Result::Ok(
                    ::std::sync::Arc::new($router) as $crate::navhost_core::SharedHostRouter,
                )
            })
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHostRouter;
    use navhost_core::HostMatcher;

    #[test]
    fn test_factory_table_resolves_known_host() {
        let table = FactoryTable::new()
            .with("user", || Ok(MockHostRouter::with_prefix("user", "router://user/")));

        let router = table.resolve("user").unwrap();
        assert_eq!(router.host_name(), "user");
        assert!(table.contains("user"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_factory_table_absorbs_failures() {
        let mut table = FactoryTable::new();
        table.insert("broken", || -> Result<MockHostRouter, BoxError> {
            Err("module not linked".into())
        });

        assert!(table.resolve("broken").is_none());
        assert!(table.resolve("missing").is_none());
    }
}
