//! Lazy resolution of host routers by host name.

use crate::host::SharedHostRouter;

/// Produces the router for a host that has none registered yet.
///
/// Every failure (unknown host, a factory that cannot build its router) is
/// reported as `None`. Callers treat `None` as "this module is not part of the
/// build" and carry on.
pub trait HostResolver: Send + Sync {
    /// Resolve the router for `host`.
    fn resolve(&self, host: &str) -> Option<SharedHostRouter>;
}

impl<F> HostResolver for F
where
    F: Fn(&str) -> Option<SharedHostRouter> + Send + Sync,
{
    fn resolve(&self, host: &str) -> Option<SharedHostRouter> {
        (self)(host)
    }
}
