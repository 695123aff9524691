//! # Host Routers
//!
//! A host router is the contract each feature module implements to join the
//! routing engine. It owns one host name and answers three questions for the
//! center: does this URI belong to me, which interceptors wrap it, and what
//! does dispatching it do.
//!
//! The synchronous questions live in [`HostMatcher`] so they stay object-safe
//! and can be asked under the registry lock. The action is async and lives in
//! [`HostRouter`], with [`DynHostRouter`] as its boxed-future mirror.

use crate::{
    error::RouteError, interceptor::SharedInterceptor, request::RoutingRequest, uri::Uri,
};
use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// Matching half of a host router.
///
/// Implementations are consulted while the registry is locked and must not
/// call back into the registry.
pub trait HostMatcher: Send + Sync + 'static {
    /// The host this router is registered under. Must be stable.
    fn host_name(&self) -> &str;

    /// Whether `uri` belongs to this host.
    fn is_match(&self, uri: &Uri) -> bool;

    /// Interceptors wrapping a dispatch to `uri`, in execution order.
    fn interceptors(&self, _uri: &Uri) -> Vec<SharedInterceptor> {
        Vec::new()
    }
}

/// A module's router for one host.
///
/// # Example
///
/// ```rust
/// use navhost_core::{HostMatcher, HostRouter, RouteError, RoutingRequest, Uri};
///
/// struct SystemRouter;
///
/// impl HostMatcher for SystemRouter {
///     fn host_name(&self) -> &str {
///         "system"
///     }
///
///     fn is_match(&self, uri: &Uri) -> bool {
///         uri.as_str().starts_with("system://")
///     }
/// }
///
/// impl HostRouter for SystemRouter {
///     async fn perform_action(&self, request: RoutingRequest) -> Result<(), RouteError> {
///         println!("opening {}", request.uri_str());
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `HostRouter`",
    label = "missing `HostRouter` implementation",
    note = "Host routers implement `HostMatcher` and an async `perform_action`."
)]
pub trait HostRouter: HostMatcher {
    /// Perform the navigation or side effect for a request that passed the
    /// interceptor chain. Called at most once per dispatch.
    fn perform_action(
        &self,
        request: RoutingRequest,
    ) -> impl Future<Output = Result<(), RouteError>> + Send;
}

/// Object-safe version of [`HostRouter`].
pub trait DynHostRouter: HostMatcher {
    /// See [`HostRouter::perform_action`].
    fn perform_action_dyn<'a>(
        &'a self,
        request: RoutingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), RouteError>> + Send + 'a>>;
}

impl<T: HostRouter> DynHostRouter for T {
    fn perform_action_dyn<'a>(
        &'a self,
        request: RoutingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), RouteError>> + Send + 'a>> {
        Box::pin(self.perform_action(request))
    }
}

/// A reference-counted, type-erased host router.
pub type SharedHostRouter = Arc<dyn DynHostRouter>;

impl fmt::Debug for dyn DynHostRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRouter")
            .field("host", &self.host_name())
            .finish_non_exhaustive()
    }
}
