//! # navhost - Pluggable Request Routing for Modular Applications
//!
//! Feature modules register a host router under a host name; callers dispatch
//! navigation requests by URI and the [`RouterCenter`] hands each request to
//! the first host that claims it, after running that host's interceptors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use navhost::prelude::*;
//!
//! struct SystemRouter;
//!
//! impl HostMatcher for SystemRouter {
//!     fn host_name(&self) -> &str { "system" }
//!     fn is_match(&self, uri: &Uri) -> bool { uri.as_str() == "system://call_phone" }
//! }
//!
//! impl HostRouter for SystemRouter {
//!     async fn perform_action(&self, request: RoutingRequest) -> Result<(), RouteError> {
//!         dial(request.context_as::<Screen>());
//!         Ok(())
//!     }
//! }
//!
//! let center = RouterCenter::new();
//! center.register(SystemRouter)?;
//! center.dispatch(RoutingRequest::new("system://call_phone")).await?;
//! ```
//!
//! ## Suspending the chain
//!
//! An interceptor waiting on the user (a permission prompt, a login screen)
//! returns [`Flow::suspend`] and keeps the [`Continuation`] it is handed. Once
//! the answer arrives it calls [`Continuation::resume`] to run the rest of the
//! chain, or drops it to abandon the navigation.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use navhost_core::{
    // Errors
    BoxError,
    // Chain
    Chain,
    Continuation,
    DispatchOutcome,
    // Host routers
    DynHostRouter,
    // Interceptors
    DynInterceptor,
    Flow,
    HostMatcher,
    // Resolution
    HostResolver,
    HostRouter,
    Interceptor,
    Park,
    RegistryError,
    // Requests
    RequestContext,
    RouteError,
    RoutingRequest,
    RoutingRequestBuilder,
    SharedHostRouter,
    SharedInterceptor,
    Suspension,
    Uri,
};

pub use navhost_std::{CenterConfig, FactoryTable, HostRegistry, RouterCenter, RouterCenterBuilder};

#[cfg(feature = "inventory")]
pub use navhost_std::{HostRegistration, InventoryResolver, submit_host_router};

/// Route table host routers.
#[cfg(feature = "matchit")]
pub mod table {
    pub use navhost_std::table::{
        RouteAction, RouteTableError, TableHostRouter, TableHostRouterBuilder,
    };
}

/// Standard interceptor implementations.
pub mod interceptors {
    pub use navhost_std::interceptors::{
        ConditionalInterceptor, FnInterceptor, LoggingInterceptor, TracingInterceptor,
        interceptor_fn,
    };
}

/// Testing utilities.
pub mod testing {
    pub use navhost_std::testing::{
        CallLog, MockHostRouter, RecordingInterceptor, call_log,
    };
}

/// Prelude module - common imports for navhost.
///
/// # Usage
///
/// ```rust,ignore
/// use navhost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Continuation, DispatchOutcome, Flow, HostMatcher, HostRouter, Interceptor,
        RouteError, RouterCenter, RoutingRequest, Uri,
    };
}

#[cfg(feature = "inventory")]
pub use inventory;
