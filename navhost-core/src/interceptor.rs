//! # Interceptors
//!
//! An interceptor is one stage of the chain that wraps every dispatch. It
//! receives the request by value and decides what happens next:
//!
//! - [`Flow::Next`] hands a (possibly rebuilt) request to the next stage
//! - [`Flow::Stop`] ends the dispatch successfully without running the action
//! - [`Flow::Suspend`] parks the rest of the chain in a [`Continuation`] until an
//!   external event (a permission grant, a confirmation dialog) resolves
//! - `Err(cause)` rejects the request; the cause reaches the caller verbatim
//!
//! Interceptors never block while waiting. Suspension is an explicit value the
//! interceptor stores and resumes later on the owning context.

use crate::{chain::Continuation, error::BoxError, request::RoutingRequest};
use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// Callback receiving the continuation of a suspended chain.
pub type Park = Box<dyn FnOnce(Continuation) + Send + 'static>;

/// What the chain does after an interceptor ran.
pub enum Flow {
    /// Continue with this request.
    Next(RoutingRequest),
    /// The interceptor fully handled the request; stop successfully.
    Stop,
    /// Stop for now; resume later through the parked continuation.
    Suspend(Suspension),
}

impl Flow {
    /// Continue with `request`.
    pub fn next(request: RoutingRequest) -> Self {
        Flow::Next(request)
    }

    /// Suspend the chain. `park` receives the continuation once the chain has
    /// stopped, and is expected to keep it until the awaited event resolves.
    pub fn suspend<F>(request: RoutingRequest, park: F) -> Self
    where
        F: FnOnce(Continuation) + Send + 'static,
    {
        Flow::Suspend(Suspension {
            request,
            park: Box::new(park),
        })
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Next(request) => f.debug_tuple("Next").field(request).finish(),
            Flow::Stop => f.write_str("Stop"),
            Flow::Suspend(suspension) => f
                .debug_tuple("Suspend")
                .field(&suspension.request)
                .finish(),
        }
    }
}

/// A pending suspension: the request to resume with and where to park the
/// continuation.
pub struct Suspension {
    pub(crate) request: RoutingRequest,
    pub(crate) park: Park,
}

/// A stage in the interceptor chain.
///
/// # Example
///
/// ```rust
/// use navhost_core::{BoxError, Flow, Interceptor, RoutingRequest};
///
/// struct RequireLogin;
///
/// impl Interceptor for RequireLogin {
///     fn name(&self) -> &str {
///         "require_login"
///     }
///
///     async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
///         if request.param("token").is_some() {
///             Ok(Flow::Next(request))
///         } else {
///             Err("not_logged_in".into())
///         }
///     }
/// }
/// ```
///
/// This trait uses native `async fn` for static dispatch. Chains hold
/// interceptors as [`SharedInterceptor`] through the blanket [`DynInterceptor`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Interceptor`",
    label = "missing `Interceptor` implementation",
    note = "Interceptors must implement `intercept` returning a `Flow`."
)]
pub trait Interceptor: Send + Sync + 'static {
    /// Name used in diagnostics and in [`RouteError::InterceptorRejected`].
    ///
    /// [`RouteError::InterceptorRejected`]: crate::RouteError::InterceptorRejected
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Process the request.
    fn intercept(
        &self,
        request: RoutingRequest,
    ) -> impl Future<Output = Result<Flow, BoxError>> + Send;
}

/// Object-safe version of [`Interceptor`].
pub trait DynInterceptor: Send + Sync + 'static {
    /// See [`Interceptor::name`].
    fn name_dyn(&self) -> &str;

    /// See [`Interceptor::intercept`].
    fn intercept_dyn<'a>(
        &'a self,
        request: RoutingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Flow, BoxError>> + Send + 'a>>;
}

impl<T: Interceptor> DynInterceptor for T {
    fn name_dyn(&self) -> &str {
        Interceptor::name(self)
    }

    fn intercept_dyn<'a>(
        &'a self,
        request: RoutingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Flow, BoxError>> + Send + 'a>> {
        Box::pin(self.intercept(request))
    }
}

/// A reference-counted, type-erased interceptor.
pub type SharedInterceptor = Arc<dyn DynInterceptor>;

// Allow shared interceptors to be wrapped by generic adapters.
impl Interceptor for SharedInterceptor {
    fn name(&self) -> &str {
        self.as_ref().name_dyn()
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        self.as_ref().intercept_dyn(request).await
    }
}
