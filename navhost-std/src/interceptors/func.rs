//! Closure-backed interceptors.

use navhost_core::{BoxError, Flow, Interceptor, RoutingRequest};

/// An interceptor built from a synchronous closure.
///
/// Most interceptors decide on the spot; when one must wait for something it
/// returns [`Flow::suspend`] instead of blocking.
pub struct FnInterceptor<F> {
    name: String,
    f: F,
}

/// Build an interceptor named `name` from `f`.
///
/// # Example
///
/// ```rust
/// use navhost_core::{Flow, RoutingRequest};
/// use navhost_std::interceptors::interceptor_fn;
///
/// let stamp = interceptor_fn("stamp", |request: RoutingRequest| {
///     Ok(Flow::Next(request.with_param("source", "deeplink")))
/// });
/// ```
pub fn interceptor_fn<F>(name: impl Into<String>, f: F) -> FnInterceptor<F>
where
    F: Fn(RoutingRequest) -> Result<Flow, BoxError> + Send + Sync + 'static,
{
    FnInterceptor {
        name: name.into(),
        f,
    }
}

impl<F> Interceptor for FnInterceptor<F>
where
    F: Fn(RoutingRequest) -> Result<Flow, BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        (self.f)(request)
    }
}
