//! Conditional interceptor - run an interceptor only for some requests.

use navhost_core::{BoxError, Flow, Interceptor, RoutingRequest};

/// An interceptor that runs `inner` only when `condition(request)` holds.
///
/// Requests failing the condition pass through unchanged.
///
/// # Example
///
/// ```rust,ignore
/// // Only ask for the permission when the caller expects a result.
/// let gate = ConditionalInterceptor::new(
///     |request: &RoutingRequest| request.expects_result(),
///     PermissionInterceptor::new("CALL_PHONE"),
/// );
/// ```
pub struct ConditionalInterceptor<C, I> {
    condition: C,
    inner: I,
}

impl<C, I> ConditionalInterceptor<C, I> {
    /// Create a new `ConditionalInterceptor`.
    pub fn new(condition: C, inner: I) -> Self {
        Self { condition, inner }
    }
}

impl<C, I> Interceptor for ConditionalInterceptor<C, I>
where
    C: Fn(&RoutingRequest) -> bool + Send + Sync + 'static,
    I: Interceptor,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        if (self.condition)(&request) {
            self.inner.intercept(request).await
        } else {
            Ok(Flow::Next(request))
        }
    }
}
