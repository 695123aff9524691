//! Tracing interceptor wrapping a stage in a span.

use navhost_core::{BoxError, Flow, Interceptor, RoutingRequest};
use tracing::Instrument;

/// An interceptor wrapper that runs the inner interceptor inside a `tracing`
/// span carrying the stage name and the request URI.
pub struct TracingInterceptor<I> {
    inner: I,
    name: &'static str,
}

impl<I> TracingInterceptor<I> {
    /// Create a new `TracingInterceptor` wrapper around an interceptor.
    pub const fn new(inner: I, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped interceptor.
    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: Clone> Clone for TracingInterceptor<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<I: Interceptor> Interceptor for TracingInterceptor<I> {
    fn name(&self) -> &str {
        self.name
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        let span = tracing::info_span!(
            "intercept",
            stage = %self.name,
            uri = %request.uri_str(),
        );

        async move {
            let result = self.inner.intercept(request).await;
            if let Err(err) = &result {
                tracing::debug!(error = %err, "interceptor rejected request");
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingInterceptor;

    #[tokio::test]
    async fn test_tracing_interceptor_passthrough() {
        let recorder = RecordingInterceptor::passing("inner");
        let traced = TracingInterceptor::new(recorder.clone(), "traced").clone();

        let flow = traced
            .intercept(RoutingRequest::new("router://a/b"))
            .await
            .unwrap();

        assert!(matches!(flow, Flow::Next(_)));
        assert_eq!(recorder.count(), 1);
        assert_eq!(Interceptor::name(&traced), "traced");
    }

    #[tokio::test]
    async fn test_tracing_interceptor_keeps_rejection() {
        let traced = TracingInterceptor::new(RecordingInterceptor::rejecting("inner", "nope"), "traced");

        let err = traced
            .intercept(RoutingRequest::new("router://a/b"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
