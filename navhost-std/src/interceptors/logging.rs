//! Logging interceptor for request observation.

use navhost_core::{BoxError, Flow, Interceptor, RoutingRequest};

/// An interceptor that logs each request and lets it through unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let router = TableHostRouter::builder("user")
///     .interceptor(LoggingInterceptor::named("user_routes"))
///     .route("/profile", open_profile)
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingInterceptor {
    name: &'static str,
}

impl LoggingInterceptor {
    /// Create a `LoggingInterceptor` with a default name.
    pub fn new() -> Self {
        Self { name: "logging" }
    }

    /// Create a `LoggingInterceptor` with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for LoggingInterceptor {
    fn name(&self) -> &str {
        self.name
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        tracing::debug!(
            stage = %self.name,
            uri = %request.uri_str(),
            request_code = ?request.request_code(),
            params = ?request.params(),
            "routing request"
        );
        Ok(Flow::Next(request))
    }
}
