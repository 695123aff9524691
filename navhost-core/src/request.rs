//! Routing requests.

use crate::uri::Uri;
use std::{any::Any, collections::HashMap, fmt, sync::Arc};

/// The execution context a request is bound to (the invoking screen or view).
///
/// The core never looks inside; dispatch actions downcast it with
/// [`RoutingRequest::context_as`].
pub type RequestContext = Arc<dyn Any + Send + Sync>;

/// A navigation request.
///
/// Immutable once built. Interceptors that need to change a request build a
/// new one with [`RoutingRequest::to_builder`] or [`RoutingRequest::with_param`].
///
/// # Example
///
/// ```rust
/// use navhost_core::RoutingRequest;
///
/// let request = RoutingRequest::builder()
///     .uri("router://user/profile")
///     .request_code(7)
///     .param("id", "42")
///     .build();
///
/// assert_eq!(request.uri_str(), "router://user/profile");
/// assert!(request.expects_result());
/// assert_eq!(request.param("id"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct RoutingRequest {
    uri: Option<Uri>,
    request_code: Option<i32>,
    context: Option<RequestContext>,
    params: HashMap<String, String>,
}

impl RoutingRequest {
    /// Create a request for `uri` with no context and no parameters.
    pub fn new(uri: impl Into<Uri>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Start building a request.
    pub fn builder() -> RoutingRequestBuilder {
        RoutingRequestBuilder::default()
    }

    /// The target URI, if any. A request without one never matches a host.
    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    /// The target URI as a string, or `""` when absent.
    pub fn uri_str(&self) -> &str {
        self.uri.as_ref().map(Uri::as_str).unwrap_or("")
    }

    /// The result code the caller is waiting on, if any.
    pub fn request_code(&self) -> Option<i32> {
        self.request_code
    }

    /// Whether the caller expects a result back from the dispatched action.
    pub fn expects_result(&self) -> bool {
        self.request_code.is_some()
    }

    /// The bound execution context.
    pub fn context(&self) -> Option<&RequestContext> {
        self.context.as_ref()
    }

    /// The bound execution context, downcast to `T`.
    pub fn context_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.context.as_deref()?.downcast_ref::<T>()
    }

    /// Look up a caller-supplied parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All caller-supplied parameters.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// A builder pre-filled with this request's values.
    pub fn to_builder(&self) -> RoutingRequestBuilder {
        RoutingRequestBuilder {
            inner: self.clone(),
        }
    }

    /// A copy of this request with one parameter added or replaced.
    pub fn with_param(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.to_builder().param(key, value).build()
    }
}

impl fmt::Debug for RoutingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingRequest")
            .field("uri", &self.uri)
            .field("request_code", &self.request_code)
            .field("has_context", &self.context.is_some())
            .field("params", &self.params)
            .finish()
    }
}

impl From<Uri> for RoutingRequest {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl From<&str> for RoutingRequest {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Builder for [`RoutingRequest`].
#[derive(Default)]
pub struct RoutingRequestBuilder {
    inner: RoutingRequest,
}

impl RoutingRequestBuilder {
    /// Set the target URI.
    pub fn uri(mut self, uri: impl Into<Uri>) -> Self {
        self.inner.uri = Some(uri.into());
        self
    }

    /// Set the result code.
    pub fn request_code(mut self, code: i32) -> Self {
        self.inner.request_code = Some(code);
        self
    }

    /// Bind an execution context.
    pub fn context<T: Any + Send + Sync>(mut self, context: T) -> Self {
        self.inner.context = Some(Arc::new(context));
        self
    }

    /// Bind an already shared execution context.
    pub fn shared_context(mut self, context: RequestContext) -> Self {
        self.inner.context = Some(context);
        self
    }

    /// Add or replace a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.params.insert(key.into(), value.into());
        self
    }

    /// Add or replace several parameters.
    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner
            .params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Finish building.
    pub fn build(self) -> RoutingRequest {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Screen {
        name: &'static str,
    }

    #[test]
    fn test_request_without_uri() {
        let request = RoutingRequest::builder().param("a", "b").build();
        assert!(request.uri().is_none());
        assert_eq!(request.uri_str(), "");
        assert!(!request.expects_result());
    }

    #[test]
    fn test_context_downcast() {
        let request = RoutingRequest::builder()
            .uri("router://main/home")
            .context(Screen { name: "home" })
            .build();

        assert_eq!(request.context_as::<Screen>().map(|s| s.name), Some("home"));
        assert!(request.context_as::<String>().is_none());
    }

    #[test]
    fn test_with_param_leaves_original_untouched() {
        let original = RoutingRequest::new("router://main/home");
        let changed = original.with_param("granted", "true");

        assert_eq!(original.param("granted"), None);
        assert_eq!(changed.param("granted"), Some("true"));
        assert_eq!(changed.uri_str(), "router://main/home");
    }

    #[test]
    fn test_to_builder_keeps_context() {
        let original = RoutingRequest::builder()
            .uri("router://main/home")
            .request_code(3)
            .context(Screen { name: "home" })
            .build();
        let copy = original.to_builder().params([("x", "1"), ("y", "2")]).build();

        assert_eq!(copy.request_code(), Some(3));
        assert!(copy.context_as::<Screen>().is_some());
        assert_eq!(copy.params().len(), 2);
    }
}
