//! # Route Table Host Router
//!
//! A ready-made [`HostRouter`] for modules whose routes are a static table of
//! paths. URIs are parsed with [`url::Url`]; the URI's host selects the router
//! and its path is matched against [`matchit`] patterns.
//!
//! ```text
//! router://user/profile/42
//! ^^^^^^   ^^^^ ^^^^^^^^^^^
//! scheme   host path, matched against `/profile/{id}`
//! ```
//!
//! Query pairs and path parameters, both percent-decoded, are merged into the
//! request parameters before the route's action runs. A path parameter wins
//! over a query pair of the same name, and both win over parameters already
//! on the request. The query never takes part in matching. Interceptors registered on the table run for every route,
//! before the route's own interceptors.
//!
//! # Example
//!
//! ```rust,ignore
//! let user = TableHostRouter::builder("user")
//!     .scheme("router")
//!     .interceptor(LoggingInterceptor::named("user"))
//!     .route("/profile/{id}", |request: RoutingRequest| async move {
//!         open_profile(request.param("id"));
//!         Ok(())
//!     })
//!     .route_with("/call", vec![permission_gate], call_phone)
//!     .build()?;
//!
//! center.register(user)?;
//! ```

use futures::future::BoxFuture;
use navhost_core::{
    BoxError, HostMatcher, HostRouter, Interceptor, RouteError, RoutingRequest, SharedInterceptor,
    Uri,
};
use percent_encoding::percent_decode_str;
use std::{future::Future, sync::Arc};
use thiserror::Error;
use url::Url;

/// The action bound to a route.
///
/// Implemented for any `Fn(RoutingRequest) -> impl Future<Output = Result<(), BoxError>>`.
pub trait RouteAction: Send + Sync + 'static {
    /// Run the action for a request that passed every interceptor.
    fn call(&self, request: RoutingRequest) -> BoxFuture<'static, Result<(), BoxError>>;
}

impl<F, Fut> RouteAction for F
where
    F: Fn(RoutingRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn call(&self, request: RoutingRequest) -> BoxFuture<'static, Result<(), BoxError>> {
        Box::pin((self)(request))
    }
}

/// Errors from building a [`TableHostRouter`].
#[derive(Error, Debug)]
pub enum RouteTableError {
    /// The table has no host name.
    #[error("route table host must not be empty")]
    EmptyHost,

    /// A pattern was malformed or collides with an earlier one.
    #[error("invalid route pattern `{pattern}`")]
    Pattern {
        /// The rejected pattern.
        pattern: String,
        /// Why `matchit` rejected it.
        #[source]
        source: matchit::InsertError,
    },
}

struct Route {
    action: Arc<dyn RouteAction>,
    interceptors: Vec<SharedInterceptor>,
}

/// A host router backed by a table of path patterns.
pub struct TableHostRouter {
    host: String,
    scheme: Option<String>,
    interceptors: Vec<SharedInterceptor>,
    routes: matchit::Router<Route>,
    patterns: Vec<String>,
}

impl TableHostRouter {
    /// Start a table for `host`.
    pub fn builder(host: impl Into<String>) -> TableHostRouterBuilder {
        TableHostRouterBuilder {
            host: host.into(),
            scheme: None,
            interceptors: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Registered patterns, in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    // Parse `uri` and check it addresses this host; returns the route path.
    fn locate(&self, uri: &str) -> Option<(Url, String)> {
        let url = Url::parse(uri).ok()?;
        if url.host_str() != Some(self.host.as_str()) {
            return None;
        }
        if let Some(scheme) = &self.scheme {
            if url.scheme() != scheme {
                return None;
            }
        }
        let path = match url.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };
        Some((url, path))
    }
}

impl HostMatcher for TableHostRouter {
    fn host_name(&self) -> &str {
        &self.host
    }

    fn is_match(&self, uri: &Uri) -> bool {
        self.locate(uri.as_str())
            .is_some_and(|(_, path)| self.routes.at(&path).is_ok())
    }

    fn interceptors(&self, uri: &Uri) -> Vec<SharedInterceptor> {
        let mut interceptors = self.interceptors.clone();
        if let Some((_, path)) = self.locate(uri.as_str()) {
            if let Ok(matched) = self.routes.at(&path) {
                interceptors.extend(matched.value.interceptors.iter().cloned());
            }
        }
        interceptors
    }
}

impl HostRouter for TableHostRouter {
    async fn perform_action(&self, request: RoutingRequest) -> Result<(), RouteError> {
        let Some(uri) = request.uri() else {
            return Err(RouteError::InvalidRequest("request has no uri".into()));
        };
        if let Err(err) = Url::parse(uri.as_str()) {
            return Err(RouteError::InvalidRequest(format!("cannot parse `{uri}`: {err}")));
        }
        let Some((url, path)) = self.locate(uri.as_str()) else {
            return Err(RouteError::TargetNotFound(uri.to_string()));
        };
        let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let action = match self.routes.at(&path) {
            Ok(matched) => {
                for (key, value) in matched.params.iter() {
                    let decoded = percent_decode_str(value).decode_utf8().map_err(|err| {
                        RouteError::InvalidRequest(format!(
                            "path parameter `{key}` of `{uri}` is not utf-8: {err}"
                        ))
                    })?;
                    params.push((key.to_owned(), decoded.into_owned()));
                }
                Arc::clone(&matched.value.action)
            }
            Err(_) => return Err(RouteError::TargetNotFound(uri.to_string())),
        };

        tracing::trace!(host = %self.host, %path, "running route action");
        let request = request.to_builder().params(params).build();
        action.call(request).await.map_err(RouteError::Action)
    }
}

impl std::fmt::Debug for TableHostRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHostRouter")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("patterns", &self.patterns)
            .finish()
    }
}

/// Builder for [`TableHostRouter`].
pub struct TableHostRouterBuilder {
    host: String,
    scheme: Option<String>,
    interceptors: Vec<SharedInterceptor>,
    routes: Vec<(String, Route)>,
}

impl TableHostRouterBuilder {
    /// Only accept URIs with this scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Add an interceptor that wraps every route.
    pub fn interceptor<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Add an already shared interceptor that wraps every route.
    pub fn shared_interceptor(mut self, interceptor: SharedInterceptor) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Add a route without route-level interceptors.
    pub fn route<A: RouteAction>(self, pattern: impl Into<String>, action: A) -> Self {
        self.route_with(pattern, Vec::new(), action)
    }

    /// Add a route wrapped by `interceptors`, which run after the table-level
    /// ones.
    pub fn route_with<A: RouteAction>(
        mut self,
        pattern: impl Into<String>,
        interceptors: Vec<SharedInterceptor>,
        action: A,
    ) -> Self {
        self.routes.push((
            pattern.into(),
            Route {
                action: Arc::new(action),
                interceptors,
            },
        ));
        self
    }

    /// Build the router.
    pub fn build(self) -> Result<TableHostRouter, RouteTableError> {
        if self.host.is_empty() {
            return Err(RouteTableError::EmptyHost);
        }

        let mut routes = matchit::Router::new();
        let mut patterns = Vec::with_capacity(self.routes.len());
        for (pattern, route) in self.routes {
            routes
                .insert(pattern.clone(), route)
                .map_err(|source| RouteTableError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            patterns.push(pattern);
        }

        Ok(TableHostRouter {
            host: self.host,
            scheme: self.scheme,
            interceptors: self.interceptors,
            routes,
            patterns,
        })
    }
}
