//! # Interceptor Chain
//!
//! Runs the interceptors of a matched host strictly in order, then the host's
//! action. The chain is a value: when an interceptor suspends, the remaining
//! stages move into a [`Continuation`] that the interceptor keeps and resumes
//! later.

use crate::{
    error::RouteError,
    host::SharedHostRouter,
    interceptor::{Flow, SharedInterceptor},
    request::RoutingRequest,
};
use std::fmt;

/// How a successful dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every interceptor continued and the action ran.
    Completed,
    /// An interceptor handled the request itself; the action did not run.
    Intercepted,
    /// An interceptor parked the rest of the chain in a [`Continuation`].
    Suspended,
}

impl DispatchOutcome {
    /// Whether the host's action ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, DispatchOutcome::Completed)
    }
}

/// The remaining stages of one dispatch.
pub struct Chain {
    router: SharedHostRouter,
    interceptors: Vec<SharedInterceptor>,
    position: usize,
}

impl Chain {
    /// A chain over `interceptors` that ends in `router`'s action.
    pub fn new(router: SharedHostRouter, interceptors: Vec<SharedInterceptor>) -> Self {
        Self {
            router,
            interceptors,
            position: 0,
        }
    }

    /// The host router whose action ends this chain.
    pub fn router(&self) -> &SharedHostRouter {
        &self.router
    }

    /// Number of interceptors not yet run.
    pub fn remaining(&self) -> usize {
        self.interceptors.len() - self.position
    }

    /// Run the remaining interceptors and, if they all continue, the action.
    pub async fn proceed(mut self, request: RoutingRequest) -> Result<DispatchOutcome, RouteError> {
        let mut request = request;

        while let Some(interceptor) = self.interceptors.get(self.position).cloned() {
            self.position += 1;

            match interceptor.intercept_dyn(request).await {
                Ok(Flow::Next(next)) => request = next,
                Ok(Flow::Stop) => return Ok(DispatchOutcome::Intercepted),
                Ok(Flow::Suspend(suspension)) => {
                    let continuation = Continuation {
                        chain: self,
                        request: suspension.request,
                    };
                    (suspension.park)(continuation);
                    return Ok(DispatchOutcome::Suspended);
                }
                Err(cause) => {
                    return Err(RouteError::InterceptorRejected {
                        interceptor: interceptor.name_dyn().to_owned(),
                        cause,
                    });
                }
            }
        }

        self.router.perform_action_dyn(request).await?;
        Ok(DispatchOutcome::Completed)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("host", &self.router.host_name())
            .field("position", &self.position)
            .field("len", &self.interceptors.len())
            .finish()
    }
}

/// A suspended dispatch.
///
/// Handed to the interceptor that suspended. When the awaited event resolves
/// on the owning context, either [`resume`](Continuation::resume) it to run
/// the stages after the suspending interceptor, or take the request back with
/// [`into_request`](Continuation::into_request) and dispatch it again from the
/// top. Dropping it abandons the dispatch.
pub struct Continuation {
    chain: Chain,
    request: RoutingRequest,
}

impl Continuation {
    /// The request the chain will resume with.
    pub fn request(&self) -> &RoutingRequest {
        &self.request
    }

    /// Host whose chain is suspended.
    pub fn host_name(&self) -> &str {
        self.chain.router.host_name()
    }

    /// Replace the request before resuming, e.g. to record a granted permission.
    pub fn map_request<F>(mut self, f: F) -> Self
    where
        F: FnOnce(RoutingRequest) -> RoutingRequest,
    {
        self.request = f(self.request);
        self
    }

    /// Continue from the interceptor after the one that suspended.
    pub async fn resume(self) -> Result<DispatchOutcome, RouteError> {
        self.chain.proceed(self.request).await
    }

    /// Give up the remaining chain and keep only the request.
    pub fn into_request(self) -> RoutingRequest {
        self.request
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("chain", &self.chain)
            .field("request", &self.request)
            .finish()
    }
}
