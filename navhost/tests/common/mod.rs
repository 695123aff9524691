#![allow(dead_code)]

use navhost::{
    BoxError, Continuation, Flow, HostMatcher, HostRouter, Interceptor, RouteError,
    RoutingRequest, Uri, testing::MockHostRouter,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Host Routers
// ============================================================================

/// The `system` host from the call-phone scenario.
pub fn system_router() -> MockHostRouter {
    MockHostRouter::new("system", |uri| uri.as_str() == "system://call_phone")
}

/// A router that insists on an `id` parameter and reports its absence as an
/// invalid request.
pub struct ProfileRouter {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl HostMatcher for ProfileRouter {
    fn host_name(&self) -> &str {
        "profile"
    }

    fn is_match(&self, uri: &Uri) -> bool {
        uri.as_str().starts_with("router://profile")
    }
}

impl HostRouter for ProfileRouter {
    async fn perform_action(&self, request: RoutingRequest) -> Result<(), RouteError> {
        let Some(id) = request.param("id") else {
            return Err(RouteError::InvalidRequest("missing `id`".into()));
        };
        self.opened.lock().unwrap().push(id.to_owned());
        Ok(())
    }
}

// ============================================================================
// Permission Prompt
// ============================================================================

/// Continuations waiting on a simulated permission prompt.
#[derive(Clone, Default)]
pub struct PermissionPrompts {
    pending: Arc<Mutex<Vec<Continuation>>>,
}

impl PermissionPrompts {
    pub fn take(&self) -> Option<Continuation> {
        self.pending.lock().unwrap().pop()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

/// Suspends the chain until `permission=granted` is present on the request.
pub struct PermissionGate {
    pub permission: &'static str,
    pub prompts: PermissionPrompts,
}

impl Interceptor for PermissionGate {
    fn name(&self) -> &str {
        "permission_gate"
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        if request.param(self.permission) == Some("granted") {
            return Ok(Flow::Next(request));
        }
        if request.param(self.permission) == Some("denied") {
            return Err("permission_denied".into());
        }

        let prompts = self.prompts.clone();
        Ok(Flow::suspend(request, move |continuation| {
            prompts.pending.lock().unwrap().push(continuation);
        }))
    }
}
