//! Testing utilities for navhost.
//!
//! This module provides doubles for the two collaborator contracts:
//!
//! - [`RecordingInterceptor`]: records every request and answers with a
//!   programmed verdict
//! - [`MockHostRouter`]: a host router with a closure predicate that records
//!   every request reaching its action
//!
//! Both are cheap to clone and clones share their recordings, so a test can
//! keep one copy after handing the other to a registry. An optional shared
//! [`CallLog`] captures the interleaving of interceptors and actions.

use navhost_core::{
    BoxError, Flow, HostMatcher, HostRouter, Interceptor, RouteError, RoutingRequest,
    SharedInterceptor, Uri,
};
use std::sync::{Arc, Mutex};

/// A shared, ordered log of stage names.
///
/// Interceptors log their name; host routers log `action:<host>`.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Create an empty [`CallLog`].
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Recording Interceptor
// ============================================================================

#[derive(Debug, Clone)]
enum Verdict {
    Continue,
    Stop,
    Reject(String),
    Tag(String, String),
}

/// An interceptor that records every request it sees.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingInterceptor::passing("audit");
/// let router = MockHostRouter::with_prefix("user", "router://user/")
///     .interceptor(recorder.clone());
///
/// center.register(router)?;
/// center.dispatch(RoutingRequest::new("router://user/profile")).await?;
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone)]
pub struct RecordingInterceptor {
    name: String,
    verdict: Verdict,
    requests: Arc<Mutex<Vec<RoutingRequest>>>,
    log: Option<CallLog>,
}

impl RecordingInterceptor {
    fn with_verdict(name: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            name: name.into(),
            verdict,
            requests: Arc::new(Mutex::new(Vec::new())),
            log: None,
        }
    }

    /// An interceptor that always continues.
    pub fn passing(name: impl Into<String>) -> Self {
        Self::with_verdict(name, Verdict::Continue)
    }

    /// An interceptor that always stops the chain successfully.
    pub fn stopping(name: impl Into<String>) -> Self {
        Self::with_verdict(name, Verdict::Stop)
    }

    /// An interceptor that always rejects with `cause`.
    pub fn rejecting(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::with_verdict(name, Verdict::Reject(cause.into()))
    }

    /// An interceptor that continues with `key=value` added to the request.
    pub fn tagging(
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::with_verdict(name, Verdict::Tag(key.into(), value.into()))
    }

    /// Also append this interceptor's name to `log` on every call.
    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<RoutingRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Interceptor for RecordingInterceptor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn intercept(&self, request: RoutingRequest) -> Result<Flow, BoxError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(log) = &self.log {
            log.lock().unwrap().push(self.name.clone());
        }

        match &self.verdict {
            Verdict::Continue => Ok(Flow::Next(request)),
            Verdict::Stop => Ok(Flow::Stop),
            Verdict::Reject(cause) => Err(cause.clone().into()),
            Verdict::Tag(key, value) => Ok(Flow::Next(request.with_param(key, value))),
        }
    }
}

// ============================================================================
// Mock Host Router
// ============================================================================

type Predicate = Arc<dyn Fn(&Uri) -> bool + Send + Sync>;

/// A host router driven by a closure predicate.
///
/// # Example
///
/// ```rust,ignore
/// let system = MockHostRouter::new("system", |uri| uri.as_str() == "system://call_phone");
/// center.register(system.clone())?;
///
/// center.dispatch(RoutingRequest::new("system://call_phone")).await?;
/// assert_eq!(system.action_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockHostRouter {
    host: String,
    predicate: Predicate,
    interceptors: Vec<SharedInterceptor>,
    requests: Arc<Mutex<Vec<RoutingRequest>>>,
    failure: Option<String>,
    log: Option<CallLog>,
}

impl MockHostRouter {
    /// A router for `host` accepting URIs for which `predicate` holds.
    pub fn new<P>(host: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&Uri) -> bool + Send + Sync + 'static,
    {
        Self {
            host: host.into(),
            predicate: Arc::new(predicate),
            interceptors: Vec::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            log: None,
        }
    }

    /// A router for `host` accepting URIs that start with `prefix`.
    pub fn with_prefix(host: impl Into<String>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self::new(host, move |uri| uri.as_str().starts_with(&prefix))
    }

    /// Append an interceptor to the chain for every matching URI.
    pub fn interceptor<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Make the action fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Also append `action:<host>` to `log` whenever the action runs.
    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Requests that reached the action.
    pub fn requests(&self) -> Vec<RoutingRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of times the action ran.
    pub fn action_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HostMatcher for MockHostRouter {
    fn host_name(&self) -> &str {
        &self.host
    }

    fn is_match(&self, uri: &Uri) -> bool {
        (self.predicate)(uri)
    }

    fn interceptors(&self, _uri: &Uri) -> Vec<SharedInterceptor> {
        self.interceptors.clone()
    }
}

impl HostRouter for MockHostRouter {
    async fn perform_action(&self, request: RoutingRequest) -> Result<(), RouteError> {
        self.requests.lock().unwrap().push(request);
        if let Some(log) = &self.log {
            log.lock().unwrap().push(format!("action:{}", self.host));
        }

        match &self.failure {
            Some(message) => Err(RouteError::Action(message.clone().into())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_interceptor_verdicts() {
        let request = RoutingRequest::new("router://a/b");

        let tagging = RecordingInterceptor::tagging("tag", "k", "v");
        match tagging.intercept(request.clone()).await.unwrap() {
            Flow::Next(next) => assert_eq!(next.param("k"), Some("v")),
            other => panic!("unexpected flow: {other:?}"),
        }

        let stopping = RecordingInterceptor::stopping("stop");
        assert!(matches!(
            stopping.intercept(request.clone()).await.unwrap(),
            Flow::Stop
        ));

        let rejecting = RecordingInterceptor::rejecting("deny", "denied");
        assert_eq!(
            rejecting.intercept(request).await.unwrap_err().to_string(),
            "denied"
        );
    }

    #[tokio::test]
    async fn test_mock_router_clones_share_recordings() {
        let log = call_log();
        let router = MockHostRouter::with_prefix("a", "a://").logging_to(&log);
        let handle = router.clone();

        router.perform_action(RoutingRequest::new("a://x")).await.unwrap();

        assert_eq!(handle.action_count(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["action:a"]);
        assert!(handle.is_match(&Uri::from("a://y")));
        assert!(!handle.is_match(&Uri::from("b://y")));
    }
}
