//! Interceptor chains run by the router center.

mod common;

use navhost::{
    BoxError, DispatchOutcome, Flow, RouteError, RouterCenter, RoutingRequest,
    interceptors::{ConditionalInterceptor, LoggingInterceptor, TracingInterceptor, interceptor_fn},
    testing::{MockHostRouter, RecordingInterceptor, call_log},
};

#[tokio::test]
async fn test_second_interceptor_rejects_with_permission_denied() {
    let center = RouterCenter::new();
    let log = call_log();
    let first = RecordingInterceptor::passing("login").logging_to(&log);
    let second = RecordingInterceptor::rejecting("permission", "permission_denied").logging_to(&log);
    let system = common::system_router()
        .interceptor(first.clone())
        .interceptor(second.clone())
        .logging_to(&log);
    center.register(system.clone()).unwrap();

    let err = center
        .dispatch(RoutingRequest::new("system://call_phone"))
        .await
        .unwrap_err();

    match &err {
        RouteError::InterceptorRejected { interceptor, cause } => {
            assert_eq!(interceptor, "permission");
            assert_eq!(cause.to_string(), "permission_denied");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(system.action_count(), 0);
    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
    assert_eq!(*log.lock().unwrap(), vec!["login", "permission"]);
}

#[tokio::test]
async fn test_failure_skips_every_later_stage() {
    let center = RouterCenter::new();
    let log = call_log();
    let last = RecordingInterceptor::passing("d").logging_to(&log);
    let router = MockHostRouter::with_prefix("shop", "router://shop")
        .interceptor(RecordingInterceptor::passing("a").logging_to(&log))
        .interceptor(RecordingInterceptor::passing("b").logging_to(&log))
        .interceptor(RecordingInterceptor::rejecting("c", "sold out").logging_to(&log))
        .interceptor(last.clone())
        .logging_to(&log);
    center.register(router.clone()).unwrap();

    let err = center
        .dispatch(RoutingRequest::new("router://shop/cart"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "interceptor `c` rejected the request: sold out"
    );
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    assert_eq!(last.count(), 0);
    assert_eq!(router.action_count(), 0);
}

#[tokio::test]
async fn test_completed_chain_runs_action_with_transformed_request() {
    let center = RouterCenter::new();
    let log = call_log();
    let router = MockHostRouter::with_prefix("user", "router://user")
        .interceptor(RecordingInterceptor::tagging("a", "session", "s1").logging_to(&log))
        .interceptor(RecordingInterceptor::tagging("b", "locale", "en").logging_to(&log))
        .interceptor(RecordingInterceptor::passing("c").logging_to(&log))
        .logging_to(&log);
    center.register(router.clone()).unwrap();

    let outcome = center
        .dispatch(RoutingRequest::new("router://user/profile"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c", "action:user"]);
    let requests = router.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("session"), Some("s1"));
    assert_eq!(requests[0].param("locale"), Some("en"));
}

#[tokio::test]
async fn test_stop_handles_the_request_without_action() {
    let center = RouterCenter::new();
    let after = RecordingInterceptor::passing("after");
    let router = MockHostRouter::with_prefix("web", "https://")
        .interceptor(RecordingInterceptor::stopping("external_browser"))
        .interceptor(after.clone());
    center.register(router.clone()).unwrap();

    let outcome = center
        .dispatch(RoutingRequest::new("https://example.com"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Intercepted);
    assert!(!outcome.is_completed());
    assert_eq!(after.count(), 0);
    assert_eq!(router.action_count(), 0);
}

#[tokio::test]
async fn test_standard_interceptors_compose() {
    let center = RouterCenter::new();
    let audited = RecordingInterceptor::passing("audit");
    let gate = interceptor_fn("login_gate", |request: RoutingRequest| {
        if request.param("token").is_some() {
            Ok(Flow::Next(request))
        } else {
            Err::<Flow, BoxError>("login required".into())
        }
    });
    let router = MockHostRouter::with_prefix("orders", "router://orders")
        .interceptor(LoggingInterceptor::named("orders"))
        .interceptor(TracingInterceptor::new(audited.clone(), "audit"))
        .interceptor(ConditionalInterceptor::new(
            |request: &RoutingRequest| request.uri_str().ends_with("/private"),
            gate,
        ));
    center.register(router.clone()).unwrap();

    center
        .dispatch(RoutingRequest::new("router://orders/list"))
        .await
        .unwrap();
    let err = center
        .dispatch(RoutingRequest::new("router://orders/private"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RouteError::InterceptorRejected { ref interceptor, .. } if interceptor == "login_gate"
    ));
    center
        .dispatch(
            RoutingRequest::builder()
                .uri("router://orders/private")
                .param("token", "t")
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(audited.count(), 3);
    assert_eq!(router.action_count(), 2);
}
