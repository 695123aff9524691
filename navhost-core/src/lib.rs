//! # navhost-core
//!
//! Core contracts for the navhost request routing engine.
//!
//! This crate has minimal dependencies and is meant to be imported by feature
//! modules that only need to implement a host router or an interceptor,
//! without pulling in the registry and dispatch center from `navhost-std`.
//!
//! # Pieces
//!
//! ## Requests ([`RoutingRequest`])
//!
//! An immutable navigation request: an opaque [`Uri`], an optional result
//! code, an optional bound execution context and free-form parameters.
//!
//! ## Host Routers ([`HostRouter`])
//!
//! Implemented by each module. A host router claims URIs through
//! [`HostMatcher::is_match`], lists the interceptors that wrap a dispatch and
//! performs the final action.
//!
//! ## Interceptors ([`Interceptor`])
//!
//! Ordered stages run before the action. Each one continues, stops, suspends
//! into a [`Continuation`], or rejects the request.
//!
//! ## Chain ([`Chain`])
//!
//! The kernel that runs interceptors in order and ends in the action.
//!
//! ## Resolution ([`HostResolver`])
//!
//! Builds a router for a host name on demand, for name-based registration.
//!
//! # Error Types
//!
//! - [`RouteError`] - Dispatch failures
//! - [`RegistryError`] - Rejected registrations

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod chain;
mod error;
mod host;
mod interceptor;
mod request;
mod resolver;
mod uri;

// Re-exports
pub use chain::{Chain, Continuation, DispatchOutcome};
pub use error::{BoxError, RegistryError, RouteError};
pub use host::{DynHostRouter, HostMatcher, HostRouter, SharedHostRouter};
pub use interceptor::{DynInterceptor, Flow, Interceptor, Park, SharedInterceptor, Suspension};
pub use request::{RequestContext, RoutingRequest, RoutingRequestBuilder};
pub use resolver::HostResolver;
pub use uri::Uri;
