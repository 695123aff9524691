//! Error types for navhost.
//!
//! - [`RouteError`] - Failures surfaced to the caller of a dispatch
//! - [`RegistryError`] - Rejected registrations
//!
//! Resolution failures during name-based registration are deliberately not
//! represented here: they are absorbed by the registry.

use thiserror::Error;

/// A boxed error type for causes crafted by collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by a dispatch.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The request has no URI, or a host router could not interpret it.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No registered host router accepted the URI.
    #[error("no host router accepts `{0}`")]
    TargetNotFound(String),

    /// An interceptor short-circuited the chain with a failure.
    #[error("interceptor `{interceptor}` rejected the request: {cause}")]
    InterceptorRejected {
        /// Name of the rejecting interceptor.
        interceptor: String,
        /// The failure, exactly as the interceptor produced it.
        #[source]
        cause: BoxError,
    },

    /// The host router's action failed.
    #[error("dispatch action failed: {0}")]
    Action(#[source] BoxError),
}

impl RouteError {
    /// The URI carried by a [`RouteError::TargetNotFound`].
    pub fn target(&self) -> Option<&str> {
        match self {
            RouteError::TargetNotFound(uri) => Some(uri),
            _ => None,
        }
    }

    /// The interceptor's cause carried by a [`RouteError::InterceptorRejected`].
    pub fn rejection(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            RouteError::InterceptorRejected { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<BoxError> for RouteError {
    fn from(err: BoxError) -> Self {
        RouteError::Action(err)
    }
}

/// Errors from registry mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registration argument is unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_not_found_display() {
        let err = RouteError::TargetNotFound("unknown://x".into());
        assert_eq!(err.to_string(), "no host router accepts `unknown://x`");
        assert_eq!(err.target(), Some("unknown://x"));
        assert!(err.rejection().is_none());
    }

    #[test]
    fn test_rejection_keeps_cause() {
        let err = RouteError::InterceptorRejected {
            interceptor: "permission".into(),
            cause: "permission_denied".into(),
        };
        assert_eq!(
            err.rejection().map(ToString::to_string).as_deref(),
            Some("permission_denied")
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
