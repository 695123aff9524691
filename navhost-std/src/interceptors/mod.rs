//! Standard interceptors.

pub mod conditional;
pub mod func;
pub mod logging;
pub mod tracing;

pub use conditional::ConditionalInterceptor;
pub use func::{FnInterceptor, interceptor_fn};
pub use logging::LoggingInterceptor;
pub use self::tracing::TracingInterceptor;
