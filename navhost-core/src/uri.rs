//! Opaque URI value.

use std::{fmt, sync::Arc};

/// The target of a routing request.
///
/// The core treats a `Uri` as an opaque string: scheme, host and path are
/// interpreted by host routers only. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(Arc<str>);

impl Uri {
    /// Create a URI from any string-like value.
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uri({:?})", &*self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for Uri {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_is_opaque() {
        let uri = Uri::from("not a url at all");
        assert_eq!(uri.as_str(), "not a url at all");
        assert_eq!(uri.to_string(), "not a url at all");
    }

    #[test]
    fn test_uri_equality() {
        let a = Uri::from("system://call_phone");
        let b = Uri::from(String::from("system://call_phone"));
        assert_eq!(a, b);
        assert_eq!(a, "system://call_phone");
        assert_eq!(format!("{a:?}"), "Uri(\"system://call_phone\")");
    }
}
