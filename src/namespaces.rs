//! YANG namespace handling
//!
//! This module provides the schema identifier (node name qualified by its
//! module namespace) and namespace URI validation.

use crate::error::Result;
use std::fmt;
use url::Url;

/// Namespace URI of a YANG module
pub type NamespaceUri = String;

/// Schema identifier - a node name qualified by its module namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId {
    /// Node name
    pub name: String,
    /// Namespace URI of the defining module
    pub namespace: NamespaceUri,
}

impl SchemaId {
    /// Create a new schema identifier
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Get the node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

/// Validate that a module namespace is an absolute URI
///
/// YANG namespaces are usually URNs (`urn:ietf:params:xml:ns:yang:...`),
/// which parse as URLs with an opaque path.
pub fn validate_namespace(namespace: &str) -> Result<Url> {
    Ok(Url::parse(namespace)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_id_creation() {
        let id = SchemaId::new("interfaces", "urn:ietf:params:xml:ns:yang:ietf-interfaces");
        assert_eq!(id.name(), "interfaces");
        assert_eq!(id.namespace(), "urn:ietf:params:xml:ns:yang:ietf-interfaces");
    }

    #[test]
    fn test_schema_id_display() {
        let id = SchemaId::new("a", "urn:x");
        assert_eq!(id.to_string(), "{urn:x}a");
        assert_eq!(SchemaId::new("a", "").to_string(), "a");
    }

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("urn:ietf:params:xml:ns:yang:ietf-ip").is_ok());
        assert!(validate_namespace("http://example.com/ns/test").is_ok());
        assert!(validate_namespace("not a uri").is_err());
    }
}
