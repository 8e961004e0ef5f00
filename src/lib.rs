//! # yangschema
//!
//! A YANG schema core for Rust: built-in types and range restrictions, a
//! linked schema tree with context resolution across augments, resource
//! identifiers, and a model registry with pluggable wire-format codecs.
//!
//! ## Features
//!
//! - Literal conversion for every YANG built-in type, including derived
//!   types, leafrefs and ordered unions
//! - Range restrictions that narrow monotonically along typedef chains
//! - Schema context resolution that follows augments into imported modules
//! - Resource identifiers with list and leaf-list keys
//! - Concurrent model registry and format-keyed codec dispatch
//! - JSON and XML serializers
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yangschema::runtime::{ModelRegistrationParam, ModelRegistry, ModuleId, RegistryConfig};
//! use yangschema::schema::{SchemaPath, SchemaTreeBuilder};
//! use yangschema::types::{BuiltinType, TypeSpec};
//!
//! let mut builder = SchemaTreeBuilder::new();
//! let module = builder.add_module("system", "urn:example:system", "sys", None)?;
//! let top = builder.add_container(module, "system")?;
//! builder.add_leaf(top, "host-name", TypeSpec::builtin(BuiltinType::String))?;
//!
//! let registry = ModelRegistry::new(Arc::new(builder.build()?), RegistryConfig::default());
//! registry.register_model(
//!     &ModelRegistrationParam::new("system-model").with_module(ModuleId::new("system", None)),
//! )?;
//!
//! let info = registry.resolve_context(&SchemaPath::new("system", ["system", "hostName"]))?;
//! assert_eq!(registry.tree().node(info.schema_node()).name(), "host-name");
//! # Ok::<(), yangschema::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod locations;
pub mod names;
pub mod namespaces;

// Type system
pub mod types;

// Schema tree
pub mod schema;

// Instance addressing and data
pub mod model;

// Registry and codecs
pub mod runtime;

// Re-exports for convenience
pub use error::{Error, Result};

/// Version of the yangschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// YANG version implemented by the type system
pub const YANG_VERSION: &str = "1.1";
