//! Compiled schema tree
//!
//! This module holds the linked schema arena, the builder a linker uses
//! to produce it, and the resolver that maps structured paths back onto
//! schema nodes.

pub mod builder;
pub mod context;
pub mod node;
pub mod path;
pub mod resolver;

// Re-exports
pub use builder::SchemaTreeBuilder;
pub use context::SchemaNodeContextInfo;
pub use node::{ModuleHeader, NodeId, NodeKind, SchemaNode, SchemaTree};
pub use path::SchemaPath;
pub use resolver::{AnydataMembers, NoAnydata, SchemaContextResolver};
