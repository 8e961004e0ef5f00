//! Instance addressing and data
//!
//! This module provides resource identifiers and the data trees codecs
//! produce and consume.

pub mod data;
pub mod node_key;
pub mod resource_id;

// Re-exports
pub use data::{CompositeData, CompositeStream, DataNode, DataNodeContent, ResourceData};
pub use node_key::{KeyLeaf, LeafListKey, ListKey, NodeKey};
pub use resource_id::{ResourceId, ResourceIdBuilder};
