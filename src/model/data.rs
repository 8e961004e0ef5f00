//! Instance data exchanged with codecs
//!
//! Decoders turn an external [`CompositeStream`] into [`CompositeData`];
//! encoders go the other way. The data tree itself is made of
//! [`DataNode`]s keyed by the same [`NodeKey`]s a resource identifier
//! uses.

use crate::error::{Error, Result};
use crate::model::node_key::NodeKey;
use crate::model::resource_id::ResourceId;
use crate::namespaces::SchemaId;
use crate::types::TypedValue;

// =============================================================================
// Data nodes
// =============================================================================

/// Content of a data node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataNodeContent {
    /// Container, list entry or RPC body with ordered children
    Inner(Vec<DataNode>),
    /// Leaf or leaf-list entry with its value
    Leaf(TypedValue),
}

/// One node of an instance data tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataNode {
    key: NodeKey,
    content: DataNodeContent,
}

impl DataNode {
    /// Inner node with children
    pub fn inner(key: NodeKey, children: Vec<DataNode>) -> Self {
        Self {
            key,
            content: DataNodeContent::Inner(children),
        }
    }

    /// Leaf node with a value
    pub fn leaf(key: NodeKey, value: TypedValue) -> Self {
        Self {
            key,
            content: DataNodeContent::Leaf(value),
        }
    }

    /// Key of this node relative to its parent
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Identifier of the schema node this instance belongs to
    pub fn schema_id(&self) -> &SchemaId {
        self.key.schema_id()
    }

    /// Node content
    pub fn content(&self) -> &DataNodeContent {
        &self.content
    }

    /// Children of an inner node; empty for leaves
    pub fn children(&self) -> &[DataNode] {
        match &self.content {
            DataNodeContent::Inner(children) => children,
            DataNodeContent::Leaf(_) => &[],
        }
    }

    /// Value of a leaf node
    pub fn value(&self) -> Option<&TypedValue> {
        match &self.content {
            DataNodeContent::Leaf(value) => Some(value),
            DataNodeContent::Inner(_) => None,
        }
    }

    /// Check if this node carries a value
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, DataNodeContent::Leaf(_))
    }

    /// Append a child to an inner node
    pub fn add_child(&mut self, child: DataNode) -> Result<()> {
        match &mut self.content {
            DataNodeContent::Inner(children) => {
                children.push(child);
                Ok(())
            }
            DataNodeContent::Leaf(_) => Err(Error::Encode(format!(
                "leaf '{}' cannot hold child '{}'",
                self.key.schema_id().name(),
                child.schema_id().name()
            ))),
        }
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&DataNode> {
        self.children().iter().find(|c| c.schema_id().name() == name)
    }

    /// Nesting depth of the subtree rooted here (a leaf is 1)
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(DataNode::depth).max().unwrap_or(0)
    }
}

// =============================================================================
// Composite data and streams
// =============================================================================

/// Data nodes rooted at a resource identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceData {
    resource_id: Option<ResourceId>,
    data_nodes: Vec<DataNode>,
}

impl ResourceData {
    /// Data rooted at the top of the data tree
    pub fn new(data_nodes: Vec<DataNode>) -> Self {
        Self {
            resource_id: None,
            data_nodes,
        }
    }

    /// Root the data at a resource identifier
    pub fn with_resource_id(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    /// Resource identifier the data nodes hang from
    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.resource_id.as_ref()
    }

    /// Top-level data nodes
    pub fn data_nodes(&self) -> &[DataNode] {
        &self.data_nodes
    }

    /// Append a top-level data node
    pub fn add_data_node(&mut self, node: DataNode) {
        self.data_nodes.push(node);
    }
}

/// Decoded form of a composite stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeData {
    resource_data: ResourceData,
}

impl CompositeData {
    /// Wrap resource data
    pub fn new(resource_data: ResourceData) -> Self {
        Self { resource_data }
    }

    /// The resource data
    pub fn resource_data(&self) -> &ResourceData {
        &self.resource_data
    }

    /// Take the resource data out
    pub fn into_resource_data(self) -> ResourceData {
        self.resource_data
    }
}

/// Encoded payload, optionally tagged with the resource it addresses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeStream {
    resource_id: Option<String>,
    payload: Vec<u8>,
}

impl CompositeStream {
    /// Stream over a payload
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            resource_id: None,
            payload: payload.into(),
        }
    }

    /// Tag the stream with a resource identifier string
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Resource identifier string, if tagged
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Raw payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as UTF-8 text
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.payload)
            .map_err(|e| Error::Decode(format!("payload is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, value: TypedValue) -> DataNode {
        DataNode::leaf(NodeKey::schema(name, "urn:t"), value)
    }

    #[test]
    fn test_inner_node_children() {
        let mut node = DataNode::inner(NodeKey::schema("top", "urn:t"), vec![]);
        node.add_child(leaf("a", TypedValue::Int8(1))).unwrap();
        node.add_child(leaf("b", TypedValue::from("x"))).unwrap();
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.child("b").and_then(DataNode::value), Some(&TypedValue::from("x")));
        assert_eq!(node.depth(), 2);
    }

    #[test]
    fn test_leaf_rejects_children() {
        let mut node = leaf("a", TypedValue::Int8(1));
        assert!(node.add_child(leaf("b", TypedValue::Int8(2))).is_err());
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn test_stream_text() {
        let stream = CompositeStream::new(vec![0xff, 0xfe]);
        assert!(matches!(stream.as_str(), Err(Error::Decode(_))));
        let stream = CompositeStream::new("{}").with_resource_id("/top");
        assert_eq!(stream.as_str().unwrap(), "{}");
        assert_eq!(stream.resource_id(), Some("/top"));
    }
}
