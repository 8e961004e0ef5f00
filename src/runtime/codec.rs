//! Codec dispatch
//!
//! Serializers are bound to format names ("json", "xml", ...) in a
//! [`SerializerRegistry`]. A [`CodecDispatcher`] looks a serializer up per
//! call and hands it a [`SerializerContext`] that was built once, when the
//! dispatcher was created, from the registry's schema tree.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::model::{
    CompositeData, CompositeStream, DataNode, KeyLeaf, LeafListKey, ListKey, NodeKey,
};
use crate::runtime::json::JsonSerializer;
use crate::runtime::registry::ModelRegistry;
use crate::runtime::xml::XmlSerializer;
use crate::schema::{NodeId, NodeKind, SchemaTree};
use crate::types::TypedValue;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// JSON format name
pub const FORMAT_JSON: &str = "json";

/// XML format name
pub const FORMAT_XML: &str = "xml";

// =============================================================================
// Serializer contract
// =============================================================================

/// A wire-format codec
pub trait Serializer: Send + Sync {
    /// Decode an external stream into a data tree
    fn decode(&self, stream: &CompositeStream, context: &SerializerContext)
        -> Result<CompositeData>;

    /// Encode a data tree into an external stream
    fn encode(&self, data: &CompositeData, context: &SerializerContext)
        -> Result<CompositeStream>;
}

/// Serializers keyed by format name
#[derive(Default)]
pub struct SerializerRegistry {
    serializers: DashMap<String, Arc<dyn Serializer>>,
}

impl SerializerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the JSON and XML serializers bound
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(FORMAT_JSON, Arc::new(JsonSerializer::new()));
        registry.register(FORMAT_XML, Arc::new(XmlSerializer::new()));
        registry
    }

    /// Bind a serializer to a format, returning the one it replaces
    pub fn register(
        &self,
        format: impl Into<String>,
        serializer: Arc<dyn Serializer>,
    ) -> Option<Arc<dyn Serializer>> {
        self.serializers.insert(format.into(), serializer)
    }

    /// Unbind a format
    pub fn unregister(&self, format: &str) -> Option<Arc<dyn Serializer>> {
        self.serializers.remove(format).map(|(_, s)| s)
    }

    /// Serializer bound to a format
    pub fn get(&self, format: &str) -> Option<Arc<dyn Serializer>> {
        self.serializers.get(format).map(|s| Arc::clone(s.value()))
    }

    /// Bound format names, sorted
    pub fn formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.serializers.iter().map(|e| e.key().clone()).collect();
        formats.sort();
        formats
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

// =============================================================================
// Serializer context
// =============================================================================

/// Read-only schema view shared by every codec call
#[derive(Debug)]
pub struct SerializerContext {
    tree: Arc<SchemaTree>,
    limits: Limits,
    by_name: HashMap<String, NodeId>,
    by_namespace: HashMap<String, NodeId>,
}

impl SerializerContext {
    /// Build the context from a schema tree
    pub fn new(tree: Arc<SchemaTree>, limits: Limits) -> Self {
        let mut by_name = HashMap::new();
        let mut by_namespace = HashMap::new();
        for module in tree.modules() {
            let node = tree.node(module);
            // newest revision wins for name lookups
            let newer = match by_name.get(node.name()) {
                Some(&known) => tree.module_revision(module) > tree.module_revision(known),
                None => true,
            };
            if newer {
                by_name.insert(node.name().to_string(), module);
                by_namespace.insert(node.namespace().to_string(), module);
            }
        }
        Self {
            tree,
            limits,
            by_name,
            by_namespace,
        }
    }

    /// The schema tree
    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    /// Limits applied by codecs
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Module root by module name
    pub fn module_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Module root by namespace
    pub fn module_by_namespace(&self, namespace: &str) -> Option<NodeId> {
        self.by_namespace.get(namespace).copied()
    }

    /// Name of the module that owns a namespace
    pub fn module_name_for(&self, namespace: &str) -> Result<&str> {
        self.module_by_namespace(namespace)
            .map(|module| self.tree.node(module).name())
            .ok_or_else(|| Error::Encode(format!("no module defines namespace {}", namespace)))
    }

    /// Convert a leaf literal through the schema node's type
    pub fn leaf_value(&self, node: NodeId, literal: &str) -> Result<TypedValue> {
        let schema = self.tree.node(node);
        let spec = schema.type_spec().ok_or_else(|| {
            Error::Decode(format!("{} carries no type", self.tree.path_of(node)))
        })?;
        spec.parse_value_with(literal, &self.limits)
    }

    /// Key of a decoded list entry, taken from its key leaves in key order
    pub fn list_entry_key(&self, list: NodeId, children: &[DataNode]) -> Result<NodeKey> {
        let schema = self.tree.node(list);
        self.limits.check_key_leafs(schema.keys().len())?;
        let mut key = ListKey::new(schema.id().clone());
        for key_name in schema.keys() {
            let leaf = children
                .iter()
                .find(|c| c.schema_id().name() == key_name)
                .and_then(|c| c.value().map(|v| (c.schema_id(), v)))
                .ok_or_else(|| {
                    Error::Decode(format!(
                        "entry of list {} lacks key leaf '{}'",
                        self.tree.path_of(list),
                        key_name
                    ))
                })?;
            key.add_key_leaf(KeyLeaf::new(leaf.0.clone(), leaf.1.clone()));
        }
        Ok(NodeKey::List(key))
    }

    /// Data node for a decoded leaf or leaf-list value
    pub fn value_node(&self, node: NodeId, literal: &str) -> Result<DataNode> {
        let schema = self.tree.node(node);
        let value = self.leaf_value(node, literal)?;
        let key = match schema.kind() {
            NodeKind::LeafList => {
                NodeKey::LeafList(LeafListKey::new(schema.id().clone(), value.clone()))
            }
            _ => NodeKey::Schema(schema.id().clone()),
        };
        Ok(DataNode::leaf(key, value))
    }

    /// Data node for a decoded inner node
    pub fn inner_node(&self, node: NodeId, children: Vec<DataNode>) -> Result<DataNode> {
        let schema = self.tree.node(node);
        let key = match schema.kind() {
            NodeKind::List => self.list_entry_key(node, &children)?,
            _ => NodeKey::Schema(schema.id().clone()),
        };
        Ok(DataNode::inner(key, children))
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Format-keyed encode/decode entry point
#[derive(Debug)]
pub struct CodecDispatcher {
    serializers: Arc<SerializerRegistry>,
    context: Arc<SerializerContext>,
}

impl CodecDispatcher {
    /// Create a dispatcher for a registry's schema tree
    pub fn new(registry: &ModelRegistry, serializers: Arc<SerializerRegistry>) -> Self {
        let context = SerializerContext::new(
            Arc::clone(registry.tree()),
            registry.config().limits.clone(),
        );
        Self {
            serializers,
            context: Arc::new(context),
        }
    }

    /// The shared serializer context
    pub fn context(&self) -> &Arc<SerializerContext> {
        &self.context
    }

    /// The serializer registry
    pub fn serializers(&self) -> &Arc<SerializerRegistry> {
        &self.serializers
    }

    /// Decode a stream with the serializer bound to `format`
    pub fn decode(&self, stream: &CompositeStream, format: &str) -> Result<CompositeData> {
        self.context.limits().check_payload_size(stream.payload().len())?;
        let serializer = self.serializer(format)?;
        serializer.decode(stream, &self.context)
    }

    /// Encode data with the serializer bound to `format`
    pub fn encode(&self, data: &CompositeData, format: &str) -> Result<CompositeStream> {
        let serializer = self.serializer(format)?;
        serializer.encode(data, &self.context)
    }

    fn serializer(&self, format: &str) -> Result<Arc<dyn Serializer>> {
        self.serializers.get(format).ok_or_else(|| {
            tracing::warn!(format, "data format is not registered");
            Error::FormatNotRegistered(format.to_string())
        })
    }
}
