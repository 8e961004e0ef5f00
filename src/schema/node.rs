//! Schema nodes and the schema tree arena
//!
//! All nodes of a linked schema live in one [`SchemaTree`] arena and refer
//! to each other through [`NodeId`] handles. The tree is immutable once
//! built and is shared by reference between the registry, the resolver
//! and the codecs.

use crate::namespaces::SchemaId;
use crate::schema::context::SchemaNodeContextInfo;
use crate::types::TypeSpec;
use indexmap::IndexMap;
use std::fmt;

/// Stable handle of a node inside its [`SchemaTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Handle for an arena index
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Arena index of this handle
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Node kinds
// =============================================================================

/// Statement kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Module root
    Module,
    /// Container
    Container,
    /// Keyed list
    List,
    /// Leaf
    Leaf,
    /// Leaf-list
    LeafList,
    /// Remote procedure call
    Rpc,
    /// RPC input
    Input,
    /// RPC output
    Output,
    /// Notification
    Notification,
    /// Anydata
    Anydata,
    /// Augment
    Augment,
    /// Choice
    Choice,
    /// Choice case
    Case,
}

impl NodeKind {
    /// Check if nodes of this kind appear in instance data
    ///
    /// Only data nodes are entered into context-info maps; augments,
    /// choices and cases are transparent.
    pub fn is_data_node(&self) -> bool {
        !matches!(
            self,
            NodeKind::Module | NodeKind::Augment | NodeKind::Choice | NodeKind::Case
        )
    }

    /// Check if nodes of this kind carry a value instead of children
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::LeafList)
    }

    /// YANG statement keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
            NodeKind::Rpc => "rpc",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Notification => "notification",
            NodeKind::Anydata => "anydata",
            NodeKind::Augment => "augment",
            NodeKind::Choice => "choice",
            NodeKind::Case => "case",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Module-level header data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHeader {
    /// Module prefix
    pub prefix: String,
    /// Revision date, canonical `YYYY-MM-DD`
    pub revision: Option<String>,
    /// Imported modules, in declaration order
    pub imports: Vec<NodeId>,
}

// =============================================================================
// Schema node
// =============================================================================

/// A compiled schema node
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) id: SchemaId,
    pub(crate) kind: NodeKind,
    pub(crate) attribute_name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: IndexMap<SchemaId, NodeId>,
    pub(crate) context: IndexMap<SchemaId, SchemaNodeContextInfo>,
    pub(crate) type_spec: Option<TypeSpec>,
    pub(crate) keys: Vec<String>,
    pub(crate) module: Option<ModuleHeader>,
    pub(crate) augment_target: Option<NodeId>,
}

impl SchemaNode {
    pub(crate) fn new(id: SchemaId, kind: NodeKind, parent: Option<NodeId>) -> Self {
        let attribute_name = crate::names::attribute_name(id.name());
        Self {
            id,
            kind,
            attribute_name,
            parent,
            children: IndexMap::new(),
            context: IndexMap::new(),
            type_spec: None,
            keys: Vec::new(),
            module: None,
            augment_target: None,
        }
    }

    /// Identifier (name and namespace)
    pub fn id(&self) -> &SchemaId {
        &self.id
    }

    /// Node name
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Namespace of the defining module
    pub fn namespace(&self) -> &str {
        self.id.namespace()
    }

    /// Statement kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Camel-cased attribute name used for path matching
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Lexical parent
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Lexical children, in declaration order
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    /// Context-info map entries, in insertion order
    pub fn context_infos(&self) -> impl Iterator<Item = &SchemaNodeContextInfo> {
        self.context.values()
    }

    /// Context info for a child identifier
    pub fn context_info(&self, id: &SchemaId) -> Option<&SchemaNodeContextInfo> {
        self.context.get(id)
    }

    /// Resolved type of a leaf or leaf-list
    pub fn type_spec(&self) -> Option<&TypeSpec> {
        self.type_spec.as_ref()
    }

    /// Key leaf names of a list, in key order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Module header, present on module roots only
    pub fn module_header(&self) -> Option<&ModuleHeader> {
        self.module.as_ref()
    }

    /// Target of an augment node
    pub fn augment_target(&self) -> Option<NodeId> {
        self.augment_target
    }
}

// =============================================================================
// Schema tree
// =============================================================================

/// Immutable arena of linked schema nodes
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) modules: Vec<NodeId>,
}

impl SchemaTree {
    /// Node behind a handle
    ///
    /// Handles are only meaningful for the tree that issued them; a
    /// foreign handle panics like an out-of-bounds index.
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Node behind a handle, if the handle is in range
    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Module roots, in declaration order
    pub fn modules(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.modules.iter().copied()
    }

    /// Find a module root by name and optional revision
    ///
    /// Without a revision, the newest revision of the module wins.
    pub fn find_module(&self, name: &str, revision: Option<&str>) -> Option<NodeId> {
        let mut candidates = self
            .modules
            .iter()
            .copied()
            .filter(|id| self.node(*id).name() == name);

        match revision {
            Some(rev) => candidates.find(|id| self.module_revision(*id) == Some(rev)),
            None => candidates.max_by(|a, b| self.module_revision(*a).cmp(&self.module_revision(*b))),
        }
    }

    /// Find a module root by namespace
    pub fn module_by_namespace(&self, namespace: &str) -> Option<NodeId> {
        self.modules
            .iter()
            .copied()
            .find(|id| self.node(*id).namespace() == namespace)
    }

    /// Revision of a module root
    pub fn module_revision(&self, module: NodeId) -> Option<&str> {
        self.node(module)
            .module_header()
            .and_then(|header| header.revision.as_deref())
    }

    /// Imports of a module root, in declaration order
    pub fn imports(&self, module: NodeId) -> &[NodeId] {
        self.node(module)
            .module_header()
            .map(|header| header.imports.as_slice())
            .unwrap_or(&[])
    }

    /// Module root that lexically owns a node
    pub fn module_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.node(id).parent() {
            id = parent;
        }
        id
    }

    /// Data child of `parent` with the given name, looked up in its
    /// context-info map
    ///
    /// A namespace narrows the match when given; otherwise the first child
    /// with that name wins.
    pub fn data_child(
        &self,
        parent: NodeId,
        name: &str,
        namespace: Option<&str>,
    ) -> Option<&SchemaNodeContextInfo> {
        self.node(parent).context_infos().find(|info| {
            let child = self.node(info.schema_node());
            child.name() == name && namespace.map_or(true, |ns| child.namespace() == ns)
        })
    }

    /// Slash-separated lexical path of a node, for messages
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = vec![self.node(id).name().to_string()];
        let mut current = id;
        while let Some(parent) = self.node(current).parent() {
            names.push(self.node(parent).name().to_string());
            current = parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }
}
