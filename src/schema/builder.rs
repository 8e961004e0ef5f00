//! Schema tree construction
//!
//! [`SchemaTreeBuilder`] is the interface a linker drives to hand over a
//! linked schema. It validates names and placement as nodes are added and
//! maintains the context-info maps:
//!
//! - a data node is entered in its lexical parent's map;
//! - a data node under a choice case is entered in the nearest data
//!   ancestor's map, with the case as context switch;
//! - a data node under an augment is entered in the augment target's map,
//!   with the augment as context switch.

use crate::error::{Error, Result};
use crate::names::{validate_identifier, validate_revision};
use crate::namespaces::{validate_namespace, SchemaId};
use crate::schema::context::SchemaNodeContextInfo;
use crate::schema::node::{ModuleHeader, NodeId, NodeKind, SchemaNode, SchemaTree};
use crate::types::TypeSpec;

/// Incremental builder of a [`SchemaTree`]
#[derive(Debug, Default)]
pub struct SchemaTreeBuilder {
    tree: SchemaTree,
}

impl SchemaTreeBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Modules
    // =========================================================================

    /// Add a module root
    pub fn add_module(
        &mut self,
        name: &str,
        namespace: &str,
        prefix: &str,
        revision: Option<&str>,
    ) -> Result<NodeId> {
        validate_identifier(name)?;
        validate_identifier(prefix)?;
        validate_namespace(namespace)?;
        let revision = revision.map(validate_revision).transpose()?;

        let duplicate = self.tree.modules().any(|id| {
            self.tree.node(id).name() == name
                && self.tree.module_revision(id) == revision.as_deref()
        });
        if duplicate {
            return Err(Error::Schema(format!(
                "module '{}' with revision {} is already defined",
                name,
                revision.as_deref().unwrap_or("<none>")
            )));
        }

        let id = NodeId::new(self.tree.nodes.len());
        let mut node = SchemaNode::new(SchemaId::new(name, namespace), NodeKind::Module, None);
        node.module = Some(ModuleHeader {
            prefix: prefix.to_string(),
            revision,
            imports: Vec::new(),
        });
        self.tree.nodes.push(node);
        self.tree.modules.push(id);
        Ok(id)
    }

    /// Record that `module` imports `imported`
    pub fn add_import(&mut self, module: NodeId, imported: NodeId) -> Result<()> {
        self.expect_kind(imported, &[NodeKind::Module])?;
        if module == imported {
            return Err(Error::Schema(format!(
                "module '{}' cannot import itself",
                self.tree.node(module).name()
            )));
        }
        let header = self.module_header_mut(module)?;
        if !header.imports.contains(&imported) {
            header.imports.push(imported);
        }
        Ok(())
    }

    // =========================================================================
    // Data nodes
    // =========================================================================

    /// Add a container
    pub fn add_container(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Container)
    }

    /// Add a list keyed by the named leaves
    ///
    /// Key leaves are added afterwards as ordinary leaves; [`build`]
    /// checks they exist.
    ///
    /// [`build`]: SchemaTreeBuilder::build
    pub fn add_list(&mut self, parent: NodeId, name: &str, keys: &[&str]) -> Result<NodeId> {
        let id = self.add_node(parent, name, NodeKind::List)?;
        self.tree.nodes[id.index()].keys = keys.iter().map(|k| k.to_string()).collect();
        Ok(id)
    }

    /// Add a leaf of the given resolved type
    pub fn add_leaf(&mut self, parent: NodeId, name: &str, type_spec: TypeSpec) -> Result<NodeId> {
        let id = self.add_node(parent, name, NodeKind::Leaf)?;
        self.tree.nodes[id.index()].type_spec = Some(type_spec);
        Ok(id)
    }

    /// Add a leaf-list of the given resolved type
    pub fn add_leaf_list(
        &mut self,
        parent: NodeId,
        name: &str,
        type_spec: TypeSpec,
    ) -> Result<NodeId> {
        let id = self.add_node(parent, name, NodeKind::LeafList)?;
        self.tree.nodes[id.index()].type_spec = Some(type_spec);
        Ok(id)
    }

    /// Add an anydata node
    pub fn add_anydata(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Anydata)
    }

    /// Add a notification at module level
    pub fn add_notification(&mut self, module: NodeId, name: &str) -> Result<NodeId> {
        self.expect_kind(module, &[NodeKind::Module])?;
        self.add_node(module, name, NodeKind::Notification)
    }

    /// Add an RPC at module level
    pub fn add_rpc(&mut self, module: NodeId, name: &str) -> Result<NodeId> {
        self.expect_kind(module, &[NodeKind::Module])?;
        self.add_node(module, name, NodeKind::Rpc)
    }

    /// Add the input of an RPC
    pub fn add_input(&mut self, rpc: NodeId) -> Result<NodeId> {
        self.expect_kind(rpc, &[NodeKind::Rpc])?;
        self.add_node(rpc, "input", NodeKind::Input)
    }

    /// Add the output of an RPC
    pub fn add_output(&mut self, rpc: NodeId) -> Result<NodeId> {
        self.expect_kind(rpc, &[NodeKind::Rpc])?;
        self.add_node(rpc, "output", NodeKind::Output)
    }

    // =========================================================================
    // Transparent nodes
    // =========================================================================

    /// Add a choice
    pub fn add_choice(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Choice)
    }

    /// Add a case to a choice
    pub fn add_case(&mut self, choice: NodeId, name: &str) -> Result<NodeId> {
        self.expect_kind(choice, &[NodeKind::Choice])?;
        self.add_node(choice, name, NodeKind::Case)
    }

    /// Add an augment of `target` declared in `module`
    ///
    /// Children added to the returned node become children of the target
    /// in the context-info sense.
    pub fn add_augment(&mut self, module: NodeId, name: &str, target: NodeId) -> Result<NodeId> {
        self.expect_kind(module, &[NodeKind::Module])?;
        let target_kind = self.node(target)?.kind();
        if target_kind.is_terminal() || !target_kind.is_data_node() {
            return Err(Error::Schema(format!(
                "augment target {} is a {}, not an interior data node",
                self.tree.path_of(target),
                target_kind
            )));
        }
        let id = self.add_node(module, name, NodeKind::Augment)?;
        self.tree.nodes[id.index()].augment_target = Some(target);
        Ok(id)
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Freeze the builder into an immutable tree
    pub fn build(self) -> Result<SchemaTree> {
        for node in &self.tree.nodes {
            if node.kind() != NodeKind::List {
                continue;
            }
            for key in node.keys() {
                let found = node.children().any(|child| {
                    let child = self.tree.node(child);
                    child.kind() == NodeKind::Leaf && child.name() == key
                });
                if !found {
                    return Err(Error::Schema(format!(
                        "list '{}' names key '{}' which is not one of its leaves",
                        node.name(),
                        key
                    )));
                }
            }
        }
        Ok(self.tree)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn node(&self, id: NodeId) -> Result<&SchemaNode> {
        self.tree
            .get(id)
            .ok_or_else(|| Error::Schema(format!("unknown schema node {}", id)))
    }

    fn expect_kind(&self, id: NodeId, kinds: &[NodeKind]) -> Result<()> {
        let kind = self.node(id)?.kind();
        if kinds.contains(&kind) {
            Ok(())
        } else {
            Err(Error::Schema(format!(
                "{} is a {}, expected one of {:?}",
                self.tree.path_of(id),
                kind,
                kinds
            )))
        }
    }

    fn module_header_mut(&mut self, module: NodeId) -> Result<&mut ModuleHeader> {
        self.expect_kind(module, &[NodeKind::Module])?;
        self.tree.nodes[module.index()]
            .module
            .as_mut()
            .ok_or_else(|| Error::Schema(format!("module {} has no header", module)))
    }

    fn check_placement(&self, parent: NodeId, kind: NodeKind) -> Result<()> {
        let parent_kind = self.node(parent)?.kind();
        let legal = match (parent_kind, kind) {
            (p, _) if p.is_terminal() => false,
            (NodeKind::Choice, k) => k == NodeKind::Case,
            (_, NodeKind::Case) => false,
            (NodeKind::Rpc, k) => matches!(k, NodeKind::Input | NodeKind::Output),
            (_, NodeKind::Input | NodeKind::Output) => false,
            (NodeKind::Module, _) => true,
            (_, NodeKind::Rpc | NodeKind::Notification | NodeKind::Augment) => false,
            (NodeKind::Anydata, _) => false,
            _ => true,
        };
        if legal {
            Ok(())
        } else {
            Err(Error::Schema(format!(
                "a {} cannot be placed under {} ({})",
                kind,
                self.tree.path_of(parent),
                parent_kind
            )))
        }
    }

    /// Data ancestor whose context map receives a child of `parent`, and
    /// the closest augment or case passed on the way
    fn context_holder(&self, parent: NodeId) -> (NodeId, Option<NodeId>) {
        let mut switched = None;
        let mut current = parent;
        loop {
            let node = self.tree.node(current);
            let next = match node.kind() {
                NodeKind::Case => {
                    switched.get_or_insert(current);
                    node.parent()
                }
                NodeKind::Choice => node.parent(),
                NodeKind::Augment => {
                    switched.get_or_insert(current);
                    node.augment_target()
                }
                _ => return (current, switched),
            };
            match next {
                Some(next) => current = next,
                None => return (current, switched),
            }
        }
    }

    fn add_node(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        validate_identifier(name)?;
        self.check_placement(parent, kind)?;

        let module = self.tree.module_of(parent);
        let schema_id = SchemaId::new(name, self.tree.node(module).namespace());

        if self.tree.node(parent).children.contains_key(&schema_id) {
            return Err(Error::Schema(format!(
                "{} already has a child named '{}'",
                self.tree.path_of(parent),
                name
            )));
        }

        let id = NodeId::new(self.tree.nodes.len());

        if kind.is_data_node() {
            let (holder, switched) = self.context_holder(parent);
            let holder_node = self.tree.node(holder);
            if holder_node.context.contains_key(&schema_id) {
                return Err(Error::Schema(format!(
                    "{} already holds a data node named '{}'",
                    self.tree.path_of(holder),
                    name
                )));
            }
            let mut info = SchemaNodeContextInfo::new(id);
            if let Some(switched) = switched {
                info = info
                    .with_context_switch(switched)
                    .with_anydata_parent(holder_node.kind() == NodeKind::Anydata);
            }
            self.tree.nodes[holder.index()]
                .context
                .insert(schema_id.clone(), info);
        }

        self.tree.nodes[parent.index()]
            .children
            .insert(schema_id.clone(), id);
        self.tree
            .nodes
            .push(SchemaNode::new(schema_id, kind, Some(parent)));
        Ok(id)
    }
}
