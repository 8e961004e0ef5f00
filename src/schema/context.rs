//! Schema node context information
//!
//! Every node that can hold data children carries a context-info map from
//! child identifier to [`SchemaNodeContextInfo`]. An entry names the schema
//! node that actually defines the child, plus the node through which the
//! child was brought into this position (an augment or a choice case).

use crate::schema::node::NodeId;

/// Effective schema definition reached from a parent's context-info map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaNodeContextInfo {
    schema_node: NodeId,
    context_switched_node: Option<NodeId>,
    is_anydata_parent: bool,
}

impl SchemaNodeContextInfo {
    /// Context info for a child in its lexical position
    pub fn new(schema_node: NodeId) -> Self {
        Self {
            schema_node,
            context_switched_node: None,
            is_anydata_parent: false,
        }
    }

    /// Mark the node that redirected the child into this position
    pub fn with_context_switch(mut self, switched: NodeId) -> Self {
        self.context_switched_node = Some(switched);
        self
    }

    /// Mark the child as nested beneath an anydata parent
    pub fn with_anydata_parent(mut self, flag: bool) -> Self {
        self.is_anydata_parent = flag;
        self
    }

    /// The schema node that defines the child
    pub fn schema_node(&self) -> NodeId {
        self.schema_node
    }

    /// Augment or case the child was entered through, if any
    pub fn context_switched_node(&self) -> Option<NodeId> {
        self.context_switched_node
    }

    /// True when the child is legal beneath an anydata node
    pub fn is_anydata_parent(&self) -> bool {
        self.is_anydata_parent
    }

    /// Copy used when registering a node shape under an anydata location
    ///
    /// Node handles are copied by reference: the copy points at the same
    /// schema node and context-switch node as the original.
    pub fn anydata_copy(&self) -> Self {
        Self {
            is_anydata_parent: true,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anydata_copy_shares_handles() {
        let info = SchemaNodeContextInfo::new(NodeId::new(4)).with_context_switch(NodeId::new(2));
        let copy = info.anydata_copy();
        assert!(copy.is_anydata_parent());
        assert!(!info.is_anydata_parent());
        assert_eq!(copy.schema_node(), info.schema_node());
        assert_eq!(copy.context_switched_node(), Some(NodeId::new(2)));
    }
}
