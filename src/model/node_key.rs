//! Node keys
//!
//! A node key is one step of a resource identifier: a plain schema
//! identifier, a list entry selected by its key leaves, or a leaf-list
//! entry selected by its value.

use crate::namespaces::SchemaId;
use crate::types::TypedValue;
use std::fmt;

/// One named key leaf of a list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyLeaf {
    schema: SchemaId,
    value: TypedValue,
}

impl KeyLeaf {
    /// Create a key leaf
    pub fn new(schema: SchemaId, value: TypedValue) -> Self {
        Self { schema, value }
    }

    /// Key leaf identifier
    pub fn schema_id(&self) -> &SchemaId {
        &self.schema
    }

    /// Key leaf value
    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// Key of a list entry: the list identifier plus its key leaves in order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    schema: SchemaId,
    key_leafs: Vec<KeyLeaf>,
}

impl ListKey {
    /// Create a list key without key leaves yet
    pub fn new(schema: SchemaId) -> Self {
        Self {
            schema,
            key_leafs: Vec::new(),
        }
    }

    /// Append a key leaf
    pub fn add_key_leaf(&mut self, leaf: KeyLeaf) {
        self.key_leafs.push(leaf);
    }

    /// Key leaves, in the order they were added
    pub fn key_leafs(&self) -> &[KeyLeaf] {
        &self.key_leafs
    }
}

/// Key of a leaf-list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafListKey {
    schema: SchemaId,
    value: TypedValue,
}

impl LeafListKey {
    /// Create a leaf-list key
    pub fn new(schema: SchemaId, value: TypedValue) -> Self {
        Self { schema, value }
    }

    /// Entry value
    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// One step of a resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Plain schema node
    Schema(SchemaId),
    /// List entry
    List(ListKey),
    /// Leaf-list entry; always the last key of a path
    LeafList(LeafListKey),
}

impl NodeKey {
    /// Plain key for a schema identifier
    pub fn schema(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        NodeKey::Schema(SchemaId::new(name, namespace))
    }

    /// Identifier of the addressed schema node
    pub fn schema_id(&self) -> &SchemaId {
        match self {
            NodeKey::Schema(id) => id,
            NodeKey::List(key) => &key.schema,
            NodeKey::LeafList(key) => &key.schema,
        }
    }

    /// Check if no key may follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKey::LeafList(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Schema(id) => write!(f, "{}", id.name()),
            NodeKey::List(key) => {
                write!(f, "{}", key.schema.name())?;
                for leaf in &key.key_leafs {
                    write!(f, "[{}='{}']", leaf.schema.name(), leaf.value)?;
                }
                Ok(())
            }
            NodeKey::LeafList(key) => write!(f, "{}[.='{}']", key.schema.name(), key.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut list = ListKey::new(SchemaId::new("interface", "urn:if"));
        list.add_key_leaf(KeyLeaf::new(
            SchemaId::new("name", "urn:if"),
            TypedValue::from("eth0"),
        ));
        assert_eq!(NodeKey::List(list).to_string(), "interface[name='eth0']");

        let entry = NodeKey::LeafList(LeafListKey::new(
            SchemaId::new("dns", "urn:sys"),
            TypedValue::Uint8(3),
        ));
        assert_eq!(entry.to_string(), "dns[.='3']");
        assert!(entry.is_terminal());
        assert!(!NodeKey::schema("system", "urn:sys").is_terminal());
    }
}
