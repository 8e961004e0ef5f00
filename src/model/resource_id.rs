//! Resource identifiers
//!
//! A [`ResourceId`] is the ordered path of [`NodeKey`]s that addresses one
//! instance location in a data tree. It is assembled by a single-owner
//! [`ResourceIdBuilder`] and is read-only afterwards.
//!
//! The builder keeps one pending key. Branch points finalize it and start
//! a new one; key leaves accumulate into it, turning a plain key into a
//! list key. A pending leaf-list key is terminal: anything that would
//! place a key after it is rejected.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::model::node_key::{KeyLeaf, LeafListKey, ListKey, NodeKey};
use crate::namespaces::SchemaId;
use crate::types::TypedValue;
use std::fmt;

/// Immutable ordered sequence of node keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceId {
    node_keys: Vec<NodeKey>,
}

impl ResourceId {
    /// Start building a resource identifier
    pub fn builder() -> ResourceIdBuilder {
        ResourceIdBuilder::new()
    }

    /// Node keys, root first
    pub fn node_keys(&self) -> &[NodeKey] {
        &self.node_keys
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.node_keys.len()
    }

    /// Check if the identifier addresses the data root
    pub fn is_empty(&self) -> bool {
        self.node_keys.is_empty()
    }

    /// Last key, if any
    pub fn last(&self) -> Option<&NodeKey> {
        self.node_keys.last()
    }

    /// Builder seeded with a copy of this identifier's keys
    pub fn copy_builder(&self) -> ResourceIdBuilder {
        ResourceIdBuilder {
            node_keys: self.node_keys.clone(),
            ..ResourceIdBuilder::new()
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node_keys.is_empty() {
            return f.write_str("/");
        }
        for key in &self.node_keys {
            write!(f, "/{}", key)?;
        }
        Ok(())
    }
}

/// Single-owner builder of a [`ResourceId`]
#[derive(Debug, Clone, Default)]
pub struct ResourceIdBuilder {
    node_keys: Vec<NodeKey>,
    pending: Option<NodeKey>,
    limits: Limits,
}

impl ResourceIdBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit limits for key counts
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Start a new plain key, finalizing the pending one
    pub fn add_branch_point_schema(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<&mut Self> {
        self.finalize_pending()?;
        self.pending = Some(NodeKey::Schema(SchemaId::new(name, namespace)));
        Ok(self)
    }

    /// Add a key leaf to the pending key, turning it into a list key
    pub fn add_key_leaf(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Result<&mut Self> {
        let leaf = KeyLeaf::new(SchemaId::new(name, namespace), value.into());
        if let Some(NodeKey::List(list)) = &self.pending {
            self.limits.check_key_leafs(list.key_leafs().len() + 1)?;
        }
        let mut list = match self.pending.take() {
            Some(NodeKey::List(list)) => list,
            Some(NodeKey::Schema(schema)) => ListKey::new(schema),
            Some(leaf_list @ NodeKey::LeafList(_)) => {
                self.pending = Some(leaf_list);
                return Err(Error::InvalidKeyComposition(
                    "leaf-list is terminal, it cannot take key leaves".into(),
                ));
            }
            None => {
                return Err(Error::InvalidKeyComposition(format!(
                    "key leaf '{}' has no list branch point to attach to",
                    leaf.schema_id().name()
                )))
            }
        };
        list.add_key_leaf(leaf);
        self.pending = Some(NodeKey::List(list));
        Ok(self)
    }

    /// Start a terminal leaf-list key, finalizing the pending one
    pub fn add_leaf_list_branch_point(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Result<&mut Self> {
        if matches!(self.pending, Some(NodeKey::LeafList(_))) {
            return Err(Error::InvalidKeyComposition(
                "a leaf-list entry cannot follow another leaf-list entry".into(),
            ));
        }
        let key = LeafListKey::new(SchemaId::new(name, namespace), value.into());
        self.finalize_pending()?;
        self.pending = Some(NodeKey::LeafList(key));
        Ok(self)
    }

    /// Finalize the pending key, then append a copy of another
    /// identifier's keys
    pub fn append(&mut self, other: &ResourceId) -> Result<&mut Self> {
        self.append_keys(other.node_keys().iter().cloned())
    }

    /// Finalize the pending key, then append keys
    pub fn append_keys(&mut self, keys: impl IntoIterator<Item = NodeKey>) -> Result<&mut Self> {
        self.finalize_pending()?;
        for key in keys {
            self.push_key(key)?;
        }
        Ok(self)
    }

    /// Drop the last finalized key
    pub fn remove_last_key(&mut self) -> Result<&mut Self> {
        match self.node_keys.pop() {
            Some(_) => Ok(self),
            None => Err(Error::InvalidKeyComposition(
                "no finalized key to remove".into(),
            )),
        }
    }

    /// Finalize the pending key and return the identifier
    ///
    /// The builder keeps its keys, so it can be trimmed with
    /// [`remove_last_key`](Self::remove_last_key) and built again.
    pub fn build(&mut self) -> Result<ResourceId> {
        if let Some(key) = self.pending.take() {
            self.push_key(key)?;
        }
        self.limits.check_path_depth(self.node_keys.len())?;
        Ok(ResourceId {
            node_keys: self.node_keys.clone(),
        })
    }

    fn finalize_pending(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(leaf_list @ NodeKey::LeafList(_)) => {
                self.pending = Some(leaf_list);
                Err(Error::InvalidKeyComposition(
                    "leaf-list is terminal, no key may follow it".into(),
                ))
            }
            Some(key) => self.push_key(key),
            None => Ok(()),
        }
    }

    fn push_key(&mut self, key: NodeKey) -> Result<()> {
        if self.node_keys.last().map_or(false, NodeKey::is_terminal) {
            return Err(Error::InvalidKeyComposition(format!(
                "key '{}' cannot follow a leaf-list entry",
                key
            )));
        }
        self.node_keys.push(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "ns";

    #[test]
    fn test_composite_list_key() {
        let id = ResourceId::builder()
            .add_branch_point_schema("a", NS)
            .unwrap()
            .add_key_leaf("k1", NS, 1i32)
            .unwrap()
            .add_key_leaf("k2", NS, 2i32)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(id.len(), 1);
        let NodeKey::List(list) = &id.node_keys()[0] else {
            panic!("expected a list key");
        };
        let names: Vec<_> = list.key_leafs().iter().map(|l| l.schema_id().name()).collect();
        assert_eq!(names, ["k1", "k2"]);
        assert_eq!(list.key_leafs()[1].value(), &TypedValue::Int32(2));
        assert_eq!(id.to_string(), "/a[k1='1'][k2='2']");
    }

    #[test]
    fn test_leaf_list_is_terminal() {
        let mut b = ResourceId::builder();
        b.add_branch_point_schema("sys", NS).unwrap();
        b.add_leaf_list_branch_point("dns", NS, "10.0.0.1").unwrap();
        assert!(matches!(
            b.add_branch_point_schema("more", NS),
            Err(Error::InvalidKeyComposition(_))
        ));
        assert!(b.add_key_leaf("k", NS, 1u8).is_err());
        assert!(b.add_leaf_list_branch_point("dns", NS, "10.0.0.2").is_err());

        // the pending leaf-list survives the rejected calls
        let id = b.build().unwrap();
        assert_eq!(id.len(), 2);
        assert!(id.last().unwrap().is_terminal());
    }

    #[test]
    fn test_key_leaf_needs_branch_point() {
        let mut b = ResourceId::builder();
        assert!(matches!(
            b.add_key_leaf("k", NS, 1u8),
            Err(Error::InvalidKeyComposition(_))
        ));
    }

    #[test]
    fn test_append_and_remove_last_key() {
        let tail = ResourceId::builder()
            .add_branch_point_schema("c", NS)
            .unwrap()
            .build()
            .unwrap();

        let mut b = ResourceId::builder();
        b.add_branch_point_schema("a", NS).unwrap();
        b.add_branch_point_schema("b", NS).unwrap();
        b.append(&tail).unwrap();
        let id = b.build().unwrap();
        assert_eq!(id.to_string(), "/a/b/c");

        let mut copy = id.copy_builder();
        copy.remove_last_key().unwrap();
        assert_eq!(copy.build().unwrap().to_string(), "/a/b");
        assert!(ResourceId::builder().remove_last_key().is_err());
    }

    #[test]
    fn test_build_keeps_builder_state() {
        let mut b = ResourceId::builder();
        b.add_branch_point_schema("a", NS).unwrap();
        b.add_branch_point_schema("b", NS).unwrap();

        let child = b.build().unwrap();
        assert_eq!(child, b.build().unwrap());

        b.remove_last_key().unwrap();
        let parent = b.build().unwrap();
        assert_eq!(parent.to_string(), "/a");
        assert_eq!(child.to_string(), "/a/b");
    }

    #[test]
    fn test_append_after_pending_leaf_list_fails() {
        let mut b = ResourceId::builder();
        b.add_leaf_list_branch_point("x", NS, 1u8).unwrap();
        assert!(b.append_keys(vec![NodeKey::schema("y", NS)]).is_err());
    }

    #[test]
    fn test_equality_is_ordered() {
        let ab = ResourceId::builder()
            .append_keys(vec![NodeKey::schema("a", NS), NodeKey::schema("b", NS)])
            .unwrap()
            .build()
            .unwrap();
        let ba = ResourceId::builder()
            .append_keys(vec![NodeKey::schema("b", NS), NodeKey::schema("a", NS)])
            .unwrap()
            .build()
            .unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.copy_builder().build().unwrap());
    }

    #[test]
    fn test_key_leaf_limit() {
        let limits = Limits {
            max_key_leafs: 1,
            ..Limits::default()
        };
        let mut b = ResourceId::builder().with_limits(limits);
        b.add_branch_point_schema("a", NS).unwrap();
        b.add_key_leaf("k1", NS, 1u8).unwrap();
        assert!(matches!(
            b.add_key_leaf("k2", NS, 2u8),
            Err(Error::LimitExceeded(_))
        ));
    }
}
