//! Schema context resolution
//!
//! Maps a [`SchemaPath`] onto the schema node that defines it. The walk is
//! name driven: each segment is matched against the data children listed
//! in the current node's context-info map, so nodes brought in by an
//! augment are found under their target even though the augmenting module
//! defines them.
//!
//! When the walk through the path's own module fails, the path is assumed
//! to address a node the module augments into one of its imports. The
//! augment segment collapses into the final node name and the walk is
//! retried against each import in declaration order.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::segment_matches;
use crate::schema::context::SchemaNodeContextInfo;
use crate::schema::node::{NodeId, NodeKind, SchemaTree};
use crate::schema::path::SchemaPath;

/// Source of node shapes registered under anydata locations
pub trait AnydataMembers {
    /// Context infos legal beneath the given anydata node
    fn anydata_members(&self, anydata: NodeId) -> Vec<SchemaNodeContextInfo>;
}

/// Resolver without any anydata registrations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnydata;

impl AnydataMembers for NoAnydata {
    fn anydata_members(&self, _anydata: NodeId) -> Vec<SchemaNodeContextInfo> {
        Vec::new()
    }
}

/// Walks schema paths over a [`SchemaTree`]
pub struct SchemaContextResolver<'a> {
    tree: &'a SchemaTree,
    anydata: &'a dyn AnydataMembers,
    limits: &'a Limits,
}

impl<'a> SchemaContextResolver<'a> {
    /// Create a resolver over a tree
    pub fn new(tree: &'a SchemaTree, anydata: &'a dyn AnydataMembers, limits: &'a Limits) -> Self {
        Self {
            tree,
            anydata,
            limits,
        }
    }

    /// Resolve `path` starting at `root_module`
    pub fn resolve(&self, path: &SchemaPath, root_module: NodeId) -> Result<SchemaNodeContextInfo> {
        let segments = path.segments();
        self.limits.check_path_depth(segments.len())?;
        if segments.is_empty() {
            return Err(Error::UnresolvedSchemaPath(format!(
                "path {} names no node below its module",
                path
            )));
        }

        if let Some(info) = self.walk(root_module, segments) {
            return Ok(info);
        }

        let collapsed = collapse_augment_segment(segments);
        tracing::debug!(
            path = %path,
            collapsed = ?collapsed,
            "direct walk failed, retrying against imports"
        );

        for import in self.tree.imports(root_module) {
            if let Some(info) = self.walk(*import, &collapsed) {
                tracing::debug!(
                    path = %path,
                    module = self.tree.node(*import).name(),
                    "resolved through import"
                );
                return Ok(info);
            }
        }

        Err(Error::UnresolvedSchemaPath(format!(
            "no schema node matches {}",
            path
        )))
    }

    /// Follow `segments` from `start`, one context-info map at a time
    fn walk(&self, start: NodeId, segments: &[String]) -> Option<SchemaNodeContextInfo> {
        let mut parent = start;
        let mut found = None;
        for segment in segments {
            let info = self.find_child(parent, segment)?;
            parent = info.schema_node();
            found = Some(info);
        }
        found
    }

    fn find_child(&self, parent: NodeId, segment: &str) -> Option<SchemaNodeContextInfo> {
        let is_match = |info: &SchemaNodeContextInfo| {
            let node = self.tree.node(info.schema_node());
            node.kind().is_data_node() && segment_matches(segment, node.attribute_name())
        };

        let node = self.tree.node(parent);
        if let Some(info) = node.context_infos().find(|info| is_match(*info)) {
            return Some(*info);
        }
        if node.kind() == NodeKind::Anydata {
            return self
                .anydata
                .anydata_members(parent)
                .into_iter()
                .find(|info| is_match(info));
        }
        None
    }
}

/// Replace the second-to-last segment with the last one and drop the last
fn collapse_augment_segment(segments: &[String]) -> Vec<String> {
    let mut collapsed = segments.to_vec();
    let n = collapsed.len();
    if n >= 2 {
        collapsed.swap(n - 2, n - 1);
        collapsed.truncate(n - 1);
    }
    collapsed
}
