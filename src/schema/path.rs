//! Structured schema paths
//!
//! A [`SchemaPath`] names a schema location the way a caller sees it: the
//! module, an optional revision, and the node names leading to the target.
//! Segments are matched leniently (case-insensitive, camel-case folded), so
//! `interface-name`, `interfaceName` and `INTERFACENAME` all address the
//! same node.

use crate::error::{Error, Result};
use crate::names::{parse_revision, validate_revision};
use std::fmt;

/// Module-qualified path of node-name segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    module: String,
    revision: Option<String>,
    segments: Vec<String>,
}

impl SchemaPath {
    /// Path into the newest revision of a module
    pub fn new<I, S>(module: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into(),
            revision: None,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Pin the module revision (`YYYY-MM-DD` or `revYYYYMMDD`)
    pub fn with_revision(mut self, revision: &str) -> Result<Self> {
        self.revision = Some(validate_revision(revision)?);
        Ok(self)
    }

    /// Build a path from raw segments
    ///
    /// The first segment names the module. If the next one is a revision
    /// date it pins the revision; everything after is node names.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iter = segments.into_iter();
        let module = iter
            .next()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::UnresolvedSchemaPath("path has no module segment".into()))?;

        let mut revision = None;
        let mut rest = Vec::new();
        for (i, segment) in iter.enumerate() {
            let segment = segment.as_ref();
            match (i, parse_revision(segment)) {
                (0, Some(canonical)) => revision = Some(canonical),
                _ => rest.push(segment.to_string()),
            }
        }

        Ok(Self {
            module,
            revision,
            segments: rest,
        })
    }

    /// Parse a slash-separated path such as `ietf-interfaces/2014-05-08/interfaces`
    pub fn parse(path: &str) -> Result<Self> {
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }

    /// Module name
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Pinned revision, canonical form
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Node-name segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module)?;
        if let Some(rev) = &self.revision {
            write!(f, "@{}", rev)?;
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
