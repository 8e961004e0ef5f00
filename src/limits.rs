//! Limits and constraints for schema processing
//!
//! This module defines limits that bound the work done on malformed or
//! hostile input: runaway typedef chains, absurdly deep paths, oversized
//! codec payloads.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum typedef/union nesting followed while converting a literal
    pub max_derivation_depth: usize,

    /// Maximum number of segments in a schema path or keys in a resource id
    pub max_path_depth: usize,

    /// Maximum number of key leaves in one list key
    pub max_key_leafs: usize,

    /// Maximum codec payload size in bytes
    pub max_payload_size: usize,

    /// Maximum nesting of a decoded data tree
    pub max_data_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_derivation_depth: 64,
            max_path_depth: 256,
            max_key_leafs: 32,
            max_payload_size: 16 * 1024 * 1024, // 16 MB
            max_data_depth: 512,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_derivation_depth: 16,
            max_path_depth: 64,
            max_key_leafs: 8,
            max_payload_size: 1024 * 1024, // 1 MB
            max_data_depth: 64,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_derivation_depth: 1024,
            max_path_depth: 4096,
            max_key_leafs: 256,
            max_payload_size: 512 * 1024 * 1024, // 512 MB
            max_data_depth: 8192,
        }
    }

    /// Check if a derivation depth is within limits
    pub fn check_derivation_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_derivation_depth {
            Err(Error::LimitExceeded(format!(
                "type derivation depth {} exceeds maximum {}",
                depth, self.max_derivation_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a path depth is within limits
    pub fn check_path_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_path_depth {
            Err(Error::LimitExceeded(format!(
                "path depth {} exceeds maximum {}",
                depth, self.max_path_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of key leaves is within limits
    pub fn check_key_leafs(&self, count: usize) -> Result<()> {
        if count > self.max_key_leafs {
            Err(Error::LimitExceeded(format!(
                "key leaf count {} exceeds maximum {}",
                count, self.max_key_leafs
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a payload size is within limits
    pub fn check_payload_size(&self, size: usize) -> Result<()> {
        if size > self.max_payload_size {
            Err(Error::LimitExceeded(format!(
                "payload size {} bytes exceeds maximum {} bytes",
                size, self.max_payload_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a data tree depth is within limits
    pub fn check_data_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_data_depth {
            Err(Error::LimitExceeded(format!(
                "data tree depth {} exceeds maximum {}",
                depth, self.max_data_depth
            )))
        } else {
            Ok(())
        }
    }
}
