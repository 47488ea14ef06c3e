//! Core identity types for stacks
//!
//! This module defines the identifiers and string maps shared by every layer:
//! - [`StackId`]: Globally unique, immutable stack identifier (ARN form)
//! - [`EventId`]: Unique identifier for a single lifecycle event
//! - [`Parameters`] / [`Tags`]: Ordered string maps supplied by callers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Parameter name to supplied value.
pub type Parameters = BTreeMap<String, String>;

/// Tag key to tag value.
pub type Tags = BTreeMap<String, String>;

/// Unique identifier for a stack
///
/// StackId is an opaque ARN-style string that embeds the region, account,
/// stack name and a random UUID:
///
/// ```text
/// arn:aws:cloudformation:{region}:{account}:stack/{name}/{uuid}
/// ```
///
/// It is the primary key of both the active and deleted indexes and never
/// changes for the lifetime of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackId(String);

impl StackId {
    /// Generate a fresh id for a stack named `name` in `region`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::StackId;
    ///
    /// let a = StackId::generate("us-east-1", "123456789012", "web");
    /// let b = StackId::generate("us-east-1", "123456789012", "web");
    /// assert_ne!(a, b);
    /// assert!(a.as_str().starts_with("arn:aws:cloudformation:us-east-1:123456789012:stack/web/"));
    /// ```
    pub fn generate(region: &str, account_id: &str, name: &str) -> Self {
        StackId(format!(
            "arn:aws:cloudformation:{}:{}:stack/{}/{}",
            region,
            account_id,
            name,
            Uuid::new_v4()
        ))
    }

    /// Wrap an existing id string without validation.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        StackId(raw.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the stack name segment, if the id is in ARN form.
    pub fn stack_name(&self) -> Option<&str> {
        let (_, rest) = self.0.split_once(":stack/")?;
        rest.rsplit_once('/').map(|(name, _)| name)
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a stack event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random EventId using UUID v4
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }

    /// Get raw bytes representation
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
