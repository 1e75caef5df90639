//! Traverser configuration.

use serde::{Deserialize, Serialize};

/// Limits applied by [`NodeTraverser`](crate::NodeTraverser).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraverserConfig {
    /// Deepest node level to walk. The root is at depth 0. `None` means
    /// unlimited.
    pub max_depth: Option<usize>,
}

impl TraverserConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}
