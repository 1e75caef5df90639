//! Traversal error types.

use thiserror::Error;

use crate::{NodeRef, SlotKey};

/// Errors that abort a traversal.
///
/// These signal a broken node model (a slot table that does not fit its
/// node, a slot that cannot hold the value written to it) or a tree that
/// cannot be walked safely. Control flow requested by visitors is never an
/// error; it travels through [`Operation`](crate::Operation) values instead.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// A node or slot storage was already borrowed when the traverser
    /// needed to read or write it.
    #[error("slot storage is already borrowed")]
    Borrowed {
        /// The node whose storage was locked, when known.
        node: Option<NodeRef>,
    },

    /// A slot key that the collection does not declare.
    #[error("`{kind}` has no child slot `{key}`")]
    UnknownSlot {
        /// Kind of the owning node or collection.
        kind: &'static str,
        /// The requested key.
        key: SlotKey,
        /// The owning node, when known.
        node: Option<NodeRef>,
    },

    /// A slot table was applied to a node of another type.
    #[error("slot table for `{expected}` applied to a `{found}` node")]
    LayoutMismatch {
        /// Rust type the table was declared for.
        expected: &'static str,
        /// Kind of the node it was applied to.
        found: &'static str,
        /// The offending node, when known.
        node: Option<NodeRef>,
    },

    /// A value was written to a slot that cannot hold it.
    #[error("slot `{key}` of `{kind}` cannot hold {value}")]
    InvalidValue {
        /// Kind of the owning node or collection.
        kind: &'static str,
        /// The slot written to.
        key: SlotKey,
        /// Description of the rejected value.
        value: &'static str,
        /// The owning node, when known.
        node: Option<NodeRef>,
    },

    /// The walk went deeper than the configured limit.
    #[error("traversal exceeded the maximum depth of {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
        /// The node at which the limit was crossed.
        node: NodeRef,
    },
}

impl TraversalError {
    /// Creates a borrow conflict error.
    pub fn borrowed(node: Option<NodeRef>) -> Self {
        Self::Borrowed { node }
    }

    /// Creates an unknown slot error.
    pub fn unknown_slot(kind: &'static str, key: SlotKey) -> Self {
        Self::UnknownSlot {
            kind,
            key,
            node: None,
        }
    }

    /// Creates a layout mismatch error.
    pub fn layout_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::LayoutMismatch {
            expected,
            found,
            node: None,
        }
    }

    /// Creates an invalid slot value error.
    pub fn invalid_value(kind: &'static str, key: SlotKey, value: &'static str) -> Self {
        Self::InvalidValue {
            kind,
            key,
            value,
            node: None,
        }
    }

    /// Returns the node at which traversal failed, if known.
    pub fn node(&self) -> Option<&NodeRef> {
        match self {
            Self::Borrowed { node }
            | Self::UnknownSlot { node, .. }
            | Self::LayoutMismatch { node, .. }
            | Self::InvalidValue { node, .. } => node.as_ref(),
            Self::DepthExceeded { node, .. } => Some(node),
        }
    }

    /// Attaches `owner` as the failing node unless one is already recorded.
    pub(crate) fn at(mut self, owner: &NodeRef) -> Self {
        match &mut self {
            Self::Borrowed { node }
            | Self::UnknownSlot { node, .. }
            | Self::LayoutMismatch { node, .. }
            | Self::InvalidValue { node, .. } => {
                if node.is_none() {
                    *node = Some(owner.clone());
                }
            }
            Self::DepthExceeded { .. } => {}
        }
        self
    }
}
