//! Traversal control signals.

use std::fmt;

use crate::NodeRef;

/// Signal returned by a visitor to direct the traverser.
///
/// Visitors return `Option<Operation>`; `None` means continue.
#[derive(Clone)]
pub enum Operation {
    /// Put this node in place of the visited one.
    Replace(NodeRef),
    /// Abort the whole traversal.
    Stop,
    /// Do not descend into the node's children.
    SkipChildren,
    /// Skip the remaining visitors and the children of this node.
    SkipSelf,
    /// Clear the node's slot in its parent.
    Remove,
}

impl Operation {
    /// Creates a replacement.
    pub fn replace(node: NodeRef) -> Self {
        Self::Replace(node)
    }

    /// Returns true for [`Operation::Stop`].
    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Returns true for [`Operation::SkipSelf`].
    #[inline]
    pub fn skips_self(&self) -> bool {
        matches!(self, Self::SkipSelf)
    }

    /// Returns true for [`Operation::SkipSelf`] and [`Operation::SkipChildren`].
    #[inline]
    pub fn skips_children(&self) -> bool {
        matches!(self, Self::SkipSelf | Self::SkipChildren)
    }

    /// Returns true for [`Operation::Remove`].
    #[inline]
    pub fn is_removal(&self) -> bool {
        matches!(self, Self::Remove)
    }

    /// Returns the replacement node, if any.
    pub fn replacement(&self) -> Option<&NodeRef> {
        match self {
            Self::Replace(node) => Some(node),
            _ => None,
        }
    }

    /// Short name of the operation, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Replace(_) => "replace",
            Self::Stop => "stop",
            Self::SkipChildren => "skip-children",
            Self::SkipSelf => "skip-self",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(node) => write!(f, "Replace({})", node.kind()),
            _ => f.write_str(self.name()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
