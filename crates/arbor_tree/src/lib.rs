//! # arbor_tree
//!
//! Node model and multi-visitor traversal engine for Arbor.
//!
//! Trees are made of caller-defined node types behind shared [`NodeRef`]
//! handles. Each node type declares its child slots once in a static
//! [`Slots`] table, and [`NodeTraverser`] walks and rewrites the tree through
//! those tables with an ordered chain of [`Visitor`]s.
//!
//! ## Architecture
//!
//! - Nodes are `Rc<RefCell<_>>` handles; identity is pointer identity
//! - Child access goes through statically declared getter/setter pairs
//! - A slot is empty, a single node, or a nested collection such as a
//!   statement list
//! - Visitors steer the walk with [`Operation`] values; only the traverser
//!   writes to slots
//!
//! Trees are single-threaded; a traversal assumes exclusive access to the
//! tree while it runs.

mod children;
mod config;
mod error;
mod node;
pub mod visitor;

#[cfg(test)]
mod test_utils;

pub use children::{Children, ChildrenRef, NodeChildren, NodeList, SlotKey};
pub use config::TraverserConfig;
pub use error::TraversalError;
pub use node::{Node, NodeRef, Slot, SlotAccessor, SlotTable, Slots};

// Re-export commonly used visitor items for convenience
pub use visitor::{FnVisitor, NodeTraverser, Operation, Visitor};
