//! Visitors and the traversal engine.
//!
//! # Overview
//!
//! - [`Operation`] - Control signal returned by a visitor
//! - [`Visitor`] - One participant of a traversal (enter/leave callbacks)
//! - [`FnVisitor`] - Visitor built from closures
//! - [`NodeTraverser`] - Depth-first walk over an ordered visitor chain
//!
//! # Examples
//!
//! ## Removing Nodes
//!
//! ```rust
//! use arbor_tree::{Node, NodeList, NodeRef, NodeTraverser, Operation, Slot, SlotAccessor, SlotTable, Slots, Visitor};
//!
//! #[derive(Debug)]
//! struct Comment;
//!
//! impl Node for Comment {
//!     fn kind(&self) -> &'static str {
//!         "comment"
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Statement;
//!
//! impl Node for Statement {
//!     fn kind(&self) -> &'static str {
//!         "statement"
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Program {
//!     body: NodeList,
//! }
//!
//! static PROGRAM_SLOTS: Slots<Program> = Slots::new(&[SlotAccessor::new(
//!     "body",
//!     |node: &Program| Slot::list(&node.body),
//!     |_: &mut Program, _: Slot| {},
//! )]);
//!
//! impl Node for Program {
//!     fn kind(&self) -> &'static str {
//!         "program"
//!     }
//!
//!     fn slots(&self) -> Option<&'static dyn SlotTable> {
//!         Some(&PROGRAM_SLOTS)
//!     }
//! }
//!
//! struct StripComments;
//!
//! impl Visitor for StripComments {
//!     fn enter(&mut self, node: &NodeRef, _sequence: usize) -> Option<Operation> {
//!         (node.kind() == "comment").then_some(Operation::Remove)
//!     }
//! }
//!
//! let body: NodeList = [NodeRef::new(Comment), NodeRef::new(Statement)]
//!     .into_iter()
//!     .collect();
//! let program = NodeRef::new(Program { body: body.clone() });
//!
//! NodeTraverser::with_visitors([StripComments])
//!     .traverse(&program)
//!     .unwrap();
//! body.compact();
//! assert_eq!(body.len(), 1);
//! assert_eq!(body.get(0).unwrap().kind(), "statement");
//! ```

mod operation;
mod traverse;
mod visit;

pub use operation::Operation;
pub use traverse::NodeTraverser;
pub use visit::{FnVisitor, Visitor};
