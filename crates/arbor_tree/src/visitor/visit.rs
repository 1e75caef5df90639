//! Visitor trait and closure adapters.

use crate::{NodeRef, Operation};

/// One participant of a traversal.
///
/// `sequence` is the position of `node` among the present siblings of its
/// collection, starting at 0. The root always has sequence 0.
///
/// # Example
///
/// ```rust
/// use arbor_tree::{NodeRef, Operation, Visitor};
///
/// #[derive(Default)]
/// struct Counter {
///     entered: usize,
/// }
///
/// impl Visitor for Counter {
///     fn enter(&mut self, _node: &NodeRef, _sequence: usize) -> Option<Operation> {
///         self.entered += 1;
///         None
///     }
/// }
/// ```
pub trait Visitor {
    /// Called before the node's children are walked.
    fn enter(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        let _ = (node, sequence);
        None
    }

    /// Called after the node's children are walked.
    fn leave(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        let _ = (node, sequence);
        None
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    #[inline]
    fn enter(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        (**self).enter(node, sequence)
    }

    #[inline]
    fn leave(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        (**self).leave(node, sequence)
    }
}

impl<V: Visitor + ?Sized> Visitor for Box<V> {
    #[inline]
    fn enter(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        (**self).enter(node, sequence)
    }

    #[inline]
    fn leave(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        (**self).leave(node, sequence)
    }
}

type Callback<'f> = Box<dyn FnMut(&NodeRef, usize) -> Option<Operation> + 'f>;

/// Visitor built from closures.
///
/// ```rust
/// use arbor_tree::{FnVisitor, Operation};
///
/// let visitor = FnVisitor::new()
///     .on_enter(|node, _| (node.kind() == "comment").then_some(Operation::Remove));
/// ```
#[derive(Default)]
pub struct FnVisitor<'f> {
    enter: Option<Callback<'f>>,
    leave: Option<Callback<'f>>,
}

impl<'f> FnVisitor<'f> {
    /// Creates a visitor that does nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enter callback.
    pub fn on_enter(
        mut self,
        f: impl FnMut(&NodeRef, usize) -> Option<Operation> + 'f,
    ) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Sets the leave callback.
    pub fn on_leave(
        mut self,
        f: impl FnMut(&NodeRef, usize) -> Option<Operation> + 'f,
    ) -> Self {
        self.leave = Some(Box::new(f));
        self
    }
}

impl Visitor for FnVisitor<'_> {
    fn enter(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        self.enter.as_mut().and_then(|f| f(node, sequence))
    }

    fn leave(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        self.leave.as_mut().and_then(|f| f(node, sequence))
    }
}
