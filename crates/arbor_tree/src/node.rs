//! Node definition.
//!
//! Trees are built from [`NodeRef`] handles to caller-defined [`Node`]
//! types. A node that has children declares them once, in a static
//! [`Slots`] table of named getter/setter pairs; the traverser reads and
//! writes children exclusively through that table.

use std::any::{Any, type_name};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::children::{ChildrenRef, NodeChildren, NodeList, SlotKey};
use crate::TraversalError;

/// A unit of tree structure.
///
/// Implementors are plain Rust types. Leaves only provide [`Node::kind`];
/// nodes with children also return their static slot table.
///
/// # Example
///
/// ```rust
/// use arbor_tree::{Node, NodeRef, Slot, SlotAccessor, SlotTable, Slots};
///
/// #[derive(Debug)]
/// struct Number(i64);
///
/// impl Node for Number {
///     fn kind(&self) -> &'static str {
///         "number"
///     }
/// }
///
/// #[derive(Debug)]
/// struct Negate {
///     operand: Option<NodeRef>,
/// }
///
/// static NEGATE_SLOTS: Slots<Negate> = Slots::new(&[SlotAccessor::new(
///     "operand",
///     |node: &Negate| Slot::from(node.operand.clone()),
///     |node: &mut Negate, slot: Slot| node.operand = slot.into_node(),
/// )]);
///
/// impl Node for Negate {
///     fn kind(&self) -> &'static str {
///         "negate"
///     }
///
///     fn slots(&self) -> Option<&'static dyn SlotTable> {
///         Some(&NEGATE_SLOTS)
///     }
/// }
///
/// let tree = NodeRef::new(Negate {
///     operand: Some(NodeRef::new(Number(7))),
/// });
/// assert_eq!(tree.kind(), "negate");
/// ```
pub trait Node: Any + fmt::Debug {
    /// Short name of the node type, used in logs and errors.
    fn kind(&self) -> &'static str;

    /// The child slot table of this node type, or `None` for a leaf.
    fn slots(&self) -> Option<&'static dyn SlotTable> {
        None
    }
}

fn as_any(node: &dyn Node) -> &dyn Any {
    node
}

fn as_any_mut(node: &mut dyn Node) -> &mut dyn Any {
    node
}

/// Shared, mutable handle to a node.
///
/// Cloning a `NodeRef` clones the handle, not the node. Identity is
/// compared with [`NodeRef::ptr_eq`].
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<dyn Node>>);

impl NodeRef {
    /// Wraps a node in a new handle.
    pub fn new<N: Node>(node: N) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }

    /// Returns true if both handles point to the same node.
    #[inline]
    pub fn ptr_eq(a: &NodeRef, b: &NodeRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Immutably borrows the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, dyn Node> {
        self.0.borrow()
    }

    /// Mutably borrows the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Node> {
        self.0.borrow_mut()
    }

    pub(crate) fn try_read(&self) -> Result<Ref<'_, dyn Node>, TraversalError> {
        self.0
            .try_borrow()
            .map_err(|_| TraversalError::borrowed(Some(self.clone())))
    }

    pub(crate) fn try_write(&self) -> Result<RefMut<'_, dyn Node>, TraversalError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| TraversalError::borrowed(Some(self.clone())))
    }

    /// Returns the node kind, or `"<borrowed>"` while the node is mutably
    /// borrowed.
    pub fn kind(&self) -> &'static str {
        self.0
            .try_borrow()
            .map(|node| node.kind())
            .unwrap_or("<borrowed>")
    }

    /// Returns true if the node is a `T`.
    pub fn is<T: Node>(&self) -> bool {
        as_any(&*self.0.borrow()).is::<T>()
    }

    /// Borrows the node as a `T`, or `None` if it is another type.
    pub fn downcast_ref<T: Node>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.0.borrow(), |node| as_any(node).downcast_ref::<T>()).ok()
    }

    /// Mutably borrows the node as a `T`, or `None` if it is another type.
    pub fn downcast_mut<T: Node>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.0.borrow_mut(), |node| {
            as_any_mut(node).downcast_mut::<T>()
        })
        .ok()
    }

    /// Returns the children view of this node, or `None` for a leaf.
    pub fn children(&self) -> Result<Option<ChildrenRef>, TraversalError> {
        let table = self.try_read()?.slots();
        Ok(table.map(|table| Rc::new(NodeChildren::new(self.clone(), table)) as ChildrenRef))
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => fmt::Debug::fmt(&*node, f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

/// Content of one child slot.
#[derive(Debug, Clone, Default)]
pub enum Slot {
    /// No content. Skipped during traversal.
    #[default]
    Empty,
    /// A single child node.
    Node(NodeRef),
    /// A nested collection of siblings, such as a statement list.
    Children(ChildrenRef),
}

impl Slot {
    /// Creates a slot backed by a shared node list.
    pub fn list(list: &NodeList) -> Self {
        Slot::Children(Rc::new(list.clone()))
    }

    /// Returns true if the slot has no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Returns the node held by this slot, if any.
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Slot::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Converts the slot into the node it holds.
    ///
    /// Nested collections convert to `None`.
    pub fn into_node(self) -> Option<NodeRef> {
        match self {
            Slot::Node(node) => Some(node),
            Slot::Empty | Slot::Children(_) => None,
        }
    }
}

impl From<NodeRef> for Slot {
    fn from(node: NodeRef) -> Self {
        Slot::Node(node)
    }
}

impl From<Option<NodeRef>> for Slot {
    fn from(node: Option<NodeRef>) -> Self {
        node.map_or(Slot::Empty, Slot::Node)
    }
}

/// Getter/setter pair for one named slot of `N`.
pub struct SlotAccessor<N> {
    name: &'static str,
    get: fn(&N) -> Slot,
    set: fn(&mut N, Slot),
}

impl<N> SlotAccessor<N> {
    /// Declares a slot.
    pub const fn new(name: &'static str, get: fn(&N) -> Slot, set: fn(&mut N, Slot)) -> Self {
        Self { name, get, set }
    }

    /// Returns the slot name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Ordered, statically declared slot table for node type `N`.
///
/// Declaration order is traversal order.
pub struct Slots<N: 'static> {
    accessors: &'static [SlotAccessor<N>],
}

impl<N: 'static> Slots<N> {
    /// Creates a slot table.
    pub const fn new(accessors: &'static [SlotAccessor<N>]) -> Self {
        Self { accessors }
    }

    fn accessor(&self, name: &str) -> Option<&SlotAccessor<N>> {
        self.accessors.iter().find(|accessor| accessor.name == name)
    }
}

/// Type-erased view of a [`Slots`] table.
pub trait SlotTable {
    /// Slot names in traversal order.
    fn names(&self) -> Vec<&'static str>;

    /// Reads the slot `name` of `node`.
    fn get(&self, node: &dyn Node, name: &str) -> Result<Slot, TraversalError>;

    /// Writes `value` into the slot `name` of `node`.
    fn set(&self, node: &mut dyn Node, name: &str, value: Slot) -> Result<(), TraversalError>;
}

impl<N: Node> SlotTable for Slots<N> {
    fn names(&self) -> Vec<&'static str> {
        self.accessors.iter().map(|accessor| accessor.name).collect()
    }

    fn get(&self, node: &dyn Node, name: &str) -> Result<Slot, TraversalError> {
        let kind = node.kind();
        let Some(typed) = as_any(node).downcast_ref::<N>() else {
            return Err(TraversalError::layout_mismatch(type_name::<N>(), kind));
        };
        let accessor = self
            .accessor(name)
            .ok_or_else(|| TraversalError::unknown_slot(kind, SlotKey::owned(name)))?;
        Ok((accessor.get)(typed))
    }

    fn set(&self, node: &mut dyn Node, name: &str, value: Slot) -> Result<(), TraversalError> {
        let kind = node.kind();
        let Some(typed) = as_any_mut(node).downcast_mut::<N>() else {
            return Err(TraversalError::layout_mismatch(type_name::<N>(), kind));
        };
        let accessor = self
            .accessor(name)
            .ok_or_else(|| TraversalError::unknown_slot(kind, SlotKey::owned(name)))?;
        (accessor.set)(typed, value);
        Ok(())
    }
}
