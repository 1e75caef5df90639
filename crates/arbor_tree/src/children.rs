//! Child slot collections.
//!
//! A [`Children`] collection is a view over storage owned elsewhere:
//! [`NodeChildren`] reads and writes the fields of its owning node through
//! the node's slot table, and [`NodeList`] shares its vector with the node
//! that holds it. Writing through either view is the same as writing the
//! node directly.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::node::{NodeRef, Slot, SlotTable};
use crate::TraversalError;

/// Key of one slot in a [`Children`] collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// A named field slot.
    Name(Cow<'static, str>),
    /// A position in a sequence.
    Index(usize),
}

impl SlotKey {
    pub(crate) fn owned(name: &str) -> Self {
        SlotKey::Name(Cow::Owned(name.to_string()))
    }
}

impl From<&'static str> for SlotKey {
    fn from(name: &'static str) -> Self {
        SlotKey::Name(Cow::Borrowed(name))
    }
}

impl From<usize> for SlotKey {
    fn from(index: usize) -> Self {
        SlotKey::Index(index)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Name(name) => f.write_str(name),
            SlotKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Ordered collection of child slots.
///
/// Methods take `&self`; implementations write through to shared storage.
pub trait Children: fmt::Debug {
    /// All declared keys in traversal order, including empty slots.
    fn keys(&self) -> Vec<SlotKey>;

    /// Reads a slot.
    fn get(&self, key: &SlotKey) -> Result<Slot, TraversalError>;

    /// Writes a slot. Writing [`Slot::Empty`] clears it.
    fn set(&self, key: &SlotKey, value: Slot) -> Result<(), TraversalError>;
}

/// Shared handle to a children collection.
pub type ChildrenRef = Rc<dyn Children>;

/// Children view over the fields of one node.
pub struct NodeChildren {
    owner: NodeRef,
    table: &'static dyn SlotTable,
}

impl NodeChildren {
    /// Creates a view over `owner` using `table`.
    pub fn new(owner: NodeRef, table: &'static dyn SlotTable) -> Self {
        Self { owner, table }
    }

    /// Returns the owning node.
    pub fn owner(&self) -> &NodeRef {
        &self.owner
    }

    fn resolve(&self, key: &SlotKey) -> Result<Cow<'static, str>, TraversalError> {
        match key {
            SlotKey::Name(name) => Ok(name.clone()),
            SlotKey::Index(index) => self
                .table
                .names()
                .get(*index)
                .map(|name| Cow::Borrowed(*name))
                .ok_or_else(|| {
                    TraversalError::unknown_slot(self.owner.kind(), key.clone()).at(&self.owner)
                }),
        }
    }
}

impl fmt::Debug for NodeChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeChildren")
            .field("owner", &self.owner.kind())
            .field("slots", &self.table.names())
            .finish()
    }
}

impl Children for NodeChildren {
    fn keys(&self) -> Vec<SlotKey> {
        self.table.names().into_iter().map(SlotKey::from).collect()
    }

    fn get(&self, key: &SlotKey) -> Result<Slot, TraversalError> {
        let name = self.resolve(key)?;
        let node = self.owner.try_read()?;
        self.table
            .get(&*node, &name)
            .map_err(|e| e.at(&self.owner))
    }

    fn set(&self, key: &SlotKey, value: Slot) -> Result<(), TraversalError> {
        let name = self.resolve(key)?;
        let mut node = self.owner.try_write()?;
        self.table
            .set(&mut *node, &name, value)
            .map_err(|e| e.at(&self.owner))
    }
}

/// Shared sequence of sibling nodes, such as a statement list.
///
/// Clearing an entry leaves a hole so later siblings keep their keys while
/// a traversal is running; call [`NodeList::compact`] afterwards to drop
/// the holes.
#[derive(Clone, Default)]
pub struct NodeList(Rc<RefCell<Vec<Option<NodeRef>>>>);

impl NodeList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    pub fn push(&self, node: NodeRef) {
        self.0.borrow_mut().push(Some(node));
    }

    /// Number of present nodes.
    pub fn len(&self) -> usize {
        self.0.borrow().iter().flatten().count()
    }

    /// Returns true if no node is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries, holes included.
    pub fn capacity_used(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns the node at entry `index`, if present.
    pub fn get(&self, index: usize) -> Option<NodeRef> {
        self.0.borrow().get(index).cloned().flatten()
    }

    /// Returns the present nodes in order.
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.0.borrow().iter().flatten().cloned().collect()
    }

    /// Removes holes left by cleared entries.
    pub fn compact(&self) {
        self.0.borrow_mut().retain(Option::is_some);
    }

    /// Returns true if both handles share the same storage.
    pub fn ptr_eq(a: &NodeList, b: &NodeList) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    fn index(key: &SlotKey) -> Result<usize, TraversalError> {
        match key {
            SlotKey::Index(index) => Ok(*index),
            SlotKey::Name(_) => Err(TraversalError::unknown_slot("list", key.clone())),
        }
    }
}

impl FromIterator<NodeRef> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().map(Some).collect())))
    }
}

impl fmt::Debug for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(entries) => f.debug_list().entries(entries.iter()).finish(),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

impl Children for NodeList {
    fn keys(&self) -> Vec<SlotKey> {
        (0..self.0.borrow().len()).map(SlotKey::Index).collect()
    }

    fn get(&self, key: &SlotKey) -> Result<Slot, TraversalError> {
        let index = Self::index(key)?;
        let entries = self
            .0
            .try_borrow()
            .map_err(|_| TraversalError::borrowed(None))?;
        match entries.get(index) {
            Some(entry) => Ok(entry.clone().into()),
            None => Err(TraversalError::unknown_slot("list", key.clone())),
        }
    }

    fn set(&self, key: &SlotKey, value: Slot) -> Result<(), TraversalError> {
        let index = Self::index(key)?;
        let mut entries = self
            .0
            .try_borrow_mut()
            .map_err(|_| TraversalError::borrowed(None))?;
        let Some(entry) = entries.get_mut(index) else {
            return Err(TraversalError::unknown_slot("list", key.clone()));
        };
        *entry = match value {
            Slot::Empty => None,
            Slot::Node(node) => Some(node),
            Slot::Children(_) => {
                return Err(TraversalError::invalid_value(
                    "list",
                    key.clone(),
                    "a nested collection",
                ));
            }
        };
        Ok(())
    }
}
