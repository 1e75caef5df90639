//! Node types and visitors shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Node, NodeList, NodeRef, Operation, Slot, SlotAccessor, SlotTable, Slots, Visitor};

#[derive(Debug)]
pub struct Leaf {
    pub name: &'static str,
}

impl Node for Leaf {
    fn kind(&self) -> &'static str {
        "leaf"
    }
}

#[derive(Debug)]
pub struct Pair {
    pub name: &'static str,
    pub a: Option<NodeRef>,
    pub b: Option<NodeRef>,
    pub c: Option<NodeRef>,
}

static PAIR_SLOTS: Slots<Pair> = Slots::new(&[
    SlotAccessor::new(
        "a",
        |node: &Pair| Slot::from(node.a.clone()),
        |node: &mut Pair, slot: Slot| node.a = slot.into_node(),
    ),
    SlotAccessor::new(
        "b",
        |node: &Pair| Slot::from(node.b.clone()),
        |node: &mut Pair, slot: Slot| node.b = slot.into_node(),
    ),
    SlotAccessor::new(
        "c",
        |node: &Pair| Slot::from(node.c.clone()),
        |node: &mut Pair, slot: Slot| node.c = slot.into_node(),
    ),
]);

impl Node for Pair {
    fn kind(&self) -> &'static str {
        "pair"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&PAIR_SLOTS)
    }
}

/// A node with a head slot, a statement list and a tail slot.
#[derive(Debug)]
pub struct Block {
    pub name: &'static str,
    pub head: Option<NodeRef>,
    pub body: NodeList,
    pub tail: Option<NodeRef>,
}

static BLOCK_SLOTS: Slots<Block> = Slots::new(&[
    SlotAccessor::new(
        "head",
        |node: &Block| Slot::from(node.head.clone()),
        |node: &mut Block, slot: Slot| node.head = slot.into_node(),
    ),
    SlotAccessor::new(
        "body",
        |node: &Block| Slot::list(&node.body),
        |_: &mut Block, _: Slot| {},
    ),
    SlotAccessor::new(
        "tail",
        |node: &Block| Slot::from(node.tail.clone()),
        |node: &mut Block, slot: Slot| node.tail = slot.into_node(),
    ),
]);

impl Node for Block {
    fn kind(&self) -> &'static str {
        "block"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&BLOCK_SLOTS)
    }
}

/// A node that hands out the slot table of another type.
#[derive(Debug)]
pub struct Broken {
    pub name: &'static str,
}

impl Node for Broken {
    fn kind(&self) -> &'static str {
        "broken"
    }

    fn slots(&self) -> Option<&'static dyn SlotTable> {
        Some(&PAIR_SLOTS)
    }
}

pub fn leaf(name: &'static str) -> NodeRef {
    NodeRef::new(Leaf { name })
}

pub fn pair(
    name: &'static str,
    a: Option<NodeRef>,
    b: Option<NodeRef>,
    c: Option<NodeRef>,
) -> NodeRef {
    NodeRef::new(Pair { name, a, b, c })
}

pub fn block(name: &'static str, head: Option<NodeRef>, body: Vec<NodeRef>) -> NodeRef {
    NodeRef::new(Block {
        name,
        head,
        body: body.into_iter().collect(),
        tail: None,
    })
}

pub fn block_with_tail(
    name: &'static str,
    head: Option<NodeRef>,
    body: Vec<NodeRef>,
    tail: NodeRef,
) -> NodeRef {
    NodeRef::new(Block {
        name,
        head,
        body: body.into_iter().collect(),
        tail: Some(tail),
    })
}

pub fn broken(name: &'static str) -> NodeRef {
    NodeRef::new(Broken { name })
}

pub fn name_of(node: &NodeRef) -> &'static str {
    if let Some(leaf) = node.downcast_ref::<Leaf>() {
        leaf.name
    } else if let Some(pair) = node.downcast_ref::<Pair>() {
        pair.name
    } else if let Some(block) = node.downcast_ref::<Block>() {
        block.name
    } else if let Some(broken) = node.downcast_ref::<Broken>() {
        broken.name
    } else {
        "?"
    }
}

pub type Log = Rc<RefCell<Vec<String>>>;

/// Visitor that logs every call as `enter#<id> <name>@<sequence>` and
/// returns scripted operations for named nodes.
pub struct Recorder {
    id: usize,
    log: Log,
    on_enter: Vec<(&'static str, Operation)>,
    on_leave: Vec<(&'static str, Operation)>,
}

impl Recorder {
    pub fn new(id: usize, log: &Log) -> Self {
        Self {
            id,
            log: Rc::clone(log),
            on_enter: Vec::new(),
            on_leave: Vec::new(),
        }
    }

    pub fn enter_returns(mut self, name: &'static str, op: Operation) -> Self {
        self.on_enter.push((name, op));
        self
    }

    pub fn leave_returns(mut self, name: &'static str, op: Operation) -> Self {
        self.on_leave.push((name, op));
        self
    }

    fn record(&self, event: &str, node: &NodeRef, sequence: usize) {
        self.log.borrow_mut().push(format!(
            "{}#{} {}@{}",
            event,
            self.id,
            name_of(node),
            sequence
        ));
    }

    fn scripted(script: &[(&'static str, Operation)], node: &NodeRef) -> Option<Operation> {
        let name = name_of(node);
        script
            .iter()
            .find(|(target, _)| *target == name)
            .map(|(_, op)| op.clone())
    }
}

impl Visitor for Recorder {
    fn enter(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        self.record("enter", node, sequence);
        Self::scripted(&self.on_enter, node)
    }

    fn leave(&mut self, node: &NodeRef, sequence: usize) -> Option<Operation> {
        self.record("leave", node, sequence);
        Self::scripted(&self.on_leave, node)
    }
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}
