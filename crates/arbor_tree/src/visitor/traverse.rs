//! Multi-visitor depth-first traversal.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::{ChildrenRef, NodeRef, Operation, Slot, TraversalError, TraverserConfig, Visitor};

/// Walks a tree depth-first with an ordered chain of visitors.
///
/// For every node, each visitor's [`Visitor::enter`] runs in chain order,
/// then the children are walked, then [`Visitor::leave`] runs in the same
/// order for exactly the visitors whose `enter` ran.
///
/// When several visitors return operations for one node:
///
/// - A replacement is seen by every later visitor of the same chain. The
///   children and the leave chain use the latest replacement.
/// - The last operation returned by the enter chain decides whether the
///   node is removed, has its children skipped, or is walked. A replacement
///   is kept even when a later visitor asks to skip the children.
/// - [`Operation::SkipSelf`] and [`Operation::Stop`] end the enter chain.
/// - From `leave`, only replacements and [`Operation::Stop`] take effect.
///
/// # Example
///
/// ```rust
/// use arbor_tree::{FnVisitor, Node, NodeRef, NodeTraverser, Operation};
///
/// #[derive(Debug)]
/// struct Word(&'static str);
///
/// impl Node for Word {
///     fn kind(&self) -> &'static str {
///         "word"
///     }
/// }
///
/// let root = NodeRef::new(Word("old"));
/// let mut traverser = NodeTraverser::new();
/// traverser.add_visitor(
///     FnVisitor::new().on_enter(|_, _| Some(Operation::replace(NodeRef::new(Word("new"))))),
/// );
///
/// let result = traverser.traverse(&root).unwrap();
/// assert!(!NodeRef::ptr_eq(&result, &root));
/// assert_eq!(result.downcast_ref::<Word>().unwrap().0, "new");
/// ```
#[derive(Default)]
pub struct NodeTraverser<'v> {
    visitors: Vec<Box<dyn Visitor + 'v>>,
    config: TraverserConfig,
}

/// What the last operation of an enter chain asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Walk,
    SkipChildren,
    Remove,
    Stop,
}

/// Result of one enter chain.
struct Entered {
    target: NodeRef,
    invoked: usize,
    pending: Pending,
}

/// What the parent has to do with a walked node.
enum Outcome {
    Keep,
    Replace(NodeRef),
    Remove,
    Stop(Option<NodeRef>),
}

impl Outcome {
    fn name(&self) -> &'static str {
        match self {
            Outcome::Keep => "keep",
            Outcome::Replace(_) => "replace",
            Outcome::Remove => "remove",
            Outcome::Stop(_) => "stop",
        }
    }
}

fn replacement(original: &NodeRef, target: NodeRef) -> Option<NodeRef> {
    (!NodeRef::ptr_eq(original, &target)).then_some(target)
}

impl<'v> NodeTraverser<'v> {
    /// Creates a traverser without visitors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a traverser from an ordered list of visitors.
    pub fn with_visitors<I, V>(visitors: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Visitor + 'v,
    {
        let mut traverser = Self::new();
        for visitor in visitors {
            traverser.add_visitor(visitor);
        }
        traverser
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: TraverserConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a visitor to the end of the chain.
    pub fn add_visitor(&mut self, visitor: impl Visitor + 'v) -> &mut Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of visitors in the chain.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Returns true if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TraverserConfig {
        &self.config
    }

    /// Walks the tree below `root`.
    ///
    /// Returns the replacement produced for the root, or `root` itself.
    /// Removing the root has no effect here since it has no owning slot.
    /// Mutations applied before a [`Operation::Stop`] or an error stay in
    /// place.
    pub fn traverse(&mut self, root: &NodeRef) -> Result<NodeRef, TraversalError> {
        debug!(
            visitors = self.visitors.len(),
            root = root.kind(),
            "Starting traversal"
        );

        let outcome = self.walk_node(root, 0, 0)?;
        debug!(outcome = outcome.name(), "Traversal finished");

        Ok(match outcome {
            Outcome::Replace(node) | Outcome::Stop(Some(node)) => node,
            Outcome::Keep | Outcome::Remove | Outcome::Stop(None) => root.clone(),
        })
    }

    fn enter_chain(&mut self, node: &NodeRef, sequence: usize) -> Entered {
        let mut entered = Entered {
            target: node.clone(),
            invoked: 0,
            pending: Pending::Walk,
        };

        for (index, visitor) in self.visitors.iter_mut().enumerate() {
            entered.invoked = index + 1;
            let Some(op) = visitor.enter(&entered.target, sequence) else {
                continue;
            };
            trace!(visitor = index, node = entered.target.kind(), op = op.name(), "enter");

            match op {
                Operation::Replace(next) => {
                    entered.target = next;
                    entered.pending = Pending::Walk;
                }
                Operation::SkipChildren => entered.pending = Pending::SkipChildren,
                Operation::Remove => entered.pending = Pending::Remove,
                Operation::SkipSelf => {
                    entered.pending = Pending::SkipChildren;
                    break;
                }
                Operation::Stop => {
                    entered.pending = Pending::Stop;
                    break;
                }
            }
        }

        entered
    }

    /// Runs `leave` for the first `invoked` visitors. Returns the latest
    /// target and whether a visitor stopped the traversal.
    fn leave_chain(
        &mut self,
        mut target: NodeRef,
        sequence: usize,
        invoked: usize,
    ) -> (NodeRef, bool) {
        for (index, visitor) in self.visitors[..invoked].iter_mut().enumerate() {
            let Some(op) = visitor.leave(&target, sequence) else {
                continue;
            };
            trace!(visitor = index, node = target.kind(), op = op.name(), "leave");

            match op {
                Operation::Replace(next) => target = next,
                Operation::Stop => return (target, true),
                Operation::SkipChildren | Operation::SkipSelf | Operation::Remove => {}
            }
        }

        (target, false)
    }

    fn walk_node(
        &mut self,
        node: &NodeRef,
        sequence: usize,
        depth: usize,
    ) -> Result<Outcome, TraversalError> {
        if let Some(limit) = self.config.max_depth
            && depth > limit
        {
            return Err(TraversalError::DepthExceeded {
                limit,
                node: node.clone(),
            });
        }

        let entered = self.enter_chain(node, sequence);
        match entered.pending {
            Pending::Stop => return Ok(Outcome::Stop(replacement(node, entered.target))),
            Pending::Remove => return Ok(Outcome::Remove),
            Pending::Walk | Pending::SkipChildren => {}
        }

        let target = entered.target;
        if entered.pending == Pending::Walk
            && let Some(children) = target.children()?
            && self.walk_children(&children, depth + 1)?.is_break()
        {
            return Ok(Outcome::Stop(replacement(node, target)));
        }

        let (target, stopped) = self.leave_chain(target, sequence, entered.invoked);
        let replaced = replacement(node, target);
        Ok(if stopped {
            Outcome::Stop(replaced)
        } else {
            replaced.map_or(Outcome::Keep, Outcome::Replace)
        })
    }

    /// Walks the present slots of `children`, applying removals and
    /// replacements to their slots. Breaks when the traversal was stopped.
    fn walk_children(
        &mut self,
        children: &ChildrenRef,
        depth: usize,
    ) -> Result<ControlFlow<()>, TraversalError> {
        let mut sequence = 0;

        for key in children.keys() {
            match children.get(&key)? {
                Slot::Empty => continue,
                Slot::Node(child) => {
                    let outcome = self.walk_node(&child, sequence, depth)?;
                    match outcome {
                        Outcome::Stop(_) => return Ok(ControlFlow::Break(())),
                        Outcome::Remove => {
                            trace!(slot = %key, node = child.kind(), "Removing node");
                            children.set(&key, Slot::Empty)?;
                        }
                        Outcome::Replace(next) => {
                            trace!(
                                slot = %key,
                                node = child.kind(),
                                with = next.kind(),
                                "Replacing node"
                            );
                            children.set(&key, Slot::Node(next))?;
                        }
                        Outcome::Keep => {}
                    }
                }
                Slot::Children(nested) => {
                    if self.walk_children(&nested, depth)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
            }
            sequence += 1;
        }

        Ok(ControlFlow::Continue(()))
    }
}
