use std::sync::Arc;

use planning_problem::ActionId;

/// A state reached by the search, linked back to the node it was reached from.
///
/// Nodes are shared through `Arc` so that every walk of a batch can branch
/// from the same ancestor. A chain is freed once no walk, driver or plan
/// holds on to any of its nodes.
#[derive(Debug)]
pub struct SearchNode<S> {
    state: S,
    origin: Option<Origin<S>>,
    cost: u64,
    depth: usize,
    heuristic: f64,
}

#[derive(Debug)]
struct Origin<S> {
    action: ActionId,
    parent: Arc<SearchNode<S>>,
}

impl<S> SearchNode<S> {
    pub fn root(state: S, heuristic: f64) -> Arc<Self> {
        Arc::new(Self {
            state,
            origin: None,
            cost: 0,
            depth: 0,
            heuristic,
        })
    }

    /// The node reached by applying `action` to `parent`'s state. Every action
    /// has unit cost.
    pub fn child(parent: &Arc<Self>, action: ActionId, state: S, heuristic: f64) -> Arc<Self> {
        Arc::new(Self {
            state,
            origin: Some(Origin {
                action,
                parent: Arc::clone(parent),
            }),
            cost: parent.cost + 1,
            depth: parent.depth + 1,
            heuristic,
        })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// `None` exactly when this node is a root.
    pub fn parent(&self) -> Option<&Arc<SearchNode<S>>> {
        self.origin.as_ref().map(|o| &o.parent)
    }

    /// The action applied to the parent to reach this node.
    pub fn action(&self) -> Option<ActionId> {
        self.origin.as_ref().map(|o| o.action)
    }

    pub fn is_root(&self) -> bool {
        self.origin.is_none()
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// This node followed by its parent, grandparent, and so on up to the root.
    pub fn ancestors(&self) -> Ancestors<'_, S> {
        Ancestors { next: Some(self) }
    }
}

impl<S: PartialEq> SearchNode<S> {
    /// Whether both nodes hold the same state, path and values, regardless of
    /// whether they are the same allocation.
    pub fn same_content(&self, other: &SearchNode<S>) -> bool {
        self.state == other.state
            && self.action() == other.action()
            && self.cost == other.cost
            && self.depth == other.depth
            && self.heuristic.to_bits() == other.heuristic.to_bits()
            && match (self.parent(), other.parent()) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.same_content(b),
                _ => false,
            }
    }
}

impl<S> Drop for SearchNode<S> {
    // Unlink the chain iteratively. Dropping a long path recursively would
    // overflow the stack.
    fn drop(&mut self) {
        let mut origin = self.origin.take();
        while let Some(Origin { parent, .. }) = origin {
            match Arc::try_unwrap(parent) {
                Ok(mut node) => origin = node.origin.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Ancestors<'a, S> {
    next: Option<&'a SearchNode<S>>,
}

impl<'a, S> Iterator for Ancestors<'a, S> {
    type Item = &'a SearchNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent().map(|p| &**p);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(length: usize) -> Arc<SearchNode<usize>> {
        let mut node = SearchNode::root(0, length as f64);
        for i in 1..=length {
            node = SearchNode::child(&node, ActionId(i), i, (length - i) as f64);
        }
        node
    }

    #[test]
    fn root_has_neither_parent_nor_action() {
        let root = SearchNode::root("init", 4.0);
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert!(root.action().is_none());
        assert_eq!(root.cost(), 0);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.heuristic(), 4.0);
    }

    #[test]
    fn children_accumulate_unit_cost_and_depth() {
        let root = SearchNode::root('a', 2.0);
        let child = SearchNode::child(&root, ActionId(7), 'b', 1.0);
        let grandchild = SearchNode::child(&child, ActionId(3), 'c', 0.0);

        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.cost(), 2);
        assert_eq!(grandchild.action(), Some(ActionId(3)));
        assert!(Arc::ptr_eq(grandchild.parent().expect("has parent"), &child));
    }

    #[test]
    fn depth_matches_number_of_links_to_the_root() {
        let node = chain(12);
        let links = node.ancestors().take_while(|n| !n.is_root()).count();
        assert_eq!(links, node.depth());
        assert_eq!(node.ancestors().count(), node.depth() + 1);
        assert_eq!(node.cost() as usize, node.depth());
    }

    #[test]
    fn siblings_share_their_parent() {
        let root = SearchNode::root(0, 1.0);
        let left = SearchNode::child(&root, ActionId(0), 1, 0.0);
        let right = SearchNode::child(&root, ActionId(1), 2, 0.0);

        assert_eq!(Arc::strong_count(&root), 3);
        drop(left);
        assert_eq!(Arc::strong_count(&root), 2);
        assert!(right.parent().is_some());
    }

    #[test]
    fn equal_content_is_detected_across_allocations() {
        let a = SearchNode::root(vec![1, 2], 3.0);
        let b = SearchNode::root(vec![1, 2], 3.0);
        let c = SearchNode::child(&a, ActionId(0), vec![1, 2], 3.0);

        assert!(a.same_content(&b));
        assert!(!a.same_content(&c));
    }

    #[test]
    fn dropping_a_very_long_chain_does_not_overflow() {
        drop(chain(500_000));
    }
}
