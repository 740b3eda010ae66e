use crate::grammar::NodeId;
use crate::position::Position;

/// An ordered record of which combinators matched which spans.
///
/// Nodes are appended speculatively while a combinator evaluates and
/// removed again if the enclosing combinator fails, so a tree never holds
/// a node for a sub-rule that did not contribute to its parent's match.
#[derive(Debug, Clone)]
pub struct ParseTree<'s> {
    /// Handle of the combinator that produced this node. The root has
    /// none.
    pub owner: Option<NodeId>,
    /// Where this node's match ends. For the root this is the starting
    /// position; for an empty match it stays at the pre-match position.
    pub end: Position<'s>,
    /// Sub-matches within this node's span, in match order.
    pub children: Vec<ParseTree<'s>>,
}

impl<'s> ParseTree<'s> {
    /// The root node for a parse beginning at `start`.
    pub fn root(start: Position<'s>) -> ParseTree<'s> {
        ParseTree {
            owner: None,
            end: start,
            children: Vec::new(),
        }
    }

    pub fn new(owner: NodeId, end: Position<'s>) -> ParseTree<'s> {
        ParseTree {
            owner: Some(owner),
            end,
            children: Vec::new(),
        }
    }

    /// Append a child node ending at `end`.
    pub fn add_child(&mut self, owner: NodeId, end: Position<'s>) {
        self.children.push(ParseTree::new(owner, end));
    }

    /// Pull this node's end forward to its last child's end. No-op for a
    /// childless node, which keeps the pre-match end in place.
    pub(crate) fn adopt_last_child_end(&mut self) {
        if let Some(end) = self.children.last().map(|c| c.end.clone()) {
            self.end = end;
        }
    }

    /// Walk the tree depth first, pre-order, this node included.
    pub fn iter(&self) -> Dfs<'_, 's> {
        Dfs { stack: vec![self] }
    }
}

/// Depth-first iterator over a [`ParseTree`].
pub struct Dfs<'a, 's> {
    stack: Vec<&'a ParseTree<'s>>,
}

impl<'a, 's> Iterator for Dfs<'a, 's> {
    type Item = &'a ParseTree<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
