use std::collections::HashMap;

use crate::error::Error;
use crate::position::Position;
use crate::tree::ParseTree;

/// Stable handle to a combinator in a [`Grammar`]'s arena.
///
/// Handles are plain indices, so rules can reference themselves and each
/// other freely; cycles are a normal shape for a grammar graph, not an
/// error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The closed set of grammar combinators.
#[derive(Debug, Clone)]
pub enum Combinator {
    /// A literal string. Even single characters are strings, which keeps
    /// multi-byte characters unremarkable.
    Terminal(String),
    /// Ordered choice over members; the first to succeed wins.
    Alternation(Vec<NodeId>),
    /// Ordered sequence of members; all must succeed, in order.
    Concatenation(Vec<NodeId>),
    /// Everything in `everything` (or any input, when absent) that is not
    /// also in `except`.
    Exception {
        everything: Option<NodeId>,
        except: NodeId,
    },
    /// Zero or more occurrences of `repeated`. `min` is carried for
    /// completeness but repetition is always zero-or-more.
    Repetition { repeated: NodeId, min: u32 },
}

impl Combinator {
    pub fn description(&self) -> &'static str {
        match self {
            Combinator::Terminal(_) => "string",
            Combinator::Alternation(_) => "alternation",
            Combinator::Concatenation(_) => "concatenation",
            Combinator::Exception { .. } => "exception",
            Combinator::Repetition { .. } => "repetition",
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: Combinator,
    /// The rule name this combinator was registered under, if any. A
    /// label for diagnostics, never consulted for dispatch.
    key: Option<String>,
}

/// A grammar: an arena of combinators plus a name-to-handle rule table.
///
/// Built once, then read-only while parsing. Forward and recursive
/// references are made with the two-phase [`Grammar::rule`] placeholder:
/// get a handle under a name first, populate its members later, possibly
/// with the handle itself among them.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    nodes: Vec<Node>,
    rules: HashMap<String, NodeId>,
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar::default()
    }

    fn push(&mut self, kind: Combinator) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, key: None });
        id
    }

    /// A literal string combinator. Empty literals are rejected; they
    /// would accept forever without consuming anything.
    pub fn terminal<V: Into<String>>(&mut self, value: V) -> Result<NodeId, Error> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyTerminal);
        }
        Ok(self.push(Combinator::Terminal(value)))
    }

    /// An empty ordered choice; populate it with [`Grammar::add_member`].
    pub fn alternation(&mut self) -> NodeId {
        self.push(Combinator::Alternation(Vec::new()))
    }

    /// An empty ordered sequence; populate it with [`Grammar::add_member`].
    pub fn concatenation(&mut self) -> NodeId {
        self.push(Combinator::Concatenation(Vec::new()))
    }

    pub fn exception(&mut self, everything: Option<NodeId>, except: NodeId) -> NodeId {
        self.push(Combinator::Exception { everything, except })
    }

    pub fn repetition(&mut self, repeated: NodeId, min: u32) -> NodeId {
        self.push(Combinator::Repetition { repeated, min })
    }

    /// Append a member to an alternation or concatenation.
    pub fn add_member(&mut self, group: NodeId, member: NodeId) -> Result<(), Error> {
        match &mut self.nodes[group.0].kind {
            Combinator::Alternation(members) | Combinator::Concatenation(members) => {
                members.push(member);
                Ok(())
            }
            other => Err(Error::NotAGroup(other.description())),
        }
    }

    /// Append several members in order.
    pub fn extend(&mut self, group: NodeId, members: &[NodeId]) -> Result<(), Error> {
        for &member in members {
            self.add_member(group, member)?;
        }
        Ok(())
    }

    /// Register `id` under `name`, stamping the name onto the node as its
    /// key. Re-registering a name overwrites the previous mapping.
    pub fn add(&mut self, name: &str, id: NodeId) {
        self.nodes[id.0].key = Some(name.to_string());
        self.rules.insert(name.to_string(), id);
    }

    /// Look up `name`, creating and registering an empty alternation
    /// placeholder when absent. This is the forward-reference primitive:
    /// a recursive rule takes its own handle here before it is populated.
    pub fn rule(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.rules.get(name) {
            return id;
        }
        let id = self.alternation();
        self.add(name, id);
        id
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.rules.get(name).copied()
    }

    /// The rule name stamped onto a node, if it was registered.
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].key.as_deref()
    }

    pub fn description(&self, id: NodeId) -> &'static str {
        self.nodes[id.0].kind.description()
    }

    /// Parse starting from the rule registered under `name`, growing
    /// `tree`. `Ok(false)` means the input did not match; an unknown name
    /// is reported separately so a misconfigured grammar is not mistaken
    /// for a non-matching input.
    pub fn parse<'s>(&self, tree: &mut ParseTree<'s>, name: &str) -> Result<bool, Error> {
        let id = self
            .get(name)
            .ok_or_else(|| Error::UnknownRule(name.to_string()))?;
        self.parse_at(tree, id)
    }

    /// Pure recognizer: does the combinator accept the input at `at`, and
    /// if so where does the match end? No tree is involved, so failure
    /// has nothing to roll back.
    pub fn matches<'s>(
        &self,
        id: NodeId,
        at: &Position<'s>,
    ) -> Result<Option<Position<'s>>, Error> {
        match &self.nodes[id.0].kind {
            Combinator::Terminal(value) => Ok(at.matches(value)),
            Combinator::Alternation(members) => {
                for &member in members {
                    if let Some(after) = self.matches(member, at)? {
                        return Ok(Some(after));
                    }
                }
                Ok(None)
            }
            Combinator::Concatenation(members) => {
                let mut cursor = at.clone();
                for &member in members {
                    match self.matches(member, &cursor)? {
                        Some(next) => cursor = next,
                        None => return Ok(None),
                    }
                }
                Ok(Some(cursor))
            }
            Combinator::Exception { everything, except } => {
                // Accepts only when `except` fails at the very same
                // starting position; its end position is never used.
                let after = match everything {
                    Some(e) => match self.matches(*e, at)? {
                        Some(after) => after,
                        None => return Ok(None),
                    },
                    // With no positive set the match is zero-width.
                    None => at.clone(),
                };
                if self.matches(*except, at)?.is_none() {
                    Ok(Some(after))
                } else {
                    Ok(None)
                }
            }
            kind @ Combinator::Repetition { .. } => Err(Error::Unsupported {
                operation: "match",
                combinator: kind.description(),
            }),
        }
    }

    /// Tree-building evaluator. On success the combinator's node (and its
    /// sub-matches) hang off `tree`; on failure `tree` is exactly as it
    /// was before the call.
    pub fn parse_at<'s>(&self, tree: &mut ParseTree<'s>, id: NodeId) -> Result<bool, Error> {
        match &self.nodes[id.0].kind {
            Combinator::Terminal(value) => match tree.end.matches(value) {
                Some(after) => {
                    tree.add_child(id, after);
                    Ok(true)
                }
                None => Ok(false),
            },
            Combinator::Alternation(members) => {
                tree.add_child(id, tree.end.clone());
                let slot = tree.children.len() - 1;
                for &member in members {
                    match self.parse_at(&mut tree.children[slot], member) {
                        Ok(true) => {
                            tree.children[slot].adopt_last_child_end();
                            return Ok(true);
                        }
                        Ok(false) => continue,
                        Err(err) => {
                            tree.children.pop();
                            return Err(err);
                        }
                    }
                }
                tree.children.pop();
                Ok(false)
            }
            Combinator::Concatenation(members) => {
                tree.add_child(id, tree.end.clone());
                let slot = tree.children.len() - 1;
                for &member in members {
                    match self.parse_at(&mut tree.children[slot], member) {
                        // Thread the cursor through for the next member.
                        Ok(true) => tree.children[slot].adopt_last_child_end(),
                        Ok(false) => {
                            // All or nothing: earlier members' matches go
                            // with the node.
                            tree.children.pop();
                            return Ok(false);
                        }
                        Err(err) => {
                            tree.children.pop();
                            return Err(err);
                        }
                    }
                }
                Ok(true)
            }
            kind @ Combinator::Exception { .. } => Err(Error::Unsupported {
                operation: "parse",
                combinator: kind.description(),
            }),
            Combinator::Repetition { repeated, .. } => {
                tree.add_child(id, tree.end.clone());
                let slot = tree.children.len() - 1;
                loop {
                    match self.parse_at(&mut tree.children[slot], *repeated) {
                        Ok(true) => tree.children[slot].adopt_last_child_end(),
                        // Zero matches is still a match; the node stays.
                        Ok(false) => return Ok(true),
                        Err(err) => {
                            tree.children.pop();
                            return Err(err);
                        }
                    }
                }
            }
        }
    }
}
