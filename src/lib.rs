//! A small combinator-based grammar engine.
//!
//! Grammars are assembled programmatically as a graph of typed
//! combinators (terminal strings, ordered alternation, ordered
//! concatenation, set-difference exception, zero-or-more repetition)
//! held in an arena inside a [`Grammar`]. Rules may reference themselves
//! or each other, directly or transitively, before they are fully
//! populated; see [`Grammar::rule`].
//!
//! Every combinator supports two operations: `matches`, a pure
//! recognizer that answers whether a span of text at a position
//! satisfies the rule, and `parse_at`, which additionally records which
//! sub-rules matched which spans in an ordered [`ParseTree`],
//! backtracking with full rollback on failure.
//!
//! ```
//! use ebnf_engine::{Grammar, MemorySource, ParseTree};
//!
//! let mut g = Grammar::new();
//! let list = g.rule("list");
//! let x = g.terminal("x").unwrap();
//! let comma = g.terminal(",").unwrap();
//! let chain = g.concatenation();
//! g.extend(chain, &[x, comma, list]).unwrap();
//! g.extend(list, &[chain, x]).unwrap();
//!
//! let source = MemorySource::new("input", "x,x,x");
//! let mut tree = ParseTree::root(source.start());
//! assert!(g.parse(&mut tree, "list").unwrap());
//! assert_eq!(tree.children[0].end.byte_offset, 5);
//! ```

mod bootstrap;
mod error;
mod grammar;
mod position;
mod tree;

pub use bootstrap::ebnf_grammar;
pub use error::Error;
pub use grammar::{Combinator, Grammar, NodeId};
pub use position::{MemorySource, Position, Source};
pub use tree::{Dfs, ParseTree};
