//!# subline
//!
//! `subline` is a small regular-expression engine built on the classical
//! three-stage pipeline: a pattern is parsed into a syntax tree, the tree is
//! turned into a nondeterministic finite automaton by the Thompson
//! construction, the NFA is turned into a deterministic finite automaton by
//! the subset construction, and the DFA then scans input for the leftmost,
//! longest-at-start, non-empty match.
//!
//! ## Usage
//!
//! ```rust
//! use subline::compile;
//!
//! let matcher = compile("(ab)+").unwrap();
//! let m = matcher.search("xxababy").unwrap();
//! assert_eq!((m.start, m.end), (2, 6));
//! assert_eq!(&"xxababy"[m.range()], "abab");
//! assert!(matcher.search("xyz").is_none());
//! ```
//!
//! ## Pattern syntax
//!
//! Five bytes are reserved: `|` for alternation, `*` and `+` for zero-or-more
//! and one-or-more repetition, and `(` `)` for grouping. Every other byte
//! matches itself. There are no escapes, character classes or anchors. Terms
//! may be empty, so `(a|)` matches `a` or nothing and the empty pattern is
//! valid (it compiles, and matches no line, since reported matches must
//! consume at least one byte).
//!
//! ## Match policy
//!
//! [Matcher::search] commits to the earliest starting offset that admits any
//! non-empty match and extends it to the longest accepting prefix from that
//! offset. It does not look for a globally longest match across all offsets,
//! and it never reports an empty span, even for patterns like `a*` that
//! accept the empty string.
//!
//! ## Limits
//!
//! Automata are built in fixed-capacity arenas:
//! [nfa::NFA_STATE_MAX] (128) NFA states and [dfa::DFA_STATE_MAX] (100) DFA
//! states per compilation. Patterns exceeding either fail to compile with a
//! capacity error. A compiled [Matcher] is immutable and can be shared
//! across threads.

pub mod ast;
pub mod dfa;
pub mod matcher;
pub mod nfa;
pub mod parser;
mod table;

pub use matcher::{compile, CompileError, Match, Matcher};
