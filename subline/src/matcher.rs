//! # Compilation and searching
//! [compile] runs the full pipeline over a pattern: parse to a syntax tree,
//! Thompson-construct the [Nfa], subset-construct the [Dfa], and package the
//! result as an immutable [Matcher]. [Matcher::search] then scans an input
//! for the leftmost match: the first starting offset admitting a non-empty
//! match, extended to the longest accepting prefix from that offset.

use crate::dfa::Dfa;
use crate::nfa::{CapacityError, Nfa};
use crate::parser::{self, SyntaxError};
use std::ops::Range;
use thiserror::Error;

/// Compilation failure: either the pattern is ill-formed, or its automata
/// exceed the fixed arena capacities.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("capacity exceeded: {0}")]
    Capacity(#[from] CapacityError),
}

/// A matched span: `start` is the offset of the first matched byte, `end`
/// the offset one past the last. Matches are never empty, so
/// `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the matched span in bytes, always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// A compiled pattern, ready for any number of searches. The matcher is
/// read-only after compilation (there are no mutating methods), so it can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    nfa: Nfa,
    dfa: Dfa,
}

/// Compiles a pattern. Each compilation owns its arenas, so a failure here
/// cannot disturb matchers compiled earlier.
pub fn compile(pattern: &str) -> Result<Matcher, CompileError> {
    let tree = parser::parse(pattern)?;
    let nfa = Nfa::build(&tree)?;
    let dfa = Dfa::from_nfa(&nfa)?;
    Ok(Matcher { nfa, dfa })
}

impl Matcher {
    /// Searches for the leftmost, longest-at-start, non-empty match. Span
    /// offsets are byte offsets into `haystack`.
    pub fn search(&self, haystack: &str) -> Option<Match> {
        self.search_bytes(haystack.as_bytes())
    }

    /// Byte-slice form of [Matcher::search]. Never fails; an empty haystack
    /// simply has no match.
    pub fn search_bytes(&self, haystack: &[u8]) -> Option<Match> {
        for start in 0..haystack.len() {
            let mut evaluator = self.dfa.evaluator();
            let mut last_accept = None;
            let mut pos = start;
            loop {
                if evaluator.is_accepting() {
                    last_accept = Some(pos);
                }
                let Some(&byte) = haystack.get(pos) else {
                    break;
                };
                if evaluator.step(byte).is_none() {
                    break;
                }
                pos += 1;
            }
            // A match rooted here must consume at least one byte: the
            // initial state is accepting for patterns like a*, and an empty
            // match at every offset is useless for a line scanner.
            match last_accept {
                Some(end) if end > start => return Some(Match { start, end }),
                _ => continue,
            }
        }
        None
    }

    /// Gets the Thompson NFA this matcher was compiled through.
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// Gets the DFA driving the scanner.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(pattern: &str, input: &str) -> Option<(usize, usize)> {
        compile(pattern)
            .unwrap()
            .search(input)
            .map(|m| (m.start, m.end))
    }

    #[test]
    fn plain_concatenation() {
        assert_eq!(span("abc", "xxabcyy"), Some((2, 5)));
    }

    #[test]
    fn leftmost_alternative_wins() {
        // The b at offset 3 comes before the a at offset 6.
        assert_eq!(span("a|b", "cccbccaccc"), Some((3, 4)));
    }

    #[test]
    fn closure_extends_to_the_longest_match() {
        assert_eq!(span("a*b", "aaab"), Some((0, 4)));
    }

    #[test]
    fn repeated_group() {
        assert_eq!(span("(ab)+", "xababy"), Some((1, 5)));
    }

    #[test]
    fn empty_matches_are_rejected() {
        assert_eq!(span("a*", "xxx"), None);
    }

    #[test]
    fn closure_over_union() {
        assert_eq!(span("(a|bc)*d", "bcaad"), Some((0, 5)));
    }

    #[test]
    fn longest_at_start_beats_later_longer() {
        // Committed to offset 0 even though the run at offset 2 is longer.
        assert_eq!(span("ab*", "abcabbb"), Some((0, 2)));
    }

    #[test]
    fn match_can_cover_the_whole_input() {
        assert_eq!(span("a+", "aaaa"), Some((0, 4)));
    }

    #[test]
    fn no_match_on_empty_input() {
        assert_eq!(span("a", ""), None);
        assert_eq!(span("a*", ""), None);
    }

    #[test]
    fn empty_pattern_never_matches() {
        assert_eq!(span("", "anything"), None);
        assert_eq!(span("()", "anything"), None);
        assert_eq!(span("|", "anything"), None);
    }

    #[test]
    fn empty_alternative_still_allows_the_other_branch() {
        assert_eq!(span("(a|)b", "xb"), Some((1, 2)));
        assert_eq!(span("(a|)b", "xab"), Some((1, 3)));
    }

    #[test]
    fn match_offsets_are_well_formed() {
        let matcher = compile("(a|b)+").unwrap();
        let input = "ccabbac";
        let m = matcher.search(input).unwrap();
        assert!(m.start < m.end);
        assert!(m.end <= input.len());
        assert_eq!(&input[m.range()], "abba");
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn search_is_reusable() {
        let matcher = compile("b+").unwrap();
        assert_eq!(matcher.search("abc").map(|m| m.range()), Some(1..2));
        assert_eq!(matcher.search("nope"), None);
        assert_eq!(matcher.search("bbb").map(|m| m.range()), Some(0..3));
    }

    #[test]
    fn syntax_errors_surface_through_compile() {
        assert!(matches!(
            compile("a**"),
            Err(CompileError::Syntax(SyntaxError::ExpectedPrimary(2)))
        ));
    }

    #[test]
    fn capacity_errors_surface_through_compile() {
        assert!(matches!(
            compile(&"a".repeat(200)),
            Err(CompileError::Capacity(CapacityError::NfaStates(_)))
        ));
        assert!(matches!(
            compile(&"ab".repeat(60)),
            Err(CompileError::Capacity(CapacityError::DfaStates(_)))
        ));
    }

    #[test]
    fn error_messages_are_one_liners() {
        let err = compile("(a").unwrap_err();
        assert_eq!(err.to_string(), "syntax error: close paren expected at byte 2");
        let err = compile(&"a".repeat(200)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "capacity exceeded: too many NFA states (limit 128)"
        );
    }
}
