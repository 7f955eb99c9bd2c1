//! # Nondeterministic Finite Automaton
//! This module builds an [Nfa] from a syntax tree using the Thompson
//! construction: two distinguished states `entry` and `exit` are allocated
//! up front, and each tree node contributes transitions such that the node's
//! language is exactly the set of strings spelled by paths between the two
//! endpoints it is generated into.
//!
//! States live in a fixed-capacity arena and are referenced by index; no
//! state is ever deleted or renumbered, so indices are stable identities.
//! Transitions are labelled either with a byte or with ε (a transition that
//! consumes no input), modelled by the [Label] sum rather than a sentinel
//! byte value.
//!
//! ```
//! use subline::parser::parse;
//! use subline::nfa::Nfa;
//!
//! let tree = parse("a*b").unwrap();
//! let nfa = Nfa::build(&tree).unwrap();
//! assert!(nfa.accepts(b"b"));
//! assert!(nfa.accepts(b"aaab"));
//! assert!(!nfa.accepts(b"aaa"));
//! ```

pub mod set;

use crate::ast::Ast;
use crate::table::Table;
use set::StateSet;
use thiserror::Error;

/// Upper bound on the number of NFA states per compilation. A pattern whose
/// Thompson construction needs more states fails with
/// [CapacityError::NfaStates]. The [StateSet] bit width is derived from this
/// constant.
pub const NFA_STATE_MAX: usize = 128;

/// An automaton arena was exhausted during construction. Fatal to the
/// current compilation, but never corrupts previously compiled matchers:
/// every compilation owns its own arenas.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("too many NFA states (limit {0})")]
    NfaStates(usize),
    #[error("too many DFA states (limit {0})")]
    DfaStates(usize),
}

/// The label of an NFA transition: a byte to be consumed, or ε for a
/// transition consuming no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Byte(u8),
    Epsilon,
}

/// An outgoing transition of an NFA state. Targets always reference
/// allocated states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: Label,
    pub target: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NfaState {
    transitions: Vec<Transition>,
}

/// A nondeterministic finite automaton with ε-moves. A string is accepted
/// iff some path from `entry` to `exit` spells it with its non-ε labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<NfaState>,
    entry: usize,
    exit: usize,
}

impl Nfa {
    /// Runs the Thompson construction over the tree. The overall entry and
    /// exit states are allocated first, so they always get indices 0 and 1.
    pub fn build(tree: &Ast) -> Result<Self, CapacityError> {
        let mut nfa = Nfa {
            states: Vec::new(),
            entry: 0,
            exit: 0,
        };
        nfa.entry = nfa.alloc_state()?;
        nfa.exit = nfa.alloc_state()?;
        let (entry, exit) = (nfa.entry, nfa.exit);
        nfa.gen(tree, entry, exit)?;
        Ok(nfa)
    }

    /// Generates transitions such that `tree` is matched by some path from
    /// `entry` to `way_out`.
    fn gen(&mut self, tree: &Ast, entry: usize, way_out: usize) -> Result<(), CapacityError> {
        match tree {
            Ast::Char(byte) => self.add_transition(entry, Label::Byte(*byte), way_out),
            Ast::Empty => self.add_transition(entry, Label::Epsilon, way_out),
            Ast::Union(left, right) => {
                // Both alternatives share the same endpoints.
                self.gen(left, entry, way_out)?;
                self.gen(right, entry, way_out)?;
            }
            Ast::Concat(left, right) => {
                let mid = self.alloc_state()?;
                self.gen(left, entry, mid)?;
                self.gen(right, mid, way_out)?;
            }
            Ast::Closure(inner) => {
                let head = self.alloc_state()?;
                let tail = self.alloc_state()?;
                self.add_transition(entry, Label::Epsilon, head);
                self.gen(inner, head, tail)?;
                // Loop back for repetition, skip via head for zero matches;
                // tail never reaches way_out except through head.
                self.add_transition(tail, Label::Epsilon, head);
                self.add_transition(head, Label::Epsilon, way_out);
            }
        }
        Ok(())
    }

    fn alloc_state(&mut self) -> Result<usize, CapacityError> {
        if self.states.len() >= NFA_STATE_MAX {
            return Err(CapacityError::NfaStates(NFA_STATE_MAX));
        }
        self.states.push(NfaState::default());
        Ok(self.states.len() - 1)
    }

    fn add_transition(&mut self, from: usize, label: Label, target: usize) {
        self.states[from].transitions.push(Transition { label, target });
    }

    /// Gets the index of the entry state.
    pub fn entry(&self) -> usize {
        self.entry
    }

    /// Gets the index of the exit state. A configuration containing this
    /// state is accepting.
    pub fn exit(&self) -> usize {
        self.exit
    }

    /// Gets the number of allocated states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Gets the outgoing transitions of a state, in insertion order.
    pub fn transitions(&self, state: usize) -> &[Transition] {
        &self.states[state].transitions
    }

    /// Grows the set in place to include every state reachable from a member
    /// by ε-transitions alone. Depth-first; the bit vector doubles as the
    /// visited record, so each state is expanded at most once. Idempotent.
    pub fn epsilon_closure(&self, set: &mut StateSet) {
        let mut pending: Vec<usize> = set.iter().collect();
        while let Some(state) = pending.pop() {
            for transition in &self.states[state].transitions {
                if transition.label == Label::Epsilon && set.insert(transition.target) {
                    pending.push(transition.target);
                }
            }
        }
    }

    /// Checks whether this automaton accepts the input, by direct simulation
    /// of the state-set semantics. The DFA answers the same question faster;
    /// this form is the ground truth the DFA is tested against.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut current = StateSet::new();
        current.insert(self.entry);
        self.epsilon_closure(&mut current);
        for &byte in input {
            let mut next = StateSet::new();
            for state in current.iter() {
                for transition in &self.states[state].transitions {
                    if transition.label == Label::Byte(byte) {
                        next.insert(transition.target);
                    }
                }
            }
            self.epsilon_closure(&mut next);
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.contains(self.exit)
    }

    /// Renders the transition list as an aligned text table, one row per
    /// state. The entry state is marked `→` and the exit state `*`.
    pub fn to_table(&self) -> String {
        let rows = self
            .states
            .iter()
            .enumerate()
            .map(|(idx, state)| {
                let transitions = state
                    .transitions
                    .iter()
                    .map(|t| match t.label {
                        Label::Byte(byte) => format!("{}→{}", display_byte(byte), t.target),
                        Label::Epsilon => format!("ε→{}", t.target),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                (idx.to_string(), transitions)
            })
            .collect::<Vec<_>>();

        let mut table = Table::default();
        for (idx, (id, transitions)) in rows.into_iter().enumerate() {
            table.push_row(vec![
                if idx == self.entry { "→".to_string() } else { String::new() },
                if idx == self.exit { "*".to_string() } else { String::new() },
                id,
                transitions,
            ]);
        }
        table.render(" ")
    }
}

pub(crate) fn display_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        (byte as char).to_string()
    } else {
        format!("\\x{byte:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn build(pattern: &str) -> Nfa {
        Nfa::build(&parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn single_char_is_one_transition() {
        let nfa = build("a");
        assert_eq!(nfa.len(), 2);
        assert_eq!(
            nfa.transitions(nfa.entry()),
            &[Transition {
                label: Label::Byte(b'a'),
                target: nfa.exit()
            }]
        );
    }

    #[test]
    fn empty_pattern_is_one_epsilon() {
        let nfa = build("");
        assert_eq!(nfa.len(), 2);
        assert_eq!(
            nfa.transitions(nfa.entry()),
            &[Transition {
                label: Label::Epsilon,
                target: nfa.exit()
            }]
        );
        assert!(nfa.accepts(b""));
        assert!(!nfa.accepts(b"a"));
    }

    #[test]
    fn union_shares_endpoints() {
        // a|b adds no fresh states: both branches run entry to exit.
        let nfa = build("a|b");
        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.transitions(nfa.entry()).len(), 2);
    }

    #[test]
    fn concat_allocates_one_midpoint() {
        assert_eq!(build("ab").len(), 3);
        assert_eq!(build("abc").len(), 4);
    }

    #[test]
    fn closure_allocates_a_loop_pair() {
        let nfa = build("a*");
        assert_eq!(nfa.len(), 4);
        assert!(nfa.accepts(b""));
        assert!(nfa.accepts(b"a"));
        assert!(nfa.accepts(b"aaaa"));
        assert!(!nfa.accepts(b"ab"));
    }

    #[test]
    fn acceptance_follows_the_language() {
        let nfa = build("(a|bc)*d");
        assert!(nfa.accepts(b"d"));
        assert!(nfa.accepts(b"ad"));
        assert!(nfa.accepts(b"bcaad"));
        assert!(!nfa.accepts(b"bd"));
        assert!(!nfa.accepts(b"bcb"));
        assert!(!nfa.accepts(b""));
    }

    #[test]
    fn plus_requires_at_least_one_repetition() {
        let nfa = build("(ab)+");
        assert!(!nfa.accepts(b""));
        assert!(nfa.accepts(b"ab"));
        assert!(nfa.accepts(b"abab"));
        assert!(!nfa.accepts(b"aba"));
    }

    #[test]
    fn epsilon_closure_is_idempotent() {
        let nfa = build("(a*|b)*c");
        let mut once = StateSet::new();
        once.insert(nfa.entry());
        nfa.epsilon_closure(&mut once);
        let mut twice = once;
        nfa.epsilon_closure(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn closure_of_exit_is_just_exit() {
        let nfa = build("ab");
        let mut set = StateSet::new();
        set.insert(nfa.exit());
        nfa.epsilon_closure(&mut set);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![nfa.exit()]);
    }

    #[test]
    fn long_concatenation_exhausts_the_arena() {
        // n literals need n + 1 states; 130 is over the 128-state limit.
        let tree = parse(&"a".repeat(130)).unwrap();
        assert_eq!(
            Nfa::build(&tree),
            Err(CapacityError::NfaStates(NFA_STATE_MAX))
        );
        // 126 literals still fit.
        assert!(Nfa::build(&parse(&"a".repeat(126)).unwrap()).is_ok());
    }

    #[test]
    fn table_marks_entry_and_exit() {
        let table = build("a").to_table();
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('→'));
        assert!(lines[0].contains("a→1"));
        assert!(lines[1].contains('*'));
    }
}
