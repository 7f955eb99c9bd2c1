//! # Deterministic Finite Automaton
//! This module converts an [Nfa] into a [Dfa] by the subset construction:
//! each DFA state is identified by the set of NFA states (a [StateSet] bit
//! vector) the NFA could be in, and set equality decides state identity, so
//! no two DFA entries ever share a member set.
//!
//! The construction keeps an implicit work queue: entries start unvisited,
//! and the main loop repeatedly picks any unvisited entry, expands its
//! per-byte moves, ε-closes each target set and registers it. Registration
//! deduplicates against every existing entry, which both bounds the
//! construction and makes indices stable: entries are never removed or
//! renumbered. Termination follows from the finite, capacity-bounded number
//! of distinct subsets.
//!
//! ```
//! use subline::parser::parse;
//! use subline::nfa::Nfa;
//! use subline::dfa::Dfa;
//!
//! let nfa = Nfa::build(&parse("(ab)+").unwrap()).unwrap();
//! let dfa = Dfa::from_nfa(&nfa).unwrap();
//! assert!(dfa.accepts(b"abab"));
//! assert!(!dfa.accepts(b"aba"));
//! ```

pub mod eval;

use crate::nfa::set::StateSet;
use crate::nfa::{display_byte, CapacityError, Label, Nfa};
use crate::table::Table;
pub use eval::DfaEvaluator;

/// Upper bound on the number of DFA states per compilation. The subset
/// construction fails with [CapacityError::DfaStates] beyond this.
pub const DFA_STATE_MAX: usize = 100;

/// A deterministic finite automaton over bytes. State 0 is the initial
/// state: the ε-closure of the NFA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<DfaState>,
}

/// One DFA entry: the NFA member set that identifies it, whether it is
/// accepting (its members contain the NFA exit), and at most one outgoing
/// transition per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    members: StateSet,
    accepted: bool,
    visited: bool,
    transitions: Vec<(u8, usize)>,
}

impl DfaState {
    /// Gets the NFA state set identifying this DFA state.
    pub fn members(&self) -> &StateSet {
        &self.members
    }

    /// Checks if this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepted
    }

    /// Gets the outgoing transitions as `(byte, target)` pairs.
    pub fn transitions(&self) -> &[(u8, usize)] {
        &self.transitions
    }
}

impl Dfa {
    /// Runs the subset construction over the NFA.
    pub fn from_nfa(nfa: &Nfa) -> Result<Self, CapacityError> {
        let mut dfa = Dfa { states: Vec::new() };

        let mut initial = StateSet::new();
        initial.insert(nfa.entry());
        nfa.epsilon_closure(&mut initial);
        dfa.register(nfa, initial)?;

        while let Some(current) = dfa.states.iter().position(|s| !s.visited) {
            dfa.states[current].visited = true;
            let members = dfa.states[current].members;
            for (byte, mut set) in Self::moves(nfa, &members) {
                nfa.epsilon_closure(&mut set);
                let target = dfa.register(nfa, set)?;
                dfa.states[current].transitions.push((byte, target));
            }
        }
        Ok(dfa)
    }

    /// Computes move(S, ·): for each byte labelling a non-ε transition out
    /// of a member of `members`, the set of targets of those transitions.
    /// Duplicate bytes merge by set union.
    fn moves(nfa: &Nfa, members: &StateSet) -> Vec<(u8, StateSet)> {
        let mut result: Vec<(u8, StateSet)> = Vec::new();
        for state in members.iter() {
            for transition in nfa.transitions(state) {
                if let Label::Byte(byte) = transition.label {
                    match result.iter_mut().find(|(b, _)| *b == byte) {
                        Some((_, set)) => {
                            set.insert(transition.target);
                        }
                        None => {
                            let mut set = StateSet::new();
                            set.insert(transition.target);
                            result.push((byte, set));
                        }
                    }
                }
            }
        }
        result
    }

    /// Registers a member set, deduplicating by set equality against every
    /// existing entry, and returns the entry's index. Acceptance is decided
    /// here: a state is accepting iff its members contain the NFA exit.
    fn register(&mut self, nfa: &Nfa, members: StateSet) -> Result<usize, CapacityError> {
        if let Some(idx) = self.states.iter().position(|s| s.members == members) {
            return Ok(idx);
        }
        if self.states.len() >= DFA_STATE_MAX {
            return Err(CapacityError::DfaStates(DFA_STATE_MAX));
        }
        self.states.push(DfaState {
            members,
            accepted: members.contains(nfa.exit()),
            visited: false,
            transitions: Vec::new(),
        });
        Ok(self.states.len() - 1)
    }

    /// Gets the index of the initial state, which is always 0.
    pub fn initial(&self) -> usize {
        0
    }

    /// Gets the states of this DFA.
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Follows the transition out of `state` on `byte`, if there is one.
    pub fn step(&self, state: usize, byte: u8) -> Option<usize> {
        self.states[state]
            .transitions
            .iter()
            .find_map(|&(b, target)| (b == byte).then_some(target))
    }

    /// Checks if `state` is accepting.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.states[state].accepted
    }

    /// Gets an evaluator, a cursor stepping this DFA byte by byte.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Checks whether this automaton accepts the input as a whole string.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut evaluator = self.evaluator();
        evaluator.step_multiple(input);
        evaluator.is_accepting()
    }

    /// Renders the transition table as aligned text, one row per state:
    /// an `*` marker on accepting states, the state index, its transitions,
    /// and the NFA member set the state stands for.
    pub fn to_table(&self) -> String {
        let rows = self
            .states
            .iter()
            .enumerate()
            .map(|(idx, state)| {
                let transitions = state
                    .transitions
                    .iter()
                    .map(|&(byte, target)| format!("{}→{}", display_byte(byte), target))
                    .collect::<Vec<_>>()
                    .join(" ");
                (idx.to_string(), transitions, format!("{:?}", state.members))
            })
            .collect::<Vec<_>>();

        let mut table = Table::default();
        for (idx, (id, transitions, members)) in rows.into_iter().enumerate() {
            table.push_row(vec![
                if self.states[idx].accepted { "*".to_string() } else { String::new() },
                id,
                transitions,
                members,
            ]);
        }
        table.render(" ")
    }
}
