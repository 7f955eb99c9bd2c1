use crate::dfa::Dfa;

/// A cursor stepping a [Dfa] byte by byte. Once a byte has no transition
/// the evaluator is stuck: every later step returns `None` and the cursor
/// is no longer accepting.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: usize,
    stuck: bool,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        !self.stuck && self.dfa.is_accepting(self.current)
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        (!self.stuck).then_some(self.current)
    }

    /// Follows the transition on `byte` and returns the new state index,
    /// or `None` if there is no such transition.
    pub fn step(&mut self, byte: u8) -> Option<usize> {
        if self.stuck {
            return None;
        }
        match self.dfa.step(self.current, byte) {
            Some(next) => {
                self.current = next;
                Some(next)
            }
            None => {
                self.stuck = true;
                None
            }
        }
    }

    pub fn step_multiple(&mut self, bytes: &[u8]) -> Option<usize> {
        bytes.iter().try_for_each(|&b| self.step(b).map(|_| ()))?;
        self.current_state_idx()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: dfa.initial(),
            stuck: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dfa::Dfa;
    use crate::nfa::Nfa;
    use crate::parser::parse;

    fn build(pattern: &str) -> Dfa {
        Dfa::from_nfa(&Nfa::build(&parse(pattern).unwrap()).unwrap()).unwrap()
    }

    #[test]
    fn steps_through_a_match() {
        let dfa = build("ab*c");
        let mut eval = dfa.evaluator();
        assert!(!eval.is_accepting());
        eval.step(b'a');
        eval.step(b'b');
        eval.step(b'b');
        assert!(!eval.is_accepting());
        eval.step(b'c');
        assert!(eval.is_accepting());
    }

    #[test]
    fn sticks_on_a_missing_transition() {
        let dfa = build("ab");
        let mut eval = dfa.evaluator();
        assert_eq!(eval.step(b'x'), None);
        assert_eq!(eval.step(b'a'), None);
        assert!(!eval.is_accepting());
        assert_eq!(eval.current_state_idx(), None);
    }

    #[test]
    fn step_multiple_runs_a_whole_string() {
        let dfa = build("(ab)+");
        let mut eval = dfa.evaluator();
        assert!(eval.step_multiple(b"abab").is_some());
        assert!(eval.is_accepting());
        assert_eq!(eval.step_multiple(b"x"), None);
    }
}
