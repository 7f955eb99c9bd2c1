//! Syntax trees for parsed patterns.

/// A node of the syntax tree produced by [crate::parser::parse]. The tree
/// owns its children exclusively; it is built bottom-up by the parser and
/// read-only afterwards.
///
/// `Clone` is derived because Kleene plus is parsed as
/// `Concat(X, Closure(X))`, duplicating its operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A literal byte.
    Char(u8),
    /// Left followed by right.
    Concat(Box<Ast>, Box<Ast>),
    /// Either alternative.
    Union(Box<Ast>, Box<Ast>),
    /// Zero or more repetitions of the inner tree.
    Closure(Box<Ast>),
    /// The empty string.
    Empty,
}

impl Ast {
    pub(crate) fn concat(left: Ast, right: Ast) -> Ast {
        Ast::Concat(Box::new(left), Box::new(right))
    }

    pub(crate) fn union(left: Ast, right: Ast) -> Ast {
        Ast::Union(Box::new(left), Box::new(right))
    }

    pub(crate) fn closure(inner: Ast) -> Ast {
        Ast::Closure(Box::new(inner))
    }
}
