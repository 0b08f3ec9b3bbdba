//! Shorthand constructors for building formula trees by hand.
//!
//! The parser is an external collaborator; tests and demos build their
//! input sequences with these helpers instead.

use crate::node::{Node, NodeSeq, OperatorKind, Polarity};

pub fn num(value: f64) -> Node {
    Node::Number(value)
}

pub fn sym(name: &str) -> Node {
    Node::Symbol(name.to_string())
}

pub fn op(kind: OperatorKind) -> Node {
    Node::Operator(kind)
}

pub fn add() -> Node {
    Node::Operator(OperatorKind::Add)
}

pub fn sub() -> Node {
    Node::Operator(OperatorKind::Sub)
}

pub fn mul() -> Node {
    Node::Operator(OperatorKind::Mul)
}

pub fn div() -> Node {
    Node::Operator(OperatorKind::Div)
}

pub fn neg() -> Node {
    Node::Sign(Polarity::Neg)
}

pub fn pos() -> Node {
    Node::Sign(Polarity::Pos)
}

pub fn pow(base: NodeSeq, exponent: NodeSeq) -> Node {
    Node::Power { base, exponent }
}

pub fn frac(numerator: NodeSeq, denominator: NodeSeq) -> Node {
    Node::Fraction {
        numerator,
        denominator,
    }
}

pub fn group(body: NodeSeq) -> Node {
    Node::Delimited { body }
}

/// A function application in sequence form: the function symbol
/// immediately followed by its parenthesized argument.
pub fn call(name: &str, arg: NodeSeq) -> Vec<Node> {
    vec![sym(name), group(arg)]
}

pub fn seq(nodes: impl IntoIterator<Item = Node>) -> NodeSeq {
    nodes.into_iter().collect()
}
