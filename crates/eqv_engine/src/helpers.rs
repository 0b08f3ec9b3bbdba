//! Flat term and factor views over infix sequences.
//!
//! Rules operate on lists of signed terms (additive operands) and
//! factor units (multiplicative operands) instead of pattern matching
//! raw node windows, so `a + (b + c)` and `(a + b) + c` look the same
//! to every rule once the flatten pass has run.

use eqv_ast::{Node, NodeSeq, OperatorKind, Polarity};
use smallvec::SmallVec;

/// Function names recognized as applications when the symbol is
/// directly followed by a parenthesized group.
pub const KNOWN_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "asin", "acos", "atan", "sinh", "cosh", "tanh",
    "ln", "log", "exp", "sqrt", "abs", "tg", "ctg",
];

pub fn is_known_function(name: &str) -> bool {
    KNOWN_FUNCTIONS.contains(&name)
}

/// One additive operand: its sign plus the factor nodes, with leading
/// sign prefixes folded out of the factor list.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub sign: Polarity,
    pub factors: NodeSeq,
}

impl Term {
    pub fn new(sign: Polarity, factors: NodeSeq) -> Self {
        Term { sign, factors }
    }

    pub fn positive(factors: NodeSeq) -> Self {
        Term::new(Polarity::Pos, factors)
    }
}

pub type TermList = SmallVec<[Term; 8]>;
pub type FactorList = SmallVec<[NodeSeq; 8]>;

/// Split a sequence on its top-level `Add`/`Sub` operators.
///
/// `Sub` contributes a negation to the term that follows it; stacked
/// sign prefixes at a term start fold into the term sign.
pub fn split_terms(seq: &NodeSeq) -> TermList {
    let mut terms = TermList::new();
    let mut sign = Polarity::Pos;
    let mut factors: Vec<Node> = Vec::new();
    let mut at_term_start = true;

    for node in seq {
        match node {
            Node::Operator(op) if op.is_additive() && !factors.is_empty() => {
                terms.push(Term::new(sign, NodeSeq::new(std::mem::take(&mut factors))));
                sign = match op {
                    OperatorKind::Sub => Polarity::Neg,
                    _ => Polarity::Pos,
                };
                at_term_start = true;
            }
            Node::Operator(OperatorKind::Sub) if at_term_start => {
                sign = sign.negate();
            }
            Node::Operator(OperatorKind::Add) if at_term_start => {}
            Node::Sign(p) if at_term_start => {
                if *p == Polarity::Neg {
                    sign = sign.negate();
                }
            }
            other => {
                factors.push(other.clone());
                at_term_start = false;
            }
        }
    }
    if !factors.is_empty() {
        terms.push(Term::new(sign, NodeSeq::new(factors)));
    }
    terms
}

/// Rebuild an infix sequence from signed terms. An empty list becomes
/// the literal zero.
pub fn join_terms(terms: &[Term]) -> NodeSeq {
    let mut nodes = Vec::new();
    for (i, term) in terms.iter().enumerate() {
        if i == 0 {
            if term.sign == Polarity::Neg {
                nodes.push(Node::Sign(Polarity::Neg));
            }
        } else {
            nodes.push(Node::Operator(match term.sign {
                Polarity::Neg => OperatorKind::Sub,
                Polarity::Pos => OperatorKind::Add,
            }));
        }
        nodes.extend(term.factors.iter().cloned());
    }
    if nodes.is_empty() {
        nodes.push(Node::Number(0.0));
    }
    NodeSeq::new(nodes)
}

/// Operand units of a pure product (only `Mul` between operands).
///
/// A known-function application (`Symbol` + `Delimited`) counts as one
/// unit. Returns `None` when the term mixes in division, an un-inserted
/// implicit adjacency, or any malformed operator placement.
pub fn split_factors(factors: &NodeSeq) -> Option<FactorList> {
    let nodes = factors.nodes();
    let mut units = FactorList::new();
    let mut i = 0;
    let mut expect_operand = true;

    while i < nodes.len() {
        if expect_operand {
            let node = &nodes[i];
            if !node.is_operand() {
                return None;
            }
            if let Node::Symbol(name) = node {
                if is_known_function(name) {
                    if let Some(Node::Delimited { .. }) = nodes.get(i + 1) {
                        units.push(NodeSeq::new(vec![nodes[i].clone(), nodes[i + 1].clone()]));
                        i += 2;
                        expect_operand = false;
                        continue;
                    }
                }
            }
            units.push(NodeSeq::from(node.clone()));
            i += 1;
            expect_operand = false;
        } else {
            match nodes[i] {
                Node::Operator(OperatorKind::Mul) => {
                    i += 1;
                    expect_operand = true;
                }
                _ => return None,
            }
        }
    }
    if expect_operand {
        return None;
    }
    Some(units)
}

/// Interleave factor units with explicit multiplication.
pub fn join_factors(units: &[NodeSeq]) -> NodeSeq {
    let mut nodes = Vec::new();
    for (i, unit) in units.iter().enumerate() {
        if i > 0 {
            nodes.push(Node::Operator(OperatorKind::Mul));
        }
        nodes.extend(unit.iter().cloned());
    }
    NodeSeq::new(nodes)
}

/// Extract `(coefficient, variable part)` from a term.
///
/// A term with no leading numeric factor has coefficient ±1 depending
/// on its sign; one leading number plus its adjacent multiply operator
/// is stripped as the coefficient; a bare number is a pure constant
/// (`variable part = None`).
pub fn coefficient(term: &Term) -> (f64, Option<NodeSeq>) {
    let sign = match term.sign {
        Polarity::Pos => 1.0,
        Polarity::Neg => -1.0,
    };
    match term.factors.nodes() {
        [Node::Number(n)] => (sign * n, None),
        [Node::Number(n), Node::Operator(OperatorKind::Mul), rest @ ..] if !rest.is_empty() => {
            (sign * n, Some(NodeSeq::new(rest.to_vec())))
        }
        _ => (sign, Some(term.factors.clone())),
    }
}

/// Rebuild a term from a summed coefficient. A magnitude of exactly 1
/// with a variable part omits the explicit `1 *` factor.
pub fn term_from_coefficient(coeff: f64, varpart: Option<&NodeSeq>) -> Term {
    let sign = if coeff < 0.0 {
        Polarity::Neg
    } else {
        Polarity::Pos
    };
    let magnitude = coeff.abs();
    match varpart {
        None => Term::new(sign, NodeSeq::from(Node::Number(magnitude))),
        Some(vp) if magnitude == 1.0 => Term::new(sign, vp.clone()),
        Some(vp) => {
            let mut nodes = vec![Node::Number(magnitude), Node::Operator(OperatorKind::Mul)];
            nodes.extend(vp.iter().cloned());
            Term::new(sign, NodeSeq::new(nodes))
        }
    }
}

/// Strip one redundant parenthesis layer wrapping a whole sequence.
pub fn peel_delimited(seq: &NodeSeq) -> &NodeSeq {
    match seq.single() {
        Some(Node::Delimited { body }) => body,
        _ => seq,
    }
}

/// Whether position `i` in `nodes` begins an additive term: the start
/// of the sequence, right after `Add`/`Sub`, or after a sign prefix.
pub fn at_term_start(nodes: &[Node], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    match &nodes[i - 1] {
        Node::Operator(op) => op.is_additive(),
        Node::Sign(_) => true,
        _ => false,
    }
}
