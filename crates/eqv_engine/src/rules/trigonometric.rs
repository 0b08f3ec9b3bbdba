//! Trigonometric parity rules and regional function-name aliases.
//!
//! Only argument-parity identities live here. Structural identities
//! between different functions (Pythagorean forms and friends) are out
//! of reach for a rewrite pass over rendered forms; those comparisons
//! are settled by the fallback engine.

use crate::define_rule;
use crate::helpers::at_term_start;
use crate::ruleset::RuleSetBuilder;
use eqv_ast::{Node, NodeSeq, Polarity};

/// Functions with `f(-u) = f(u)`.
const EVEN_FUNCTIONS: &[&str] = &["cos", "sec"];

/// Functions with `f(-u) = -f(u)`.
const ODD_FUNCTIONS: &[&str] = &["sin", "tan", "cot", "csc"];

/// Eastern-notation spellings and their canonical names.
const EAST_ALIASES: &[(&str, &str)] = &[("tg", "tan"), ("ctg", "cot")];

pub fn register(set: &mut RuleSetBuilder) {
    set.push(Box::new(NegatedArgumentEven));
    set.push(Box::new(NegatedArgumentOdd));
}

pub fn register_east(set: &mut RuleSetBuilder) {
    set.push(Box::new(RegionalFunctionNames));
    register(set);
}

define_rule!(
    /// `cos(-u)` -> `cos(u)` for even functions, anywhere in the
    /// sequence. The argument must be a plain negated operand chain,
    /// not a sum.
    NegatedArgumentEven,
    "Even Function Negated Argument",
    45,
    matches = |seq| even_normalized(seq).is_some(),
    transform = |seq| even_normalized(seq).unwrap_or_else(|| seq.clone()),
);

fn even_normalized(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    for i in 0..nodes.len() {
        let Some(inner) = negated_application_argument(nodes, i, EVEN_FUNCTIONS) else {
            continue;
        };
        let mut out = nodes.to_vec();
        out[i + 1] = Node::Delimited { body: inner };
        return Some(NodeSeq::new(out));
    }
    None
}

define_rule!(
    /// `sin(-u)` -> `-sin(u)` for odd functions. The sign is hoisted in
    /// front of the application, so this only fires where a sign prefix
    /// is well formed: at the start of a term.
    NegatedArgumentOdd,
    "Odd Function Negated Argument",
    44,
    matches = |seq| odd_normalized(seq).is_some(),
    transform = |seq| odd_normalized(seq).unwrap_or_else(|| seq.clone()),
);

fn odd_normalized(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    for i in 0..nodes.len() {
        if !at_term_start(nodes, i) {
            continue;
        }
        let Some(inner) = negated_application_argument(nodes, i, ODD_FUNCTIONS) else {
            continue;
        };
        let mut out = nodes.to_vec();
        out[i + 1] = Node::Delimited { body: inner };
        out.insert(i, Node::Sign(Polarity::Neg));
        return Some(NodeSeq::new(out));
    }
    None
}

/// If `nodes[i]` applies one of `functions` to a `-u` argument with no
/// top-level sum, returns the argument with the sign stripped.
fn negated_application_argument(
    nodes: &[Node],
    i: usize,
    functions: &[&str],
) -> Option<NodeSeq> {
    let Node::Symbol(name) = &nodes[i] else {
        return None;
    };
    if !functions.contains(&name.as_str()) {
        return None;
    }
    let Some(Node::Delimited { body }) = nodes.get(i + 1) else {
        return None;
    };
    match body.nodes() {
        [Node::Sign(Polarity::Neg), rest @ ..]
            if !rest.is_empty()
                && !rest
                    .iter()
                    .any(|n| n.as_operator().is_some_and(|op| op.is_additive())) =>
        {
            Some(NodeSeq::new(rest.to_vec()))
        }
        _ => None,
    }
}

define_rule!(
    /// Eastern spellings (`tg`, `ctg`) rename to the canonical `tan`,
    /// `cot` so both notations meet in one canonical form.
    RegionalFunctionNames,
    "Regional Function Names",
    92,
    matches = |seq| renamed(seq).is_some(),
    transform = |seq| renamed(seq).unwrap_or_else(|| seq.clone()),
);

fn renamed(seq: &NodeSeq) -> Option<NodeSeq> {
    let mut changed = false;
    let out: NodeSeq = seq
        .iter()
        .map(|node| match node {
            Node::Symbol(name) => match EAST_ALIASES.iter().find(|(alias, _)| *alias == name.as_str()) {
                Some((_, canonical)) => {
                    changed = true;
                    Node::Symbol((*canonical).to_string())
                }
                None => node.clone(),
            },
            other => other.clone(),
        })
        .collect();
    changed.then_some(out)
}
