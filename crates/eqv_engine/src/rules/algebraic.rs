//! Algebraic identity rules.
//!
//! Priorities encode the pipeline order the rule set relies on:
//! structural cleanup (flattening, sign elimination, multiplication
//! normalization) runs before value-level rules (folding, like-term
//! combination), and the deterministic ordering rules run last so they
//! see fully combined terms.

use crate::define_rule;
use crate::helpers::{
    at_term_start, coefficient, is_known_function, join_factors, join_terms, peel_delimited,
    split_factors, split_terms, term_from_coefficient, Term, TermList,
};
use crate::ruleset::RuleSetBuilder;
use eqv_ast::render::render;
use eqv_ast::{Node, NodeSeq, OperatorKind, Polarity};
use std::cmp::Ordering;

pub fn register(set: &mut RuleSetBuilder) {
    set.push(Box::new(FlattenNestedSums));
    set.push(Box::new(UnwrapTrivialGroup));
    set.push(Box::new(DoubleNegativeElimination));
    set.push(Box::new(NormalizeExplicitMultiply));
    set.push(Box::new(ImplicitMultiplication));
    set.push(Box::new(FractionSignNormalization));
    set.push(Box::new(BinomialSquareExpansion));
    set.push(Box::new(FoldConstants));
    set.push(Box::new(SortFactors));
    set.push(Box::new(CombineLikeTerms));
    set.push(Box::new(SortTerms));
}

define_rule!(
    /// `(a + (b + c))` becomes one flat term list. Runs before every
    /// grouping/sorting rule. A parenthesized sum standing alone as a
    /// term is spliced in, with the term's sign applied to each spliced
    /// term (`a - (b + c)` -> `a - b - c`). Products keep their groups.
    FlattenNestedSums,
    "Flatten Nested Sums",
    100,
    matches = |seq| flattened(seq).is_some(),
    transform = |seq| flattened(seq).unwrap_or_else(|| seq.clone()),
);

fn flattened(seq: &NodeSeq) -> Option<NodeSeq> {
    let terms = split_terms(seq);
    let mut out = TermList::new();
    let mut changed = false;
    for term in &terms {
        match term.factors.single() {
            Some(Node::Delimited { body }) if body.is_sum() => {
                for inner in split_terms(body) {
                    out.push(Term::new(term.sign.combine(inner.sign), inner.factors));
                }
                changed = true;
            }
            _ => out.push(term.clone()),
        }
    }
    changed.then(|| join_terms(&out))
}

define_rule!(
    /// `(x)` -> `x`: a group wrapping a single operand (optionally sign
    /// prefixed, when the group sits at a term start) is dissolved. A
    /// group that is a function argument stays untouched.
    UnwrapTrivialGroup,
    "Unwrap Trivial Group",
    98,
    matches = |seq| unwrapped(seq).is_some(),
    transform = |seq| unwrapped(seq).unwrap_or_else(|| seq.clone()),
);

fn unwrapped(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut changed = false;
    for (i, node) in nodes.iter().enumerate() {
        let spliceable = match node {
            Node::Delimited { body } if !is_function_argument(nodes, i) => match body.nodes() {
                [single] if single.is_operand() => Some(body),
                [Node::Sign(_), operand] if operand.is_operand() && at_term_start(nodes, i) => {
                    Some(body)
                }
                _ => None,
            },
            _ => None,
        };
        match spliceable {
            Some(body) => {
                out.extend(body.iter().cloned());
                changed = true;
            }
            None => out.push(node.clone()),
        }
    }
    changed.then(|| NodeSeq::new(out))
}

fn is_function_argument(nodes: &[Node], i: usize) -> bool {
    i > 0 && matches!(&nodes[i - 1], Node::Symbol(name) if is_known_function(name))
}

define_rule!(
    /// `-(-x)` -> `x`, plus the sign absorptions that keep signs from
    /// piling up mid-sequence: `+` before a negative operand becomes
    /// `-` and vice versa, and an explicit `+` prefix is dropped.
    DoubleNegativeElimination,
    "Double Negative Elimination",
    95,
    matches = |seq| sign_cleaned(seq).is_some(),
    transform = |seq| sign_cleaned(seq).unwrap_or_else(|| seq.clone()),
);

fn sign_cleaned(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    for i in 0..nodes.len() {
        match &nodes[i] {
            Node::Sign(Polarity::Pos) => {
                let mut out = nodes.to_vec();
                out.remove(i);
                return Some(NodeSeq::new(out));
            }
            Node::Sign(Polarity::Neg) => match nodes.get(i + 1) {
                Some(Node::Sign(Polarity::Neg)) => {
                    let mut out = nodes.to_vec();
                    out.drain(i..i + 2);
                    return Some(NodeSeq::new(out));
                }
                Some(Node::Delimited { body }) => {
                    // -( -u ) with u free of top-level sums: both signs drop.
                    if let [Node::Sign(Polarity::Neg), rest @ ..] = body.nodes() {
                        if !rest.is_empty() && !has_top_level_additive(rest) {
                            let mut out = nodes.to_vec();
                            out.remove(i);
                            out[i] = Node::Delimited {
                                body: NodeSeq::new(rest.to_vec()),
                            };
                            return Some(NodeSeq::new(out));
                        }
                    }
                }
                _ => {}
            },
            Node::Operator(op) if op.is_additive() => {
                if let Some(Node::Sign(Polarity::Neg)) = nodes.get(i + 1) {
                    let flipped = match op {
                        OperatorKind::Add => OperatorKind::Sub,
                        _ => OperatorKind::Add,
                    };
                    let mut out = nodes.to_vec();
                    out[i] = Node::Operator(flipped);
                    out.remove(i + 1);
                    return Some(NodeSeq::new(out));
                }
            }
            _ => {}
        }
    }
    None
}

fn has_top_level_additive(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .any(|n| n.as_operator().is_some_and(|op| op.is_additive()))
}

define_rule!(
    /// User-written explicit multiplication (`×`/`\cdot`) becomes the
    /// internal multiply operator so later rules see one form.
    NormalizeExplicitMultiply,
    "Normalize Explicit Multiplication",
    90,
    matches = |seq| seq
        .iter()
        .any(|n| matches!(n, Node::Operator(OperatorKind::CMul))),
    transform = |seq| seq
        .iter()
        .map(|n| match n {
            Node::Operator(OperatorKind::CMul) => Node::Operator(OperatorKind::Mul),
            other => other.clone(),
        })
        .collect(),
);

define_rule!(
    /// Juxtaposition of two operands (`4x`, `x y`, `2(x+1)`) gets an
    /// explicit multiply operator, so no downstream rule special-cases
    /// implicit multiplication. Function applications are exempt.
    ImplicitMultiplication,
    "Implicit Multiplication",
    88,
    matches = |seq| {
        let nodes = seq.nodes();
        (0..nodes.len()).any(|i| needs_explicit_mul(nodes, i))
    },
    transform = |seq| {
        let nodes = seq.nodes();
        let mut out = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            out.push(node.clone());
            if needs_explicit_mul(nodes, i) {
                out.push(Node::Operator(OperatorKind::Mul));
            }
        }
        NodeSeq::new(out)
    },
);

fn needs_explicit_mul(nodes: &[Node], i: usize) -> bool {
    nodes[i].is_operand()
        && nodes.get(i + 1).is_some_and(|n| n.is_operand())
        && !is_application_pair(nodes, i)
}

fn is_application_pair(nodes: &[Node], i: usize) -> bool {
    matches!(&nodes[i], Node::Symbol(name) if is_known_function(name))
        && matches!(nodes.get(i + 1), Some(Node::Delimited { .. }))
}

define_rule!(
    /// `a / (-b)` -> `-(a / b)`: a negative sign never stays embedded
    /// in a denominator; it migrates to the sign of the whole term the
    /// fraction belongs to.
    FractionSignNormalization,
    "Fraction Sign Normalization",
    80,
    matches = |seq| denominator_sign_extracted(seq).is_some(),
    transform = |seq| denominator_sign_extracted(seq).unwrap_or_else(|| seq.clone()),
);

fn denominator_sign_extracted(seq: &NodeSeq) -> Option<NodeSeq> {
    let terms = split_terms(seq);
    let mut out = TermList::new();
    let mut changed = false;
    for term in &terms {
        let mut flips = 0usize;
        let factors: Vec<Node> = term
            .factors
            .iter()
            .map(|node| match node {
                Node::Fraction {
                    numerator,
                    denominator,
                } => match positive_denominator(denominator) {
                    Some(clean) => {
                        flips += 1;
                        Node::Fraction {
                            numerator: numerator.clone(),
                            denominator: clean,
                        }
                    }
                    None => node.clone(),
                },
                other => other.clone(),
            })
            .collect();
        if flips > 0 {
            changed = true;
            let sign = if flips % 2 == 1 {
                term.sign.negate()
            } else {
                term.sign
            };
            out.push(Term::new(sign, NodeSeq::new(factors)));
        } else {
            out.push(term.clone());
        }
    }
    changed.then(|| join_terms(&out))
}

fn positive_denominator(den: &NodeSeq) -> Option<NodeSeq> {
    match den.nodes() {
        [Node::Sign(Polarity::Neg), rest @ ..]
            if !rest.is_empty() && !has_top_level_additive(rest) =>
        {
            Some(NodeSeq::new(rest.to_vec()))
        }
        [Node::Number(n)] if *n < 0.0 => Some(NodeSeq::from(Node::Number(-n))),
        _ => None,
    }
}

define_rule!(
    /// `(a + b)^2` -> `a^2 + 2ab + b^2`. Applies only to a base that is
    /// exactly a two-term sum raised to the integer exponent 2; any
    /// other shape is left untouched rather than partially expanded.
    BinomialSquareExpansion,
    "Binomial Square Expansion",
    70,
    matches = |seq| expanded_square(seq).is_some(),
    transform = |seq| expanded_square(seq).unwrap_or_else(|| seq.clone()),
);

fn expanded_square(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    for (i, node) in nodes.iter().enumerate() {
        if let Node::Power { base, exponent } = node {
            if !exponent_is_two(exponent) {
                continue;
            }
            let base = peel_delimited(base);
            if !base.is_sum() {
                continue;
            }
            let terms = split_terms(base);
            if terms.len() != 2 {
                continue;
            }
            let mut out = nodes.to_vec();
            out[i] = Node::Delimited {
                body: square_of_binomial(&terms[0], &terms[1]),
            };
            return Some(NodeSeq::new(out));
        }
    }
    None
}

fn exponent_is_two(exponent: &NodeSeq) -> bool {
    matches!(exponent.single(), Some(Node::Number(n)) if *n == 2.0)
}

fn square_of_binomial(a: &Term, b: &Term) -> NodeSeq {
    let two = NodeSeq::from(Node::Number(2.0));
    let a_sq = Term::positive(NodeSeq::from(Node::Power {
        base: a.factors.clone(),
        exponent: two.clone(),
    }));
    let b_sq = Term::positive(NodeSeq::from(Node::Power {
        base: b.factors.clone(),
        exponent: two,
    }));
    let mut cross = vec![Node::Number(2.0), Node::Operator(OperatorKind::Mul)];
    cross.extend(a.factors.iter().cloned());
    cross.push(Node::Operator(OperatorKind::Mul));
    cross.extend(b.factors.iter().cloned());
    let cross = Term::new(a.sign.combine(b.sign), NodeSeq::new(cross));
    join_terms(&[a_sq, cross, b_sq])
}

define_rule!(
    /// Adjacent numeric operands joined by `+ - * /` collapse to their
    /// computed value, as do all-numeric fractions and powers. Division
    /// by zero declines to match and is left for the fallback engine.
    FoldConstants,
    "Fold Constants",
    60,
    matches = |seq| folded(seq).is_some(),
    transform = |seq| folded(seq).unwrap_or_else(|| seq.clone()),
);

fn folded(seq: &NodeSeq) -> Option<NodeSeq> {
    let nodes = seq.nodes();
    for i in 0..nodes.len() {
        if let (Some(Node::Number(a)), Some(Node::Operator(op)), Some(Node::Number(b))) =
            (nodes.get(i), nodes.get(i + 1), nodes.get(i + 2))
        {
            if let Some(value) = fold_binary(*a, *op, *b, nodes, i) {
                let mut out = nodes.to_vec();
                out.splice(i..i + 3, [Node::Number(value)]);
                return Some(NodeSeq::new(out));
            }
        }
        let replacement = match &nodes[i] {
            Node::Fraction {
                numerator,
                denominator,
            } => match (numerator.single(), denominator.single()) {
                (Some(Node::Number(a)), Some(Node::Number(b))) if *b != 0.0 => {
                    let value = a / b;
                    value.is_finite().then_some(value)
                }
                _ => None,
            },
            Node::Power { base, exponent } => match (base.single(), exponent.single()) {
                (Some(Node::Number(a)), Some(Node::Number(b))) => fold_power(*a, *b),
                _ => None,
            },
            _ => None,
        };
        if let Some(value) = replacement {
            let mut out = nodes.to_vec();
            out[i] = Node::Number(value);
            return Some(NodeSeq::new(out));
        }
    }
    None
}

fn fold_binary(a: f64, op: OperatorKind, b: f64, nodes: &[Node], i: usize) -> Option<f64> {
    let value = match op {
        OperatorKind::Add | OperatorKind::Sub => {
            // Additive folding is only sound when both numbers stand
            // alone as terms: in `2 + 3 * x` the 3 belongs to the
            // product, not the sum. A preceding `Sub` negates the left
            // number at term level (`x - 2 + 3` is `x + (-2) + 3`, not
            // `x - 5`), so only a preceding `Add` keeps the window a
            // genuine subexpression.
            let left_ok = i == 0 || matches!(&nodes[i - 1], Node::Operator(OperatorKind::Add));
            let right_ok = match nodes.get(i + 3) {
                None => true,
                Some(Node::Operator(o)) => o.is_additive(),
                _ => false,
            };
            if !left_ok || !right_ok {
                return None;
            }
            if op == OperatorKind::Add {
                a + b
            } else {
                a - b
            }
        }
        OperatorKind::Mul => {
            // `x / 2 * 3` associates left; 2*3 is not a unit there.
            if preceded_by_division(nodes, i) {
                return None;
            }
            a * b
        }
        OperatorKind::Div => {
            if preceded_by_division(nodes, i) || b == 0.0 {
                return None;
            }
            a / b
        }
        // Normalized to Mul before folding can run.
        OperatorKind::CMul => return None,
    };
    value.is_finite().then_some(value)
}

fn fold_power(base: f64, exponent: f64) -> Option<f64> {
    if exponent.fract() != 0.0 || exponent.abs() > i32::MAX as f64 {
        return None;
    }
    if base == 0.0 && exponent <= 0.0 {
        return None;
    }
    let value = base.powi(exponent as i32);
    value.is_finite().then_some(value)
}

fn preceded_by_division(nodes: &[Node], i: usize) -> bool {
    i > 0 && matches!(nodes[i - 1], Node::Operator(OperatorKind::Div))
}

define_rule!(
    /// Factors of a plain product are put in canonical order: numbers
    /// first (ascending), then the remaining factors by rendered form.
    SortFactors,
    "Sort Factors",
    55,
    matches = |seq| sorted_factors(seq).is_some(),
    transform = |seq| sorted_factors(seq).unwrap_or_else(|| seq.clone()),
);

fn sorted_factors(seq: &NodeSeq) -> Option<NodeSeq> {
    let terms = split_terms(seq);
    let mut out = TermList::new();
    let mut changed = false;
    for term in &terms {
        match split_factors(&term.factors) {
            Some(units) if units.len() >= 2 => {
                let mut sorted = units.clone();
                sorted.sort_by(compare_factor_units);
                if sorted != units {
                    changed = true;
                }
                out.push(Term::new(term.sign, join_factors(&sorted)));
            }
            _ => out.push(term.clone()),
        }
    }
    changed.then(|| join_terms(&out))
}

fn compare_factor_units(a: &NodeSeq, b: &NodeSeq) -> Ordering {
    let num_a = a.single().and_then(|n| n.as_number());
    let num_b = b.single().and_then(|n| n.as_number());
    match (num_a, num_b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => render(a).cmp(&render(b)),
    }
}

define_rule!(
    /// Terms of a flat sum are grouped by structural equality of their
    /// variable part; coefficients are summed, zero groups are dropped,
    /// pure constants fold into one leading constant term.
    CombineLikeTerms,
    "Combine Like Terms",
    50,
    matches = |seq| combined(seq).is_some(),
    transform = |seq| combined(seq).unwrap_or_else(|| seq.clone()),
);

fn combined(seq: &NodeSeq) -> Option<NodeSeq> {
    let terms = split_terms(seq);
    if terms.is_empty() {
        return None;
    }
    let mut constant = 0.0f64;
    let mut saw_constant = false;
    let mut groups: Vec<(NodeSeq, f64)> = Vec::new();
    for term in &terms {
        let (c, varpart) = coefficient(term);
        match varpart {
            None => {
                constant += c;
                saw_constant = true;
            }
            Some(vp) => match groups.iter_mut().find(|(g, _)| *g == vp) {
                Some((_, total)) => *total += c,
                None => groups.push((vp, c)),
            },
        }
    }
    let mut rebuilt = TermList::new();
    if saw_constant && constant != 0.0 {
        rebuilt.push(term_from_coefficient(constant, None));
    }
    for (vp, total) in &groups {
        if *total == 0.0 {
            continue;
        }
        rebuilt.push(term_from_coefficient(*total, Some(vp)));
    }
    let new_seq = join_terms(&rebuilt);
    (new_seq != *seq).then_some(new_seq)
}

define_rule!(
    /// Total order over the terms of a flat sum: pure numeric terms
    /// first (ascending value), then terms by the rendered string of
    /// their variable part.
    SortTerms,
    "Sort Terms",
    30,
    matches = |seq| sorted_terms(seq).is_some(),
    transform = |seq| sorted_terms(seq).unwrap_or_else(|| seq.clone()),
);

fn sorted_terms(seq: &NodeSeq) -> Option<NodeSeq> {
    let terms = split_terms(seq);
    if terms.len() < 2 {
        return None;
    }
    let mut sorted = terms.clone();
    sorted.sort_by(compare_terms);
    (sorted != terms).then(|| join_terms(&sorted))
}

fn compare_terms(a: &Term, b: &Term) -> Ordering {
    let (ca, va) = coefficient(a);
    let (cb, vb) = coefficient(b);
    match (va, vb) {
        (None, None) => ca.total_cmp(&cb),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => render(&x).cmp(&render(&y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use eqv_ast::builder::*;
    use eqv_ast::OperatorKind::{Add, Div, Mul, Sub};

    #[test]
    fn flatten_splices_nested_sum_with_sign() {
        // a - (b + c) -> a - b - c
        let s = seq([
            sym("a"),
            op(Sub),
            group(seq([sym("b"), op(Add), sym("c")])),
        ]);
        let out = FlattenNestedSums.transform(&s);
        assert_eq!(
            out,
            seq([sym("a"), op(Sub), sym("b"), op(Sub), sym("c")])
        );
    }

    #[test]
    fn flatten_leaves_products_grouped() {
        let s = seq([
            group(seq([sym("a"), op(Add), sym("b")])),
            op(Mul),
            sym("c"),
        ]);
        assert!(!FlattenNestedSums.matches(&s));
    }

    #[test]
    fn unwrap_dissolves_single_operand_group() {
        let s = seq([num(2.0), op(Mul), group(seq([sym("x")]))]);
        assert_eq!(
            UnwrapTrivialGroup.transform(&s),
            seq([num(2.0), op(Mul), sym("x")])
        );
    }

    #[test]
    fn unwrap_preserves_function_arguments() {
        let s = seq(call("sin", seq([sym("x")])));
        assert!(!UnwrapTrivialGroup.matches(&s));
    }

    #[test]
    fn double_negative_cancels() {
        let s = seq([neg(), group(seq([neg(), sym("x")]))]);
        let out = DoubleNegativeElimination.transform(&s);
        assert_eq!(out, seq([group(seq([sym("x")]))]));
    }

    #[test]
    fn sub_before_negative_becomes_add() {
        let s = seq([sym("a"), op(Sub), neg(), sym("b")]);
        assert_eq!(
            DoubleNegativeElimination.transform(&s),
            seq([sym("a"), op(Add), sym("b")])
        );
    }

    #[test]
    fn implicit_multiplication_gets_explicit_operator() {
        let s = seq([num(4.0), sym("x")]);
        assert_eq!(
            ImplicitMultiplication.transform(&s),
            seq([num(4.0), op(Mul), sym("x")])
        );
        // sin(x) is an application, not a product
        assert!(!ImplicitMultiplication.matches(&seq(call("sin", seq([sym("x")])))));
    }

    #[test]
    fn fraction_sign_migrates_out_of_denominator() {
        let s = seq([frac(seq([sym("x")]), seq([neg(), num(2.0)]))]);
        let out = FractionSignNormalization.transform(&s);
        assert_eq!(
            out,
            seq([neg(), frac(seq([sym("x")]), seq([num(2.0)]))])
        );
    }

    #[test]
    fn binomial_square_expands_exactly_two_terms() {
        let square = seq([pow(
            seq([group(seq([sym("x"), op(Add), num(2.0)]))]),
            seq([num(2.0)]),
        )]);
        assert!(BinomialSquareExpansion.matches(&square));

        let cube = seq([pow(
            seq([group(seq([sym("x"), op(Add), num(2.0)]))]),
            seq([num(3.0)]),
        )]);
        assert!(!BinomialSquareExpansion.matches(&cube));

        let trinomial = seq([pow(
            seq([group(seq([sym("x"), op(Add), sym("y"), op(Add), num(1.0)]))]),
            seq([num(2.0)]),
        )]);
        assert!(!BinomialSquareExpansion.matches(&trinomial));
    }

    #[test]
    fn constant_folding_respects_precedence() {
        // 2 + 3 folds
        assert_eq!(
            FoldConstants.transform(&seq([num(2.0), op(Add), num(3.0)])),
            seq([num(5.0)])
        );
        // 2 + 3 * x must not fold the 2 + 3
        let precedence = seq([num(2.0), op(Add), num(3.0), op(Mul), sym("x")]);
        assert!(!FoldConstants.matches(&precedence));
        // a / 6 / 3 associates left; 6 / 3 is not a unit there
        let chained = seq([sym("a"), op(Div), num(6.0), op(Div), num(3.0)]);
        assert!(!FoldConstants.matches(&chained));
    }

    #[test]
    fn numbers_across_a_subtraction_boundary_do_not_fold() {
        // x - 2 + 3: the 2 is a negated term, so 2 + 3 is not a
        // subexpression and folding it to 5 would flip its sign
        let s = seq([sym("x"), op(Sub), num(2.0), op(Add), num(3.0)]);
        assert!(!FoldConstants.matches(&s));
        // x + 2 - 3 folds: both numbers stand alone with their signs
        let plus = seq([sym("x"), op(Add), num(2.0), op(Sub), num(3.0)]);
        assert_eq!(
            FoldConstants.transform(&plus),
            seq([sym("x"), op(Add), num(-1.0)])
        );
    }

    #[test]
    fn division_by_zero_is_not_folded() {
        let s = seq([num(10.0), op(Div), num(0.0)]);
        assert!(!FoldConstants.matches(&s));
        let f = seq([frac(seq([num(10.0)]), seq([num(0.0)]))]);
        assert!(!FoldConstants.matches(&f));
    }

    #[test]
    fn numeric_fraction_and_power_fold() {
        assert_eq!(
            FoldConstants.transform(&seq([frac(seq([num(10.0)]), seq([num(2.0)]))])),
            seq([num(5.0)])
        );
        assert_eq!(
            FoldConstants.transform(&seq([pow(seq([num(2.0)]), seq([num(2.0)]))])),
            seq([num(4.0)])
        );
    }

    #[test]
    fn factors_sort_numbers_first() {
        let s = seq([sym("x"), op(Mul), num(3.0)]);
        assert_eq!(
            SortFactors.transform(&s),
            seq([num(3.0), op(Mul), sym("x")])
        );
    }

    #[test]
    fn like_terms_combine_and_zero_groups_drop() {
        // 2*x + 3*x -> 5*x
        let s = seq([
            num(2.0),
            op(Mul),
            sym("x"),
            op(Add),
            num(3.0),
            op(Mul),
            sym("x"),
        ]);
        assert_eq!(
            CombineLikeTerms.transform(&s),
            seq([num(5.0), op(Mul), sym("x")])
        );

        // 3*x - 3*x -> 0
        let cancel = seq([
            num(3.0),
            op(Mul),
            sym("x"),
            op(Sub),
            num(3.0),
            op(Mul),
            sym("x"),
        ]);
        assert_eq!(CombineLikeTerms.transform(&cancel), seq([num(0.0)]));
    }

    #[test]
    fn unit_coefficient_has_no_explicit_factor() {
        // 1 * x -> x
        let s = seq([num(1.0), op(Mul), sym("x")]);
        assert_eq!(CombineLikeTerms.transform(&s), seq([sym("x")]));
    }

    #[test]
    fn terms_sort_numeric_first_then_by_variable_part() {
        // x^2 + 4 -> 4 + x^2
        let s = seq([
            pow(seq([sym("x")]), seq([num(2.0)])),
            op(Add),
            num(4.0),
        ]);
        assert_eq!(
            SortTerms.transform(&s),
            seq([num(4.0), op(Add), pow(seq([sym("x")]), seq([num(2.0)]))])
        );
    }
}
