//! The fixpoint rewrite loop.
//!
//! Canonicalization is bottom-up: the sequences nested inside `Power`,
//! `Fraction` and `Delimited` nodes reach their own fixpoint before any
//! rule is tried on the parent sequence. At each level the
//! highest-priority matching rule is applied, then matching restarts
//! from the top of the rule list.

use crate::ruleset::RuleSet;
use crate::step::RewriteStep;
use eqv_ast::render::render;
use eqv_ast::NodeSeq;

/// Cap on rule applications per sequence level. Hitting it marks the
/// result non-authoritative instead of looping forever.
pub const MAX_ITERATIONS: usize = 100;

/// Cap on nesting depth. Deeper structure is returned untouched and the
/// result marked non-authoritative.
pub const MAX_DEPTH: usize = 64;

/// Outcome of canonicalization.
///
/// A non-authoritative result means a resource cap was hit; the
/// sequence is still valid but must not be used to decide equivalence
/// on its own.
pub struct Canonical {
    pub seq: NodeSeq,
    pub authoritative: bool,
    pub steps: Vec<RewriteStep>,
}

pub struct Rewriter<'a> {
    rules: &'a RuleSet,
    trace: bool,
}

impl<'a> Rewriter<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            trace: false,
        }
    }

    /// Records a [`RewriteStep`] for every rule application.
    pub fn with_trace(rules: &'a RuleSet) -> Self {
        Self { rules, trace: true }
    }

    pub fn canonicalize(&self, seq: &NodeSeq) -> Canonical {
        let mut steps = Vec::new();
        let mut authoritative = true;
        let seq = self.rewrite(seq, 0, &mut steps, &mut authoritative);
        Canonical {
            seq,
            authoritative,
            steps,
        }
    }

    fn rewrite(
        &self,
        seq: &NodeSeq,
        depth: usize,
        steps: &mut Vec<RewriteStep>,
        authoritative: &mut bool,
    ) -> NodeSeq {
        if depth >= MAX_DEPTH {
            *authoritative = false;
            return seq.clone();
        }
        let mut current = seq.clone();
        let mut iterations = 0usize;
        loop {
            // A rule application can introduce fresh nested sequences,
            // so children are re-normalized before each match attempt.
            current =
                current.map_subseqs(&mut |child| self.rewrite(child, depth + 1, steps, authoritative));
            let Some(rule) = self.rules.first_match(&current) else {
                break;
            };
            if iterations >= MAX_ITERATIONS {
                tracing::debug!(
                    set = self.rules.name(),
                    seq = %render(&current),
                    "iteration cap reached, result is non-authoritative"
                );
                *authoritative = false;
                break;
            }
            iterations += 1;
            let next = rule.transform(&current);
            tracing::debug!(
                rule = rule.name(),
                before = %render(&current),
                after = %render(&next),
                "applied"
            );
            if self.trace {
                steps.push(RewriteStep {
                    rule: rule.name(),
                    priority: rule.priority(),
                    before: render(&current),
                    after: render(&next),
                });
            }
            if next == current {
                // An unchanged sequence is a fixpoint, whatever the
                // rule's `matches` claims.
                break;
            }
            current = next;
        }
        current
    }
}
