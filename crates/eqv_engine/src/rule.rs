use eqv_ast::NodeSeq;

/// A named, prioritized match/transform pair over a node sequence.
///
/// Rules are stateless and pure: `transform` builds a new sequence and
/// both methods may be called any number of times. Higher `priority`
/// runs earlier; ties are broken by declaration order in the rule set
/// (first declared wins), which is load-bearing and preserved exactly
/// by [`crate::ruleset::RuleSet`].
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32;

    /// Whether this rule would change `seq`. Reporting `false` once
    /// the transform is a no-op keeps the rewrite loop from wasting a
    /// pass; a match whose transform returns the input unchanged is
    /// treated as a fixpoint by the loop either way.
    fn matches(&self, seq: &NodeSeq) -> bool;

    fn transform(&self, seq: &NodeSeq) -> NodeSeq;
}
