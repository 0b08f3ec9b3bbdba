use serde::Serialize;

/// One fired rule in a canonicalization trace.
///
/// Collected only when the caller asked for debug output; the same
/// information is always emitted as `tracing` events so a subscriber
/// can observe the fixpoint sequence without re-deriving it by hand.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteStep {
    pub rule: &'static str,
    pub priority: i32,
    /// Rendered subtree before the rule fired.
    pub before: String,
    /// Rendered subtree after the rule fired.
    pub after: String,
}
