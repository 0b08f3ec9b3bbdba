use thiserror::Error;

/// Failures that can surface from a single equivalence check.
///
/// Every variant is local to one call; no shared state is corrupted by
/// a failed check and later calls are unaffected.
#[derive(Error, Debug)]
pub enum EqvError {
    /// Upstream parse failure carried through unchanged. The check is
    /// never attempted for unparsed input and this is never coerced to
    /// "not equivalent".
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown rule set region '{0}'")]
    UnknownRegion(String),

    /// A node shape the fallback translation table cannot express.
    #[error("cannot translate for fallback engine: {0}")]
    Translation(String),

    #[error("fallback engine timed out after {0} ms")]
    Timeout(u64),

    #[error("fallback engine failed: {0}")]
    Engine(String),
}
