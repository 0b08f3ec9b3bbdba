//! Formula tree model for the equivalence checker.
//!
//! Expressions arrive from an external parser as flat infix sequences
//! ([`NodeSeq`]) of tagged [`Node`]s. This crate owns the data model,
//! construction helpers, and the deterministic canonical renderer; all
//! rewriting lives in `eqv_engine`.

pub mod builder;
pub mod node;
pub mod render;

pub use node::{Node, NodeSeq, OperatorKind, Polarity};
pub use render::render;
