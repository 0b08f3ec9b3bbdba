//! Equivalence checking for infix expression sequences.
//!
//! The crate decides whether two expression sequences denote the same
//! mathematical expression. A priority-ordered rewrite system drives
//! both sides to a canonical rendered form; when that is inconclusive,
//! an external algebra engine gets the final word through the
//! [`fallback::AlgebraEngine`] seam.
//!
//! ```
//! use eqv_ast::builder::*;
//! use eqv_ast::OperatorKind::Add;
//! use eqv_engine::{CheckConfig, Checker, Method};
//! use eqv_engine::fallback::{AlgebraEngine, SubprocessEngine};
//! use std::sync::Arc;
//!
//! let engine = Arc::new(SubprocessEngine::new("maxima-bridge", vec![]));
//! let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
//! let lhs = seq([sym("x"), op(Add), num(1.0)]);
//! let rhs = seq([num(1.0), op(Add), sym("x")]);
//! let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
//! assert!(result.equivalent);
//! assert_eq!(result.method, Method::Canonicalization);
//! ```

pub mod engine;
pub mod error;
pub mod fallback;
pub mod helpers;
pub mod macros;
pub mod policy;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod step;

pub use engine::{Canonical, Rewriter, MAX_DEPTH, MAX_ITERATIONS};
pub use error::EqvError;
pub use policy::{CheckConfig, Checker, EquivalenceResult, Method};
pub use rule::Rule;
pub use ruleset::{RuleSet, RuleSetBuilder, RuleSetRegistry, DEFAULT_REGION};
pub use step::RewriteStep;
