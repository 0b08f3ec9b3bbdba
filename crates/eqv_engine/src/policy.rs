//! The equivalence decision policy.
//!
//! Canonicalization is the cheap path: if both sides reach the same
//! authoritative canonical form, they are equivalent and no external
//! engine runs. Everything else is settled by the fallback engine,
//! first by asking whether the difference is zero, then by simplifying
//! both sides independently. Fallback failure is itself an answer
//! (`Method::Error`, not equivalent), never a panic.

use crate::engine::Rewriter;
use crate::error::EqvError;
use crate::fallback::{AlgebraEngine, FallbackAdapter};
use crate::ruleset::RuleSetRegistry;
use crate::step::RewriteStep;
use eqv_ast::render::render;
use eqv_ast::NodeSeq;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Per-check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Region identifier selecting a rule set; `None` means "default".
    pub rule_set_region: Option<String>,
    /// Skip canonicalization and go straight to the fallback engine.
    pub force_fallback: bool,
    /// Wall-clock budget per fallback engine query.
    pub fallback_timeout_ms: u64,
    /// Collect per-rule rewrite steps into the result.
    pub debug: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rule_set_region: None,
            force_fallback: false,
            fallback_timeout_ms: 2000,
            debug: false,
        }
    }
}

/// Which stage of the policy produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Both sides reached the same authoritative canonical form.
    Canonicalization,
    /// The engine decided whether `lhs - rhs` is zero.
    FallbackDifference,
    /// The engine simplified both sides; the forms were compared.
    FallbackSimplify,
    /// Every applicable stage failed; the verdict defaults to
    /// not-equivalent.
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquivalenceResult {
    pub equivalent: bool,
    pub method: Method,
    /// Fractional, so sub-millisecond fast-path checks stay visible.
    pub elapsed_ms: f64,
    /// Echo of `force_fallback`, so a caller caching results can keep
    /// forced runs out of its cache.
    pub forced: bool,
    /// Rewrite trace, populated only when `debug` was set.
    pub steps: Vec<RewriteStep>,
}

/// Ties the rule registry and a fallback engine into one checker.
pub struct Checker {
    registry: RuleSetRegistry,
    engine: Arc<dyn AlgebraEngine>,
}

impl Checker {
    pub fn new(engine: Arc<dyn AlgebraEngine>) -> Self {
        Self {
            registry: RuleSetRegistry::default(),
            engine,
        }
    }

    pub fn with_registry(engine: Arc<dyn AlgebraEngine>, registry: RuleSetRegistry) -> Self {
        Self { registry, engine }
    }

    /// Decides whether `lhs` and `rhs` denote the same expression.
    ///
    /// The only hard error is an unknown region identifier; every
    /// engine-side failure is absorbed into a `Method::Error` result.
    pub fn check(
        &self,
        lhs: &NodeSeq,
        rhs: &NodeSeq,
        config: &CheckConfig,
    ) -> Result<EquivalenceResult, EqvError> {
        let started = Instant::now();
        let rules = self.registry.resolve(config.rule_set_region.as_deref())?;
        let mut steps = Vec::new();

        if !config.force_fallback {
            let rewriter = if config.debug {
                Rewriter::with_trace(&rules)
            } else {
                Rewriter::new(&rules)
            };
            let left = rewriter.canonicalize(lhs);
            let right = rewriter.canonicalize(rhs);
            if config.debug {
                steps.extend(left.steps);
                steps.extend(right.steps);
            }
            if left.authoritative && right.authoritative {
                let left_form = render(&left.seq);
                let right_form = render(&right.seq);
                tracing::debug!(set = rules.name(), %left_form, %right_form, "canonical forms");
                if left_form == right_form {
                    return Ok(self.verdict(true, Method::Canonicalization, started, config, steps));
                }
            } else {
                tracing::debug!(set = rules.name(), "non-authoritative canonicalization");
            }
            // Differing canonical forms are inconclusive: the rule set
            // only knows a fraction of the identities the engine knows.
        }

        let adapter = FallbackAdapter::new(Arc::clone(&self.engine), config.fallback_timeout_ms);
        match adapter.difference_is_zero(lhs, rhs) {
            Ok(true) => {
                return Ok(self.verdict(
                    true,
                    Method::FallbackDifference,
                    started,
                    config,
                    steps,
                ))
            }
            // A non-zero difference is a positive-only exit: an engine
            // that cannot cancel the difference may still simplify both
            // sides to one normal form.
            Ok(false) => {
                tracing::debug!("difference not recognized as zero, trying simplification");
            }
            Err(error) => {
                tracing::debug!(%error, "difference strategy failed, trying simplification");
            }
        }
        match adapter.simplified_forms_match(lhs, rhs) {
            Ok(matched) => {
                Ok(self.verdict(matched, Method::FallbackSimplify, started, config, steps))
            }
            Err(error) => {
                tracing::debug!(%error, "simplification strategy failed");
                Ok(self.verdict(false, Method::Error, started, config, steps))
            }
        }
    }

    fn verdict(
        &self,
        equivalent: bool,
        method: Method,
        started: Instant,
        config: &CheckConfig,
        steps: Vec<RewriteStep>,
    ) -> EquivalenceResult {
        EquivalenceResult {
            equivalent,
            method,
            elapsed_ms: started.elapsed().as_secs_f64() * 1e3,
            forced: config.force_fallback,
            steps,
        }
    }
}
