//! Fallback to an external algebra engine.
//!
//! When canonical forms disagree (or are non-authoritative), the final
//! word goes to a full computer algebra system behind the
//! [`AlgebraEngine`] trait. Sequences are translated to plain
//! explicit-operator syntax first; a sequence that cannot be expressed
//! that way is a hard [`EqvError::Translation`], never a silent guess.

use crate::error::EqvError;
use eqv_ast::{Node, NodeSeq, OperatorKind, Polarity};
use std::fmt::Write as _;
use std::process::Command;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Interface to a full algebra system.
///
/// Implementations are called from a worker thread, so they must be
/// shareable and must not assume they run on the caller's thread.
pub trait AlgebraEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Whether `expr` simplifies to exactly zero.
    fn is_zero(&self, expr: &str) -> Result<bool, EqvError>;

    /// Fully simplified form of `expr`, in the engine's own notation.
    fn simplify(&self, expr: &str) -> Result<String, EqvError>;
}

/// Renders a sequence in the syntax the external engines accept:
/// explicit `*` for every product, parenthesized power and fraction
/// operands, function calls as `name(argument)`.
pub fn translate(seq: &NodeSeq) -> Result<String, EqvError> {
    let nodes = seq.nodes();
    if nodes.is_empty() {
        return Err(EqvError::Translation("empty sequence".into()));
    }
    let mut out = String::new();
    let mut expect_operand = true;
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Sign(polarity) => {
                if !expect_operand {
                    return Err(EqvError::Translation(
                        "sign prefix in operator position".into(),
                    ));
                }
                if *polarity == Polarity::Neg {
                    out.push('-');
                }
            }
            Node::Operator(op) => {
                if expect_operand {
                    return Err(EqvError::Translation(format!(
                        "operator {op:?} where an operand was expected"
                    )));
                }
                let symbol = match op {
                    OperatorKind::Add => " + ",
                    OperatorKind::Sub => " - ",
                    OperatorKind::Mul | OperatorKind::CMul => " * ",
                    OperatorKind::Div => " / ",
                };
                out.push_str(symbol);
                expect_operand = true;
            }
            operand => {
                if !expect_operand && !continues_application(nodes, i) {
                    // Implicit multiplication made explicit.
                    out.push_str(" * ");
                }
                write_operand(&mut out, operand)?;
                expect_operand = false;
            }
        }
    }
    if expect_operand {
        return Err(EqvError::Translation("trailing operator".into()));
    }
    Ok(out)
}

/// `nodes[i]` is the `Delimited` argument of a function application.
fn continues_application(nodes: &[Node], i: usize) -> bool {
    matches!(nodes[i], Node::Delimited { .. })
        && i > 0
        && matches!(&nodes[i - 1], Node::Symbol(name) if crate::helpers::is_known_function(name))
}

fn write_operand(out: &mut String, node: &Node) -> Result<(), EqvError> {
    match node {
        Node::Number(v) => {
            if !v.is_finite() {
                return Err(EqvError::Translation(format!("non-finite number {v}")));
            }
            if v.fract() == 0.0 && v.abs() < 1e15 {
                let _ = write!(out, "{}", *v as i64);
            } else {
                let _ = write!(out, "{v}");
            }
        }
        Node::Symbol(name) => out.push_str(name),
        Node::Power { base, exponent } => {
            let _ = write!(out, "({})^({})", translate(base)?, translate(exponent)?);
        }
        Node::Fraction {
            numerator,
            denominator,
        } => {
            let _ = write!(
                out,
                "(({}) / ({}))",
                translate(numerator)?,
                translate(denominator)?
            );
        }
        Node::Delimited { body } => {
            let _ = write!(out, "({})", translate(body)?);
        }
        Node::Sign(_) | Node::Operator(_) => unreachable!("handled by the caller"),
    }
    Ok(())
}

/// Runs engine queries on a worker thread with a wall-clock budget.
///
/// A query that outlives the budget is abandoned, not joined: its
/// thread keeps running until the engine call returns, but the result
/// is discarded.
pub struct FallbackAdapter {
    engine: Arc<dyn AlgebraEngine>,
    timeout: Duration,
}

impl FallbackAdapter {
    pub fn new(engine: Arc<dyn AlgebraEngine>, timeout_ms: u64) -> Self {
        Self {
            engine,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn engine_name(&self) -> String {
        self.engine.name().to_string()
    }

    /// Asks the engine whether `lhs - rhs` simplifies to zero.
    pub fn difference_is_zero(&self, lhs: &NodeSeq, rhs: &NodeSeq) -> Result<bool, EqvError> {
        let expr = format!("({}) - ({})", translate(lhs)?, translate(rhs)?);
        tracing::debug!(engine = self.engine.name(), %expr, "difference query");
        self.with_timeout(move |engine| engine.is_zero(&expr))
    }

    /// Simplifies both sides independently and compares the results.
    pub fn simplified_forms_match(&self, lhs: &NodeSeq, rhs: &NodeSeq) -> Result<bool, EqvError> {
        let left = translate(lhs)?;
        let right = translate(rhs)?;
        tracing::debug!(engine = self.engine.name(), %left, %right, "simplify query");
        let left_simplified = self.with_timeout(move |engine| engine.simplify(&left))?;
        let right_simplified = self.with_timeout(move |engine| engine.simplify(&right))?;
        Ok(!left_simplified.is_empty() && left_simplified == right_simplified)
    }

    fn with_timeout<T, F>(&self, job: F) -> Result<T, EqvError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn AlgebraEngine) -> Result<T, EqvError> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(job(engine.as_ref()));
        });
        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => Err(EqvError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

/// Engine backed by an external command-line algebra system.
///
/// The process is invoked once per query as
/// `program [args..] <mode> <expression>` with mode `iszero` or
/// `simplify`, and is expected to print the answer on stdout.
pub struct SubprocessEngine {
    program: String,
    args: Vec<String>,
}

impl SubprocessEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn query(&self, mode: &str, expr: &str) -> Result<String, EqvError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(mode)
            .arg(expr)
            .output()
            .map_err(|e| EqvError::Engine(format!("failed to launch {}: {e}", self.program)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EqvError::Engine(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl AlgebraEngine for SubprocessEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_zero(&self, expr: &str) -> Result<bool, EqvError> {
        match self.query("iszero", expr)?.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(EqvError::Engine(format!(
                "unexpected iszero reply {other:?}"
            ))),
        }
    }

    fn simplify(&self, expr: &str) -> Result<String, EqvError> {
        self.query("simplify", expr)
    }
}
