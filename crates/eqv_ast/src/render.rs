//! Canonical form renderer.
//!
//! Serializes a sequence to a deterministic string so two canonical
//! trees can be compared with plain string equality. The output is
//! never re-parsed; it only has to be stable and unambiguous for the
//! rule set's domain.

use crate::node::{Node, NodeSeq, OperatorKind, Polarity};
use std::fmt;

/// Render a sequence to its canonical string.
pub fn render(seq: &NodeSeq) -> String {
    seq.to_string()
}

impl fmt::Display for NodeSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.iter() {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", format_number(*n)),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::Operator(op) => write!(f, "{}", operator_str(*op)),
            Node::Sign(Polarity::Neg) => write!(f, "-"),
            Node::Sign(Polarity::Pos) => Ok(()),
            Node::Power { base, exponent } => {
                write_grouped(f, base)?;
                write!(f, "^")?;
                write_grouped(f, exponent)
            }
            Node::Fraction {
                numerator,
                denominator,
            } => {
                write_grouped(f, numerator)?;
                write!(f, " / ")?;
                write_grouped(f, denominator)
            }
            Node::Delimited { body } => write!(f, "({})", body),
        }
    }
}

fn operator_str(op: OperatorKind) -> &'static str {
    match op {
        OperatorKind::Add => " + ",
        OperatorKind::Sub => " - ",
        OperatorKind::Mul | OperatorKind::CMul => " * ",
        OperatorKind::Div => " / ",
    }
}

/// Write a sub-sequence, parenthesizing it when it is not a single
/// atomic operand (so `x^2` stays bare but `(x + 1)^2` is grouped).
fn write_grouped(f: &mut fmt::Formatter<'_>, seq: &NodeSeq) -> fmt::Result {
    let atomic = match seq.single() {
        Some(Node::Number(n)) => *n >= 0.0,
        Some(Node::Symbol(_)) | Some(Node::Delimited { .. }) => true,
        Some(Node::Power { .. }) => true,
        _ => false,
    };
    if atomic {
        write!(f, "{}", seq)
    } else {
        write!(f, "({})", seq)
    }
}

fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Collapses -0.0 as well.
        return "0".to_string();
    }
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
