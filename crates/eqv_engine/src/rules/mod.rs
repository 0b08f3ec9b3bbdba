//! Rewrite rule implementations, grouped by domain.

pub mod algebraic;
pub mod trigonometric;
