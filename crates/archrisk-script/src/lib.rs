//! Typed expression engine for scripted risk rules.
//!
//! A rule program arrives as a generic nested literal tree (a decoded
//! [`serde_json::Value`]); parsing turns it into a typed AST, evaluation
//! walks the AST against a [`Scope`] of named values. Both halves are total:
//! they return structured errors carrying the offending literal instead of
//! panicking, so one broken rule never takes down an analysis run.

#![forbid(unsafe_code)]

pub mod error;
pub mod expr;
pub mod scope;
pub mod value;

#[cfg(test)]
mod proptest;

pub use error::{EvalError, EvalErrorKind, Frame, ParseError};
pub use expr::{render_literal, CompareOp, Expr};
pub use scope::Scope;
pub use value::{Kind, Value};
