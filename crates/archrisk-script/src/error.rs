//! Structured parse and evaluation errors.
//!
//! Evaluation errors carry an ordered list of (literal, message) context
//! frames, innermost first. Each enclosing expression wraps the error with
//! its own literal, so the rendered message reads as a causal chain from the
//! outermost expression down to the failing one.

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// A scripted-rule source could not be turned into an AST. The offending
/// literal is the canonical rendering of the sub-tree that failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{literal}: expected a single-key mapping, a list, or a scalar")]
    MalformedNode { literal: String },

    #[error("{literal}: unknown operator {operator:?}")]
    UnknownOperator { literal: String, operator: String },

    #[error("{literal}: {operator:?} expects {expected} operand(s), got {actual}")]
    WrongArity {
        literal: String,
        operator: String,
        expected: usize,
        actual: usize,
    },

    #[error("{literal}: expected a {expected} expression, got {actual}")]
    KindMismatch {
        literal: String,
        expected: Kind,
        actual: Kind,
    },
}

impl ParseError {
    /// The canonical rendering of the sub-tree that failed to parse.
    pub fn literal(&self) -> &str {
        match self {
            ParseError::MalformedNode { literal }
            | ParseError::UnknownOperator { literal, .. }
            | ParseError::WrongArity { literal, .. }
            | ParseError::KindMismatch { literal, .. } => literal,
        }
    }
}

/// The innermost cause of an evaluation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("expected a {expected} value, got {actual}")]
    KindMismatch { expected: Kind, actual: Kind },

    #[error("cannot compare {lhs} with {rhs}")]
    IncomparableKinds { lhs: Kind, rhs: Kind },

    #[error("unknown variable {name:?}")]
    UnknownVariable { name: String },

    #[error("expression is not true")]
    AssertionFailed,
}

/// One context frame: the literal of an enclosing expression plus what that
/// expression was doing when the inner error surfaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub literal: String,
    pub message: String,
}

/// A typed evaluation failure with its context chain. Aborts only the
/// current rule candidate, never the analysis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    kind: EvalErrorKind,
    /// Innermost first; Display renders outermost first.
    frames: Vec<Frame>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> EvalError {
        EvalError {
            kind,
            frames: Vec::new(),
        }
    }

    pub fn kind_mismatch(expected: Kind, actual: Kind) -> EvalError {
        EvalError::new(EvalErrorKind::KindMismatch { expected, actual })
    }

    pub fn unknown_variable(name: &str) -> EvalError {
        EvalError::new(EvalErrorKind::UnknownVariable {
            name: name.to_string(),
        })
    }

    /// Add an enclosing context frame.
    pub fn wrap(mut self, literal: &str, message: &str) -> EvalError {
        self.frames.push(Frame {
            literal: literal.to_string(),
            message: message.to_string(),
        });
        self
    }

    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }

    /// Context frames, innermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The literal of the outermost expression involved in the failure.
    pub fn outermost_literal(&self) -> Option<&str> {
        self.frames.last().map(|f| f.literal.as_str())
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames.iter().rev() {
            write!(f, "{:?}: {}: ", frame.literal, frame.message)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
