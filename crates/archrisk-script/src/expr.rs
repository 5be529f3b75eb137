//! The expression AST, its parser, and its evaluator.
//!
//! A node type is selected by the structural shape of the source tree: a
//! scalar is a literal, a list is a conjunction of boolean expressions, and
//! a single-key mapping names an operator whose value holds the operands.
//! Every node keeps the canonical rendering of its own source sub-tree so
//! diagnostics can point at exactly what the rule author wrote.

use crate::error::{EvalError, EvalErrorKind, ParseError};
use crate::scope::Scope;
use crate::value::{Kind, Value};
use serde_json::Value as JsonValue;

/// Render the canonical textual form of a source sub-tree, used for
/// `literal()` and in every error message.
pub fn render_literal(source: &JsonValue) -> String {
    source.to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    Less,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal { literal: String, value: Value },
    /// A variable reference, resolved against the scope at eval time.
    Get { literal: String, name: String },
    /// Conjunction; also what a bare list of expressions parses to.
    All { literal: String, operands: Vec<Expr> },
    /// Disjunction.
    AnyOf { literal: String, operands: Vec<Expr> },
    Not { literal: String, operand: Box<Expr> },
    /// Assert-true wrapper: marks its operand as a hard precondition.
    True { literal: String, operand: Box<Expr> },
    Equal {
        literal: String,
        negated: bool,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Compare {
        literal: String,
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// List membership.
    Contains {
        literal: String,
        list: Box<Expr>,
        item: Box<Expr>,
    },
    /// String construction from string parts.
    Concat { literal: String, parts: Vec<Expr> },
    /// List construction.
    MakeList { literal: String, items: Vec<Expr> },
}

impl Expr {
    /// Parse any expression from a generic literal tree.
    pub fn parse_any(source: &JsonValue) -> Result<Expr, ParseError> {
        let literal = render_literal(source);
        match source {
            JsonValue::Bool(b) => Ok(Expr::Literal {
                literal,
                value: Value::Bool(*b),
            }),
            JsonValue::String(s) => Ok(Expr::Literal {
                literal,
                value: Value::String(s.clone()),
            }),
            JsonValue::Number(n) => Ok(Expr::Literal {
                value: Value::String(n.to_string()),
                literal,
            }),
            JsonValue::Array(items) => {
                let operands = items
                    .iter()
                    .map(Expr::parse_bool)
                    .collect::<Result<Vec<Expr>, ParseError>>()?;
                Ok(Expr::All { literal, operands })
            }
            JsonValue::Object(map) => match map.iter().next() {
                Some((operator, operand)) if map.len() == 1 => {
                    Expr::parse_operator(literal, operator, operand)
                }
                _ => Err(ParseError::MalformedNode { literal }),
            },
            JsonValue::Null => Err(ParseError::MalformedNode { literal }),
        }
    }

    /// Typed parse variants: fail when the node's static kind is wrong.
    pub fn parse_bool(source: &JsonValue) -> Result<Expr, ParseError> {
        Expr::parse_required(source, Kind::Bool)
    }

    pub fn parse_string(source: &JsonValue) -> Result<Expr, ParseError> {
        Expr::parse_required(source, Kind::String)
    }

    pub fn parse_list(source: &JsonValue) -> Result<Expr, ParseError> {
        Expr::parse_required(source, Kind::List)
    }

    fn parse_required(source: &JsonValue, required: Kind) -> Result<Expr, ParseError> {
        let expr = Expr::parse_any(source)?;
        if expr.kind().satisfies(required) {
            Ok(expr)
        } else {
            Err(ParseError::KindMismatch {
                literal: expr.literal().to_string(),
                expected: required,
                actual: expr.kind(),
            })
        }
    }

    fn parse_operator(
        literal: String,
        operator: &str,
        operand: &JsonValue,
    ) -> Result<Expr, ParseError> {
        match operator {
            "all" | "any" => {
                let items = expect_list(&literal, operator, operand)?;
                let operands = items
                    .iter()
                    .map(Expr::parse_bool)
                    .collect::<Result<Vec<Expr>, ParseError>>()?;
                if operator == "all" {
                    Ok(Expr::All { literal, operands })
                } else {
                    Ok(Expr::AnyOf { literal, operands })
                }
            }
            "not" => Ok(Expr::Not {
                operand: Box::new(Expr::parse_bool(operand)?),
                literal,
            }),
            "true" => Ok(Expr::True {
                operand: Box::new(Expr::parse_bool(operand)?),
                literal,
            }),
            "equal" | "not-equal" => {
                let (lhs, rhs) = expect_pair(&literal, operator, operand)?;
                let lhs = Expr::parse_any(lhs)?;
                let rhs = Expr::parse_any(rhs)?;
                if !lhs.kind().satisfies(rhs.kind()) {
                    return Err(ParseError::KindMismatch {
                        literal,
                        expected: lhs.kind(),
                        actual: rhs.kind(),
                    });
                }
                Ok(Expr::Equal {
                    literal,
                    negated: operator == "not-equal",
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                })
            }
            "greater" | "less" => {
                let (lhs, rhs) = expect_pair(&literal, operator, operand)?;
                Ok(Expr::Compare {
                    op: if operator == "greater" {
                        CompareOp::Greater
                    } else {
                        CompareOp::Less
                    },
                    lhs: Box::new(Expr::parse_string(lhs)?),
                    rhs: Box::new(Expr::parse_string(rhs)?),
                    literal,
                })
            }
            "contains" => {
                let (list, item) = expect_pair(&literal, operator, operand)?;
                Ok(Expr::Contains {
                    list: Box::new(Expr::parse_list(list)?),
                    item: Box::new(Expr::parse_any(item)?),
                    literal,
                })
            }
            "concat" => {
                let items = expect_list(&literal, operator, operand)?;
                let parts = items
                    .iter()
                    .map(Expr::parse_string)
                    .collect::<Result<Vec<Expr>, ParseError>>()?;
                Ok(Expr::Concat { literal, parts })
            }
            "list" => {
                let entries = expect_list(&literal, operator, operand)?;
                let items = entries
                    .iter()
                    .map(Expr::parse_any)
                    .collect::<Result<Vec<Expr>, ParseError>>()?;
                Ok(Expr::MakeList { literal, items })
            }
            "get" => match operand {
                JsonValue::String(name) => Ok(Expr::Get {
                    literal,
                    name: name.clone(),
                }),
                _ => Err(ParseError::MalformedNode {
                    literal: render_literal(operand),
                }),
            },
            _ => Err(ParseError::UnknownOperator {
                literal,
                operator: operator.to_string(),
            }),
        }
    }

    /// Static value kind of this node. Variable references are `Any`.
    pub fn kind(&self) -> Kind {
        match self {
            Expr::Literal { value, .. } => value.kind(),
            Expr::Get { .. } => Kind::Any,
            Expr::All { .. }
            | Expr::AnyOf { .. }
            | Expr::Not { .. }
            | Expr::True { .. }
            | Expr::Equal { .. }
            | Expr::Compare { .. }
            | Expr::Contains { .. } => Kind::Bool,
            Expr::Concat { .. } => Kind::String,
            Expr::MakeList { .. } => Kind::List,
        }
    }

    /// The canonical rendering of the source sub-tree this node came from.
    pub fn literal(&self) -> &str {
        match self {
            Expr::Literal { literal, .. }
            | Expr::Get { literal, .. }
            | Expr::All { literal, .. }
            | Expr::AnyOf { literal, .. }
            | Expr::Not { literal, .. }
            | Expr::True { literal, .. }
            | Expr::Equal { literal, .. }
            | Expr::Compare { literal, .. }
            | Expr::Contains { literal, .. }
            | Expr::Concat { literal, .. }
            | Expr::MakeList { literal, .. } => literal,
        }
    }

    /// Evaluate to any value.
    pub fn eval_any(&self, scope: &Scope) -> Result<Value, EvalError> {
        match self {
            Expr::Literal { value, .. } => Ok(value.clone()),

            Expr::Get { literal, name } => match scope.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(EvalError::unknown_variable(name)
                    .wrap(literal, "error resolving variable")),
            },

            Expr::All { literal, operands } => {
                for operand in operands {
                    let ok = operand
                        .eval_bool(scope)
                        .map_err(|e| e.wrap(literal, "error evaluating all-expression"))?;
                    if !ok {
                        return Ok(Value::Bool(false));
                    }
                }
                Ok(Value::Bool(true))
            }

            Expr::AnyOf { literal, operands } => {
                for operand in operands {
                    let ok = operand
                        .eval_bool(scope)
                        .map_err(|e| e.wrap(literal, "error evaluating any-expression"))?;
                    if ok {
                        return Ok(Value::Bool(true));
                    }
                }
                Ok(Value::Bool(false))
            }

            Expr::Not { literal, operand } => {
                let value = operand
                    .eval_bool(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating not-expression"))?;
                Ok(Value::Bool(!value))
            }

            Expr::True { literal, operand } => {
                let value = operand
                    .eval_bool(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating true-expression"))?;
                if value {
                    Ok(Value::Bool(true))
                } else {
                    Err(EvalError::new(EvalErrorKind::AssertionFailed)
                        .wrap(literal, "error evaluating true-expression"))
                }
            }

            Expr::Equal {
                literal,
                negated,
                lhs,
                rhs,
            } => {
                let left = lhs
                    .eval_any(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating equal-expression"))?;
                let right = rhs
                    .eval_any(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating equal-expression"))?;
                if left.kind() != right.kind() {
                    return Err(EvalError::new(EvalErrorKind::IncomparableKinds {
                        lhs: left.kind(),
                        rhs: right.kind(),
                    })
                    .wrap(literal, "error evaluating equal-expression"));
                }
                Ok(Value::Bool((left == right) != *negated))
            }

            Expr::Compare {
                literal,
                op,
                lhs,
                rhs,
            } => {
                let left = lhs
                    .eval_string(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating compare-expression"))?;
                let right = rhs
                    .eval_string(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating compare-expression"))?;
                Ok(Value::Bool(compare_strings(&left, &right, *op)))
            }

            Expr::Contains {
                literal,
                list,
                item,
            } => {
                let entries = list
                    .eval_list(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating contains-expression"))?;
                let needle = item
                    .eval_any(scope)
                    .map_err(|e| e.wrap(literal, "error evaluating contains-expression"))?;
                Ok(Value::Bool(entries.contains(&needle)))
            }

            Expr::Concat { literal, parts } => {
                let mut out = String::new();
                for part in parts {
                    let piece = part
                        .eval_string(scope)
                        .map_err(|e| e.wrap(literal, "error evaluating concat-expression"))?;
                    out.push_str(&piece);
                }
                Ok(Value::String(out))
            }

            Expr::MakeList { literal, items } => {
                let values = items
                    .iter()
                    .map(|item| {
                        item.eval_any(scope)
                            .map_err(|e| e.wrap(literal, "error evaluating list-expression"))
                    })
                    .collect::<Result<Vec<Value>, EvalError>>()?;
                Ok(Value::List(values))
            }
        }
    }

    /// Typed eval variants: fail with a typed kind error when the value
    /// does not reduce to the required kind.
    pub fn eval_bool(&self, scope: &Scope) -> Result<bool, EvalError> {
        match self.eval_any(scope)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::kind_mismatch(Kind::Bool, other.kind())
                .wrap(self.literal(), "expression is not boolean")),
        }
    }

    pub fn eval_string(&self, scope: &Scope) -> Result<String, EvalError> {
        match self.eval_any(scope)? {
            Value::String(s) => Ok(s),
            other => Err(EvalError::kind_mismatch(Kind::String, other.kind())
                .wrap(self.literal(), "expression is not a string")),
        }
    }

    pub fn eval_list(&self, scope: &Scope) -> Result<Vec<Value>, EvalError> {
        match self.eval_any(scope)? {
            Value::List(items) => Ok(items),
            other => Err(EvalError::kind_mismatch(Kind::List, other.kind())
                .wrap(self.literal(), "expression is not a list")),
        }
    }
}

/// Numeric comparison when both sides parse as numbers, lexicographic
/// otherwise.
fn compare_strings(left: &str, right: &str, op: CompareOp) -> bool {
    if let (Ok(l), Ok(r)) = (left.parse::<f64>(), right.parse::<f64>()) {
        return match op {
            CompareOp::Greater => l > r,
            CompareOp::Less => l < r,
        };
    }
    match op {
        CompareOp::Greater => left > right,
        CompareOp::Less => left < right,
    }
}

fn expect_list<'a>(
    literal: &str,
    operator: &str,
    operand: &'a JsonValue,
) -> Result<&'a Vec<JsonValue>, ParseError> {
    match operand {
        JsonValue::Array(items) => Ok(items),
        _ => Err(ParseError::WrongArity {
            literal: literal.to_string(),
            operator: operator.to_string(),
            expected: 1,
            actual: 0,
        }),
    }
}

fn expect_pair<'a>(
    literal: &str,
    operator: &str,
    operand: &'a JsonValue,
) -> Result<(&'a JsonValue, &'a JsonValue), ParseError> {
    let items = expect_list(literal, operator, operand)?;
    match items.as_slice() {
        [lhs, rhs] => Ok((lhs, rhs)),
        _ => Err(ParseError::WrongArity {
            literal: literal.to_string(),
            operator: operator.to_string(),
            expected: 2,
            actual: items.len(),
        }),
    }
}
