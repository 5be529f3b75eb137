//! Property-based tests for the expression engine.
//!
//! These verify two totality invariants:
//! - parsing any successfully parsed node's literal again yields an
//!   equivalent AST (idempotent parse)
//! - evaluation never panics, whatever the scope contents

use crate::expr::Expr;
use crate::scope::Scope;
use crate::value::Value;
use proptest::prelude::*;
use serde_json::{json, Value as JsonValue};

fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        any::<bool>().prop_map(JsonValue::from),
        "[a-z]{0,8}".prop_map(JsonValue::from),
        (0u32..1000).prop_map(JsonValue::from),
    ]
}

/// Arbitrary well-formed expression trees, a few levels deep.
fn arb_tree() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        arb_scalar(),
        "[a-z]{1,8}".prop_map(|name| json!({ "get": name })),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(any::<bool>().prop_map(JsonValue::from), 0..4)
                .prop_map(|items| json!({ "all": items })),
            prop::collection::vec(any::<bool>().prop_map(JsonValue::from), 0..4)
                .prop_map(|items| json!({ "any": items })),
            any::<bool>().prop_map(|b| json!({ "not": b })),
            any::<bool>().prop_map(|b| json!({ "true": b })),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| json!({ "equal": [a, b] })),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| json!({ "list": items })),
            prop::collection::vec("[a-z]{0,4}".prop_map(JsonValue::from), 0..4)
                .prop_map(|items| json!({ "concat": items })),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(list, item)| json!({ "contains": [{ "list": list }, item] })),
        ]
    })
}

proptest! {
    #[test]
    fn parse_is_idempotent_over_literals(tree in arb_tree()) {
        if let Ok(expr) = Expr::parse_any(&tree) {
            let reparsed_tree: JsonValue = serde_json::from_str(expr.literal())
                .expect("literal must be re-parseable");
            let reparsed = Expr::parse_any(&reparsed_tree)
                .expect("literal must yield a valid expression");
            prop_assert_eq!(expr, reparsed);
        }
    }

    #[test]
    fn evaluation_is_total(tree in arb_tree(), bind in any::<bool>()) {
        let mut scope = Scope::new();
        if bind {
            scope.set("a", Value::from("a"));
            scope.set("flag", Value::Bool(true));
        }
        if let Ok(expr) = Expr::parse_any(&tree) {
            // Either a value or a structured error; both are fine.
            let _ = expr.eval_any(&scope);
        }
    }
}
