//! Named value bindings visible to an expression during evaluation.

use crate::value::Value;

/// An ordered name-to-value mapping, built fresh per rule candidate and
/// read-only during evaluation.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: Vec<(String, Value)>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope::default()
    }

    /// Bind `name` to `value`, replacing an existing binding in place so
    /// the original binding order is preserved.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.bindings.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.bindings.push((name.to_string(), value)),
        }
    }

    pub fn with(mut self, name: &str, value: Value) -> Scope {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut scope = Scope::new();
        scope.set("a", Value::from("1"));
        scope.set("b", Value::from("2"));
        scope.set("a", Value::from("3"));

        assert_eq!(scope.get("a"), Some(&Value::from("3")));
        let names: Vec<&str> = scope.names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_names_return_none() {
        assert_eq!(Scope::new().get("nope"), None);
    }
}
