//! Homogeneous list node

use crate::context::Context;
use crate::error::{ErrorKind, ValidationErrors};
use crate::node::{Env, NodeRef};
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone)]
pub struct ListNode {
    item: NodeRef,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl ListNode {
    pub fn new(item: impl Into<NodeRef>) -> Self {
        Self {
            item: item.into(),
            min_length: None,
            max_length: None,
        }
    }

    /// Require between `min` and `max` elements
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn item(&self) -> &NodeRef {
        &self.item
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        let Value::Array(items) = value else {
            out.report(
                cx.path(),
                ErrorKind::TypeMismatch,
                format!("expected list, found {}", ValueKind::of(value)),
            );
            return;
        };
        if let Some(min) = self.min_length.filter(|min| items.len() < *min) {
            out.report(
                cx.path(),
                ErrorKind::OutOfRange,
                format!("expected at least {} elements, found {}", min, items.len()),
            );
        }
        if let Some(max) = self.max_length.filter(|max| items.len() > *max) {
            out.report(
                cx.path(),
                ErrorKind::OutOfRange,
                format!("expected at most {} elements, found {}", max, items.len()),
            );
        }
        for (index, item) in items.iter().enumerate() {
            if out.is_full() {
                return;
            }
            cx.with_element(index, item.clone(), |cx| {
                self.item.validate(item, cx, env, out)
            });
        }
    }

    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        let Value::Array(items) = value else {
            return self.default_value(cx, env);
        };
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                cx.with_element(index, item.clone(), |cx| self.item.normalize(item, cx, env))
            })
            .collect();
        Value::Array(items)
    }

    /// Empty, or the minimum number of default elements
    pub(crate) fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        let count = self.min_length.unwrap_or(0);
        let items = (0..count)
            .map(|index| {
                cx.with_element(index, Value::Null, |cx| self.item.default_value(cx, env))
            })
            .collect();
        Value::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionRegistry;
    use crate::config::ValidationConfig;
    use crate::external::ExternalValidators;
    use crate::node::{integer, list};
    use crate::registry::SchemaRegistry;
    use serde_json::json;

    fn run(node: &ListNode, value: Value) -> (ValidationErrors, Value) {
        let schemas = SchemaRegistry::new();
        let collections = CollectionRegistry::new();
        let validators = ExternalValidators::builtin();
        let config = ValidationConfig::default();
        let env = Env {
            schemas: &schemas,
            collections: &collections,
            validators: &validators,
            config: &config,
        };
        let mut out = ValidationErrors::new();
        let mut cx = Context::root(value.clone());
        node.validate(&value, &mut cx, &env, &mut out);
        let default = node.default_value(&mut Context::root(Value::Null), &env);
        (out, default)
    }

    #[test]
    fn test_element_errors_carry_index() {
        let (errors, _) = run(&list(integer()), json!([1, "two", 3.5]));
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["[1]", "[2]"]);
    }

    #[test]
    fn test_length_bounds_and_default() {
        let node = list(integer()).length(3, 3);
        let (errors, default) = run(&node, json!([1, 2]));
        assert_eq!(errors.errors[0].kind, ErrorKind::OutOfRange);
        assert_eq!(default, json!([0, 0, 0]));
        let (errors, _) = run(&node, default);
        assert!(errors.is_empty());
    }
}
