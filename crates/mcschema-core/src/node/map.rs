//! Map node: free-form keys, homogeneous values
//!
//! Keys and values are validated independently. A map may also carry a
//! whole-map validator (e.g. `block_state_map`), called once with the entire
//! map while the map is the top context frame.

use crate::context::Context;
use crate::error::{ErrorKind, ValidationErrors};
use crate::external::ValidatorCall;
use crate::node::{Env, NodeRef};
use crate::value::{Map, Value, ValueKind};

#[derive(Debug, Clone)]
pub struct MapNode {
    key: NodeRef,
    value: NodeRef,
    validation: Option<ValidatorCall>,
}

impl MapNode {
    pub fn new(key: impl Into<NodeRef>, value: impl Into<NodeRef>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            validation: None,
        }
    }

    /// Cross-check the whole map with a named external validator
    pub fn validation(mut self, call: ValidatorCall) -> Self {
        self.validation = Some(call);
        self
    }

    pub fn key(&self) -> &NodeRef {
        &self.key
    }

    pub fn value(&self) -> &NodeRef {
        &self.value
    }

    pub fn validator_call(&self) -> Option<&ValidatorCall> {
        self.validation.as_ref()
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        let Value::Object(entries) = value else {
            out.report(
                cx.path(),
                ErrorKind::TypeMismatch,
                format!("expected map, found {}", ValueKind::of(value)),
            );
            return;
        };
        for (key, entry) in entries {
            if out.is_full() {
                return;
            }
            let key_value = Value::String(key.clone());
            cx.with_field(key, key_value.clone(), |cx| {
                self.key.validate(&key_value, cx, env, out)
            });
            cx.with_field(key, entry.clone(), |cx| {
                self.value.validate(entry, cx, env, out)
            });
        }
        if let Some(call) = &self.validation {
            env.validators.run(call, value, cx, env, out);
        }
    }

    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        let Value::Object(entries) = value else {
            return Value::Object(Map::new());
        };
        let entries = entries
            .into_iter()
            .map(|(key, entry)| {
                let normalized =
                    cx.with_field(&key, entry.clone(), |cx| self.value.normalize(entry, cx, env));
                (key, normalized)
            })
            .collect();
        Value::Object(entries)
    }

    pub(crate) fn children(&self) -> Vec<(String, NodeRef)> {
        vec![
            ("<key>".to_string(), self.key.clone()),
            ("<value>".to_string(), self.value.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionRegistry;
    use crate::config::ValidationConfig;
    use crate::context::Selector;
    use crate::external::{ExternalValidators, Params};
    use crate::node::{boolean, map, resource, string};
    use crate::registry::SchemaRegistry;
    use serde_json::json;

    fn validate_with(node: &MapNode, root: Value, collections: &CollectionRegistry) -> ValidationErrors {
        let schemas = SchemaRegistry::new();
        let validators = ExternalValidators::builtin();
        let config = ValidationConfig::default();
        let env = Env {
            schemas: &schemas,
            collections,
            validators: &validators,
            config: &config,
        };
        let mut out = ValidationErrors::new();
        let mut cx = Context::root(root.clone());
        let state = root["state"].clone();
        cx.with_field("state", state.clone(), |cx| node.validate(&state, cx, &env, &mut out));
        out
    }

    #[test]
    fn test_keys_and_values_validated_independently() {
        let collections = CollectionRegistry::new().with_pool("$recipe", ["minecraft:bread"]);
        let node = map(resource("$recipe"), boolean());
        let errors = validate_with(
            &node,
            json!({"state": {"minecraft:bread": true, "minecraft:cake": 1}}),
            &collections,
        );
        let kinds: Vec<_> = errors.iter().map(|e| (e.path.as_str(), e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("state.minecraft:cake", ErrorKind::UnknownEnumValue),
                ("state.minecraft:cake", ErrorKind::TypeMismatch),
            ]
        );
    }

    #[test]
    fn test_whole_map_validator_sees_enclosing_object() {
        let collections = CollectionRegistry::new()
            .with_block("minecraft:furnace", [("lit", ["true", "false"])]);
        let node = map(string(), string()).validation(ValidatorCall::new(
            "block_state_map",
            Params::new().selector("id", Selector::parent("block")),
        ));
        let errors = validate_with(
            &node,
            json!({"block": "minecraft:furnace", "state": {"lit": "true", "facing": "north"}}),
            &collections,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "state.facing");
        assert_eq!(errors.errors[0].kind, ErrorKind::ExternalValidatorFailure);
    }
}
