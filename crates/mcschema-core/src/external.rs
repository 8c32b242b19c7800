//! Named external validators
//!
//! Some constraints cannot be expressed structurally: block-state maps are
//! checked against the properties of the block chosen elsewhere in the
//! document, NBT is an opaque SNBT string, team names follow their own
//! lexical rules. Nodes refer to these by name through a [`ValidatorCall`];
//! the implementations live in an [`ExternalValidators`] table passed in
//! with each run.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::collections::Collections;
use crate::context::{Context, Selector};
use crate::error::{ErrorKind, ValidationErrors};
use crate::node::leaf::qualify;
use crate::node::Env;
use crate::value::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Name of the built-in block-state map validator
pub const BLOCK_STATE_MAP: &str = "block_state_map";
/// Name of the built-in SNBT validator
pub const NBT: &str = "nbt";
/// Name of the built-in team name validator
pub const TEAM: &str = "team";

/// Parameters of a validator call: plain values and context selectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Map<String, Value>,
    selectors: Vec<(String, Selector)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// A parameter resolved from the context at call time
    pub fn selector(mut self, key: impl Into<String>, selector: Selector) -> Self {
        self.selectors.push((key.into(), selector));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_selector(&self, key: &str) -> Option<&Selector> {
        self.selectors
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, selector)| selector)
    }

    /// Selector parameters are evaluated against `cx`; plain values are returned as-is
    pub fn resolve<'a>(&'a self, key: &str, cx: &'a Context) -> Option<&'a Value> {
        match self.get_selector(key) {
            Some(selector) => cx.resolve(selector),
            None => self.get(key),
        }
    }
}

/// Reference from a node to a named validator
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorCall {
    pub name: String,
    pub params: Params,
}

impl ValidatorCall {
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Params::new())
    }
}

/// One problem found by an external validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Child key the problem is attached to; `None` for the value itself
    pub key: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            key: None,
            message: message.into(),
        }
    }

    pub fn at(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            message: message.into(),
        }
    }
}

/// A named, pluggable check
pub trait ExternalValidator: Send + Sync {
    fn validate(
        &self,
        value: &Value,
        cx: &Context,
        params: &Params,
        collections: &dyn Collections,
    ) -> Vec<Issue>;
}

impl<F> ExternalValidator for F
where
    F: Fn(&Value, &Context, &Params, &dyn Collections) -> Vec<Issue> + Send + Sync,
{
    fn validate(
        &self,
        value: &Value,
        cx: &Context,
        params: &Params,
        collections: &dyn Collections,
    ) -> Vec<Issue> {
        self(value, cx, params, collections)
    }
}

/// Table of validators available to a run
#[derive(Clone)]
pub struct ExternalValidators {
    validators: HashMap<String, Arc<dyn ExternalValidator>>,
}

impl fmt::Debug for ExternalValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("ExternalValidators")
            .field("names", &names)
            .finish()
    }
}

impl Default for ExternalValidators {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExternalValidators {
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// `block_state_map`, `nbt` and `team`
    pub fn builtin() -> Self {
        Self::empty()
            .with(BLOCK_STATE_MAP, BlockStateMap)
            .with(NBT, Nbt)
            .with(TEAM, Team)
    }

    pub fn register(&mut self, name: impl Into<String>, validator: impl ExternalValidator + 'static) {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    pub fn with(mut self, name: impl Into<String>, validator: impl ExternalValidator + 'static) -> Self {
        self.register(name, validator);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ExternalValidator>> {
        self.validators.get(name)
    }

    /// Run `call` on `value`, reporting each issue as a validator failure
    pub(crate) fn run(
        &self,
        call: &ValidatorCall,
        value: &Value,
        cx: &Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        let Some(validator) = self.get(&call.name) else {
            out.report(
                cx.path(),
                ErrorKind::ExternalValidatorFailure,
                format!("validator '{}' is not installed", call.name),
            );
            return;
        };
        let issues = validator.validate(value, cx, &call.params, env.collections);
        trace!(validator = %call.name, issues = issues.len(), "ran external validator");
        for issue in issues {
            let path = match &issue.key {
                Some(key) => cx.path_to(key),
                None => cx.path(),
            };
            out.report(path, ErrorKind::ExternalValidatorFailure, issue.message);
        }
    }
}

/// Checks a block-state map against the properties its block declares
///
/// The block id comes from the `id` parameter, usually a selector such as
/// `['pop', {push: 'Name'}]`. Unknown blocks are not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStateMap;

impl ExternalValidator for BlockStateMap {
    fn validate(
        &self,
        value: &Value,
        cx: &Context,
        params: &Params,
        collections: &dyn Collections,
    ) -> Vec<Issue> {
        let Value::Object(state) = value else {
            return vec![Issue::new("expected a block state map")];
        };
        let Some(block) = params.resolve("id", cx).and_then(Value::as_str) else {
            return Vec::new();
        };
        let block = qualify(block);
        let Some(properties) = collections.block_properties(&block) else {
            trace!(block = %block, "no block properties, skipping state check");
            return Vec::new();
        };

        let mut issues = Vec::new();
        for (key, entry) in state {
            let Some(allowed) = properties.get(key) else {
                issues.push(Issue::at(
                    key.as_str(),
                    format!("{} has no property '{}'", block, key),
                ));
                continue;
            };
            if let Some(text) = entry.as_str() {
                if !allowed.iter().any(|v| v == text) {
                    issues.push(Issue::at(
                        key.as_str(),
                        format!(
                            "'{}' is not a valid value of {} (expected one of: {})",
                            text,
                            key,
                            allowed.join(", ")
                        ),
                    ));
                }
            }
        }
        issues
    }
}

/// Loose SNBT compound check: the trimmed text is wrapped in braces
#[derive(Debug, Clone, Copy, Default)]
pub struct Nbt;

impl ExternalValidator for Nbt {
    fn validate(&self, value: &Value, _: &Context, _: &Params, _: &dyn Collections) -> Vec<Issue> {
        match value.as_str().map(str::trim) {
            Some(text) if text.starts_with('{') && text.ends_with('}') => Vec::new(),
            Some(_) => vec![Issue::new("expected an NBT compound such as {Count:1b}")],
            None => vec![Issue::new("expected an NBT string")],
        }
    }
}

/// Team names are non-empty and contain no whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct Team;

impl ExternalValidator for Team {
    fn validate(&self, value: &Value, _: &Context, _: &Params, _: &dyn Collections) -> Vec<Issue> {
        match value.as_str() {
            Some("") => vec![Issue::new("team name must not be empty")],
            Some(name) if name.chars().any(char::is_whitespace) => {
                vec![Issue::new(format!("team name '{}' contains whitespace", name))]
            }
            Some(_) => Vec::new(),
            None => vec![Issue::new("expected a team name")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionRegistry;
    use serde_json::json;

    #[test]
    fn test_params_resolve_selectors_against_context() {
        let params = Params::new()
            .value("limit", 3)
            .selector("id", Selector::parent("Name"));
        let mut cx = Context::root(json!({"Name": "minecraft:furnace", "Properties": {}}));
        cx.with_field("Properties", json!({}), |cx| {
            assert_eq!(params.resolve("id", cx), Some(&json!("minecraft:furnace")));
            assert_eq!(params.resolve("limit", cx), Some(&json!(3)));
            assert_eq!(params.resolve("missing", cx), None);
        });
    }

    #[test]
    fn test_block_state_map_checks_names_and_values() {
        let collections = CollectionRegistry::new()
            .with_block("minecraft:furnace", [("lit", ["true", "false"])]);
        let params = Params::new().value("id", "furnace");
        let cx = Context::root(json!({}));

        let issues = BlockStateMap.validate(
            &json!({"lit": "maybe", "facing": "north"}),
            &cx,
            &params,
            &collections,
        );
        let keys: Vec<_> = issues.iter().filter_map(|i| i.key.as_deref()).collect();
        assert_eq!(keys, vec!["lit", "facing"]);

        let unknown = Params::new().value("id", "minecraft:stone");
        assert!(BlockStateMap
            .validate(&json!({"anything": "goes"}), &cx, &unknown, &collections)
            .is_empty());
    }

    #[test]
    fn test_nbt_and_team() {
        let collections = CollectionRegistry::new();
        let cx = Context::new();
        let params = Params::new();
        assert!(Nbt.validate(&json!(" {Count:1b} "), &cx, &params, &collections).is_empty());
        assert_eq!(Nbt.validate(&json!("Count:1b"), &cx, &params, &collections).len(), 1);
        assert!(Team.validate(&json!("red"), &cx, &params, &collections).is_empty());
        assert_eq!(Team.validate(&json!("red team"), &cx, &params, &collections).len(), 1);
        assert_eq!(Team.validate(&json!(""), &cx, &params, &collections).len(), 1);
    }

    #[test]
    fn test_closures_register_as_validators() {
        let validators = ExternalValidators::empty().with(
            "even",
            |value: &Value, _: &Context, _: &Params, _: &dyn Collections| {
                if value.as_i64().is_some_and(|n| n % 2 == 0) {
                    Vec::new()
                } else {
                    vec![Issue::new("expected an even number")]
                }
            },
        );
        assert!(validators.contains("even"));
        assert!(!validators.contains(NBT));
        assert!(ExternalValidators::builtin().contains(BLOCK_STATE_MAP));
    }
}
