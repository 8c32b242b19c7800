//! Object nodes and the switch/case router
//!
//! An object declares a fixed set of fields. A [`Switch`] adds a second
//! phase: a selector expression is evaluated against the context, and the
//! matching case contributes extra fields (overriding common fields of the
//! same name). An unmatched selector validates with the common fields only
//! and suppresses the undeclared-field check, since the fields of an
//! unknown case cannot be known.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::context::{Context, Selector};
use crate::error::{ErrorKind, ValidationErrors};
use crate::node::{Env, NodeRef};
use crate::value::{Map, Value, ValueKind};
use tracing::trace;

const NAMESPACE: &str = "minecraft:";

/// A declared field and whether it may be omitted
#[derive(Debug, Clone)]
pub struct Field {
    pub node: NodeRef,
    pub optional: bool,
}

/// Ordered field declarations
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<(String, Field)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, key: impl Into<String>, node: impl Into<NodeRef>) -> Self {
        self.with(key, node, false)
    }

    /// A field that may be omitted; an omitted optional field stays absent
    pub fn optional(self, key: impl Into<String>, node: impl Into<NodeRef>) -> Self {
        self.with(key, node, true)
    }

    fn with(mut self, key: impl Into<String>, node: impl Into<NodeRef>, optional: bool) -> Self {
        let key = key.into();
        let field = Field {
            node: node.into(),
            optional,
        };
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = field,
            None => self.fields.push((key, field)),
        }
        self
    }

    /// Append every field of `other`, replacing same-named ones
    pub fn extend(mut self, other: &FieldSet) -> Self {
        for (key, field) in &other.fields {
            self = self.with(key.clone(), field.node.clone(), field.optional);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Discriminated-union routing attached to an object
#[derive(Debug, Clone)]
pub struct Switch {
    selector: Selector,
    cases: Vec<(String, FieldSet)>,
}

impl Switch {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn cases(&self) -> impl Iterator<Item = (&str, &FieldSet)> {
        self.cases.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Case for a selector string; unqualified ids match `minecraft:` cases
    pub fn case(&self, name: &str) -> Option<&FieldSet> {
        let lookup = |wanted: &str| {
            self.cases
                .iter()
                .find(|(k, _)| k == wanted)
                .map(|(_, fields)| fields)
        };
        lookup(name).or_else(|| {
            if name.contains(':') {
                None
            } else {
                lookup(&format!("{}{}", NAMESPACE, name))
            }
        })
    }

    fn declares(&self, key: &str) -> bool {
        self.cases.iter().any(|(_, fields)| fields.contains(key))
    }

    /// Name of the frame exposing the selector value
    fn frame_key(&self) -> &str {
        self.selector.last_key().unwrap_or("type")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    fields: FieldSet,
    switch: Option<Switch>,
    context: Option<String>,
    disable_switch_context: bool,
    permissive: bool,
}

/// Resolved switch state for one object value
struct Route<'n> {
    selected: Option<Value>,
    case: Option<&'n FieldSet>,
}

impl ObjectNode {
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn switch(&self) -> Option<&Switch> {
        self.switch.as_ref()
    }

    /// Context name used for introspection and logging
    pub fn context_name(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn route(&self, cx: &Context) -> Route<'_> {
        let Some(switch) = &self.switch else {
            return Route {
                selected: None,
                case: None,
            };
        };
        let selected = cx.resolve(&switch.selector).cloned();
        let case = selected
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|name| switch.case(name));
        trace!(
            object = self.context.as_deref().unwrap_or("<anonymous>"),
            selector = %switch.selector,
            selected = ?selected,
            matched = case.is_some(),
            "switch routed"
        );
        Route { selected, case }
    }

    /// Run `f` over case fields, behind the selector frame unless it is disabled
    ///
    /// Common fields never see the selector frame, in any pass.
    fn in_case_scope<R>(
        &self,
        selected: Option<Value>,
        cx: &mut Context,
        f: impl FnOnce(&mut Context) -> R,
    ) -> R {
        match (&self.switch, selected) {
            (Some(switch), Some(selected)) if !self.disable_switch_context => {
                cx.with_selector(switch.frame_key(), selected, f)
            }
            _ => f(cx),
        }
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        let Value::Object(map) = value else {
            out.report(
                cx.path(),
                ErrorKind::TypeMismatch,
                format!("expected object, found {}", ValueKind::of(value)),
            );
            return;
        };
        let route = self.route(cx);

        self.validate_fields(&self.fields, route.case, map, cx, env, out);
        if let Some(case) = route.case {
            self.in_case_scope(route.selected.clone(), cx, |cx| {
                self.validate_fields(case, None, map, cx, env, out)
            });
        }

        let unmatched_case = self.switch.is_some() && route.case.is_none();
        if self.permissive || env.config.permissive || unmatched_case {
            return;
        }
        for key in map.keys() {
            let declared = self.fields.contains(key)
                || route.case.is_some_and(|case| case.contains(key));
            if !declared {
                out.report(
                    cx.path_to(key),
                    ErrorKind::ExtraneousField,
                    format!("unexpected field '{}'", key),
                );
            }
        }
    }

    fn validate_fields(
        &self,
        set: &FieldSet,
        overridden: Option<&FieldSet>,
        map: &Map<String, Value>,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        for (key, field) in set.iter() {
            if out.is_full() {
                return;
            }
            if overridden.is_some_and(|o| o.contains(key)) {
                continue;
            }
            match map.get(key) {
                Some(child) => cx.with_field(key, child.clone(), |cx| {
                    field.node.validate(child, cx, env, out)
                }),
                None if !field.optional => out.report(
                    cx.path_to(key),
                    ErrorKind::MissingRequiredField,
                    format!("missing required field '{}'", key),
                ),
                None => {}
            }
        }
    }

    /// Fill missing required fields and normalize declared ones
    ///
    /// Fields no case declares go first so the selector can see them; the
    /// remaining common fields and the case fields follow once the case is
    /// known.
    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        let mut map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        cx.set_current(Value::Object(map.clone()));

        let Some(switch) = &self.switch else {
            self.normalize_fields(&self.fields, |_| true, &mut map, cx, env);
            return Value::Object(map);
        };

        self.normalize_fields(&self.fields, |key| !switch.declares(key), &mut map, cx, env);
        cx.set_current(Value::Object(map.clone()));
        let route = self.route(cx);
        let case = route.case;
        self.normalize_fields(
            &self.fields,
            |key| switch.declares(key) && !case.is_some_and(|c| c.contains(key)),
            &mut map,
            cx,
            env,
        );
        if let Some(case) = case {
            self.in_case_scope(route.selected, cx, |cx| {
                self.normalize_fields(case, |_| true, &mut map, cx, env)
            });
        }
        Value::Object(map)
    }

    fn normalize_fields(
        &self,
        set: &FieldSet,
        include: impl Fn(&str) -> bool,
        map: &mut Map<String, Value>,
        cx: &mut Context,
        env: &Env<'_>,
    ) {
        let mut dirty = false;
        for (key, field) in set.iter().filter(|&(key, _)| include(key)) {
            if dirty {
                cx.set_current(Value::Object(map.clone()));
                dirty = false;
            }
            if let Some(slot) = map.get_mut(key) {
                let current = std::mem::take(slot);
                *slot = cx.with_field(key, current.clone(), |cx| {
                    field.node.normalize(current, cx, env)
                });
            } else if !field.optional {
                let filled = cx.with_field(key, Value::Null, |cx| field.node.default_value(cx, env));
                map.insert(key.to_string(), filled);
                dirty = true;
            }
        }
        if dirty {
            cx.set_current(Value::Object(map.clone()));
        }
    }

    /// Required fields only; switch cases are chosen from the fields built so far
    pub(crate) fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        self.normalize(Value::Object(Map::new()), cx, env)
    }

    pub(crate) fn children(&self, cx: &Context) -> Vec<(String, NodeRef)> {
        let route = self.route(cx);
        let mut children: Vec<(String, NodeRef)> = self
            .fields
            .iter()
            .filter(|(key, _)| !route.case.is_some_and(|c| c.contains(key)))
            .map(|(key, field)| (key.to_string(), field.node.clone()))
            .collect();
        if let Some(case) = route.case {
            children.extend(
                case.iter()
                    .map(|(key, field)| (key.to_string(), field.node.clone())),
            );
        }
        children
    }

    pub(crate) fn members(&self) -> Vec<(String, &NodeRef)> {
        let mut members: Vec<(String, &NodeRef)> = self
            .fields
            .iter()
            .map(|(key, field)| (key.to_string(), &field.node))
            .collect();
        if let Some(switch) = &self.switch {
            for (case, fields) in switch.cases() {
                members.extend(
                    fields
                        .iter()
                        .map(|(key, field)| (format!("{}/{}", case, key), &field.node)),
                );
            }
        }
        members
    }
}

/// Fluent construction of an [`ObjectNode`]
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    node: ObjectNode,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, key: impl Into<String>, node: impl Into<NodeRef>) -> Self {
        self.node.fields = self.node.fields.required(key, node);
        self
    }

    pub fn optional(mut self, key: impl Into<String>, node: impl Into<NodeRef>) -> Self {
        self.node.fields = self.node.fields.optional(key, node);
        self
    }

    /// Declare a group of shared fields
    pub fn fields(mut self, fields: &FieldSet) -> Self {
        self.node.fields = self.node.fields.extend(fields);
        self
    }

    /// Route extra fields on the value located by `selector`
    pub fn switch(mut self, selector: Selector) -> Self {
        let cases = self
            .node
            .switch
            .take()
            .map(|s| s.cases)
            .unwrap_or_default();
        self.node.switch = Some(Switch { selector, cases });
        self
    }

    /// Extra fields for one selector value; requires [`switch`](Self::switch)
    pub fn case(mut self, name: impl Into<String>, fields: FieldSet) -> Self {
        let switch = self.node.switch.get_or_insert_with(|| Switch {
            selector: Selector::sibling("type"),
            cases: Vec::new(),
        });
        switch.cases.push((name.into(), fields));
        self
    }

    pub fn context(mut self, name: impl Into<String>) -> Self {
        self.node.context = Some(name.into());
        self
    }

    /// Hide the selector frame from case fields
    pub fn disable_switch_context(mut self) -> Self {
        self.node.disable_switch_context = true;
        self
    }

    /// Accept undeclared fields
    pub fn permissive(mut self) -> Self {
        self.node.permissive = true;
        self
    }

    pub fn build(self) -> ObjectNode {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionRegistry;
    use crate::config::ValidationConfig;
    use crate::context::FrameKind;
    use crate::external::{ExternalValidators, Issue, Params, ValidatorCall};
    use crate::node::{boolean, integer, object, resource, string, StringNode};
    use crate::registry::SchemaRegistry;
    use serde_json::json;

    struct Harness {
        schemas: SchemaRegistry,
        collections: CollectionRegistry,
        validators: ExternalValidators,
        config: ValidationConfig,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                schemas: SchemaRegistry::new(),
                collections: CollectionRegistry::new()
                    .with_pool("block", ["minecraft:stone", "minecraft:dirt"])
                    .with_pool("item", ["minecraft:stick"]),
                validators: ExternalValidators::builtin(),
                config: ValidationConfig::default(),
            }
        }

        fn env(&self) -> Env<'_> {
            Env {
                schemas: &self.schemas,
                collections: &self.collections,
                validators: &self.validators,
                config: &self.config,
            }
        }

        fn validate(&self, node: &ObjectNode, value: Value) -> ValidationErrors {
            let mut out = ValidationErrors::new();
            let mut cx = Context::root(value.clone());
            node.validate(&value, &mut cx, &self.env(), &mut out);
            assert_eq!(cx.depth(), 1);
            out
        }
    }

    fn stat_node() -> ObjectNode {
        object()
            .required("type", string())
            .required("stat", string())
            .optional("hidden", boolean())
            .switch(Selector::sibling("type"))
            .case("minecraft:mined", FieldSet::new().required("stat", resource("block")))
            .case("minecraft:crafted", FieldSet::new().required("stat", resource("item")))
            .build()
    }

    #[test]
    fn test_missing_and_extraneous_fields() {
        let harness = Harness::new();
        let node = object()
            .required("a", integer())
            .optional("b", boolean())
            .build();
        let errors = harness.validate(&node, json!({"c": 1}));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].kind, ErrorKind::MissingRequiredField);
        assert_eq!(errors.errors[0].path, "a");
        assert_eq!(errors.errors[1].kind, ErrorKind::ExtraneousField);
        assert_eq!(errors.errors[1].path, "c");
    }

    #[test]
    fn test_permissive_object_accepts_unknown_fields() {
        let harness = Harness::new();
        let node = object().required("a", integer()).permissive().build();
        assert!(harness.validate(&node, json!({"a": 1, "zzz": true})).is_empty());
    }

    #[test]
    fn test_switch_routes_case_fields() {
        let harness = Harness::new();
        let node = stat_node();
        assert!(harness
            .validate(&node, json!({"type": "minecraft:mined", "stat": "minecraft:stone"}))
            .is_empty());
        let errors = harness.validate(&node, json!({"type": "mined", "stat": "minecraft:stick"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ErrorKind::UnknownEnumValue);
        assert_eq!(errors.errors[0].path, "stat");
    }

    #[test]
    fn test_unmatched_case_uses_common_fields_only() {
        let harness = Harness::new();
        let errors = harness.validate(
            &stat_node(),
            json!({"type": "minecraft:custom", "stat": "anything", "extra": 1}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_default_picks_case_from_built_fields() {
        let harness = Harness::new();
        let node = object()
            .required("type", crate::node::literals(["minecraft:mined"]))
            .required("stat", string())
            .switch(Selector::sibling("type"))
            .case("minecraft:mined", FieldSet::new().required("stat", resource("block")))
            .build();
        let mut cx = Context::root(Value::Null);
        let value = node.default_value(&mut cx, &harness.env());
        assert_eq!(value, json!({"type": "minecraft:mined", "stat": "minecraft:stone"}));
        assert!(harness.validate(&node, value).is_empty());
    }

    #[test]
    fn test_normalize_is_noop_on_valid_values() {
        let harness = Harness::new();
        let valid = json!({"hidden": true, "type": "minecraft:mined", "stat": "minecraft:dirt"});
        let mut cx = Context::root(valid.clone());
        let normalized = stat_node().normalize(valid.clone(), &mut cx, &harness.env());
        assert_eq!(normalized, valid);
        assert_eq!(cx.depth(), 1);
    }

    fn watched_object(disable: bool) -> ObjectNode {
        let watched = || StringNode::external(ValidatorCall::named("selector_visible"));
        let builder = object()
            .required("type", string())
            .required("note", watched())
            .switch(Selector::sibling("type"))
            .case("minecraft:marked", FieldSet::new().required("data", watched()));
        if disable {
            builder.disable_switch_context().build()
        } else {
            builder.build()
        }
    }

    fn selector_visible(
        _: &Value,
        cx: &Context,
        _: &Params,
        _: &dyn crate::collections::Collections,
    ) -> Vec<Issue> {
        match cx.frames().iter().find(|frame| frame.kind == FrameKind::Selector) {
            Some(frame) => vec![Issue::new(format!("selector frame '{}' visible", frame.key))],
            None => Vec::new(),
        }
    }

    #[test]
    fn test_selector_frame_scopes_case_fields_only() {
        let mut harness = Harness::new();
        harness.validators = ExternalValidators::builtin().with("selector_visible", selector_visible);
        let value = json!({"type": "minecraft:marked", "note": "a", "data": "b"});

        let errors = harness.validate(&watched_object(false), value.clone());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "data");
        assert_eq!(errors.errors[0].kind, ErrorKind::ExternalValidatorFailure);
        assert!(errors.errors[0].message.contains("'type'"));

        assert!(harness.validate(&watched_object(true), value).is_empty());
    }

    #[test]
    fn test_unmatched_case_pushes_no_selector_frame() {
        let mut harness = Harness::new();
        harness.validators = ExternalValidators::builtin().with("selector_visible", selector_visible);
        let errors = harness.validate(
            &watched_object(false),
            json!({"type": "minecraft:other", "note": "a"}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_children_follow_selected_case() {
        let node = stat_node();
        let cx = Context::root(json!({"type": "minecraft:crafted"}));
        let children = node.children(&cx);
        let keys: Vec<_> = children.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["type", "hidden", "stat"]);
        assert_eq!(node.members().len(), 5);
    }
}
