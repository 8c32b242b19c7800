//! Laws every schema of the catalog must obey
//!
//! Defaults validate, choices partition the runtime types, unmatched switch
//! cases are tolerated and recursive defaults terminate.


use mcschema_core::context::SelectorOp;
use mcschema_core::node::{self, Env, Node, NodeRef};
use mcschema_core::{
    Context, ErrorKind, ExternalValidators, SchemaRegistry, ValidationConfig, Validator, Value,
    ValueKind,
};
use serde_json::json;
use std::collections::HashSet;
use test_support::{collections, schemas};

/// Every node reachable from a registered root without following references
fn all_nodes(schemas: &SchemaRegistry) -> Vec<(String, NodeRef)> {
    let mut nodes = Vec::new();
    for name in schemas.names() {
        let mut stack = vec![schemas.get(name).unwrap().clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.members().into_iter().map(|(_, child)| child.clone()));
            nodes.push((name.to_string(), node));
        }
    }
    nodes
}

/// The object under any default modifiers
fn unwrap_mod(node: &NodeRef) -> &Node {
    match node.as_ref() {
        Node::Mod(modifier) => unwrap_mod(modifier.inner()),
        other => other,
    }
}

#[test]
fn test_every_default_validates() {
    let schemas = schemas();
    let collections = collections();
    let validator = Validator::new(&schemas, &collections);
    for name in schemas.names() {
        let default = validator.default_value(name).unwrap();
        if let Err(errors) = validator.validate(name, &default) {
            panic!("default of {} is invalid: {}\n{:#}", name, errors, default);
        }
    }
}

#[test]
fn test_every_default_is_stable_under_normalize() {
    let schemas = schemas();
    let collections = collections();
    let validator = Validator::new(&schemas, &collections);
    for name in schemas.names() {
        let default = validator.default_value(name).unwrap();
        let normalized = validator.normalize(name, default.clone()).unwrap();
        assert_eq!(normalized, default, "normalize changed the default of {}", name);
    }
}

#[test]
fn test_choices_partition_runtime_types() {
    let schemas = schemas();
    let mut choices = 0;
    for (schema, node) in all_nodes(&schemas) {
        if let Node::Choice(choice) = node.as_ref() {
            choices += 1;
            assert_eq!(choice.overlapping_kind(), None, "choice in {}", schema);
            let kinds: HashSet<ValueKind> = choice.shapes().iter().map(|s| s.kind).collect();
            assert_eq!(kinds.len(), choice.shapes().len(), "choice in {}", schema);
        }
    }
    assert!(choices > 10, "only {} choices found", choices);
}

#[test]
fn test_unmatched_cases_are_tolerated() {
    let schemas = schemas();
    let collections = collections();
    let validator = Validator::new(&schemas, &collections);
    let mut checked = Vec::new();
    for name in schemas.names() {
        let Node::Object(object) = unwrap_mod(schemas.get(name).unwrap()) else {
            continue;
        };
        let Some(switch) = object.switch() else {
            continue;
        };
        let [SelectorOp::Push(key)] = switch.selector().ops() else {
            continue;
        };
        let mut doc = validator.default_value(name).unwrap();
        doc[key.as_str()] = json!("minecraft:not_a_case");
        let errors = validator.collect(name, &doc);
        assert_eq!(errors.by_kind(ErrorKind::ExtraneousField).count(), 0, "{}", name);
        assert_eq!(errors.by_kind(ErrorKind::MissingRequiredField).count(), 0, "{}", name);
        checked.push(name.to_string());
    }
    assert!(checked.contains(&"recipe".to_string()));
    assert!(checked.contains(&"template_element".to_string()));
    assert!(checked.contains(&"statistic_predicate".to_string()));
}

#[test]
fn test_unmatched_parent_case_keeps_case_fields_unchecked() {
    let schemas = schemas();
    let collections = collections();
    let validator = Validator::new(&schemas, &collections);
    let doc = json!({
        "type": "minecraft:crystal_spire",
        "config": {"height": 12, "state": {"Name": "minecraft:stone"}}
    });
    assert!(validator.validate("configured_feature", &doc).is_ok());
}

#[test]
fn test_configured_feature_default_does_not_reenter() {
    let schemas = schemas();
    let collections = collections();
    let validators = ExternalValidators::builtin();
    let config = ValidationConfig::default();
    let env = Env {
        schemas: &schemas,
        collections: &collections,
        validators: &validators,
        config: &config,
    };
    let mut cx = Context::root(Value::Null);
    let default = node::reference("configured_feature").default_value(&mut cx, &env);
    assert!(!cx.reentered());
    assert_eq!(cx.reference_depth(), 0);
    assert_eq!(default["config"]["feature"]["type"], json!("minecraft:tree"));
}

#[test]
fn test_recursive_defaults_terminate() {
    let schemas = schemas();
    let collections = collections();
    let validators = ExternalValidators::builtin();
    let config = ValidationConfig::default();
    let env = Env {
        schemas: &schemas,
        collections: &collections,
        validators: &validators,
        config: &config,
    };
    for name in schemas.names() {
        let mut cx = Context::root(Value::Null);
        node::reference(name).default_value(&mut cx, &env);
        assert!(!cx.reentered(), "default of {} re-entered itself", name);
    }
}
