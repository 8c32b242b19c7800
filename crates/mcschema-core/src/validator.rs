//! Entry point for validating, normalizing and defaulting documents
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::collections::Collections;
use crate::config::ValidationConfig;
use crate::context::Context;
use crate::error::{SchemaError, SchemaResult, ValidationErrors};
use crate::external::ExternalValidators;
use crate::node::{Env, Node, NodeRef, ReferenceNode};
use crate::registry::SchemaRegistry;
use crate::value::Value;
use tracing::{debug, debug_span};

/// Runs registered schemas against documents
///
/// # Example
///
/// ```
/// use mcschema_core::{node, CollectionRegistry, SchemaRegistry, Validator};
/// use serde_json::json;
///
/// let mut schemas = SchemaRegistry::new();
/// schemas
///     .register("item_stack", node::object().required("item", node::resource("item")))
///     .unwrap();
/// let collections = CollectionRegistry::new().with_pool("item", ["minecraft:stick"]);
///
/// let validator = Validator::new(&schemas, &collections);
/// assert!(validator.validate("item_stack", &json!({"item": "stick"})).is_ok());
/// assert_eq!(
///     validator.default_value("item_stack").unwrap(),
///     json!({"item": "minecraft:stick"})
/// );
/// ```
pub struct Validator<'a> {
    schemas: &'a SchemaRegistry,
    collections: &'a dyn Collections,
    validators: ExternalValidators,
    config: ValidationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(schemas: &'a SchemaRegistry, collections: &'a dyn Collections) -> Self {
        Self {
            schemas,
            collections,
            validators: ExternalValidators::builtin(),
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_validators(mut self, validators: ExternalValidators) -> Self {
        self.validators = validators;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn env(&self) -> Env<'_> {
        Env {
            schemas: self.schemas,
            collections: self.collections,
            validators: &self.validators,
            config: &self.config,
        }
    }

    fn root(&self, name: &str) -> SchemaResult<ReferenceNode> {
        if self.schemas.contains(name) {
            Ok(ReferenceNode::new(name))
        } else {
            Err(SchemaError::UnresolvedReference {
                name: name.to_string(),
                from: "<root>".to_string(),
            })
        }
    }

    pub fn node(&self, name: &str) -> Option<&NodeRef> {
        self.schemas.get(name)
    }

    /// Validate `value` against the schema registered as `name`
    pub fn validate(&self, name: &str, value: &Value) -> Result<(), ValidationErrors> {
        self.collect(name, value).into_result()
    }

    /// Like [`validate`](Self::validate), returning the (possibly empty) error list
    pub fn collect(&self, name: &str, value: &Value) -> ValidationErrors {
        let span = debug_span!("validate", schema = %name);
        let _enter = span.enter();

        let mut out = self.config.error_sink();
        let mut cx = Context::root(value.clone());
        ReferenceNode::new(name).validate(value, &mut cx, &self.env(), &mut out);
        debug!(errors = out.len(), "validation finished");
        out
    }

    /// Synthesize a value that validates against `name`
    pub fn default_value(&self, name: &str) -> SchemaResult<Value> {
        let root = self.root(name)?;
        let _enter = debug_span!("default", schema = %name).entered();
        let mut cx = Context::root(Value::Null);
        Ok(root.default_value(&mut cx, &self.env()))
    }

    /// Default of any node, such as one returned by [`children`](Self::children)
    pub fn node_default(&self, node: &Node) -> Value {
        let mut cx = Context::root(Value::Null);
        node.default_value(&mut cx, &self.env())
    }

    /// Repair `value` toward the shape of `name`; idempotent on valid values
    pub fn normalize(&self, name: &str, value: Value) -> SchemaResult<Value> {
        let root = self.root(name)?;
        let _enter = debug_span!("normalize", schema = %name).entered();
        let mut cx = Context::root(value.clone());
        Ok(root.normalize(value, &mut cx, &self.env()))
    }

    /// Child nodes of `name` visible when the schema holds `value`
    pub fn children(&self, name: &str, value: &Value) -> SchemaResult<Vec<(String, NodeRef)>> {
        let root = self.root(name)?;
        let cx = Context::root(value.clone());
        Ok(root.children(&cx, &self.env()))
    }
}
