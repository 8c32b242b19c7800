//! Named schema registry
//!
//! Schemas are registered once at start-up and looked up by name at
//! validation time. Lookups are late-bound, so registration order does not
//! matter and recursive schemas are expressed by name.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::external::ExternalValidators;
use crate::node::{Node, NodeRef, StringKind};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

/// Name -> root node table
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, NodeRef>,
    order: Vec<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `name`
    ///
    /// Registering the same node twice is a no-op; registering a different
    /// node under a taken name fails.
    pub fn register(&mut self, name: impl Into<String>, node: impl Into<NodeRef>) -> SchemaResult<()> {
        let name = name.into();
        let node = node.into();
        if let Some(existing) = self.schemas.get(&name) {
            if Arc::ptr_eq(existing, &node) {
                return Ok(());
            }
            return Err(SchemaError::DuplicateSchema { name });
        }
        debug!(schema = %name, kind = node.kind_name(), "registered schema");
        self.order.push(name.clone());
        self.schemas.insert(name, node);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NodeRef> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check every registered schema for configuration errors
    ///
    /// Catches dangling references, choices with two shapes for one runtime
    /// type, validator names missing from `validators`, closed enums with
    /// no values and number bounds no value can meet. Returns the first
    /// problem found, in registration order.
    pub fn verify(&self, validators: &ExternalValidators) -> SchemaResult<()> {
        let mut nodes = 0usize;
        for name in &self.order {
            let Some(root) = self.schemas.get(name) else {
                continue;
            };
            let mut stack: Vec<&NodeRef> = vec![root];
            while let Some(node) = stack.pop() {
                nodes += 1;
                self.verify_node(name, node, validators)?;
                stack.extend(node.members().into_iter().map(|(_, child)| child));
            }
        }
        info!(schemas = self.len(), nodes, "schema registry verified");
        Ok(())
    }

    fn verify_node(&self, schema: &str, node: &Node, validators: &ExternalValidators) -> SchemaResult<()> {
        let unknown_validator = |name: &str| SchemaError::UnknownValidator {
            name: name.to_string(),
            schema: schema.to_string(),
        };
        match node {
            Node::Reference(reference) if !self.contains(reference.name()) => {
                Err(SchemaError::UnresolvedReference {
                    name: reference.name().to_string(),
                    from: schema.to_string(),
                })
            }
            Node::Choice(choice) => match choice.overlapping_kind() {
                Some(kind) => Err(SchemaError::OverlappingChoice {
                    schema: schema.to_string(),
                    tag: kind.to_string(),
                }),
                None => Ok(()),
            },
            Node::Number(number) if !number.is_satisfiable() => Err(SchemaError::EmptyRange {
                range: format!(
                    "{}[{}, {}]",
                    if number.integer { "integer " } else { "" },
                    number.min.unwrap_or(f64::NEG_INFINITY),
                    number.max.unwrap_or(f64::INFINITY)
                ),
                schema: schema.to_string(),
            }),
            Node::String(string) => match string.kind() {
                StringKind::External(call) if !validators.contains(&call.name) => {
                    Err(unknown_validator(&call.name))
                }
                StringKind::Enum {
                    name,
                    values,
                    additional: false,
                } if values.is_empty() => Err(SchemaError::EmptyEnum {
                    name: name.clone().unwrap_or_else(|| "<inline>".to_string()),
                    schema: schema.to_string(),
                }),
                _ => Ok(()),
            },
            Node::Map(map) => match map.validator_call() {
                Some(call) if !validators.contains(&call.name) => Err(unknown_validator(&call.name)),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Names transitively referenced from `name`, including `name` itself
    pub fn reachable(&self, name: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut pending = vec![name.to_string()];
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(root) = self.get(&current) else {
                continue;
            };
            found.push(current);
            let mut stack: Vec<&NodeRef> = vec![root];
            while let Some(node) = stack.pop() {
                if let Node::Reference(reference) = node.as_ref() {
                    if !seen.contains(reference.name()) {
                        pending.push(reference.name().to_string());
                    }
                }
                stack.extend(node.members().into_iter().map(|(_, child)| child));
            }
        }
        found
    }

    /// Indented outline of a schema's static structure
    ///
    /// References are shown by name and not expanded.
    pub fn outline(&self, name: &str) -> Option<String> {
        let root = self.get(name)?;
        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", name, describe(root));
        write_members(&mut out, root, 1);
        Some(out)
    }
}

fn write_members(out: &mut String, node: &Node, depth: usize) {
    for (label, child) in node.members() {
        let _ = if label.is_empty() {
            writeln!(out, "{}{}", "  ".repeat(depth), describe(child))
        } else {
            writeln!(out, "{}{}: {}", "  ".repeat(depth), label, describe(child))
        };
        write_members(out, child, depth + 1);
    }
}

fn describe(node: &Node) -> String {
    match node {
        Node::String(string) => match string.kind() {
            StringKind::Any => "string".to_string(),
            StringKind::Enum { name: Some(name), .. } => format!("enum({})", name),
            StringKind::Enum { values, .. } => format!("enum({})", values.join("|")),
            StringKind::Resource { pool, allow_tag } => {
                format!("resource({}{})", pool, if *allow_tag { ", #tag" } else { "" })
            }
            StringKind::External(call) => format!("string({})", call.name),
        },
        Node::Number(number) if number.integer => "integer".to_string(),
        Node::Reference(reference) => format!("-> {}", reference.name()),
        Node::Object(object) => match (object.context_name(), object.switch()) {
            (_, Some(switch)) => format!("object switch {}", switch.selector()),
            (Some(context), None) => format!("object ({})", context),
            (None, None) => "object".to_string(),
        },
        other => other.kind_name().to_string(),
    }
}
