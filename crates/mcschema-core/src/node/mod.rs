//! Schema nodes
//!
//! Every schema element is a [`Node`]: a closed set of variants sharing one
//! contract. `validate` checks a value and reports into an error sink,
//! `normalize` repairs a value into the node's shape (a no-op for values that
//! already validate), `default_value` synthesizes a value that validates, and
//! `children` lists the child nodes visible in the current context.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

pub mod choice;
pub mod leaf;
pub mod list;
pub mod map;
pub mod modifier;
pub mod object;
pub mod reference;

use crate::collections::Collections;
use crate::config::ValidationConfig;
use crate::context::Context;
use crate::error::ValidationErrors;
use crate::external::ExternalValidators;
use crate::registry::SchemaRegistry;
use crate::value::Value;
use std::sync::Arc;

pub use choice::{ChangeFn, ChoiceNode, Shape};
pub use leaf::{BooleanNode, NumberNode, StringKind, StringNode};
pub use list::ListNode;
pub use map::MapNode;
pub use modifier::{DefaultFn, ModNode};
pub use object::{Field, FieldSet, ObjectBuilder, ObjectNode, Switch};
pub use reference::ReferenceNode;

/// Shared handle to a node
pub type NodeRef = Arc<Node>;

/// Read-only collaborators of one validation or default-synthesis run
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub schemas: &'a SchemaRegistry,
    pub collections: &'a dyn Collections,
    pub validators: &'a ExternalValidators,
    pub config: &'a ValidationConfig,
}

/// A schema element
#[derive(Debug)]
pub enum Node {
    Boolean(BooleanNode),
    Number(NumberNode),
    String(StringNode),
    Object(ObjectNode),
    List(ListNode),
    Map(MapNode),
    Choice(ChoiceNode),
    Reference(ReferenceNode),
    Mod(ModNode),
}

impl Node {
    /// Check `value`, reporting every problem into `out`
    pub fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        match self {
            Node::Boolean(node) => node.validate(value, cx, out),
            Node::Number(node) => node.validate(value, cx, out),
            Node::String(node) => node.validate(value, cx, env, out),
            Node::Object(node) => node.validate(value, cx, env, out),
            Node::List(node) => node.validate(value, cx, env, out),
            Node::Map(node) => node.validate(value, cx, env, out),
            Node::Choice(node) => node.validate(value, cx, env, out),
            Node::Reference(node) => node.validate(value, cx, env, out),
            Node::Mod(node) => node.inner().validate(value, cx, env, out),
        }
    }

    /// Repair `value` into this node's shape
    pub fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        match self {
            Node::Boolean(node) => node.normalize(value),
            Node::Number(node) => node.normalize(value),
            Node::String(node) => node.normalize(value, env),
            Node::Object(node) => node.normalize(value, cx, env),
            Node::List(node) => node.normalize(value, cx, env),
            Node::Map(node) => node.normalize(value, cx, env),
            Node::Choice(node) => node.normalize(value, cx, env),
            Node::Reference(node) => node.normalize(value, cx, env),
            Node::Mod(node) => node.normalize(value, cx, env),
        }
    }

    /// Synthesize a value that passes `validate` in the same context
    pub fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        match self {
            Node::Boolean(node) => node.default_value(),
            Node::Number(node) => node.default_value(),
            Node::String(node) => node.default_value(env),
            Node::Object(node) => node.default_value(cx, env),
            Node::List(node) => node.default_value(cx, env),
            Node::Map(_) => Value::Object(Default::default()),
            Node::Choice(node) => node.default_value(cx, env),
            Node::Reference(node) => node.default_value(cx, env),
            Node::Mod(node) => node.default_value(cx, env),
        }
    }

    /// Child nodes visible at the current position, one level deep
    pub fn children(&self, cx: &Context, env: &Env<'_>) -> Vec<(String, NodeRef)> {
        match self {
            Node::Boolean(_) | Node::Number(_) | Node::String(_) => Vec::new(),
            Node::Object(node) => node.children(cx),
            Node::List(node) => vec![("[]".to_string(), node.item().clone())],
            Node::Map(node) => node.children(),
            Node::Choice(node) => node.children(),
            Node::Reference(node) => node.children(cx, env),
            Node::Mod(node) => node.inner().children(cx, env),
        }
    }

    /// Every statically contained node, across all switch cases
    ///
    /// Does not look through references.
    pub fn members(&self) -> Vec<(String, &NodeRef)> {
        match self {
            Node::Boolean(_) | Node::Number(_) | Node::String(_) | Node::Reference(_) => {
                Vec::new()
            }
            Node::Object(node) => node.members(),
            Node::List(node) => vec![("[]".to_string(), node.item())],
            Node::Map(node) => vec![
                ("<key>".to_string(), node.key()),
                ("<value>".to_string(), node.value()),
            ],
            Node::Choice(node) => node
                .shapes()
                .iter()
                .map(|shape| (shape.kind.to_string(), &shape.node))
                .collect(),
            Node::Mod(node) => vec![(String::new(), node.inner())],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Boolean(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::List(_) => "list",
            Node::Map(_) => "map",
            Node::Choice(_) => "choice",
            Node::Reference(_) => "reference",
            Node::Mod(_) => "mod",
        }
    }
}

macro_rules! node_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }

            impl From<$ty> for NodeRef {
                fn from(node: $ty) -> Self {
                    Arc::new(Node::$variant(node))
                }
            }
        )*
    };
}

node_from! {
    BooleanNode => Boolean,
    NumberNode => Number,
    StringNode => String,
    ObjectNode => Object,
    ListNode => List,
    MapNode => Map,
    ChoiceNode => Choice,
    ReferenceNode => Reference,
    ModNode => Mod,
}

impl From<ObjectBuilder> for NodeRef {
    fn from(builder: ObjectBuilder) -> Self {
        Arc::new(Node::Object(builder.build()))
    }
}

/// `true`/`false`
pub fn boolean() -> BooleanNode {
    BooleanNode
}

/// Any number
pub fn number() -> NumberNode {
    NumberNode::new()
}

/// A number without a fractional part
pub fn integer() -> NumberNode {
    NumberNode::new().integer()
}

/// Any string
pub fn string() -> StringNode {
    StringNode::any()
}

/// An identifier from a collection pool
pub fn resource(pool: impl Into<String>) -> StringNode {
    StringNode::resource(pool)
}

/// A closed set of literal strings
pub fn literals<I, S>(values: I) -> StringNode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StringNode::literals(None, values)
}

pub fn object() -> ObjectBuilder {
    ObjectBuilder::new()
}

pub fn list(item: impl Into<NodeRef>) -> ListNode {
    ListNode::new(item)
}

pub fn map(key: impl Into<NodeRef>, value: impl Into<NodeRef>) -> MapNode {
    MapNode::new(key, value)
}

pub fn choice() -> ChoiceNode {
    ChoiceNode::new()
}

/// Late-bound reference to a registered schema
pub fn reference(name: impl Into<String>) -> NodeRef {
    ReferenceNode::new(name).into()
}

/// Wrap `node`, replacing only its default value
pub fn with_default<F>(node: impl Into<NodeRef>, default: F) -> NodeRef
where
    F: Fn() -> Value + Send + Sync + 'static,
{
    ModNode::new(node, default).into()
}
