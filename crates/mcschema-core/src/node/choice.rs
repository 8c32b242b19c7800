//! Choice node: one logical value, several structural shapes
//!
//! Each shape claims one runtime type. Validation dispatches on the runtime
//! type of the incoming value only; the `change` functions are used when an
//! editor switches the active shape and are never consulted while
//! validating.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::error::{ErrorKind, ValidationErrors};
use crate::node::{Env, NodeRef};
use crate::value::{Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Lossy conversion of a value from another shape into this one
pub type ChangeFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// One alternative representation
#[derive(Clone)]
pub struct Shape {
    pub kind: ValueKind,
    pub node: NodeRef,
    change: Option<ChangeFn>,
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("kind", &self.kind)
            .field("node", &self.node)
            .field("change", &self.change.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChoiceNode {
    shapes: Vec<Shape>,
    context: Option<String>,
}

impl ChoiceNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape without a change function
    pub fn shape(mut self, kind: ValueKind, node: impl Into<NodeRef>) -> Self {
        self.shapes.push(Shape {
            kind,
            node: node.into(),
            change: None,
        });
        self
    }

    /// Add a shape reached from other shapes through `change`
    pub fn shape_with<F>(mut self, kind: ValueKind, node: impl Into<NodeRef>, change: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.shapes.push(Shape {
            kind,
            node: node.into(),
            change: Some(Arc::new(change)),
        });
        self
    }

    pub fn context(mut self, name: impl Into<String>) -> Self {
        self.context = Some(name.into());
        self
    }

    pub fn context_name(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_for(&self, kind: ValueKind) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.kind == kind)
    }

    /// First runtime type claimed by more than one shape
    pub fn overlapping_kind(&self) -> Option<ValueKind> {
        self.shapes.iter().enumerate().find_map(|(i, shape)| {
            self.shapes[..i]
                .iter()
                .any(|earlier| earlier.kind == shape.kind)
                .then_some(shape.kind)
        })
    }

    fn expected(&self) -> String {
        self.shapes
            .iter()
            .map(|shape| shape.kind.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        match self.shape_for(ValueKind::of(value)) {
            Some(shape) => shape.node.validate(value, cx, env, out),
            None => out.report(
                cx.path(),
                ErrorKind::TypeMismatch,
                format!("expected {}, found {}", self.expected(), ValueKind::of(value)),
            ),
        }
    }

    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        let kind = ValueKind::of(&value);
        if let Some(shape) = self.shape_for(kind) {
            return shape.node.normalize(value, cx, env);
        }
        match self.shapes.first() {
            Some(first) => {
                let switched = self.switch_shape(&value, first.kind, cx, env);
                first.node.normalize(switched, cx, env)
            }
            None => value,
        }
    }

    /// Default of the first shape
    pub(crate) fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        self.shapes
            .first()
            .map(|shape| shape.node.default_value(cx, env))
            .unwrap_or(Value::Null)
    }

    /// Convert `value` into the shape claiming `target`
    ///
    /// Best effort: uses the target's change function, or the target's
    /// default when it has none. Values already of the target type are
    /// returned unchanged.
    pub fn switch_shape(
        &self,
        value: &Value,
        target: ValueKind,
        cx: &mut Context,
        env: &Env<'_>,
    ) -> Value {
        if ValueKind::of(value) == target {
            return value.clone();
        }
        match self.shape_for(target) {
            Some(Shape {
                change: Some(change),
                ..
            }) => change(value),
            Some(shape) => shape.node.default_value(cx, env),
            None => value.clone(),
        }
    }

    pub(crate) fn children(&self) -> Vec<(String, NodeRef)> {
        self.shapes
            .iter()
            .map(|shape| (shape.kind.to_string(), shape.node.clone()))
            .collect()
    }
}
