//! Late-bound reference to a registered schema
//!
//! A reference stores only a name. Every call looks the name up in the
//! schema registry at call time, which is what lets schemas refer to
//! themselves or to names registered later.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::error::{ErrorKind, ValidationErrors};
use crate::node::{Env, NodeRef};
use crate::value::Value;
use tracing::{trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceNode {
    name: String,
}

impl ReferenceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve<'e>(&self, env: &Env<'e>) -> Option<&'e NodeRef> {
        let node = env.schemas.get(&self.name);
        trace!(reference = %self.name, found = node.is_some(), "resolving reference");
        node
    }

    /// Run `f` on the target one reference level deeper, if within bounds
    fn enter<R>(
        &self,
        cx: &mut Context,
        env: &Env<'_>,
        f: impl FnOnce(&NodeRef, &mut Context) -> R,
    ) -> Result<R, DepthExceeded> {
        let Some(node) = self.resolve(env) else {
            return Err(DepthExceeded::Unresolved);
        };
        if !cx.enter_reference(env.config.max_reference_depth) {
            warn!(
                reference = %self.name,
                depth = cx.reference_depth(),
                "reference depth limit reached"
            );
            return Err(DepthExceeded::Limit);
        }
        let result = f(node, cx);
        cx.leave_reference();
        Ok(result)
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &mut Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        match self.enter(cx, env, |node, cx| node.validate(value, cx, env, out)) {
            Ok(()) => {}
            Err(DepthExceeded::Unresolved) => out.report(
                cx.path(),
                ErrorKind::UnresolvedReference,
                format!("unknown schema '{}'", self.name),
            ),
            Err(DepthExceeded::Limit) => out.report(
                cx.path(),
                ErrorKind::UnresolvedReference,
                format!(
                    "reference depth of {} exceeded at '{}'",
                    env.config.max_reference_depth, self.name
                ),
            ),
        }
    }

    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        let mut slot = Some(value);
        let normalized = self.enter(cx, env, |node, cx| {
            node.normalize(slot.take().unwrap_or_default(), cx, env)
        });
        normalized.unwrap_or_else(|_| slot.unwrap_or_default())
    }

    pub(crate) fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        self.enter(cx, env, |node, cx| {
            cx.begin_default(&self.name);
            let value = node.default_value(cx, env);
            cx.end_default();
            value
        })
        .unwrap_or(Value::Null)
    }

    pub(crate) fn children(&self, cx: &Context, env: &Env<'_>) -> Vec<(String, NodeRef)> {
        self.resolve(env)
            .map(|node| node.children(cx, env))
            .unwrap_or_default()
    }
}

enum DepthExceeded {
    Unresolved,
    Limit,
}
