//! Default-override wrapper

use crate::context::Context;
use crate::node::{Env, NodeRef};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Produces the seed of a default value
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Wraps a node, changing only how its default is produced
///
/// The seed returned by the default function is passed through the wrapped
/// node's `normalize`, so a sparse seed such as `{"type": "minecraft:tree"}`
/// is completed into a value that validates.
#[derive(Clone)]
pub struct ModNode {
    inner: NodeRef,
    default: DefaultFn,
}

impl fmt::Debug for ModNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModNode").field("inner", &self.inner).finish_non_exhaustive()
    }
}

impl ModNode {
    pub fn new<F>(inner: impl Into<NodeRef>, default: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            inner: inner.into(),
            default: Arc::new(default),
        }
    }

    pub fn inner(&self) -> &NodeRef {
        &self.inner
    }

    /// The raw seed, before completion
    pub fn seed(&self) -> Value {
        (self.default)()
    }

    pub(crate) fn normalize(&self, value: Value, cx: &mut Context, env: &Env<'_>) -> Value {
        if value.is_null() {
            self.default_value(cx, env)
        } else {
            self.inner.normalize(value, cx, env)
        }
    }

    pub(crate) fn default_value(&self, cx: &mut Context, env: &Env<'_>) -> Value {
        self.inner.normalize(self.seed(), cx, env)
    }
}
