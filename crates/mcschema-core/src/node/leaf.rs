//! Boolean, number and string leaves

use crate::context::Context;
use crate::error::{ErrorKind, ValidationErrors};
use crate::external::ValidatorCall;
use crate::node::Env;
use crate::value::{is_integral, number_value, Value, ValueKind};
use tracing::trace;

const DEFAULT_NAMESPACE: &str = "minecraft:";

fn type_mismatch(cx: &Context, expected: &str, value: &Value, out: &mut ValidationErrors) {
    out.report(
        cx.path(),
        ErrorKind::TypeMismatch,
        format!("expected {}, found {}", expected, ValueKind::of(value)),
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanNode;

impl BooleanNode {
    pub(crate) fn validate(&self, value: &Value, cx: &Context, out: &mut ValidationErrors) {
        if !value.is_boolean() {
            type_mismatch(cx, "boolean", value, out);
        }
    }

    pub(crate) fn normalize(&self, value: Value) -> Value {
        if value.is_boolean() {
            value
        } else {
            self.default_value()
        }
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bool(false)
    }
}

/// Number leaf with optional integrality and inclusive bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberNode {
    pub integer: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub(crate) fn validate(&self, value: &Value, cx: &Context, out: &mut ValidationErrors) {
        let Value::Number(number) = value else {
            type_mismatch(cx, "number", value, out);
            return;
        };
        if self.integer && !is_integral(number) {
            out.report(
                cx.path(),
                ErrorKind::TypeMismatch,
                format!("expected integer, found {}", number),
            );
            return;
        }
        let n = number.as_f64().unwrap_or_default();
        if let Some(min) = self.min.filter(|min| n < *min) {
            out.report(
                cx.path(),
                ErrorKind::OutOfRange,
                format!("{} is below the minimum of {}", number, min),
            );
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            out.report(
                cx.path(),
                ErrorKind::OutOfRange,
                format!("{} is above the maximum of {}", number, max),
            );
        }
    }

    pub(crate) fn normalize(&self, value: Value) -> Value {
        if value.is_number() {
            value
        } else {
            self.default_value()
        }
    }

    /// Bounds a value can actually take; integer nodes round inward
    pub fn effective_bounds(&self) -> (Option<f64>, Option<f64>) {
        if self.integer {
            (self.min.map(f64::ceil), self.max.map(f64::floor))
        } else {
            (self.min, self.max)
        }
    }

    /// Whether any number satisfies the bounds
    pub fn is_satisfiable(&self) -> bool {
        match self.effective_bounds() {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    /// Zero, clamped into the declared bounds
    pub(crate) fn default_value(&self) -> Value {
        let (min, max) = self.effective_bounds();
        let mut n = 0.0_f64;
        if let Some(min) = min {
            n = n.max(min);
        }
        if let Some(max) = max {
            n = n.min(max);
        }
        number_value(n)
    }
}

/// What a string leaf accepts
#[derive(Debug, Clone)]
pub enum StringKind {
    /// Any string
    Any,
    /// An inline literal set; `additional` also accepts other strings
    Enum {
        name: Option<String>,
        values: Vec<String>,
        additional: bool,
    },
    /// An identifier from a collection pool
    Resource { pool: String, allow_tag: bool },
    /// A string checked by a named external validator
    External(ValidatorCall),
}

#[derive(Debug, Clone)]
pub struct StringNode {
    kind: StringKind,
}

impl StringNode {
    pub fn any() -> Self {
        Self {
            kind: StringKind::Any,
        }
    }

    /// Closed literal set, optionally named after the enum it came from
    pub fn literals<I, S>(name: Option<&str>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: StringKind::Enum {
                name: name.map(str::to_string),
                values: values.into_iter().map(Into::into).collect(),
                additional: false,
            },
        }
    }

    pub fn resource(pool: impl Into<String>) -> Self {
        Self {
            kind: StringKind::Resource {
                pool: pool.into(),
                allow_tag: false,
            },
        }
    }

    pub fn external(call: ValidatorCall) -> Self {
        Self {
            kind: StringKind::External(call),
        }
    }

    /// Resource: also accept `#tag` ids from `$tag/<pool>`.
    /// Enum: also accept strings outside the literal set.
    pub fn open(mut self) -> Self {
        match &mut self.kind {
            StringKind::Enum { additional, .. } => *additional = true,
            StringKind::Resource { allow_tag, .. } => *allow_tag = true,
            StringKind::Any | StringKind::External(_) => {}
        }
        self
    }

    pub fn kind(&self) -> &StringKind {
        &self.kind
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        cx: &Context,
        env: &Env<'_>,
        out: &mut ValidationErrors,
    ) {
        let Value::String(s) = value else {
            type_mismatch(cx, "string", value, out);
            return;
        };
        match &self.kind {
            StringKind::Any => {}
            StringKind::Enum {
                name,
                values,
                additional,
            } => {
                if !additional && !values.iter().any(|v| v == s) {
                    out.report(
                        cx.path(),
                        ErrorKind::UnknownEnumValue,
                        format!(
                            "'{}' is not a valid {} (expected one of: {})",
                            s,
                            name.as_deref().unwrap_or("value"),
                            values.join(", ")
                        ),
                    );
                }
            }
            StringKind::Resource { pool, allow_tag } => {
                validate_resource(s, pool, *allow_tag, cx, env, out)
            }
            StringKind::External(call) => env.validators.run(call, value, cx, env, out),
        }
    }

    pub(crate) fn normalize(&self, value: Value, env: &Env<'_>) -> Value {
        if value.is_string() {
            value
        } else {
            self.default_value(env)
        }
    }

    /// First literal, first pool entry, or the empty string
    pub(crate) fn default_value(&self, env: &Env<'_>) -> Value {
        let text = match &self.kind {
            StringKind::Enum { values, .. } => values.first().cloned(),
            StringKind::Resource { pool, .. } => env
                .collections
                .get(pool)
                .and_then(|ids| ids.first().cloned()),
            StringKind::Any | StringKind::External(_) => None,
        };
        Value::String(text.unwrap_or_default())
    }
}

/// Prefix an unqualified id with the default namespace
pub(crate) fn qualify(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{}{}", DEFAULT_NAMESPACE, id)
    }
}

fn validate_resource(
    id: &str,
    pool: &str,
    allow_tag: bool,
    cx: &Context,
    env: &Env<'_>,
    out: &mut ValidationErrors,
) {
    let (pool, id) = match id.strip_prefix('#') {
        Some(tag) if allow_tag => (format!("$tag/{}", pool.trim_start_matches('$')), tag),
        Some(_) => {
            out.report(
                cx.path(),
                ErrorKind::UnknownEnumValue,
                format!("tags are not allowed here, expected a {} id", pool),
            );
            return;
        }
        None => (pool.to_string(), id),
    };
    if !env.collections.knows(&pool) {
        trace!(pool = %pool, id = %id, "pool not loaded, accepting");
        return;
    }
    let qualified = qualify(id);
    if !env.collections.has(&pool, &qualified) {
        out.report(
            cx.path(),
            ErrorKind::UnknownEnumValue,
            format!("'{}' is not a known {}", qualified, pool),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionRegistry;
    use crate::config::ValidationConfig;
    use crate::external::ExternalValidators;
    use crate::registry::SchemaRegistry;
    use serde_json::json;

    fn check(
        node: &StringNode,
        value: Value,
        collections: &CollectionRegistry,
    ) -> ValidationErrors {
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
        node.validate(&value, &Context::root(value.clone()), &env, &mut out);
        out
    }

    #[test]
    fn test_number_bounds_and_integrality() {
        let node = NumberNode::new().integer().range(0.0, 15.0);
        let cx = Context::root(json!(null));
        let mut out = ValidationErrors::new();
        node.validate(&json!(3), &cx, &mut out);
        node.validate(&json!(3.0), &cx, &mut out);
        assert!(out.is_empty());
        node.validate(&json!(16), &cx, &mut out);
        node.validate(&json!(1.5), &cx, &mut out);
        node.validate(&json!("3"), &cx, &mut out);
        let kinds: Vec<_> = out.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::OutOfRange, ErrorKind::TypeMismatch, ErrorKind::TypeMismatch]
        );
    }

    #[test]
    fn test_number_default_is_clamped() {
        assert_eq!(NumberNode::new().default_value(), json!(0));
        assert_eq!(NumberNode::new().integer().min(1.0).default_value(), json!(1));
        assert_eq!(NumberNode::new().range(-10.0, -2.0).default_value(), json!(-2));
    }

    #[test]
    fn test_integer_default_rounds_bounds_inward() {
        let node = NumberNode::new().integer().range(0.5, 3.7);
        assert_eq!(node.default_value(), json!(1));
        assert_eq!(NumberNode::new().integer().range(-7.5, -2.5).default_value(), json!(-3));

        let cx = Context::root(json!(null));
        let mut out = ValidationErrors::new();
        node.validate(&node.default_value(), &cx, &mut out);
        assert!(out.is_empty());

        assert!(node.is_satisfiable());
        assert!(!NumberNode::new().integer().range(0.5, 0.7).is_satisfiable());
        assert!(NumberNode::new().range(0.5, 0.7).is_satisfiable());
    }

    #[test]
    fn test_empty_pool_is_not_loaded() {
        let collections = CollectionRegistry::new().with_pool("item", Vec::<String>::new());
        let node = StringNode::resource("item");
        let schemas = SchemaRegistry::new();
        let validators = ExternalValidators::builtin();
        let config = ValidationConfig::default();
        let env = Env {
            schemas: &schemas,
            collections: &collections,
            validators: &validators,
            config: &config,
        };
        let default = node.default_value(&env);
        assert_eq!(default, json!(""));
        assert!(check(&node, default, &collections).is_empty());
        assert!(check(&node, json!("minecraft:stick"), &collections).is_empty());
    }

    #[test]
    fn test_enum_literals() {
        let collections = CollectionRegistry::new();
        let node = StringNode::literals(Some("projection"), ["rigid", "terrain_matching"]);
        assert!(check(&node, json!("rigid"), &collections).is_empty());
        let errors = check(&node, json!("floating"), &collections);
        assert_eq!(errors.errors[0].kind, ErrorKind::UnknownEnumValue);

        let open = StringNode::literals(None, ["a"]).open();
        assert!(check(&open, json!("anything"), &collections).is_empty());
    }

    #[test]
    fn test_resource_membership() {
        let collections = CollectionRegistry::new()
            .with_pool("block", ["minecraft:stone"])
            .with_pool("$tag/block", ["minecraft:logs"]);
        let node = StringNode::resource("block");
        assert!(check(&node, json!("minecraft:stone"), &collections).is_empty());
        assert!(check(&node, json!("stone"), &collections).is_empty());
        assert_eq!(
            check(&node, json!("minecraft:stick"), &collections).errors[0].kind,
            ErrorKind::UnknownEnumValue
        );
        assert_eq!(check(&node, json!("#minecraft:logs"), &collections).len(), 1);

        let tagged = StringNode::resource("block").open();
        assert!(check(&tagged, json!("#minecraft:logs"), &collections).is_empty());
        assert_eq!(check(&tagged, json!("#minecraft:leaves"), &collections).len(), 1);
    }

    #[test]
    fn test_unloaded_pool_accepts_anything() {
        let collections = CollectionRegistry::new();
        let node = StringNode::resource("$structure");
        assert!(check(&node, json!("mymod:house"), &collections).is_empty());
    }
}
