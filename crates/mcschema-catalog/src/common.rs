//! Building blocks shared by several schema families

use crate::enums::enumeration;
use mcschema_core::external::{Params, BLOCK_STATE_MAP, NBT};
use mcschema_core::node::{
    choice, integer, list, map, number, object, reference, resource, string, ChoiceNode,
    FieldSet, NumberNode, StringNode,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector, ValidatorCall, Value, ValueKind};
use serde_json::json;

/// A number, or a `{min, max}` object with the same bounds
pub fn range() -> ChoiceNode {
    range_of(number())
}

/// [`range`] with explicit bounds on both forms
pub fn range_of(bounds: NumberNode) -> ChoiceNode {
    choice()
        .shape_with(ValueKind::Number, bounds, |v| {
            v.get("min")
                .or_else(|| v.get("max"))
                .filter(|n| n.is_number())
                .cloned()
                .unwrap_or_else(|| json!(0))
        })
        .shape_with(
            ValueKind::Object,
            object().optional("min", bounds).optional("max", bounds),
            |v| match v {
                Value::Number(_) => json!({"min": v, "max": v}),
                _ => json!({}),
            },
        )
}

/// An integer in `[min, max]`, or `{base, spread}` with `spread <= max_spread`
pub fn uniform_int(min: i64, max: i64, max_spread: i64) -> ChoiceNode {
    let base = integer().range(min as f64, max as f64);
    uniform_int_of(base, integer().range(0.0, max_spread as f64))
}

/// [`uniform_int`] without bounds
pub fn any_uniform_int() -> ChoiceNode {
    uniform_int_of(integer(), integer().min(0.0))
}

fn uniform_int_of(base: NumberNode, spread: NumberNode) -> ChoiceNode {
    choice()
        .shape_with(ValueKind::Number, base, |v| {
            v.get("base")
                .filter(|n| n.is_number())
                .cloned()
                .unwrap_or_else(|| json!(0))
        })
        .shape_with(
            ValueKind::Object,
            object().required("base", base).required("spread", spread),
            |v| match v {
                Value::Number(_) => json!({"base": v, "spread": 0}),
                _ => json!({}),
            },
        )
}

/// Template processors: a processor list id, an inline list object, or a bare list
pub fn processors() -> ChoiceNode {
    choice()
        .shape(ValueKind::String, resource("$worldgen/processor_list"))
        .shape(ValueKind::Object, reference("processor_list"))
        .shape(ValueKind::List, list(reference("processor")))
}

fn probability() -> NumberNode {
    number().range(0.0, 1.0)
}

fn nbt() -> StringNode {
    StringNode::external(ValidatorCall::named(NBT))
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    schemas.register(
        "block_state",
        object()
            .required("Name", resource("block"))
            .optional(
                "Properties",
                map(string(), string()).validation(ValidatorCall::new(
                    BLOCK_STATE_MAP,
                    Params::new().selector("id", Selector::parent("Name")),
                )),
            )
            .context("block_state"),
    )?;

    schemas.register(
        "fluid_state",
        object()
            .required("Name", resource("fluid"))
            .optional("Properties", map(string(), string()))
            .context("fluid_state"),
    )?;

    schemas.register("block_pos", list(integer()).length(3, 3))?;

    schemas.register(
        "item_stack",
        object()
            .required("item", resource("item"))
            .optional("count", integer().min(1.0))
            .context("item_stack"),
    )?;

    schemas.register(
        "single_item_stack",
        object()
            .required("item", resource("item"))
            .context("item_stack"),
    )?;

    schemas.register(
        "rule_test",
        object()
            .required("predicate_type", resource("worldgen/rule_test"))
            .switch(Selector::sibling("predicate_type"))
            .case("minecraft:always_true", FieldSet::new())
            .case(
                "minecraft:block_match",
                FieldSet::new().required("block", resource("block")),
            )
            .case(
                "minecraft:blockstate_match",
                FieldSet::new().required("block_state", reference("block_state")),
            )
            .case(
                "minecraft:random_block_match",
                FieldSet::new()
                    .required("block", resource("block"))
                    .required("probability", probability()),
            )
            .case(
                "minecraft:random_blockstate_match",
                FieldSet::new()
                    .required("block_state", reference("block_state"))
                    .required("probability", probability()),
            )
            .case(
                "minecraft:tag_match",
                FieldSet::new().required("tag", resource("$tag/block")),
            )
            .context("rule_test"),
    )?;

    schemas.register(
        "processor",
        object()
            .required("processor_type", resource("worldgen/structure_processor"))
            .switch(Selector::sibling("processor_type"))
            .case(
                "minecraft:rule",
                FieldSet::new().required(
                    "rules",
                    list(
                        object()
                            .required("input_predicate", reference("rule_test"))
                            .required("location_predicate", reference("rule_test"))
                            .required("output_state", reference("block_state"))
                            .optional("output_nbt", nbt())
                            .context("processor_rule"),
                    ),
                ),
            )
            .case(
                "minecraft:block_rot",
                FieldSet::new().required("integrity", probability()),
            )
            .case(
                "minecraft:block_age",
                FieldSet::new().required("mossiness", number()),
            )
            .case(
                "minecraft:block_ignore",
                FieldSet::new().required("blocks", list(reference("block_state"))),
            )
            .case(
                "minecraft:gravity",
                FieldSet::new()
                    .required("heightmap", enumeration("heightmap_type"))
                    .required("offset", integer()),
            )
            .case(
                "minecraft:protected_blocks",
                FieldSet::new().required("value", resource("block").open()),
            )
            .context("processor"),
    )?;

    schemas.register(
        "processor_list",
        object()
            .required("processors", list(reference("processor")))
            .context("processor_list"),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcschema_core::{CollectionRegistry, ErrorKind, Validator};

    fn schemas() -> SchemaRegistry {
        let mut schemas = SchemaRegistry::new();
        register(&mut schemas).unwrap();
        schemas.register("range", range()).unwrap();
        schemas.register("light", range_of(integer().range(0.0, 15.0))).unwrap();
        schemas.register("spread", uniform_int(0, 4, 4)).unwrap();
        schemas
    }

    #[test]
    fn test_range_accepts_both_forms() {
        let schemas = schemas();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);
        for doc in [json!(3), json!({"min": 1}), json!({"min": 1.5, "max": 2})] {
            assert!(validator.validate("range", &doc).is_ok(), "{}", doc);
        }
        let errors = validator.validate("light", &json!({"max": 16})).unwrap_err();
        assert_eq!(errors.errors[0].kind, ErrorKind::OutOfRange);
        assert_eq!(errors.errors[0].path, "max");
        assert!(validator.validate("range", &json!("3")).is_err());
    }

    #[test]
    fn test_uniform_int_bounds() {
        let schemas = schemas();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);
        assert!(validator.validate("spread", &json!(4)).is_ok());
        assert!(validator.validate("spread", &json!({"base": 2, "spread": 4})).is_ok());
        let errors = validator
            .validate("spread", &json!({"base": 2, "spread": 5}))
            .unwrap_err();
        assert_eq!(errors.errors[0].path, "spread");
        assert_eq!(validator.default_value("spread").unwrap(), json!(0));
    }

    #[test]
    fn test_block_pos_has_three_coordinates() {
        let schemas = schemas();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);
        assert!(validator.validate("block_pos", &json!([1, 64, -3])).is_ok());
        assert!(validator.validate("block_pos", &json!([1, 64])).is_err());
        assert_eq!(validator.default_value("block_pos").unwrap(), json!([0, 0, 0]));
    }

    #[test]
    fn test_rule_processor_reads_nested_rule_tests() {
        let schemas = schemas();
        let collections = CollectionRegistry::new()
            .with_pool("block", ["minecraft:stone", "minecraft:mossy_cobblestone"]);
        let validator = Validator::new(&schemas, &collections);
        let errors = validator
            .validate(
                "processor",
                &json!({
                    "processor_type": "minecraft:rule",
                    "rules": [{
                        "input_predicate": {"predicate_type": "minecraft:random_block_match", "block": "stone", "probability": 0.3},
                        "location_predicate": {"predicate_type": "minecraft:always_true"},
                        "output_state": {"Name": "minecraft:dirt"}
                    }]
                }),
            )
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "rules[0].output_state.Name");
    }
}
