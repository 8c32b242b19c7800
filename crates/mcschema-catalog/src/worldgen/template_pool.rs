//! Jigsaw template pools

use crate::common::processors;
use mcschema_core::node::{
    integer, list, literals, object, reference, resource, string, with_default, FieldSet,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector, Value};
use serde_json::json;

fn single_element() -> Value {
    json!({
        "element_type": "minecraft:single_pool_element",
        "projection": "rigid",
        "processors": "minecraft:empty"
    })
}

fn structure_element() -> FieldSet {
    FieldSet::new()
        .required("location", resource("$structure"))
        .required("processors", processors())
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    schemas.register(
        "template_pool",
        with_default(
            object()
                .required("fallback", string())
                .required("elements", list(reference("template_weighted_element")))
                .context("template_pool"),
            || {
                json!({
                    "fallback": "minecraft:empty",
                    "elements": [{"weight": 1, "element": single_element()}]
                })
            },
        ),
    )?;

    schemas.register(
        "template_weighted_element",
        with_default(
            object()
                .required("weight", integer().min(1.0))
                .required("element", reference("template_element")),
            || json!({"weight": 1, "element": single_element()}),
        ),
    )?;

    schemas.register(
        "template_element",
        with_default(
            object()
                .required("element_type", resource("worldgen/structure_pool_element"))
                .required("projection", literals(["rigid", "terrain_matching"]))
                .switch(Selector::sibling("element_type"))
                .case(
                    "minecraft:feature_pool_element",
                    FieldSet::new().required("feature", resource("$worldgen/placed_feature")),
                )
                .case("minecraft:legacy_single_pool_element", structure_element())
                .case(
                    "minecraft:list_pool_element",
                    FieldSet::new().required("elements", list(reference("template_element"))),
                )
                .case("minecraft:single_pool_element", structure_element())
                .context("template_element")
                .disable_switch_context(),
            single_element,
        ),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcschema_core::{CollectionRegistry, ErrorKind, Validator};

    fn schemas() -> SchemaRegistry {
        let mut schemas = SchemaRegistry::new();
        crate::common::register(&mut schemas).unwrap();
        register(&mut schemas).unwrap();
        schemas
    }

    fn collections() -> CollectionRegistry {
        CollectionRegistry::new()
            .with_pool("$structure", ["minecraft:village/plains/houses/small_house_1"])
            .with_pool("$worldgen/processor_list", ["minecraft:empty", "minecraft:mossify_10_percent"])
    }

    #[test]
    fn test_default_pool_holds_one_single_element() {
        let schemas = schemas();
        let collections = collections();
        let validator = Validator::new(&schemas, &collections);
        let default = validator.default_value("template_pool").unwrap();
        assert_eq!(default["elements"][0]["weight"], json!(1));
        assert_eq!(
            default["elements"][0]["element"]["location"],
            json!("minecraft:village/plains/houses/small_house_1")
        );
        assert!(validator.validate("template_pool", &default).is_ok());
    }

    #[test]
    fn test_processors_take_every_form() {
        let schemas = schemas();
        let collections = collections();
        let validator = Validator::new(&schemas, &collections);
        let element = |processors: Value| {
            json!({
                "element_type": "minecraft:single_pool_element",
                "projection": "terrain_matching",
                "location": "village/plains/houses/small_house_1",
                "processors": processors
            })
        };
        for processors in [
            json!("mossify_10_percent"),
            json!({"processors": []}),
            json!([{"processor_type": "minecraft:block_rot", "integrity": 0.5}]),
        ] {
            assert!(
                validator.validate("template_element", &element(processors.clone())).is_ok(),
                "{}",
                processors
            );
        }
        let errors = validator
            .validate("template_element", &element(json!("minecraft:rotten")))
            .unwrap_err();
        assert_eq!(errors.errors[0].path, "processors");
        assert_eq!(errors.errors[0].kind, ErrorKind::UnknownEnumValue);
    }

    #[test]
    fn test_list_elements_recurse() {
        let schemas = schemas();
        let collections = collections();
        let validator = Validator::new(&schemas, &collections);
        let doc = json!({
            "fallback": "minecraft:empty",
            "elements": [{
                "weight": 2,
                "element": {
                    "element_type": "minecraft:list_pool_element",
                    "projection": "rigid",
                    "elements": [{"element_type": "minecraft:empty_pool_element", "projection": "flat"}]
                }
            }]
        });
        let errors = validator.validate("template_pool", &doc).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "elements[0].element.elements[0].projection");
    }
}
