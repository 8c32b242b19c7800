//! Configured decorators

use crate::common::uniform_int;
use crate::enums::enumeration;
use mcschema_core::node::{
    integer, literals, number, object, reference, resource, with_default, FieldSet,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector};
use serde_json::json;

fn count() -> FieldSet {
    FieldSet::new().required("count", uniform_int(-10, 128, 128))
}

fn chance() -> FieldSet {
    FieldSet::new().required("chance", integer())
}

fn range() -> FieldSet {
    FieldSet::new()
        .required("bottom_offset", integer())
        .required("top_offset", integer())
        .required("maximum", integer())
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    let config = object()
        .switch(Selector::parent("type"))
        .case(
            "minecraft:carving_mask",
            FieldSet::new()
                .required("step", literals(["air", "liquid"]))
                .required("probability", number().range(0.0, 1.0)),
        )
        .case("minecraft:chance", chance())
        .case("minecraft:count", count())
        .case(
            "minecraft:count_extra",
            FieldSet::new()
                .required("count", integer())
                .required("extra_chance", number().range(0.0, 1.0))
                .required("extra_count", integer()),
        )
        .case("minecraft:count_multilayer", count())
        .case(
            "minecraft:count_noise",
            FieldSet::new()
                .required("noise_level", number())
                .required("below_noise", integer())
                .required("above_noise", integer()),
        )
        .case(
            "minecraft:count_noise_biased",
            FieldSet::new()
                .required("noise_to_count_ratio", integer())
                .required("noise_factor", number())
                .optional("noise_offset", number()),
        )
        .case(
            "minecraft:decorated",
            FieldSet::new()
                .required("outer", reference("configured_decorator"))
                .required("inner", reference("configured_decorator")),
        )
        .case(
            "minecraft:depth_average",
            FieldSet::new()
                .required("baseline", integer())
                .required("spread", integer()),
        )
        .case("minecraft:fire", count())
        .case("minecraft:glowstone", count())
        .case(
            "minecraft:heightmap_spread_double",
            FieldSet::new().optional("heightmap", enumeration("heightmap_type")),
        )
        .case("minecraft:lava_lake", chance())
        .case("minecraft:range", range())
        .case("minecraft:range_biased", range())
        .case("minecraft:range_very_biased", range())
        .case("minecraft:water_lake", chance())
        .context("decorator");

    schemas.register(
        "configured_decorator",
        with_default(
            object()
                .required("type", resource("worldgen/decorator"))
                .required("config", config)
                .context("decorator"),
            || json!({"type": "minecraft:count", "config": {"count": 4}}),
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
        register(&mut schemas).unwrap();
        schemas
    }

    #[test]
    fn test_config_routes_on_parent_type() {
        let schemas = schemas();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);
        let doc = json!({
            "type": "minecraft:decorated",
            "config": {
                "outer": {"type": "minecraft:square", "config": {}},
                "inner": {"type": "minecraft:count", "config": {"count": {"base": 2, "spread": 300}}}
            }
        });
        let errors = validator.validate("configured_decorator", &doc).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "config.inner.config.count.spread");
        assert_eq!(errors.errors[0].kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn test_default_is_a_count_decorator() {
        let schemas = schemas();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);
        let default = validator.default_value("configured_decorator").unwrap();
        assert_eq!(default, json!({"type": "minecraft:count", "config": {"count": 4}}));
        assert!(validator.validate("configured_decorator", &default).is_ok());
    }
}
