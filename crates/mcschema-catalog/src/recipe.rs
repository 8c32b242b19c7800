//! Recipe schemas
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::enums::enumeration;
use mcschema_core::node::{
    choice, integer, list, map, number, object, reference, resource, string, with_default,
    FieldSet, NodeRef,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector, Value, ValueKind};
use serde_json::json;

/// Fields shared by the furnace-style recipes
fn cooking(cookingtime: i64) -> FieldSet {
    FieldSet::new()
        .optional("group", string())
        .required("ingredient", reference("recipe_ingredient"))
        .required("result", reference("single_item_stack"))
        .optional("experience", number())
        .optional("cookingtime", cooking_time(cookingtime))
}

fn cooking_time(ticks: i64) -> NodeRef {
    with_default(integer(), move || json!(ticks))
}

fn smithing() -> FieldSet {
    FieldSet::new()
        .required("template", reference("recipe_ingredient_object"))
        .required("base", reference("recipe_ingredient_object"))
        .required("addition", reference("recipe_ingredient_object"))
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    let recipe = object()
        .required("type", resource("recipe_serializer"))
        .optional("category", enumeration("recipe_category"))
        .switch(Selector::sibling("type"))
        .case(
            "minecraft:crafting_shaped",
            FieldSet::new()
                .optional("group", enumeration("recipe_group").open())
                .required("pattern", list(string()))
                .required("key", map(string(), reference("recipe_ingredient")))
                .required("result", reference("item_stack")),
        )
        .case(
            "minecraft:crafting_shapeless",
            FieldSet::new()
                .optional("group", string())
                .required("ingredients", list(reference("recipe_ingredient")))
                .required("result", reference("item_stack")),
        )
        .case("minecraft:smelting", cooking(200))
        .case("minecraft:blasting", cooking(100))
        .case("minecraft:smoking", cooking(100))
        .case("minecraft:campfire_cooking", cooking(100))
        .case(
            "minecraft:stonecutting",
            FieldSet::new()
                .optional("group", string())
                .required("ingredient", reference("recipe_ingredient"))
                .required("result", reference("item_stack")),
        )
        .case(
            "minecraft:smithing_transform",
            smithing().required("result", reference("item_stack")),
        )
        .case("minecraft:smithing_trim", smithing())
        .context("recipe")
        .disable_switch_context();
    schemas.register(
        "recipe",
        with_default(recipe, || json!({"type": "minecraft:crafting_shaped"})),
    )?;

    schemas.register(
        "recipe_ingredient",
        with_default(
            choice()
                .shape_with(ValueKind::Object, reference("recipe_ingredient_object"), |v| {
                    v.get(0).cloned().unwrap_or_else(|| json!({}))
                })
                .shape_with(
                    ValueKind::List,
                    list(reference("recipe_ingredient_object")),
                    |v| match v {
                        Value::Object(_) => json!([v]),
                        _ => json!([]),
                    },
                ),
            || json!({"item": "minecraft:stone"}),
        ),
    )?;

    schemas.register(
        "recipe_ingredient_object",
        with_default(
            object()
                .optional("item", resource("item"))
                .optional("tag", resource("$tag/item"))
                .context("recipe_ingredient"),
            || json!({"item": "minecraft:stone"}),
        ),
    )?;

    Ok(())
}
