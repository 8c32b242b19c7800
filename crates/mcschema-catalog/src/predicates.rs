//! Predicate schemas used by advancements and loot tables

use crate::common::{range, range_of};
use crate::enums::enumeration;
use mcschema_core::external::{Params, BLOCK_STATE_MAP, NBT, TEAM};
use mcschema_core::node::{
    boolean, choice, integer, list, map, number, object, reference, resource, string, ChoiceNode,
    FieldSet, StringNode,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector, ValidatorCall, Value, ValueKind};
use serde_json::json;

/// A block/fluid state property value: exact string, number or boolean, or a `{min, max}` range
pub fn state_choice() -> ChoiceNode {
    choice()
        .shape_with(ValueKind::String, string(), |v| match v {
            Value::Bool(_) | Value::Number(_) => Value::String(v.to_string()),
            _ => json!(""),
        })
        .shape_with(ValueKind::Number, number(), |v| {
            v.as_str()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .map(Value::from)
                .unwrap_or_else(|| json!(0))
        })
        .shape_with(
            ValueKind::Object,
            object().optional("min", integer()).optional("max", integer()),
            |v| match v {
                Value::Number(_) => json!({"min": v, "max": v}),
                _ => json!({}),
            },
        )
        .shape_with(ValueKind::Boolean, boolean(), |v| {
            json!(v == &json!("true") || v == &json!(1))
        })
}

/// Fields of `location_predicate`, also embedded elsewhere
pub fn location_fields() -> FieldSet {
    FieldSet::new()
        .optional(
            "position",
            object()
                .optional("x", range())
                .optional("y", range())
                .optional("z", range()),
        )
        .optional("biome", enumeration("biome"))
        .optional("feature", enumeration("structure_feature"))
        .optional("dimension", enumeration("dimension"))
        .optional(
            "light",
            object().optional("light", range_of(integer().range(0.0, 15.0))),
        )
        .optional("block", reference("block_predicate"))
        .optional("fluid", reference("fluid_predicate"))
}

/// NBT string; the registry id is read from the enclosing object's `key`
fn nbt(category: &str, key: &str) -> StringNode {
    StringNode::external(ValidatorCall::new(
        NBT,
        Params::new()
            .value("category", category)
            .selector("id", Selector::parent(key)),
    ))
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    schemas.register(
        "item_predicate",
        object()
            .optional("item", resource("item"))
            .optional("tag", resource("$tag/item"))
            .optional("count", range())
            .optional("durability", range())
            .optional("potion", resource("potion"))
            .optional("nbt", nbt("minecraft:item", "item"))
            .optional("enchantments", list(reference("enchantment_predicate")))
            .context("item"),
    )?;

    schemas.register(
        "enchantment_predicate",
        object()
            .optional("enchantment", resource("enchantment"))
            .optional("levels", range())
            .context("enchantment"),
    )?;

    schemas.register(
        "block_predicate",
        object()
            .optional("block", resource("block"))
            .optional("tag", resource("$tag/block"))
            .optional("nbt", nbt("minecraft:block", "block"))
            .optional(
                "state",
                map(string(), state_choice()).validation(ValidatorCall::new(
                    BLOCK_STATE_MAP,
                    Params::new().selector("id", Selector::parent("block")),
                )),
            )
            .context("block"),
    )?;

    schemas.register(
        "fluid_predicate",
        object()
            .optional("fluid", resource("fluid"))
            .optional("tag", resource("$tag/fluid"))
            .optional("state", map(string(), state_choice()))
            .context("fluid"),
    )?;

    schemas.register(
        "location_predicate",
        object().fields(&location_fields()).context("location"),
    )?;

    let mut statistic = object()
        .required("type", resource("stat_type"))
        .required("stat", string())
        .required("value", range())
        .switch(Selector::sibling("type"));
    for (case, pool) in [
        ("minecraft:mined", "block"),
        ("minecraft:crafted", "item"),
        ("minecraft:used", "item"),
        ("minecraft:broken", "item"),
        ("minecraft:picked_up", "item"),
        ("minecraft:dropped", "item"),
        ("minecraft:killed", "entity_type"),
        ("minecraft:killed_by", "entity_type"),
        ("minecraft:custom", "custom_stat"),
    ] {
        statistic = statistic.case(case, FieldSet::new().required("stat", resource(pool)));
    }
    schemas.register("statistic_predicate", statistic)?;

    schemas.register(
        "player_predicate",
        object()
            .optional("gamemode", enumeration("gamemode"))
            .optional("level", range())
            .optional(
                "advancements",
                map(
                    resource("$advancement"),
                    choice()
                        .shape_with(ValueKind::Boolean, boolean(), |_| json!(true))
                        .shape(ValueKind::Object, map(string(), boolean())),
                ),
            )
            .optional("recipes", map(resource("$recipe"), boolean()))
            .optional("stats", list(reference("statistic_predicate")))
            .context("player"),
    )?;

    schemas.register(
        "status_effect_predicate",
        object()
            .optional("amplifier", range())
            .optional("duration", range())
            .optional("ambient", boolean())
            .optional("visible", boolean())
            .context("status_effect"),
    )?;

    schemas.register(
        "distance_predicate",
        object()
            .optional("x", range())
            .optional("y", range())
            .optional("z", range())
            .optional("absolute", range())
            .optional("horizontal", range())
            .context("distance"),
    )?;

    schemas.register(
        "entity_predicate",
        object()
            .optional("type", resource("entity_type").open())
            .optional("nbt", nbt("minecraft:entity", "type"))
            .optional("team", StringNode::external(ValidatorCall::named(TEAM)))
            .optional("location", reference("location_predicate"))
            .optional("distance", reference("distance_predicate"))
            .optional(
                "flags",
                object()
                    .optional("is_on_fire", boolean())
                    .optional("is_sneaking", boolean())
                    .optional("is_sprinting", boolean())
                    .optional("is_swimming", boolean())
                    .optional("is_baby", boolean()),
            )
            .optional(
                "equipment",
                map(enumeration("slot"), reference("item_predicate")),
            )
            .optional("player", reference("player_predicate"))
            .optional(
                "effects",
                map(resource("mob_effect"), reference("status_effect_predicate")),
            )
            .context("entity"),
    )?;

    schemas.register(
        "damage_source_predicate",
        object()
            .optional("is_explosion", boolean())
            .optional("is_fire", boolean())
            .optional("is_magic", boolean())
            .optional("is_projectile", boolean())
            .optional("is_lightning", boolean())
            .optional("bypasses_armor", boolean())
            .optional("bypasses_invulnerability", boolean())
            .optional("bypasses_magic", boolean())
            .optional("source_entity", reference("entity_predicate"))
            .optional("direct_entity", reference("entity_predicate"))
            .context("damage_source"),
    )?;

    schemas.register(
        "damage_predicate",
        object()
            .optional("dealt", range())
            .optional("taken", range())
            .optional("blocked", boolean())
            .optional("source_entity", reference("entity_predicate"))
            .optional("type", reference("damage_source_predicate"))
            .context("damage"),
    )?;

    Ok(())
}
