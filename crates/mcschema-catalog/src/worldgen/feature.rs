//! Configured features and the providers they embed
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::common::{any_uniform_int, uniform_int};
use crate::enums::enumeration;
use mcschema_core::node::{
    boolean, choice, integer, list, number, object, reference, resource, with_default,
    ChoiceNode, FieldSet, NodeRef,
};
use mcschema_core::{SchemaRegistry, SchemaResult, Selector, ValueKind};
use serde_json::json;

fn random_patch() -> FieldSet {
    FieldSet::new()
        .required("can_replace", boolean())
        .required("project", boolean())
        .required("need_water", boolean())
        .required("xspread", integer())
        .required("yspread", integer())
        .required("zspread", integer())
        .required("tries", integer())
        .required("state_provider", reference("block_state_provider"))
        .required("block_placer", reference("block_placer"))
        .required("whitelist", list(reference("block_state")))
        .required("blacklist", list(reference("block_state")))
}

fn disk() -> FieldSet {
    FieldSet::new()
        .required("state", reference("block_state"))
        .required("radius", uniform_int(0, 4, 4))
        .required("half_height", integer().range(0.0, 4.0))
        .required("targets", list(reference("block_state")))
}

fn huge_mushroom() -> FieldSet {
    FieldSet::new()
        .required("cap_provider", reference("block_state_provider"))
        .required("stem_provider", reference("block_state_provider"))
        .optional("foliage_radius", integer())
}

fn ore() -> FieldSet {
    FieldSet::new()
        .required("state", reference("block_state"))
        .required("size", integer().range(0.0, 64.0))
        .required("target", reference("rule_test"))
}

fn single_state() -> FieldSet {
    FieldSet::new().required("state", reference("block_state"))
}

fn probability() -> FieldSet {
    FieldSet::new().required("probability", number().range(0.0, 1.0))
}

/// A configured feature id or an inline configured feature
fn feature() -> ChoiceNode {
    choice()
        .shape(ValueKind::String, resource("$worldgen/configured_feature"))
        .shape(ValueKind::Object, reference("configured_feature"))
        .context("feature")
}

fn tree() -> FieldSet {
    let height = || integer().range(0.0, 16.0);
    let foliage_placer = object()
        .required("type", resource("worldgen/foliage_placer_type"))
        .required("radius", uniform_int(0, 8, 8))
        .required("offset", uniform_int(0, 8, 8))
        .switch(Selector::sibling("type"))
        .case(
            "minecraft:blob_foliage_placer",
            FieldSet::new().required("height", height()),
        )
        .case(
            "minecraft:bush_foliage_placer",
            FieldSet::new().required("height", height()),
        )
        .case(
            "minecraft:fancy_foliage_placer",
            FieldSet::new().required("height", height()),
        )
        .case(
            "minecraft:jungle_foliage_placer",
            FieldSet::new().required("height", height()),
        )
        .case(
            "minecraft:mega_pine_foliage_placer",
            FieldSet::new().required("crown_height", uniform_int(0, 16, 8)),
        )
        .case(
            "minecraft:pine_foliage_placer",
            FieldSet::new().required("height", uniform_int(0, 16, 8)),
        )
        .case(
            "minecraft:spruce_foliage_placer",
            FieldSet::new().required("trunk_height", uniform_int(0, 16, 8)),
        )
        .context("foliage_placer")
        .disable_switch_context();

    let decorator = object()
        .required("type", resource("worldgen/tree_decorator_type"))
        .switch(Selector::sibling("type"))
        .case(
            "minecraft:alter_ground",
            FieldSet::new().required("provider", reference("block_state_provider")),
        )
        .case("minecraft:beehive", probability())
        .case("minecraft:cocoa", probability())
        .context("tree_decorator");

    FieldSet::new()
        .required("max_water_depth", integer())
        .required("ignore_vines", boolean())
        .required("heightmap", enumeration("heightmap_type"))
        .required("minimum_size", reference("feature_size"))
        .required("trunk_provider", reference("block_state_provider"))
        .required("leaves_provider", reference("block_state_provider"))
        .required(
            "trunk_placer",
            object()
                .required("type", resource("worldgen/trunk_placer_type"))
                .required("base_height", integer().range(0.0, 32.0))
                .required("height_rand_a", integer().range(0.0, 24.0))
                .required("height_rand_b", integer().range(0.0, 24.0))
                .context("trunk_placer"),
        )
        .required("foliage_placer", foliage_placer)
        .required("decorators", list(decorator))
}

fn configured_feature() -> NodeRef {
    let end_spike = object()
        .optional("centerX", integer())
        .optional("centerZ", integer())
        .optional("radius", integer())
        .optional("height", integer())
        .optional("guarded", boolean());

    let config = object()
        .switch(Selector::parent("type"))
        .case("minecraft:bamboo", probability())
        .case(
            "minecraft:basalt_columns",
            FieldSet::new()
                .required("reach", uniform_int(0, 2, 1))
                .required("height", uniform_int(1, 5, 5)),
        )
        .case(
            "minecraft:block_pile",
            FieldSet::new().required("state_provider", reference("block_state_provider")),
        )
        .case(
            "minecraft:decorated",
            FieldSet::new()
                .required("decorator", reference("configured_decorator"))
                .required("feature", feature()),
        )
        .case(
            "minecraft:delta_feature",
            FieldSet::new()
                .required("contents", reference("block_state"))
                .required("rim", reference("block_state"))
                .required("size", uniform_int(0, 8, 8))
                .required("rim_size", uniform_int(0, 8, 8)),
        )
        .case("minecraft:disk", disk())
        .case(
            "minecraft:emerald_ore",
            single_state().required("target", reference("block_state")),
        )
        .case(
            "minecraft:end_gateway",
            FieldSet::new()
                .required("exact", boolean())
                .optional("exit", reference("block_pos")),
        )
        .case(
            "minecraft:end_spike",
            FieldSet::new()
                .optional("crystal_invulnerable", boolean())
                .optional("crystal_beam_target", reference("block_pos"))
                .required("spikes", list(end_spike)),
        )
        .case(
            "minecraft:fill_layer",
            single_state().required("height", integer().range(0.0, 255.0)),
        )
        .case("minecraft:flower", random_patch())
        .case("minecraft:forest_rock", single_state())
        .case("minecraft:huge_brown_mushroom", huge_mushroom())
        .case(
            "minecraft:huge_fungus",
            FieldSet::new()
                .required("hat_state", reference("block_state"))
                .required("decor_state", reference("block_state"))
                .required("stem_state", reference("block_state"))
                .required("valid_base_block", reference("block_state"))
                .optional("planted", boolean()),
        )
        .case("minecraft:huge_red_mushroom", huge_mushroom())
        .case("minecraft:ice_patch", disk())
        .case("minecraft:iceberg", single_state())
        .case("minecraft:lake", single_state())
        .case(
            "minecraft:nether_forest_vegetation",
            FieldSet::new().required("state_provider", reference("block_state_provider")),
        )
        .case(
            "minecraft:netherrack_replace_blobs",
            single_state()
                .required("target", reference("block_state"))
                .required("radius", any_uniform_int()),
        )
        .case("minecraft:no_bonemeal_flower", random_patch())
        .case("minecraft:no_surface_ore", ore())
        .case("minecraft:ore", ore())
        .case("minecraft:random_patch", random_patch())
        .case(
            "minecraft:random_boolean_selector",
            FieldSet::new()
                .required("feature_false", feature())
                .required("feature_true", feature()),
        )
        .case(
            "minecraft:random_selector",
            FieldSet::new()
                .required(
                    "features",
                    list(
                        object()
                            .required("chance", number().range(0.0, 1.0))
                            .required("feature", feature()),
                    ),
                )
                .required("default", feature()),
        )
        .case(
            "minecraft:sea_pickle",
            FieldSet::new().required("count", uniform_int(-10, 128, 128)),
        )
        .case("minecraft:seagrass", probability())
        .case(
            "minecraft:simple_block",
            FieldSet::new()
                .required("to_place", reference("block_state"))
                .required("place_on", list(reference("block_state")))
                .required("place_in", list(reference("block_state")))
                .required("place_under", list(reference("block_state"))),
        )
        .case(
            "minecraft:simple_random_selector",
            FieldSet::new().required("features", list(feature())),
        )
        .case(
            "minecraft:spring_feature",
            FieldSet::new()
                .required("state", reference("fluid_state"))
                .required("rock_count", integer())
                .required("hole_count", integer())
                .required("requires_block_below", boolean())
                .required("valid_blocks", list(resource("block"))),
        )
        .case("minecraft:tree", tree())
        .context("feature");

    with_default(
        object()
            .required("type", resource("worldgen/feature"))
            .required("config", config)
            .context("feature"),
        || {
            json!({
                "type": "minecraft:decorated",
                "config": {
                    "decorator": {"type": "minecraft:count", "config": {"count": 4}},
                    "feature": {
                        "type": "minecraft:tree",
                        "config": {
                            "max_water_depth": 0,
                            "ignore_vines": true,
                            "minimum_size": {},
                            "trunk_placer": {"base_height": 5, "height_rand_a": 2, "height_rand_b": 0},
                            "foliage_placer": {"radius": 2, "offset": 0, "height": 3}
                        }
                    }
                }
            })
        },
    )
}

fn feature_size() -> NodeRef {
    let size = || integer().range(0.0, 16.0);
    with_default(
        object()
            .required("type", resource("worldgen/feature_size_type"))
            .optional("min_clipped_height", number().range(0.0, 80.0))
            .switch(Selector::sibling("type"))
            .case(
                "minecraft:two_layers_feature_size",
                FieldSet::new()
                    .optional("limit", integer().range(0.0, 81.0))
                    .optional("lower_size", size())
                    .optional("upper_size", size()),
            )
            .case(
                "minecraft:three_layers_feature_size",
                FieldSet::new()
                    .optional("limit", integer().range(0.0, 80.0))
                    .optional("upper_limit", integer().range(0.0, 80.0))
                    .optional("lower_size", size())
                    .optional("middle_size", size())
                    .optional("upper_size", size()),
            )
            .disable_switch_context(),
        || json!({"type": "minecraft:two_layers_feature_size"}),
    )
}

fn block_state_provider() -> NodeRef {
    let weighted_entry = with_default(
        object()
            .required("weight", integer().min(1.0))
            .required("data", reference("block_state")),
        || json!({"data": {}}),
    );
    with_default(
        object()
            .required("type", resource("worldgen/block_state_provider_type"))
            .switch(Selector::sibling("type"))
            .case("minecraft:rotated_block_provider", single_state())
            .case("minecraft:simple_state_provider", single_state())
            .case(
                "minecraft:weighted_state_provider",
                FieldSet::new().required("entries", list(weighted_entry)),
            )
            .context("block_state_provider"),
        || json!({"type": "minecraft:simple_state_provider"}),
    )
}

fn block_placer() -> NodeRef {
    with_default(
        object()
            .required("type", resource("worldgen/block_placer_type"))
            .switch(Selector::sibling("type"))
            .case(
                "minecraft:column_placer",
                FieldSet::new()
                    .required("min_size", integer())
                    .required("extra_size", integer()),
            )
            .context("block_placer"),
        || json!({"type": "minecraft:simple_block_placer"}),
    )
}

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    schemas.register("configured_feature", configured_feature())?;
    schemas.register("feature_size", feature_size())?;
    schemas.register("block_state_provider", block_state_provider())?;
    schemas.register("block_placer", block_placer())?;
    Ok(())
}
