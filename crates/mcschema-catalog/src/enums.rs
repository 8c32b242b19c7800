//! Named literal sets
//!
//! String nodes declared as `enum: 'biome'` validate against a fixed set of
//! literals and never consult the collection registry.

use mcschema_core::node::StringNode;

pub const GAMEMODE: &[&str] = &["survival", "creative", "adventure", "spectator"];

pub const SLOT: &[&str] = &["mainhand", "offhand", "head", "chest", "legs", "feet"];

pub const DIMENSION: &[&str] = &["minecraft:overworld", "minecraft:the_nether", "minecraft:the_end"];

pub const HEIGHTMAP_TYPE: &[&str] = &[
    "MOTION_BLOCKING",
    "MOTION_BLOCKING_NO_LEAVES",
    "OCEAN_FLOOR",
    "OCEAN_FLOOR_WG",
    "WORLD_SURFACE",
    "WORLD_SURFACE_WG",
];

pub const STRUCTURE_FEATURE: &[&str] = &[
    "bastion_remnant",
    "buried_treasure",
    "desert_pyramid",
    "endcity",
    "fortress",
    "igloo",
    "jungle_pyramid",
    "mansion",
    "mineshaft",
    "monument",
    "nether_fossil",
    "ocean_ruin",
    "pillager_outpost",
    "ruined_portal",
    "shipwreck",
    "stronghold",
    "swamp_hut",
    "village",
];

pub const BIOME: &[&str] = &[
    "minecraft:badlands",
    "minecraft:bamboo_jungle",
    "minecraft:basalt_deltas",
    "minecraft:beach",
    "minecraft:birch_forest",
    "minecraft:cold_ocean",
    "minecraft:crimson_forest",
    "minecraft:dark_forest",
    "minecraft:deep_ocean",
    "minecraft:desert",
    "minecraft:end_barrens",
    "minecraft:end_highlands",
    "minecraft:end_midlands",
    "minecraft:flower_forest",
    "minecraft:forest",
    "minecraft:frozen_ocean",
    "minecraft:frozen_river",
    "minecraft:giant_tree_taiga",
    "minecraft:ice_spikes",
    "minecraft:jungle",
    "minecraft:lukewarm_ocean",
    "minecraft:mountains",
    "minecraft:mushroom_fields",
    "minecraft:nether_wastes",
    "minecraft:ocean",
    "minecraft:plains",
    "minecraft:river",
    "minecraft:savanna",
    "minecraft:small_end_islands",
    "minecraft:snowy_tundra",
    "minecraft:soul_sand_valley",
    "minecraft:sunflower_plains",
    "minecraft:swamp",
    "minecraft:taiga",
    "minecraft:the_end",
    "minecraft:the_void",
    "minecraft:warm_ocean",
    "minecraft:warped_forest",
    "minecraft:wooded_badlands_plateau",
];

pub const RECIPE_CATEGORY: &[&str] = &[
    "building",
    "redstone",
    "equipment",
    "misc",
    "food",
    "blocks",
];

pub const RECIPE_GROUP: &[&str] = &[
    "bed",
    "boat",
    "dyed_bed",
    "dyed_carpet",
    "planks",
    "stained_glass",
    "stained_glass_pane",
    "wooden_button",
    "wooden_door",
    "wooden_fence",
    "wooden_fence_gate",
    "wooden_pressure_plate",
    "wooden_slab",
    "wooden_stairs",
    "wooden_trapdoor",
    "wool",
];

/// Every named set, by name
pub const ALL: &[(&str, &[&str])] = &[
    ("gamemode", GAMEMODE),
    ("slot", SLOT),
    ("biome", BIOME),
    ("dimension", DIMENSION),
    ("structure_feature", STRUCTURE_FEATURE),
    ("heightmap_type", HEIGHTMAP_TYPE),
    ("recipe_category", RECIPE_CATEGORY),
    ("recipe_group", RECIPE_GROUP),
];

pub fn values(name: &str) -> Option<&'static [&'static str]> {
    ALL.iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, values)| *values)
}

/// String node accepting the literals of the named set
///
/// An unknown name yields an empty set, which registry verification rejects.
pub fn enumeration(name: &str) -> StringNode {
    StringNode::literals(Some(name), values(name).unwrap_or_default().iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcschema_core::node::StringKind;

    #[test]
    fn test_every_named_set_is_populated() {
        for (name, values) in ALL {
            assert!(!values.is_empty(), "{} is empty", name);
        }
    }

    #[test]
    fn test_unknown_name_yields_empty_enum() {
        match enumeration("colour").kind() {
            StringKind::Enum { name, values, .. } => {
                assert_eq!(name.as_deref(), Some("colour"));
                assert!(values.is_empty());
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(values("gamemode").map(<[&str]>::len), Some(4));
    }
}
