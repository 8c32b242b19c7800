//! Context-sensitive validation scenarios
//!
//! Covers switch routing on ancestor values, selector frames, list element
//! context, external validators and collections loaded from disk.

use mcschema_core::external::{Params, BLOCK_STATE_MAP, NBT};
use mcschema_core::node::{self, FieldSet, StringNode};
use mcschema_core::{
    CollectionRegistry, ErrorKind, SchemaRegistry, Selector, ValidationConfig, Validator,
    ValidatorCall,
};
use serde_json::json;
use std::io::Write;

fn block_state() -> SchemaRegistry {
    let mut schemas = SchemaRegistry::new();
    schemas
        .register(
            "block_state",
            node::object()
                .required("Name", node::resource("block"))
                .optional(
                    "Properties",
                    node::map(node::string(), node::string()).validation(ValidatorCall::new(
                        BLOCK_STATE_MAP,
                        Params::new().selector("id", Selector::parent("Name")),
                    )),
                ),
        )
        .unwrap();
    schemas
}

fn load_collections(yaml: &str) -> CollectionRegistry {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    serde_yaml::from_str(&text).unwrap()
}

const COLLECTIONS: &str = r#"
pools:
  block: ["minecraft:furnace", "minecraft:stone"]
  item: ["minecraft:stick"]
blocks:
  "minecraft:furnace":
    facing: ["north", "south", "east", "west"]
    lit: ["true", "false"]
"#;

#[cfg(test)]
mod collections_from_disk {
    use super::*;

    #[test]
    fn test_yaml_collections_drive_resource_checks() {
        let schemas = block_state();
        let collections = load_collections(COLLECTIONS);
        let validator = Validator::new(&schemas, &collections);

        assert!(validator
            .validate("block_state", &json!({"Name": "furnace", "Properties": {"lit": "true"}}))
            .is_ok());

        let errors = validator
            .validate("block_state", &json!({"Name": "minecraft:dirt"}))
            .unwrap_err();
        assert_eq!(errors.errors[0].kind, ErrorKind::UnknownEnumValue);
        assert_eq!(errors.errors[0].path, "Name");
    }

    #[test]
    fn test_block_state_properties_checked_against_sibling_name() {
        let schemas = block_state();
        let collections = load_collections(COLLECTIONS);
        let validator = Validator::new(&schemas, &collections);

        let errors = validator
            .validate(
                "block_state",
                &json!({"Name": "minecraft:furnace", "Properties": {"facing": "up", "waterlogged": "true"}}),
            )
            .unwrap_err();
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["Properties.facing", "Properties.waterlogged"]);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::ExternalValidatorFailure));

        // blocks without declared properties are not checked
        assert!(validator
            .validate("block_state", &json!({"Name": "stone", "Properties": {"any": "thing"}}))
            .is_ok());
    }
}

#[cfg(test)]
mod switch_routing {
    use super::*;

    fn rule_test() -> SchemaRegistry {
        let mut schemas = SchemaRegistry::new();
        schemas
            .register(
                "processor",
                node::object()
                    .required("processor_type", node::resource("worldgen/structure_processor"))
                    .switch(Selector::sibling("processor_type"))
                    .case(
                        "minecraft:rule",
                        FieldSet::new().required(
                            "rules",
                            node::list(
                                node::object()
                                    .required("output_state", node::reference("block_state"))
                                    .optional(
                                        "output_nbt",
                                        StringNode::external(ValidatorCall::named(NBT)),
                                    ),
                            ),
                        ),
                    )
                    .case(
                        "minecraft:gravity",
                        FieldSet::new()
                            .required("heightmap", node::literals(["WORLD_SURFACE", "OCEAN_FLOOR"]))
                            .required("offset", node::integer()),
                    ),
            )
            .unwrap();
        schemas
            .register("block_state", node::object().required("Name", node::resource("block")))
            .unwrap();
        schemas
    }

    #[test]
    fn test_case_fields_follow_selector() {
        let schemas = rule_test();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);

        assert!(validator
            .validate(
                "processor",
                &json!({"processor_type": "minecraft:gravity", "heightmap": "OCEAN_FLOOR", "offset": -2})
            )
            .is_ok());

        let errors = validator
            .validate("processor", &json!({"processor_type": "gravity", "offset": 1.5}))
            .unwrap_err();
        let found: Vec<_> = errors.iter().map(|e| (e.path.as_str(), e.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("heightmap", ErrorKind::MissingRequiredField),
                ("offset", ErrorKind::TypeMismatch),
            ]
        );
    }

    #[test]
    fn test_nested_errors_carry_full_path() {
        let schemas = rule_test();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);

        let errors = validator
            .validate(
                "processor",
                &json!({
                    "processor_type": "minecraft:rule",
                    "rules": [
                        {"output_state": {"Name": "minecraft:stone"}},
                        {"output_state": {}, "output_nbt": "Count:1b"}
                    ]
                }),
            )
            .unwrap_err();
        let found: Vec<_> = errors.iter().map(|e| (e.path.as_str(), e.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("rules[1].output_state.Name", ErrorKind::MissingRequiredField),
                ("rules[1].output_nbt", ErrorKind::ExternalValidatorFailure),
            ]
        );
    }

    #[test]
    fn test_unknown_case_skips_extraneous_check() {
        let schemas = rule_test();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);

        assert!(validator
            .validate("processor", &json!({"processor_type": "mymod:custom", "power": 3}))
            .is_ok());
    }

    #[test]
    fn test_permissive_config_accepts_extra_fields() {
        let schemas = rule_test();
        let collections = CollectionRegistry::new();
        let doc = json!({"processor_type": "minecraft:gravity", "heightmap": "WORLD_SURFACE", "offset": 0, "extra": 1});

        let strict = Validator::new(&schemas, &collections);
        assert_eq!(
            strict.validate("processor", &doc).unwrap_err().errors[0].kind,
            ErrorKind::ExtraneousField
        );

        let permissive = Validator::new(&schemas, &collections)
            .with_config(ValidationConfig::default().permissive());
        assert!(permissive.validate("processor", &doc).is_ok());
    }
}

#[cfg(test)]
mod selector_frames {
    use super::*;

    /// Loot-style entries: a condition inside a list reads the entry type
    /// through the selector frame pushed by the enclosing switch.
    fn entries() -> SchemaRegistry {
        let mut schemas = SchemaRegistry::new();
        let condition = node::object()
            .required("condition", node::literals(["survives_explosion", "match_tool"]))
            .switch(Selector::sibling("condition"))
            .case("match_tool", FieldSet::new().required("tool", node::resource("item")));
        schemas
            .register(
                "entry",
                node::object()
                    .required("type", node::literals(["minecraft:item", "minecraft:empty"]))
                    .optional("conditions", node::list(condition))
                    .switch(Selector::sibling("type"))
                    .case("minecraft:item", FieldSet::new().required("name", node::resource("item"))),
            )
            .unwrap();
        schemas
    }

    #[test]
    fn test_list_of_switched_objects() {
        let schemas = entries();
        let collections = CollectionRegistry::new().with_pool("item", ["minecraft:shears"]);
        let validator = Validator::new(&schemas, &collections);

        let errors = validator
            .validate(
                "entry",
                &json!({
                    "type": "minecraft:item",
                    "name": "shears",
                    "conditions": [
                        {"condition": "survives_explosion"},
                        {"condition": "match_tool", "tool": "minecraft:sword"}
                    ]
                }),
            )
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "conditions[1].tool");
    }

    #[test]
    fn test_children_reflect_selected_case() {
        let schemas = entries();
        let collections = CollectionRegistry::new();
        let validator = Validator::new(&schemas, &collections);

        let keys = |doc: serde_json::Value| -> Vec<String> {
            validator
                .children("entry", &doc)
                .unwrap()
                .into_iter()
                .map(|(key, _)| key)
                .collect()
        };
        assert_eq!(keys(json!({"type": "minecraft:item"})), vec!["type", "conditions", "name"]);
        assert_eq!(keys(json!({"type": "minecraft:empty"})), vec!["type", "conditions"]);
    }
}
