//! mcschema catalog - schemas for Minecraft data-pack JSON
//!
//! Every schema here is plain configuration built from the node constructors
//! of `mcschema-core`:
//! - **Common**: ranges, uniform ints, block and fluid states, item stacks,
//!   rule tests and structure processors
//! - **Predicates**: item, block, fluid, location, entity and damage
//!   predicates used by advancements and loot tables
//! - **Recipes**: crafting, cooking, stonecutting and smithing
//! - **Worldgen**: configured features and decorators, feature sizes, block
//!   state providers, block placers and template pools
//!
//! ## Quick Start
//!
//! ```rust
//! use mcschema_catalog::build_registry;
//! use mcschema_core::{CollectionRegistry, Validator};
//! use serde_json::json;
//!
//! let schemas = build_registry().unwrap();
//! let collections = CollectionRegistry::new().with_pool("item", ["minecraft:stick"]);
//! let validator = Validator::new(&schemas, &collections);
//!
//! assert!(validator
//!     .validate("item_stack", &json!({"item": "stick", "count": 4}))
//!     .is_ok());
//! ```
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

pub mod common;
pub mod enums;
pub mod predicates;
pub mod recipe;
pub mod worldgen;

pub use enums::enumeration;

use mcschema_core::{ExternalValidators, SchemaRegistry, SchemaResult};
use tracing::info;

/// Register every schema of the catalog and verify the result
///
/// Fails on the first configuration error: a duplicate name, an unresolved
/// reference, overlapping choice shapes, an unknown external validator or an
/// empty named enum.
pub fn build_registry() -> SchemaResult<SchemaRegistry> {
    let mut schemas = SchemaRegistry::new();
    common::register(&mut schemas)?;
    predicates::register(&mut schemas)?;
    recipe::register(&mut schemas)?;
    worldgen::register(&mut schemas)?;
    schemas.verify(&ExternalValidators::builtin())?;
    info!(schemas = schemas.len(), "catalog ready");
    Ok(schemas)
}
