//! mcschema core - polymorphic schema composition and validation
//!
//! This crate provides the node model used to describe Minecraft data-pack
//! JSON files and the machinery to run those descriptions against documents:
//! - **Validation**: every problem in a document, with its path, in one pass
//! - **Default synthesis**: a minimal valid value for any schema, including
//!   recursive ones
//! - **Normalization**: repair of partial values, idempotent on valid input
//! - **Introspection**: the child nodes visible at a position, for editors
//!
//! ## Features
//!
//! - **Composable nodes**: objects with switch/case routing, lists, maps,
//!   type-dispatched choices, late-bound references and default overrides
//! - **Context-sensitive validation**: selectors read sibling and ancestor
//!   values, so the same node validates differently under different parents
//! - **Pluggable collections**: resource ids are checked against pools
//!   supplied by the caller
//! - **External validators**: named checks for block states, NBT and teams
//!
//! ## Quick Start
//!
//! ```rust
//! use mcschema_core::context::Selector;
//! use mcschema_core::node::{self, FieldSet};
//! use mcschema_core::{CollectionRegistry, SchemaRegistry, Validator};
//! use serde_json::json;
//!
//! let mut schemas = SchemaRegistry::new();
//! schemas
//!     .register(
//!         "predicate",
//!         node::object()
//!             .required("condition", node::resource("loot_condition_type"))
//!             .switch(Selector::sibling("condition"))
//!             .case(
//!                 "minecraft:random_chance",
//!                 FieldSet::new().required("chance", node::number().range(0.0, 1.0)),
//!             ),
//!     )
//!     .unwrap();
//! let collections = CollectionRegistry::new()
//!     .with_pool("loot_condition_type", ["minecraft:random_chance"]);
//!
//! let validator = Validator::new(&schemas, &collections);
//! let errors = validator
//!     .validate("predicate", &json!({"condition": "random_chance", "chance": 2}))
//!     .unwrap_err();
//! assert_eq!(errors.errors[0].path, "chance");
//! ```
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

pub mod collections;
pub mod config;
pub mod context;
pub mod error;
pub mod external;
pub mod node;
pub mod registry;
pub mod validator;
pub mod value;

// Re-export commonly used types for convenience
pub use collections::{BlockProperties, CollectionRegistry, Collections};
pub use config::ValidationConfig;
pub use context::{Context, Selector};
pub use error::{ErrorKind, SchemaError, SchemaResult, ValidationError, ValidationErrors};
pub use external::{ExternalValidator, ExternalValidators, Issue, Params, ValidatorCall};
pub use node::{Node, NodeRef};
pub use registry::SchemaRegistry;
pub use validator::Validator;
pub use value::{Value, ValueKind};
