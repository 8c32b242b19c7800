//! World generation schemas
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

pub mod decorator;
pub mod feature;
pub mod template_pool;

use mcschema_core::{SchemaRegistry, SchemaResult};

pub fn register(schemas: &mut SchemaRegistry) -> SchemaResult<()> {
    decorator::register(schemas)?;
    feature::register(schemas)?;
    template_pool::register(schemas)?;
    Ok(())
}
