//! Tree command handler

use super::utils::{catalog, require_schema};
use crate::cli::{OutputFormat, TreeArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde_json::{Map, Value};

/// Handle the tree command
pub fn handle_tree(args: TreeArgs, output: &mut OutputWriter) -> Result<()> {
    let schemas = catalog()?;
    require_schema(&schemas, &args.schema)?;

    let names = if args.reachable {
        schemas.reachable(&args.schema)
    } else {
        vec![args.schema.clone()]
    };

    let mut outlines = Map::new();
    for name in &names {
        let outline = schemas
            .outline(name)
            .ok_or_else(|| Error::UnknownSchema { name: name.clone() })?;
        outlines.insert(name.clone(), Value::String(outline));
    }

    if output.format() == OutputFormat::Human {
        for outline in outlines.values().filter_map(Value::as_str) {
            output.write(outline)?;
        }
        Ok(())
    } else {
        output.data(&outlines)
    }
}
