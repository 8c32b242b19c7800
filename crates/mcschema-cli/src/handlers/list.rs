//! List command handler

use super::utils::catalog;
use crate::cli::{ListArgs, OutputFormat};
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the list command
pub fn handle_list(args: ListArgs, output: &mut OutputWriter) -> Result<()> {
    let schemas = catalog()?;
    let names: Vec<&str> = schemas
        .names()
        .filter(|name| args.filter.as_deref().map_or(true, |f| name.contains(f)))
        .collect();

    if output.format() == OutputFormat::Human {
        for name in &names {
            output.writeln(name)?;
        }
        Ok(())
    } else {
        output.data(&names)
    }
}
