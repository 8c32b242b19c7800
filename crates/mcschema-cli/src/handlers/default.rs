//! Default command handler

use super::utils::{catalog, load_collections, require_schema};
use crate::cli::DefaultArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use mcschema_core::Validator;
use tracing::instrument;

/// Handle the default command
#[instrument(skip(config, output), fields(schema = %args.schema))]
pub fn handle_default(args: DefaultArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schemas = catalog()?;
    require_schema(&schemas, &args.schema)?;
    let collections = load_collections(args.collections.as_deref(), config)?;

    let validator = Validator::new(&schemas, &collections).with_config(config.validation.clone());
    let default = validator.default_value(&args.schema)?;
    output.data(&default)
}
