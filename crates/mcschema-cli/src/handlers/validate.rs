//! Validate command handler

use super::utils::{catalog, load_collections, load_document, require_schema};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use mcschema_core::Validator;
use tracing::{info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(schema = %args.schema, file = %args.document.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.schema);
    let schemas = catalog()?;
    require_schema(&schemas, &args.schema)?;
    let document = load_document(&args.document)?;
    let collections = load_collections(args.collections.as_deref(), config)?;

    let mut validation = config.validation.clone();
    if args.fail_fast {
        validation = validation.with_fail_fast();
    }
    if let Some(max_errors) = args.max_errors {
        validation = validation.with_max_errors(max_errors);
    }

    output.info(&format!(
        "Validating {} as {}",
        args.document.display(),
        args.schema
    ))?;
    let validator = Validator::new(&schemas, &collections).with_config(validation);
    let errors = validator.collect(&args.schema, &document);

    if output.format() != OutputFormat::Human {
        output.validation_errors(&errors)?;
    } else if errors.is_empty() {
        output.success(&format!("✓ {} is a valid {}", args.document.display(), args.schema))?;
    } else {
        output.error(&format!("✗ {} is not a valid {}", args.document.display(), args.schema))?;
        output.validation_errors(&errors)?;
    }

    if args.normalize {
        let normalized = validator.normalize(&args.schema, document)?;
        output.section("Normalized")?;
        output.data(&normalized)?;
    }

    if errors.is_empty() {
        info!("Document is valid");
        Ok(())
    } else {
        warn!(errors = errors.len(), "Document is invalid");
        Err(Error::ValidationFailed {
            count: errors.len(),
        })
    }
}
