use arbor_schema::{ValidationOutcome, validate_files};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidateResponse {
    document: String,
    schema: String,
    code: i32,
    #[serde(flatten)]
    outcome: ValidationOutcome,
}

/// Handle `arbor validate`. Anything but a valid document exits non-zero.
pub fn handle(args: &ValidateArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = ctx.schema_name(args.schema.as_deref());
    let schema_path = ctx.schema_store()?.schema_path(&name);
    let outcome = validate_files(&args.document, &schema_path);
    ctx.remember_document(&args.document);

    let code = outcome.code();
    let valid = outcome.is_valid();
    output(
        &ValidateResponse {
            document: args.document.display().to_string(),
            schema: name,
            code,
            outcome,
        },
        flags.format,
    )?;

    if !valid {
        anyhow::bail!("{} did not validate (code {code})", args.document.display());
    }
    Ok(())
}
