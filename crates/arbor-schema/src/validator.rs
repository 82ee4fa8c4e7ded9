//! Document validation against a JSON Schema.
//!
//! Wraps `jsonschema` and folds every outcome into [`ValidationOutcome`]
//! instead of an error, so callers decide how each case is presented.

use std::path::Path;

use arbor_core::decode;
use serde::Serialize;
use serde_json::Value;

/// Four-way result of validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    /// The document violates the schema. One message per violation.
    Invalid { errors: Vec<String> },
    /// The schema does not conform to its meta-schema.
    SchemaInvalid { message: String },
    /// The document or schema could not be read or parsed.
    Inaccessible { message: String },
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Legacy numeric result code: 0 valid, 1 invalid, 2 schema invalid,
    /// -999 inaccessible.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Valid => 0,
            Self::Invalid { .. } => 1,
            Self::SchemaInvalid { .. } => 2,
            Self::Inaccessible { .. } => -999,
        }
    }
}

/// Validate an in-memory document against an in-memory schema.
#[must_use]
pub fn validate(document: &Value, schema: &Value) -> ValidationOutcome {
    let validator = match jsonschema::validator_for(schema) {
        Ok(validator) => validator,
        Err(error) => {
            tracing::error!(%error, "schema does not conform to its meta-schema");
            return ValidationOutcome::SchemaInvalid {
                message: error.to_string(),
            };
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|error| {
            let location = error.instance_path.to_string();
            if location.is_empty() {
                error.to_string()
            } else {
                format!("{location}: {error}")
            }
        })
        .collect();

    if errors.is_empty() {
        tracing::info!("document is valid against the schema");
        ValidationOutcome::Valid
    } else {
        tracing::error!(count = errors.len(), "document is not valid against the schema");
        ValidationOutcome::Invalid { errors }
    }
}

/// Read both files and validate. Read and parse failures of either file are
/// reported as [`ValidationOutcome::Inaccessible`].
#[must_use]
pub fn validate_files(document_path: &Path, schema_path: &Path) -> ValidationOutcome {
    let loaded = decode(schema_path).and_then(|schema| Ok((decode(document_path)?, schema)));
    match loaded {
        Ok((document, schema)) => validate(&document, &schema),
        Err(error) => {
            tracing::error!(%error, "document or schema is not accessible");
            ValidationOutcome::Inaccessible {
                message: error.to_string(),
            }
        }
    }
}
