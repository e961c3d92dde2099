//! Registry-driven generation.
//!
//! Walks a list of declarations and generates an implementation for every
//! one that carries an envelope config. Declarations without a config are
//! not generation targets. Configured declarations that are not class-like
//! are skipped with a diagnostic; they never abort the run.

use shapegen_types::Declaration;

use crate::error::CodegenError;
use crate::targets::dart::{DartCodegenOptions, GeneratedClass, generate_class};

/// Result of a registry run.
#[derive(Debug, Default)]
pub struct Generation {
    /// Generated classes, in registry order.
    pub classes: Vec<GeneratedClass>,
    /// Diagnostics for configured declarations that were skipped.
    pub skipped: Vec<CodegenError>,
}

/// Generate every configured class in `declarations`.
pub fn generate_declarations(
    declarations: &[Declaration],
    options: &DartCodegenOptions,
) -> Result<Generation, CodegenError> {
    let mut generation = Generation::default();

    for decl in declarations {
        let Some(config) = &decl.config else {
            tracing::trace!(name = %decl.name, "no generation config, ignoring");
            continue;
        };

        let Some(class) = decl.to_class() else {
            let err = CodegenError::UnsupportedTarget {
                name: decl.name.clone(),
                kind: decl.kind.as_str(),
            };
            tracing::warn!(name = %decl.name, kind = decl.kind.as_str(), "{err}");
            generation.skipped.push(err);
            continue;
        };

        generation
            .classes
            .push(generate_class(&class, config, options)?);
    }

    Ok(generation)
}
