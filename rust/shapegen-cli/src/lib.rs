#![deny(unsafe_code)]

//! Command-line driver for shapegen.
//!
//! Reads a declaration manifest (JSON), generates an implementation for
//! every declaration that carries an envelope config, and writes one
//! `.g.dart` file per class. Formatting the output is left to `dart format`.
//!
//! ```text
//! shapegen api.json --out-dir lib/generated --part-of
//! ```

pub mod error;
pub mod manifest;
pub mod output;

use std::collections::HashMap;

use shapegen_codegen::generate_declarations;
use shapegen_codegen::targets::dart::DartCodegenOptions;
use shapegen_types::Manifest;

pub use error::CliError;
pub use output::OutputFile;

/// Render every configured declaration in `manifest`.
///
/// Unsupported targets are logged and skipped; any other failure aborts,
/// including two classes whose output file names collide.
pub fn generate_files(
    manifest: &Manifest,
    options: &DartCodegenOptions,
    part_of: bool,
) -> Result<Vec<OutputFile>, CliError> {
    let generation = generate_declarations(&manifest.declarations, options)?;
    if !generation.skipped.is_empty() {
        tracing::info!(
            skipped = generation.skipped.len(),
            "some configured declarations were not generated"
        );
    }

    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut files = Vec::with_capacity(generation.classes.len());
    for class in &generation.classes {
        let file = output::render_file(class, part_of);
        if let Some(first) = owners.insert(file.file_name.clone(), &class.base) {
            return Err(CliError::FileNameCollision {
                file_name: file.file_name,
                first: first.to_string(),
                second: class.base.clone(),
            });
        }
        files.push(file);
    }
    Ok(files)
}
