//! Generated file layout.
//!
//! One file per generated class, named after the declared class in
//! snake_case with a `.g.dart` suffix, so `TaskApi` lands in
//! `task_api.g.dart` next to the `task_api.dart` library that declares it.

use std::path::{Path, PathBuf};

use heck::ToSnakeCase;
use shapegen_codegen::targets::dart::GeneratedClass;

use crate::error::CliError;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// GENERATED CODE - DO NOT MODIFY BY HAND";

/// A rendered output file, not yet written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// File name relative to the output directory.
    pub file_name: String,
    pub contents: String,
}

/// Declaring library for `class_name`: `TaskApi` -> `task_api.dart`.
pub fn library_file_name(class_name: &str) -> String {
    format!("{}.dart", class_name.to_snake_case())
}

/// Generated file for `class_name`: `TaskApi` -> `task_api.g.dart`.
pub fn generated_file_name(class_name: &str) -> String {
    format!("{}.g.dart", class_name.to_snake_case())
}

/// Render `class` as a complete file.
pub fn render_file(class: &GeneratedClass, part_of: bool) -> OutputFile {
    let mut contents = String::new();
    contents.push_str(GENERATED_HEADER);
    contents.push('\n');
    contents.push_str("// @generated by shapegen\n\n");
    if part_of {
        contents.push_str(&format!(
            "part of '{}';\n\n",
            library_file_name(&class.base)
        ));
    }
    contents.push_str(&class.source);

    OutputFile {
        file_name: generated_file_name(&class.base),
        contents,
    }
}

/// Write `files` into `out_dir`, creating it if needed.
pub fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for file in files {
        let path = out_dir.join(&file.file_name);
        std::fs::write(&path, &file.contents).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

/// Paths in `out_dir` whose contents differ from `files`. Missing files count
/// as stale.
pub fn stale_files(out_dir: &Path, files: &[OutputFile]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|file| out_dir.join(&file.file_name))
        .zip(files)
        .filter(|(path, file)| {
            !std::fs::read_to_string(path).is_ok_and(|on_disk| on_disk == file.contents)
        })
        .map(|(path, _)| path)
        .collect()
}
