//! Loading declaration manifests.

use std::path::Path;

use shapegen_types::Manifest;

use crate::error::CliError;

/// Parse a manifest from JSON text. `path` is only used in errors.
pub fn parse_manifest(json: &str, path: &Path) -> Result<Manifest, CliError> {
    facet_json::from_str::<Manifest>(json).map_err(|e| CliError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Manifest, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = parse_manifest(&json, path)?;
    tracing::debug!(
        path = %path.display(),
        declarations = manifest.declarations.len(),
        "loaded manifest"
    );
    Ok(manifest)
}
