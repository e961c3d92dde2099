use std::fmt;
use std::io;
use std::path::PathBuf;

use shapegen_codegen::CodegenError;

/// Error type for the command-line driver.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },

    /// The manifest is not valid JSON for a declaration registry.
    Manifest { path: PathBuf, message: String },

    /// Generation failed for a declaration.
    Codegen(CodegenError),

    /// Two generated classes map to the same output file.
    FileNameCollision {
        file_name: String,
        first: String,
        second: String,
    },

    /// `--check` found files that differ from what would be generated.
    Stale { paths: Vec<PathBuf> },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            CliError::Manifest { path, message } => {
                write!(f, "invalid manifest {}: {message}", path.display())
            }
            CliError::Codegen(e) => write!(f, "code generation failed: {e}"),
            CliError::FileNameCollision {
                file_name,
                first,
                second,
            } => write!(
                f,
                "`{first}` and `{second}` would both be written to {file_name}"
            ),
            CliError::Stale { paths } => {
                write!(f, "{} generated file(s) out of date:", paths.len())?;
                for path in paths {
                    write!(f, "\n  {}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Codegen(e) => Some(e),
            CliError::Manifest { .. }
            | CliError::FileNameCollision { .. }
            | CliError::Stale { .. } => None,
        }
    }
}

impl From<CodegenError> for CliError {
    fn from(e: CodegenError) -> Self {
        CliError::Codegen(e)
    }
}
