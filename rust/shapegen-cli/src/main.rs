//! shapegen: generate Dart deserialization code from a declaration manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use facet::Facet;
use facet_args as args;
use shapegen_cli::{CliError, generate_files, manifest, output};
use shapegen_codegen::targets::dart::{ClassRelation, DartCodegenOptions};
use tracing_subscriber::EnvFilter;

/// Generate Dart implementations for configured classes
#[derive(Facet)]
struct Cli {
    /// Declaration manifest (JSON)
    #[facet(args::positional)]
    manifest: String,

    /// Directory generated files are written to (defaults to the manifest's directory)
    #[facet(args::named, default)]
    out_dir: Option<String>,

    /// Emit a `part of` directive pointing at the declaring library
    #[facet(args::named, default)]
    part_of: bool,

    /// Decode list elements with `fromJson` even for built-in scalars
    #[facet(args::named, default)]
    no_primitives: bool,

    /// Generate `implements` instead of `extends` (declarations with no concrete members)
    #[facet(args::named, default)]
    implements: bool,

    /// Prefix for generated class names (default `_$`)
    #[facet(args::named, default)]
    prefix: Option<String>,

    /// Check that generated files are up to date instead of writing them
    #[facet(args::named, default)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = args::from_std_args()?;

    let manifest_path = PathBuf::from(&cli.manifest);
    let out_dir = match &cli.out_dir {
        Some(dir) => PathBuf::from(dir),
        None => manifest_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default(),
    };

    let mut options = DartCodegenOptions {
        primitive_handling: !cli.no_primitives,
        relation: if cli.implements {
            ClassRelation::Implements
        } else {
            ClassRelation::Extends
        },
        ..Default::default()
    };
    if let Some(prefix) = cli.prefix {
        options.impl_prefix = prefix;
    }

    let manifest = manifest::load_manifest(&manifest_path)?;
    let files = generate_files(&manifest, &options, cli.part_of)?;

    if cli.check {
        let stale = output::stale_files(&out_dir, &files);
        if !stale.is_empty() {
            return Err(CliError::Stale { paths: stale }.into());
        }
        tracing::info!(files = files.len(), "generated files are up to date");
    } else {
        output::write_files(&out_dir, &files)?;
    }

    Ok(())
}
