//! xtask: Development tasks for shapegen
//!
//! Run with: `cargo xtask <command>`

use std::path::Path;
use std::process::ExitCode;

use facet::Facet;
use facet_args as args;
use shapegen_codegen::targets::dart::DartCodegenOptions;
use xshell::{Shell, cmd};

/// Development tasks for shapegen
#[derive(Facet)]
struct Cli {
    #[facet(args::subcommand)]
    command: Commands,
}

#[derive(Facet)]
#[repr(u8)]
enum Commands {
    /// Run all CI checks locally (test, clippy, fmt, doc, codegen check)
    Ci,
    /// Run all tests (workspace)
    Test,
    /// Run clippy on all code
    Clippy,
    /// Check formatting
    Fmt {
        /// Fix formatting issues instead of just checking
        #[facet(args::named, default)]
        fix: bool,
    },
    /// Build documentation with warnings as errors
    Doc,
    /// Regenerate the Dart demo in `demos/dart/`
    Codegen {
        /// Fail if the checked-in output is stale instead of rewriting it
        #[facet(args::named, default)]
        check: bool,
    },
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = args::from_std_args()?;
    let sh = Shell::new()?;

    // Workspace root is the parent of this crate's directory
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or("xtask must live inside the workspace")?
        .to_path_buf();
    sh.change_dir(&workspace_root);

    match cli.command {
        Commands::Test => {
            println!("\n=== Running workspace tests ===");

            // Try nextest first, fall back to cargo test
            if cmd!(sh, "cargo nextest --version").quiet().run().is_ok() {
                println!("Using cargo-nextest");
                cmd!(sh, "cargo nextest run --workspace").run()?;
                // nextest does not run doctests
                cmd!(sh, "cargo test --workspace --doc").run()?;
            } else {
                println!("cargo-nextest not found, using cargo test");
                cmd!(sh, "cargo test --workspace").run()?;
            }

            println!("\n=== All tests passed ===");
        }
        Commands::Clippy => {
            println!("=== Running clippy ===");
            cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
        }
        Commands::Fmt { fix } => {
            if fix {
                println!("=== Fixing formatting ===");
                cmd!(sh, "cargo fmt --all").run()?;
            } else {
                println!("=== Checking formatting ===");
                cmd!(sh, "cargo fmt --all -- --check").run()?;
            }
        }
        Commands::Doc => {
            println!("=== Building documentation with warnings as errors ===");
            cmd!(sh, "cargo doc --no-deps")
                .env("RUSTDOCFLAGS", "-D warnings")
                .run()?;
            println!("\n=== Documentation built successfully ===");
        }
        Commands::Codegen { check } => {
            codegen_demo(&workspace_root, check)?;
        }
        Commands::Ci => {
            println!("=== Running all CI checks ===\n");

            for step in ["test", "clippy", "fmt", "doc"] {
                println!("\n>>> cargo xtask {step}");
                cmd!(sh, "cargo xtask {step}").run()?;
            }

            println!("\n>>> cargo xtask codegen --check");
            codegen_demo(&workspace_root, true)?;

            println!("\n=== All CI checks passed ===");
        }
    }

    Ok(())
}

fn codegen_demo(workspace_root: &Path, check: bool) -> Result<(), Box<dyn std::error::Error>> {
    let demo_dir = workspace_root.join("demos").join("dart");
    let out_dir = demo_dir.join("lib");

    let manifest = shapegen_cli::manifest::load_manifest(&demo_dir.join("api.json"))?;
    let files = shapegen_cli::generate_files(&manifest, &DartCodegenOptions::default(), true)?;

    if check {
        let stale = shapegen_cli::output::stale_files(&out_dir, &files);
        if !stale.is_empty() {
            return Err(shapegen_cli::CliError::Stale { paths: stale }.into());
        }
        println!("Demo output is up to date");
    } else {
        for file in &files {
            let out_path = out_dir.join(&file.file_name);
            std::fs::write(&out_path, &file.contents)?;
            println!("Wrote {}", out_path.display());
        }
    }

    Ok(())
}
