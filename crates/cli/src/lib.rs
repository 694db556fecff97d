mod check;
mod classify;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "typescope",
    version,
    about = "Scope-aware type reference resolution for Java sources",
    long_about = "Typescope maps every type reference in parsed Java sources to its canonical, \
                  fully-qualified name. It powers editor diagnostics over a live workspace and \
                  batch classification of method return types for dataset generation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every method return type of a class hierarchy
    #[command(
        long_about = "Loads a flat class-hierarchy description, resolves each method's return type \
                            once and buckets it into the groups of the given configuration. \
                            Prints the JSON report unless --output is given."
    )]
    Classify {
        /// Hierarchy description (JSON)
        #[arg(value_name = "HIERARCHY")]
        hierarchy: PathBuf,
        /// Type group configuration (JSON)
        #[arg(long, value_name = "CONFIG")]
        groups: PathBuf,
        /// Write the report here instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Resolve files one after another
        #[arg(long)]
        sequential: bool,
    },
    /// Open parsed source files in a session and print their diagnostics
    Check {
        /// Parsed source files (JSON)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Also report types taken from unindexed imports
        #[arg(long)]
        dependencies: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = typescope_runtime::init_logging("cli", false);

    match cli.command {
        Commands::Classify {
            hierarchy,
            groups,
            output,
            sequential,
        } => classify::run(&hierarchy, &groups, output.as_deref(), !sequential),
        Commands::Check {
            files,
            dependencies,
        } => check::run(&files, dependencies),
    }
}
