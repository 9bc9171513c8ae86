//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use sigwire::LanguageTarget;

/// sigwire - SigV4 auth wiring for generated TypeScript service clients
#[derive(Parser)]
#[command(name = "sigwire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the auth plan for each service
    Plan(PlanArgs),

    /// Write auth sources for each service
    Generate(GenerateArgs),

    /// Explain why each rule fired or not for a service
    Explain(ExplainArgs),

    /// Check generated support files against the bundled templates
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Model and service selection shared by the planning commands.
#[derive(Args)]
pub struct ModelArgs {
    /// Smithy JSON AST model file or directory (repeatable)
    #[arg(short, long = "model", value_name = "PATH")]
    pub models: Vec<PathBuf>,

    /// Service to process, by shape id, name or SDK id (repeatable)
    #[arg(short, long = "service", value_name = "SERVICE")]
    pub services: Vec<String>,

    /// Runtime target (repeatable: shared, node, browser, react-native)
    #[arg(short, long = "target", value_name = "TARGET")]
    pub targets: Vec<LanguageTarget>,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Version range written for generated package dependencies
    #[arg(long)]
    pub sdk_version: Option<String>,
}

#[derive(Args)]
pub struct ExplainArgs {
    /// Smithy JSON AST model file or directory (repeatable)
    #[arg(short, long = "model", value_name = "PATH")]
    pub models: Vec<PathBuf>,

    /// Service to explain, by shape id, name or SDK id
    #[arg(short, long)]
    pub service: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Generated service directory
    pub dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
