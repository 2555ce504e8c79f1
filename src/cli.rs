use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scaffold::config::TemplateType;

#[derive(Parser)]
#[command(
    name = "scaffold",
    about = "Generate source skeletons for component-based platform projects",
    version
)]
pub struct Cli {
    /// Template store to use instead of the built-in templates
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a skeleton from a template
    New(NewArgs),

    /// List the templates available for each type
    List {
        /// Only list templates of this type
        #[arg(value_enum)]
        kind: Option<TemplateType>,
    },

    /// Validate every bundle of the template store
    Check,
}

#[derive(Args)]
pub struct NewArgs {
    /// Kind of skeleton to generate
    #[arg(value_enum)]
    pub kind: TemplateType,

    /// Name of the generated item (app, class, component, ...)
    #[arg(short, long)]
    pub name: String,

    /// Output directory (default: current directory)
    #[arg(short = 'd', long)]
    pub outputdir: Option<String>,

    /// Template bundle to use (default depends on the type)
    #[arg(short, long)]
    pub template: Option<String>,

    /// API version written into generated metadata
    #[arg(long)]
    pub apiversion: Option<String>,

    /// Set additional answers (can be repeated: -s key=value)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,

    /// Show the files that would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
