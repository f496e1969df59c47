use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use taxonav_core::TaxonomyAxis;


#[derive(Debug, Parser)]
#[command(name = "taxonav")]
#[command(about = "Blog post taxonomy explorer", version)]
pub struct Cli {
    /// Blog workspace root.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report whether the root is an eligible blog workspace.
    Check,
    /// Scan posts and print their metadata records.
    Scan,
    /// List terms on one axis, in first-appearance order.
    Terms(AxisArgs),
    /// List the files carrying one term.
    Files(FilesArgs),
    /// Print the full two-level term -> files tree.
    Tree(AxisArgs),
}

#[derive(Debug, Args)]
pub struct AxisArgs {
    #[arg(value_enum)]
    pub axis: AxisArg,
}

#[derive(Debug, Args)]
pub struct FilesArgs {
    #[arg(value_enum)]
    pub axis: AxisArg,
    /// Exact term name (case-sensitive).
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    Category,
    Tag,
}

impl From<AxisArg> for TaxonomyAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Category => Self::Category,
            AxisArg::Tag => Self::Tag,
        }
    }
}
