use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "saol-loader",
    version,
    about = "Bulk loader for SAOL inflection data into a local sqlite store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full load of all four word categories inside one transaction.
    Load(LoadArgs),
    /// Report row counts for an existing database.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    #[arg(long, default_value = "loader.json")]
    pub config_path: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "saol_data.sqlite")]
    pub db_path: PathBuf,
}
