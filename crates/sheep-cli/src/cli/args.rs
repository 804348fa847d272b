use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sheep",
    version,
    about = "Inspect and update the SHEEP benchmark results store"
)]
pub struct Cli {
    /// Path to the results database (defaults to the SHEEP_HOME location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run an ad-hoc SQL query and print the result table
    Query(QueryArgs),
    /// Row counts for the three result tables
    Stats,
    /// Record a user-run custom circuit test
    Upload(UploadArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// SQL to execute, verbatim. Trusted-operator input only.
    pub sql: String,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UploadArgs {
    /// Path of the circuit file the test ran
    #[arg(long)]
    pub circuit_file: String,

    /// HE library the test ran against
    #[arg(long)]
    pub library: String,

    /// Input type, e.g. uint8_t
    #[arg(long)]
    pub input_type: String,

    #[arg(long, default_value_t = 0)]
    pub num_inputs: i64,

    /// setup,encryption,evaluation,decryption seconds
    #[arg(long)]
    pub timings: String,
}
