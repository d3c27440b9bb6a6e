//! Command-line arguments.
//!
//! With no subcommand the program starts an interactive session that reads
//! one command per line from stdin.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "divisa", version, about = "Convert pesos with mindicador.cl rates and chart the last ten days", long_about = None)]
pub struct Cli {
    /// Where to write the chart (.png or .svg); overrides DIVISA_CHART_PATH
    #[arg(long, global = true)]
    pub chart: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert once and exit
    Convert {
        /// Amount to convert
        value: String,
        /// Currency or indicator code, e.g. dolar, euro, uf
        divisa: String,
    },
    /// List the available currency codes
    List,
}
