use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "poker-league-standings backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rebuild every season table from the raw weekly logs
    Build {
        /// Folder holding the weekly "<mm.dd.yy> log.csv" sheets
        #[arg(short, long, default_value = "data_raw")]
        data_dir: PathBuf,
        /// Where the season document gets published
        #[arg(short, long, default_value = "data_processed/season.json")]
        out: PathBuf,
    },
    /// Serve the published season document over HTTP
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Season document to serve
        #[arg(short, long, default_value = "data_processed/season.json")]
        document: PathBuf,
    },
}
