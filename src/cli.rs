use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a festival export into English, Spanish and French
    Run {
        /// Input CSV with name, description, address and festival_id columns
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV (festival_id, name, description, address, lang)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pause before each row's translations, in milliseconds
        #[arg(short, long)]
        delay_ms: Option<u64>,

        /// Translation backend (google, ollama, passthrough)
        #[arg(short, long)]
        backend: Option<String>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Check that the translation backend is reachable
    Check {
        /// Translation backend (google, ollama, passthrough)
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// List target languages and their output codes
    Languages,

    /// Write the default configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "festlang.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
