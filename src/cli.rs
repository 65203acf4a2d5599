use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfkeep")]
#[command(about = "Merge, rotate, and trim PDF files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge multiple PDF files into one
    Merge {
        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// PDF files to merge (in order, at least 2)
        files: Vec<PathBuf>,
    },

    /// Rotate pages in a PDF file
    Rotate {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Rotation angle (90, 180, or 270 degrees clockwise)
        #[arg(short, long, default_value_t = 90, allow_negative_numbers = true)]
        angle: i64,

        /// Pages to rotate (e.g., "1", "1-3", "1,3,5", or "all"). Default: all
        #[arg(short, long)]
        pages: Option<String>,
    },

    /// Keep only specific pages from a PDF, removing the rest
    Keep {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Pages to keep (e.g., "1", "1-3", "1,3,5"). Required
        #[arg(short, long)]
        pages: Option<String>,
    },
}
