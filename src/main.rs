//! darkseed-tools - legacy Dark Seed asset converter
//!
//! Converts the game's two proprietary binary formats to editable files and
//! back: NSP sprite containers <-> per-slot raster images, and TOSTEXT
//! string tables <-> separator-delimited plain text.

mod binary_utils;
mod error;
mod formats;
mod graphics;
mod sprite_extractor;
mod text_extractor;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::formats::tostext::TextEncoding;

#[derive(Parser)]
#[command(name = "darkseed-tools")]
#[command(about = "Dark Seed sprite container and string table converter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with .NSP sprite containers
    Sprite {
        #[command(subcommand)]
        command: SpriteCommand,
    },

    /// Work with TOSTEXT string tables
    Text {
        #[command(subcommand)]
        command: TextCommand,
    },
}

#[derive(Subcommand)]
enum SpriteCommand {
    /// Convert an .NSP file to one image per sprite slot
    Convert {
        /// Path to the input file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// Directory where the images are stored
        #[arg(short = 'o', long = "out")]
        output: PathBuf,
    },

    /// Rebuild an .NSP file from images
    Rebuild {
        /// Path to the input files
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// Input filename prefix
        #[arg(short = 'p', long)]
        prefix: String,

        /// Path to the output file
        #[arg(short = 'o', long = "out")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum TextCommand {
    /// Extract strings from a table blob to a text file
    Extract {
        /// Path to the input file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// Path to the output file
        #[arg(short = 'o', long = "out")]
        output: PathBuf,

        /// Toggle multibyte character encoding/decoding
        #[arg(long)]
        mb: bool,
    },

    /// Rebuild a table blob from a text file
    Rebuild {
        /// Path to the input file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// Path to the output file
        #[arg(short = 'o', long = "out")]
        output: PathBuf,

        /// Toggle multibyte character encoding/decoding
        #[arg(long)]
        mb: bool,
    },
}

fn encoding(mb: bool) -> TextEncoding {
    if mb {
        TextEncoding::DualByte
    } else {
        TextEncoding::SingleByte
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sprite { command } => match command {
            SpriteCommand::Convert { input, output } => {
                tracing::info!("Processing {:?}...", input);
                sprite_extractor::convert(&input, &output)?;
            }
            SpriteCommand::Rebuild {
                input,
                prefix,
                output,
            } => {
                sprite_extractor::rebuild(&input, &prefix, &output)?;
            }
        },

        Commands::Text { command } => match command {
            TextCommand::Extract { input, output, mb } => {
                tracing::info!("Extracting {:?} to {:?}...", input, output);
                text_extractor::extract(&input, &output, encoding(mb))?;
            }
            TextCommand::Rebuild { input, output, mb } => {
                tracing::info!("Rebuilding {:?} to {:?}...", input, output);
                text_extractor::rebuild(&input, &output, encoding(mb))?;
            }
        },
    }

    Ok(())
}
