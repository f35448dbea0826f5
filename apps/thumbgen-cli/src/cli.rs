use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thumbgen_types::{config::ThumbgenConfig, snapshot::ResizeFilter};

/// Embed JPEG preview thumbnails into G-code comment blocks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file; built-in defaults are used when absent
    #[arg(long, global = true, env = "THUMBGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a standalone thumbnail block to OUTPUT, replacing its contents
    Render {
        /// Source image
        input: PathBuf,
        /// Destination text file
        output: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Put a thumbnail block at the top of an existing G-code file
    Inject {
        /// Source image
        input: PathBuf,
        /// G-code file to update in place
        gcode: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Check the first thumbnail block found in FILE
    Verify { file: PathBuf },
}

#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Thumbnail width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Thumbnail height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Base64 characters per comment line
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Resize filter: nearest, triangle, catmull-rom, gaussian, lanczos3
    #[arg(long)]
    pub filter: Option<ResizeFilter>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ThumbgenConfig) {
        if let Some(width) = self.width {
            config.thumbnail.width = width;
        }
        if let Some(height) = self.height {
            config.thumbnail.height = height;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.thumbnail.chunk_size = chunk_size;
        }
        if let Some(quality) = self.quality {
            config.encoder.quality = quality;
        }
        if let Some(filter) = self.filter {
            config.encoder.filter = filter;
        }
    }
}
