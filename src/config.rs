/// Command line and configuration
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::assets::shrink::{ShrinkOptions, DEFAULT_WORKERS};
use crate::geometry::{AssetScale, SMALL_DIVISOR};

#[derive(Debug, Parser)]
#[command(
    name = "whiteboard-gallery",
    version,
    about = "Browse whiteboard photos by floor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub gallery: GalleryConfig,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Produce the small asset set used by the cards
    Shrink {
        #[arg(long, default_value = "public/images/whiteboards")]
        input: PathBuf,
        #[arg(long, default_value = "public/images/whiteboards_small")]
        output: PathBuf,
        #[arg(long, default_value_t = SMALL_DIVISOR)]
        divisor: u32,
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },
}

impl Command {
    pub fn shrink_options(&self) -> ShrinkOptions {
        match self {
            Command::Shrink {
                input,
                output,
                divisor,
                workers,
            } => ShrinkOptions {
                input: input.clone(),
                output: output.clone(),
                divisor: *divisor,
                workers: *workers,
            },
        }
    }
}

/// Which asset set the cards show
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CardAssets {
    Small,
    Full,
}

/// Where the gallery finds its files and how cards are drawn
#[derive(Debug, Clone, Args)]
pub struct GalleryConfig {
    /// Directory or http(s) URL holding the manifest and images
    #[arg(long, env = "WHITEBOARD_BASE", default_value = "public")]
    pub base: String,

    /// Manifest path relative to the base
    #[arg(long, default_value = "whiteboards.json")]
    pub manifest: String,

    /// Full-size images, relative to the base
    #[arg(long, default_value = "images/whiteboards")]
    pub full_dir: String,

    /// Pre-shrunk images, relative to the base
    #[arg(long, default_value = "images/whiteboards_small")]
    pub small_dir: String,

    #[arg(long, value_enum, default_value_t = CardAssets::Small)]
    pub cards: CardAssets,

    /// Factor the small images were shrunk by
    #[arg(long, default_value_t = SMALL_DIVISOR)]
    pub divisor: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base: "public".to_string(),
            manifest: "whiteboards.json".to_string(),
            full_dir: "images/whiteboards".to_string(),
            small_dir: "images/whiteboards_small".to_string(),
            cards: CardAssets::Small,
            divisor: SMALL_DIVISOR,
        }
    }
}

impl GalleryConfig {
    /// Coordinate scale of the asset set the cards display
    pub fn card_scale(&self) -> AssetScale {
        match self.cards {
            CardAssets::Full => AssetScale::Full,
            CardAssets::Small => AssetScale::Small {
                divisor: self.divisor,
            },
        }
    }

    /// Directory the cards load from
    pub fn card_dir(&self) -> &str {
        match self.cards {
            CardAssets::Full => &self.full_dir,
            CardAssets::Small => &self.small_dir,
        }
    }
}
