// src/cli/mod.rs — CLI definition (clap derive)

pub mod progress;
pub mod render;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chiclens",
    about = "Outfit breakdown and flat-lay recreation from a fashion photo",
    version
)]
pub struct Cli {
    /// Photo of the outfit to analyze
    pub image: Option<PathBuf>,

    /// Where to save the flat-lay image (file or directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't save the generated image
    #[arg(long)]
    pub no_save: bool,

    /// Print the analysis as JSON instead of the styled report
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the brand names that get highlighted
    Brands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_with_flags() {
        let cli = Cli::try_parse_from(["chiclens", "look.jpg", "-o", "out/", "--json"]).unwrap();
        assert_eq!(cli.image, Some(PathBuf::from("look.jpg")));
        assert_eq!(cli.output, Some(PathBuf::from("out/")));
        assert!(cli.json);
        assert!(!cli.no_save);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_brands_subcommand() {
        let cli = Cli::try_parse_from(["chiclens", "brands"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Brands)));
    }
}
