use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::link_engine::{ConfigBuilder, LinkConfig};

/// Fixes bad episode names by creating symlinks
#[derive(Debug, Parser)]
#[command(name = "series-organizer")]
#[command(version)]
pub struct Cli {
    /// The source directory to scan for video files
    #[arg(short = 'i', long = "source", value_name = "dir")]
    pub source_dir: PathBuf,

    /// The regex pattern to match the episode number. Must capture the number
    /// as its only group
    #[arg(short = 'm', long = "match", value_name = "pattern")]
    pub pattern: String,

    /// File listing episode names, one `number:name` per line
    #[arg(short = 'e', long = "episodes", value_name = "file")]
    pub episodes_file: Option<PathBuf>,

    #[arg(short, long, value_name = "number")]
    pub season: u32,

    /// Series name
    #[arg(short, long, value_name = "name")]
    pub name: String,

    /// Destination directory (defaults to the source directory)
    #[arg(short = 'o', long = "dest", value_name = "dir")]
    pub dest_dir: Option<PathBuf>,

    /// Force overwrite of links. WARNING: data loss possible
    #[arg(short, long)]
    pub force: bool,

    /// Create `SeriesName/Season XX/` dirs in the output dir
    #[arg(short, long)]
    pub create_dirs: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<LinkConfig> {
        ConfigBuilder::new()
            .directory(self.source_dir)
            .dest(self.dest_dir)
            .pattern(self.pattern)
            .episodes_file(self.episodes_file)
            .series(self.name, self.season)
            .force(self.force)
            .create_dirs(self.create_dirs)
            .build()
    }
}
