use clap::Parser;
use dumpindex::output::View;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dumpindex")]
#[command(author, version, about = "Dump the contents of an FFMS2 index file")]
pub struct Cli {
    /// Index file to read (e.g. video.mkv.ffindex)
    pub file: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value_t = View::Json)]
    pub view: View,

    /// Track used by the keyframe, timestamp and timecode views
    #[arg(short, long)]
    pub track: Option<usize>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Also accept indexes written by FFMS2 2.22.0.0 and earlier
    #[arg(long)]
    pub legacy: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
