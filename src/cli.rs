use std::path::PathBuf;

use clap::Parser;

/// Rename photos after the date they were taken, read from their exif metadata.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// descend into directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// rename without asking for confirmation first
    #[arg(short, long)]
    pub force: bool,

    /// report what happens to every file
    #[arg(short, long)]
    pub verbose: bool,

    /// just show what renames would be made, do not actually make them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// files or directories to rename images in, defaults to the current directory
    pub files: Vec<PathBuf>,
}
