#[macro_use]
extern crate lazy_static;

use colored::Colorize;

mod cli;
pub use cli::Args;
mod error;
pub use error::Error;

pub mod engine;
pub mod metadata;
pub mod plan;
pub mod prompt;
pub mod walk;

pub use engine::{process, Options, Outcome, SkipReason, Summary};
pub use metadata::{ExifReader, MetadataSource};
pub use plan::{CaptureMoment, RenamePlan};
pub use prompt::{Confirm, TerminalPrompt};

/// Finds the images named by `args` and renames each after the date it was taken.
///
/// Only a path that does not exist fails the whole run, and it does so before any file is
/// touched. Failures renaming individual files are reported in the returned summary.
pub fn run(args: Args) -> Result<Summary, Error> {
    let options = Options::from(&args);
    let files = walk::collect_candidates(&args.files, options.recursive)?;

    if options.verbose {
        println!("{}", format!("found {} image file(s)", files.len()).blue());
    }

    let mut prompt = TerminalPrompt::stdio();
    Ok(process(&files, &options, &ExifReader, &mut prompt))
}
