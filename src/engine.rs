use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::{
    metadata::MetadataSource,
    plan::{is_occupied, Claims, RenamePlan},
    prompt::Confirm,
    Args, Error,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub recursive: bool,
    pub force: bool,
    pub verbose: bool,
    pub dry_run: bool,
}

impl From<&Args> for Options {
    fn from(args: &Args) -> Self {
        Options {
            recursive: args.recursive,
            force: args.force,
            verbose: args.verbose,
            dry_run: args.dry_run,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCaptureMoment,
    AlreadyNamed,
    Declined,
    DryRun,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoCaptureMoment => "no date taken information available",
            SkipReason::AlreadyNamed => "already named after its date taken",
            SkipReason::Declined => "rename declined",
            SkipReason::DryRun => "dry run",
        };
        f.write_str(reason)
    }
}

/// What happened to one file.
#[derive(Debug)]
pub enum Outcome {
    Renamed { from: PathBuf, to: PathBuf },
    Skipped { path: PathBuf, reason: SkipReason },
    Failed { path: PathBuf, error: Error },
}

impl Outcome {
    fn skipped(path: &Path, reason: SkipReason) -> Self {
        Outcome::Skipped {
            path: path.to_path_buf(),
            reason,
        }
    }
}

/// Tally of a single run, with the outcome of every file in the order processed.
#[derive(Debug, Default)]
pub struct Summary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<Outcome>,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Renamed { .. } => self.renamed += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} renamed, {} skipped, {} failed",
            self.renamed, self.skipped, self.failed
        )
    }
}

/// Renames every file after its capture moment, one at a time and in order.
///
/// A file is never renamed over another one: names already on disk or already picked for an
/// earlier file get a numeric suffix. Unless `force` is set each rename is confirmed first.
/// Problems with one file are recorded in the summary and never stop the others.
pub fn process<M, C>(files: &[PathBuf], options: &Options, metadata: &M, confirm: &mut C) -> Summary
where
    M: MetadataSource + ?Sized,
    C: Confirm + ?Sized,
{
    let mut summary = Summary::default();
    let mut claims = Claims::default();

    for path in files {
        let outcome = decide(path, options, metadata, confirm, &mut claims);
        report(&outcome, options.verbose);
        summary.record(outcome);
    }

    if options.verbose {
        println!("{}", format!("{}", summary).blue());
    }
    summary
}

fn decide<M, C>(
    path: &Path,
    options: &Options,
    metadata: &M,
    confirm: &mut C,
    claims: &mut Claims,
) -> Outcome
where
    M: MetadataSource + ?Sized,
    C: Confirm + ?Sized,
{
    let moment = match metadata.capture_moment(path) {
        Some(m) => m,
        None => return Outcome::skipped(path, SkipReason::NoCaptureMoment),
    };
    if options.verbose {
        println!(
            "{}",
            format!("[{:?}] date taken {}", file_name(path), moment).blue()
        );
    }

    let plan = claims.plan(path, &moment);
    if plan.is_noop() {
        claims.claim(&plan.to);
        return Outcome::skipped(path, SkipReason::AlreadyNamed);
    }

    if options.dry_run {
        println!("[dryrun] {} -> {}", plan.from.display(), plan.to.display());
        claims.claim(&plan.to);
        return Outcome::skipped(path, SkipReason::DryRun);
    }

    if !options.force && !confirm.confirm(&plan) {
        return Outcome::skipped(path, SkipReason::Declined);
    }

    match rename(&plan) {
        Ok(()) => {
            claims.claim(&plan.to);
            Outcome::Renamed {
                from: plan.from,
                to: plan.to,
            }
        }
        Err(source) => Outcome::Failed {
            path: plan.from.clone(),
            error: Error::Rename {
                from: plan.from,
                to: plan.to,
                source,
            },
        },
    }
}

/// `fs::rename` replaces an existing target, so refuse if one appeared since planning.
fn rename(plan: &RenamePlan) -> io::Result<()> {
    if is_occupied(&plan.to) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target already exists",
        ));
    }
    fs::rename(&plan.from, &plan.to)
}

fn report(outcome: &Outcome, verbose: bool) {
    match outcome {
        Outcome::Failed { error, .. } => eprintln!("{}", format!("{}", error).red()),
        Outcome::Renamed { from, to } if verbose => println!(
            "{}",
            format!("[{:?}] renamed to {:?}", file_name(from), file_name(to)).green()
        ),
        Outcome::Skipped { path, reason } if verbose => println!(
            "{}",
            format!("[{:?}] skipped: {}", file_name(path), reason).yellow()
        ),
        _ => {}
    }
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
