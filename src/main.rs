use clap::Parser;
use photo_date_rename::{run, Args};

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let summary = run(args)?;
    if summary.has_failures() {
        anyhow::bail!("{} file(s) could not be renamed", summary.failed);
    }
    Ok(())
}
