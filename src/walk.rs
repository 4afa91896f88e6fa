use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use walkdir::WalkDir;

use crate::Error;

/// Extensions of files that may carry a capture date, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "jpe", "tif", "tiff", "png", "webp", "heic", "heif", "avif", "dng", "cr2",
    "nef", "arw", "orf", "rw2",
];

/// Expands the given files and directories into an ordered list of image files.
///
/// With no arguments the current directory is used. Directories are only descended into
/// when `recursive` is set, otherwise just their direct children are considered. A file
/// reached more than once is only listed the first time.
pub fn collect_candidates(args: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, Error> {
    let default = [PathBuf::from(".")];
    let args = if args.is_empty() { &default[..] } else { args };

    if let Some(missing) = args.iter().find(|path| !path.exists()) {
        return Err(Error::MissingPath(missing.clone()));
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut push = |path: PathBuf| {
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            candidates.push(path);
        }
    };

    for arg in args {
        if arg.is_file() {
            if is_image_file(arg) {
                push(arg.clone());
            }
            continue;
        }

        let mut walker = WalkDir::new(arg).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    let warning = Error::Walk {
                        path: err.path().unwrap_or(arg.as_path()).to_path_buf(),
                        source: err,
                    };
                    eprintln!("{}", format!("{}", warning).yellow());
                    continue;
                }
            };
            if entry.file_type().is_file() && is_image_file(entry.path()) {
                push(entry.into_path());
            }
        }
    }

    Ok(candidates)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
