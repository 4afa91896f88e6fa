use std::{
    collections::HashSet,
    ffi::{OsStr, OsString},
    fmt, fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use regex::Regex;

/// Format of the file stem given to a renamed image.
pub const NAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// When a photo was taken, as recorded in its metadata. Exif carries no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureMoment(pub NaiveDateTime);

impl CaptureMoment {
    pub fn file_stem(&self) -> String {
        self.0.format(NAME_FORMAT).to_string()
    }
}

impl From<NaiveDateTime> for CaptureMoment {
    fn from(value: NaiveDateTime) -> Self {
        CaptureMoment(value)
    }
}

impl fmt::Display for CaptureMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenamePlan {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Returns true when `stem` is `base`, optionally followed by a `_N` disambiguation suffix.
pub fn is_named_for(stem: &str, base: &str) -> bool {
    lazy_static! {
        static ref DATED_NAME: Regex =
            Regex::new(r#"^(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})(?:_\d+)?$"#).unwrap();
    }
    match DATED_NAME.captures(stem) {
        Some(cap) => &cap[1] == base,
        None => false,
    }
}

fn target_name(base: &str, suffix: u32, extension: Option<&OsStr>) -> OsString {
    let mut name = if suffix == 0 {
        OsString::from(base)
    } else {
        OsString::from(format!("{}_{}", base, suffix))
    };
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Target paths already planned or renamed to during one run.
#[derive(Debug, Default)]
pub struct Claims {
    taken: HashSet<PathBuf>,
}

impl Claims {
    pub fn claim(&mut self, path: &Path) {
        self.taken.insert(normalize(path));
    }

    pub fn is_claimed(&self, path: &Path) -> bool {
        self.taken.contains(&normalize(path))
    }

    /// Works out where `path` should be renamed to for `moment`.
    ///
    /// The target lives in the same directory and keeps the original extension. A `_1`, `_2`, ...
    /// suffix is appended while the name is taken on disk by another file or claimed earlier in
    /// this run. Files already named after their moment get a no-op plan.
    pub fn plan(&self, path: &Path, moment: &CaptureMoment) -> RenamePlan {
        let base = moment.file_stem();
        let noop = || RenamePlan {
            from: path.to_path_buf(),
            to: path.to_path_buf(),
        };

        let already_named = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| is_named_for(stem, &base))
            .unwrap_or(false);
        if already_named {
            return noop();
        }

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let extension = path.extension();
        let mut suffix = 0;
        loop {
            let to = dir.join(target_name(&base, suffix, extension));
            if to == path || same_file(&to, path) {
                return noop();
            }
            if !self.is_claimed(&to) && !is_occupied(&to) {
                return RenamePlan {
                    from: path.to_path_buf(),
                    to,
                };
            }
            suffix += 1;
        }
    }
}

/// Resolves the parent directory so differently spelled paths to one file compare equal.
/// The file itself may not exist yet.
fn normalize(path: &Path) -> PathBuf {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (dir.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Whether a directory entry exists at `path`, including a symlink whose target is gone.
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
