// crates/remove_byte_order_marker/src/lib.rs

//! Removes byte-order markers from the start of files, rewriting each file
//! in place.

use anyhow::{anyhow, Context, Result};
use byte_order_marker::{Marker, MarkerTable, DETECTION_WINDOW};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

mod shift;

pub use shift::shift_left;

/// Block size used by the in-place shift unless configured otherwise.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Knobs for a strip run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOptions {
    /// Markers to look for, in priority order.
    pub table: MarkerTable,
    /// Buffer size for the in-place shift. Must be non-zero.
    pub block_size: usize,
    /// Only report marker-bearing files, never modify them.
    pub check_only: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            table: MarkerTable::standard(),
            block_size: DEFAULT_BLOCK_SIZE,
            check_only: false,
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripOutcome {
    /// No known marker at the start of the file.
    Unchanged,
    /// The marker was removed from the file.
    Stripped(&'static Marker),
    /// The marker was found but left in place (check mode).
    Detected(&'static Marker),
}

impl StripOutcome {
    pub fn marker(&self) -> Option<&'static Marker> {
        match *self {
            StripOutcome::Unchanged => None,
            StripOutcome::Stripped(marker) | StripOutcome::Detected(marker) => Some(marker),
        }
    }
}

/// Result of processing a list of files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StripSummary {
    /// Number of files inspected.
    pub processed: usize,
    /// Files that carried a marker, in input order.
    pub marked: Vec<(PathBuf, &'static Marker)>,
}

impl StripSummary {
    /// True when at least one file carried a marker.
    pub fn changed(&self) -> bool {
        !self.marked.is_empty()
    }

    /// `0` when no file had a marker, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.changed() {
            1
        } else {
            0
        }
    }
}

/// Resolves `path` against `root` and canonicalises it.
///
/// Absolute paths ignore `root`. Fails if the target does not exist.
pub fn resolve_target(root: &Path, path: &Path) -> Result<PathBuf> {
    let joined = root.join(path);
    fs::canonicalize(&joined).with_context(|| format!("Failed to resolve {}", joined.display()))
}

/// Detects a marker at the start of `path` and, unless `options.check_only`
/// is set, removes it in place.
///
/// The file handle is closed before returning on every path.
pub fn strip_file(path: &Path, options: &StripOptions) -> Result<StripOutcome> {
    if options.block_size == 0 {
        return Err(anyhow!("Block size must be greater than zero"));
    }

    let mut file = if options.check_only {
        File::open(path)
    } else {
        OpenOptions::new().read(true).write(true).open(path)
    }
    .with_context(|| format!("Failed to open {}", path.display()))?;

    let prefix = read_prefix(&mut file)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let Some(marker) = options.table.detect(&prefix) else {
        log::debug!("{}: no byte-order marker", path.display());
        return Ok(StripOutcome::Unchanged);
    };

    if options.check_only {
        log::info!("{}: found {}", path.display(), marker);
        return Ok(StripOutcome::Detected(marker));
    }

    let new_len = shift_left(&mut file, marker.strip_len() as u64, options.block_size)
        .with_context(|| format!("Failed to rewrite {}", path.display()))?;
    log::info!(
        "{}: removed {} ({} bytes left)",
        path.display(),
        marker,
        new_len
    );

    Ok(StripOutcome::Stripped(marker))
}

/// Processes `paths` one after another, each resolved against `root`.
///
/// Writes `<path>: Has a <family> byte-order marker` to `out` for every file
/// carrying a marker. The first failure aborts the run; files handled before
/// it keep their changes.
pub fn strip_files<P, W>(
    root: &Path,
    paths: &[P],
    options: &StripOptions,
    out: &mut W,
) -> Result<StripSummary>
where
    P: AsRef<Path>,
    W: Write,
{
    let mut summary = StripSummary::default();

    for path in paths {
        let target = resolve_target(root, path.as_ref())?;
        let outcome = strip_file(&target, options)?;
        summary.processed += 1;

        if let Some(marker) = outcome.marker() {
            writeln!(out, "{}: Has a {}", target.display(), marker)
                .context("Failed to write report")?;
            summary.marked.push((target, marker));
        }
    }

    out.flush().context("Failed to write report")?;
    Ok(summary)
}

/// Reads up to [`DETECTION_WINDOW`] bytes from the start of `file`.
fn read_prefix(file: &mut File) -> std::io::Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(DETECTION_WINDOW);
    Read::by_ref(file)
        .take(DETECTION_WINDOW as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix)
}
