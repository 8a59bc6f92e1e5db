// crates/get_repository_root/src/lib.rs

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Where a resolved root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Explicit,
    Git,
    InstallLocation,
}

/// The directory that relative input paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Resolves the repository root for the current process.
///
/// By default this is the directory one level above the one holding the
/// running executable. `explicit` (usually a `--root` argument) replaces it;
/// with `use_git` the Git top-level of the current directory is used instead.
pub fn get_repository_root(explicit: Option<&Path>, use_git: bool) -> Result<RepositoryRoot> {
    let current_dir = if use_git {
        Some(env::current_dir().context("Failed to get current directory")?)
    } else {
        None
    };
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    resolve_repository_root(explicit, current_dir.as_deref(), &exe)
}

/// Same as [`get_repository_root`] with every ambient input passed in.
///
/// `git_dir` is the directory to probe for a Git work tree, or `None` to
/// skip the probe. When given, not being inside a work tree is an error.
pub fn resolve_repository_root(
    explicit: Option<&Path>,
    git_dir: Option<&Path>,
    exe: &Path,
) -> Result<RepositoryRoot> {
    let root = if let Some(dir) = explicit {
        RepositoryRoot {
            path: canonical_dir(dir)?,
            source: RootSource::Explicit,
        }
    } else if let Some(dir) = git_dir {
        let top_level = get_git_root(dir)
            .ok_or_else(|| anyhow!("{} is not inside a git work tree", dir.display()))?;
        RepositoryRoot {
            path: top_level,
            source: RootSource::Git,
        }
    } else {
        RepositoryRoot {
            path: install_location_root(exe)?,
            source: RootSource::InstallLocation,
        }
    };

    log::debug!("Repository root: {} ({:?})", root.path.display(), root.source);
    Ok(root)
}

/// Returns the Git top-level directory containing `dir`, or `None` if `dir`
/// is not inside a work tree or `git` cannot be run.
pub fn get_git_root(dir: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let top_level = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if top_level.is_empty() {
                None
            } else {
                Some(PathBuf::from(top_level))
            }
        }
        Ok(_) => None,
        Err(err) => {
            log::debug!("Could not run git in {}: {}", dir.display(), err);
            None
        }
    }
}

/// The parent of the directory holding `exe`, after resolving symlinks.
///
/// A hook installed as `<repo>/tools/remove_byte_order_marker` yields `<repo>`.
pub fn install_location_root(exe: &Path) -> Result<PathBuf> {
    let exe = fs::canonicalize(exe)
        .with_context(|| format!("Failed to resolve executable path {}", exe.display()))?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Executable {} has no grandparent directory", exe.display()))
}

fn canonical_dir(dir: &Path) -> Result<PathBuf> {
    let path = fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve root directory {}", dir.display()))?;
    if !path.is_dir() {
        return Err(anyhow!("Root {} is not a directory", path.display()));
    }
    Ok(path)
}
