// crates/remove_byte_order_marker/src/config.rs

use anyhow::Result;
use byte_order_marker::MarkerTable;
use clap::ArgMatches;
use get_repository_root::{get_repository_root, RepositoryRoot};
use remove_byte_order_marker::{StripOptions, DEFAULT_BLOCK_SIZE};
use std::path::PathBuf;

/// Runtime configuration composed from the command line.
#[derive(Clone, Debug)]
pub struct StripConfig {
    pub root: RepositoryRoot,
    pub files: Vec<PathBuf>,
    pub options: StripOptions,
}

impl StripConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let explicit_root = matches.get_one::<PathBuf>("root");
        let root = get_repository_root(
            explicit_root.map(PathBuf::as_path),
            matches.get_flag("git_root"),
        )?;

        let files: Vec<PathBuf> = matches
            .get_many::<PathBuf>("files")
            .unwrap_or_default()
            .cloned()
            .collect();

        let table = if matches.get_flag("legacy_utf32") {
            MarkerTable::legacy()
        } else {
            MarkerTable::standard()
        };

        let block_size = matches
            .get_one::<u64>("block_size")
            .map(|size| *size as usize)
            .unwrap_or(DEFAULT_BLOCK_SIZE);

        Ok(Self {
            root,
            files,
            options: StripOptions {
                table,
                block_size,
                check_only: matches.get_flag("check"),
            },
        })
    }
}
