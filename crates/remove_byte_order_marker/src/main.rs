use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::path::PathBuf;
use std::process::exit;

use remove_byte_order_marker::strip_files;

mod config;

use config::StripConfig;

/// Exit status when the run itself failed, as opposed to `1` for
/// "some file had a marker".
const EXIT_FAILURE: i32 = 2;

fn cli() -> Command {
    Command::new("remove_byte_order_marker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Removes byte-order markers from the start of the given files")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Files to process, relative to the repository root"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Repository root used to resolve relative paths [default: parent of the tool's directory]"),
        )
        .arg(
            Arg::new("git_root")
                .long("git-root")
                .help("Resolve relative paths against the git top-level of the current directory")
                .conflicts_with("root")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report files with a byte-order marker without modifying them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("legacy_utf32")
                .long("legacy-utf32")
                .help("Use the legacy marker table with the five-byte utf-32 variants")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("block_size")
                .long("block-size")
                .value_name("BYTES")
                .value_parser(value_parser!(u64).range(1..))
                .help("Buffer size used when rewriting a file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<i32> {
    let config = StripConfig::from_matches(matches)?;
    log::debug!("{:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = strip_files(&config.root.path, &config.files, &config.options, &mut out)?;

    log::debug!(
        "{} file(s) processed, {} with a byte-order marker",
        summary.processed,
        summary.marked.len()
    );
    Ok(summary.exit_code())
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit(EXIT_FAILURE);
        }
    }
}
