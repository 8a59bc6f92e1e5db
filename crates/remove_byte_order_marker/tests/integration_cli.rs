use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;
use std::process::Command as StdCommand;

/// Builds the binary invocation rooted at `root`.
fn strip_cmd(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("remove_byte_order_marker").expect("binary should build");
    cmd.env_remove("RUST_LOG")
        .arg("--root")
        .arg(root.path());
    cmd
}

#[test]
fn test_strips_utf8_marker_and_reports_it() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let file = root.child("hello.txt");
    file.write_binary(&[0xEF, 0xBB, 0xBF, 0x48, 0x65, 0x6C, 0x6C, 0x6F])?;
    let expected_path = fs::canonicalize(file.path())?;

    strip_cmd(&root)
        .arg("hello.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "{}: Has a utf-8 byte-order marker",
            expected_path.display()
        )));

    assert_eq!(fs::read(file.path())?, b"Hello");
    Ok(())
}

#[test]
fn test_empty_file_produces_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    root.child("empty.txt").touch()?;

    strip_cmd(&root)
        .arg("empty.txt")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    assert!(fs::read(root.child("empty.txt").path())?.is_empty());
    Ok(())
}

#[test]
fn test_only_marked_file_is_rewritten() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    root.child("src").create_dir_all()?;
    let marked = root.child("src/marked.cs");
    let plain = root.child("src/plain.cs");
    marked.write_binary(b"\xFF\xFEc\x00l\x00")?;
    plain.write_str("class Plain {}\n")?;

    strip_cmd(&root)
        .args(["src/marked.cs", "src/plain.cs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("marked.cs: Has a utf-16 byte-order marker"))
        .stdout(predicate::str::contains("plain.cs").not());

    assert_eq!(fs::read(marked.path())?, b"c\x00l\x00");
    assert_eq!(fs::read_to_string(plain.path())?, "class Plain {}\n");
    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let file = root.child("twice.txt");
    file.write_binary(b"\xEF\xBB\xBFtwice")?;

    strip_cmd(&root).arg("twice.txt").assert().code(1);
    strip_cmd(&root)
        .arg("twice.txt")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read(file.path())?, b"twice");
    Ok(())
}

#[test]
fn test_missing_file_fails_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let first = root.child("first.txt");
    first.write_binary(b"\xEF\xBB\xBFfirst")?;

    strip_cmd(&root)
        .args(["first.txt", "missing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("missing.txt")));

    // Files before the failure keep their changes.
    assert_eq!(fs::read(first.path())?, b"first");
    Ok(())
}

#[test]
fn test_check_mode_does_not_modify() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let file = root.child("check.txt");
    file.write_binary(b"\xEF\xBB\xBFcheck")?;

    strip_cmd(&root)
        .args(["--check", "check.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("check.txt: Has a utf-8 byte-order marker"));

    assert_eq!(fs::read(file.path())?, b"\xEF\xBB\xBFcheck");
    Ok(())
}

#[test]
fn test_legacy_table_flag() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let legacy = root.child("legacy.txt");
    let standard = root.child("standard.txt");
    legacy.write_binary(b"\x00\x00\xFF\xFE_data")?;
    standard.write_binary(b"\x00\x00\xFF\xFE_data")?;

    strip_cmd(&root)
        .arg("standard.txt")
        .assert()
        .code(0);
    assert_eq!(fs::read(standard.path())?, b"\x00\x00\xFF\xFE_data");

    strip_cmd(&root)
        .args(["--legacy-utf32", "legacy.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Has a utf-32 byte-order marker"));
    assert_eq!(fs::read(legacy.path())?, b"data");
    Ok(())
}

#[test]
fn test_small_block_size() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let file = root.child("blocks.txt");
    let content = "line of text\n".repeat(500);
    let mut marked = vec![0xEF, 0xBB, 0xBF];
    marked.extend_from_slice(content.as_bytes());
    file.write_binary(&marked)?;

    strip_cmd(&root)
        .args(["--block-size", "7", "blocks.txt"])
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(file.path())?, content);
    Ok(())
}

#[test]
fn test_default_root_is_parent_of_tool_directory() -> Result<(), Box<dyn std::error::Error>> {
    // Lay the tool out as a hook inside a repository: <repo>/tools/<binary>.
    let repo = TempDir::new()?;
    repo.child("tools").create_dir_all()?;
    let built = cargo_bin("remove_byte_order_marker");
    let installed = repo.child("tools").path().join(built.file_name().expect("binary name"));
    fs::copy(&built, &installed)?;
    let file = repo.child("a.txt");
    file.write_binary(&[0xEF, 0xBB, 0xBF, 0x48, 0x69])?;

    // Run from an unrelated git checkout; its top-level must not be used.
    let elsewhere = TempDir::new()?;
    let _ = StdCommand::new("git")
        .arg("init")
        .current_dir(elsewhere.path())
        .output();

    Command::new(&installed)
        .env_remove("RUST_LOG")
        .current_dir(elsewhere.path())
        .arg("a.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.txt: Has a utf-8 byte-order marker"));

    assert_eq!(fs::read(file.path())?, b"Hi");
    Ok(())
}

#[test]
fn test_git_root_flag_uses_current_checkout() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TempDir::new()?;
    let initialized = StdCommand::new("git")
        .arg("init")
        .current_dir(repo.path())
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);
    if !initialized {
        return Ok(());
    }
    repo.child("docs").create_dir_all()?;
    let file = repo.child("readme.txt");
    file.write_binary(b"\xFE\xFF\x00x")?;

    Command::cargo_bin("remove_byte_order_marker")?
        .env_remove("RUST_LOG")
        .current_dir(repo.child("docs").path())
        .args(["--git-root", "readme.txt"])
        .assert()
        .code(1);

    assert_eq!(fs::read(file.path())?, b"\x00x");
    Ok(())
}

#[test]
fn test_no_files_is_success() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;

    strip_cmd(&root)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
    Ok(())
}
