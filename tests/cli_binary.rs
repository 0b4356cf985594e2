use assert_cmd::Command;
use predicates::prelude::*;

fn syncfilter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_syncfilter"))
}

#[test]
fn help_lists_usage() {
    syncfilter()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage: syncfilter [OPTIONS]"));
}

#[test]
fn version_is_printed() {
    syncfilter()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("syncfilter {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn listing_on_stdin_is_filtered() {
    let excludes = test_support::pattern_file("# nothing yet\n");
    syncfilter()
        .args(["--include", "*.rs", "--exclude-from"])
        .arg(excludes.path())
        .write_stdin("src/\nsrc/main.rs\t120\nsrc/notes.md\t80\nREADME\t10\n")
        .assert()
        .success()
        .stdout("src/\nsrc/main.rs\n");
}

#[test]
fn listing_from_file_with_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules = test_support::write_file(
        dir.path(),
        "rules.txt",
        "# build output\n- target/\n+ *.rs\n- *\n",
    );
    let listing = test_support::write_file(
        dir.path(),
        "listing.txt",
        "src/\nsrc/lib.rs\ntarget/\ntarget/debug/lib.rs\nCargo.toml\n",
    );

    syncfilter()
        .arg("--filter-from")
        .arg(&rules)
        .arg("--list")
        .arg(&listing)
        .assert()
        .success()
        .stdout("src/\nsrc/lib.rs\n");
}

#[test]
fn dump_filters_prints_compiled_rules() {
    syncfilter()
        .args(["--include", "/photos/*.jpg", "--dump-filters"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- start filters ---\n"))
        .stdout(predicate::str::contains("+ /photos/*.jpg\n- /**\n"))
        .stdout(predicate::str::contains(
            "--- Directory filter rules ---\n+ /photos/\n",
        ))
        .stdout(predicate::str::ends_with("--- end filters ---\n"));
}

#[test]
fn stats_are_written_to_stderr() {
    syncfilter()
        .args(["--info=stats", "--exclude", "*.tmp"])
        .write_stdin("a.txt\nb.tmp\n")
        .assert()
        .success()
        .stdout("a.txt\n")
        .stderr(predicate::str::contains(
            "INFO  : files: 1 included, 1 excluded; directories: 0 entered, 0 pruned",
        ));
}

#[test]
fn unknown_option_exits_with_syntax_code() {
    syncfilter()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("syncfilter error: "));
}

#[test]
fn invalid_glob_exits_with_syntax_code() {
    syncfilter()
        .args(["--exclude", "[abc"])
        .write_stdin("a\n")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'[abc'"));
}

#[test]
fn missing_pattern_file_exits_with_syntax_code() {
    let dir = tempfile::tempdir().unwrap();
    syncfilter()
        .arg("--include-from")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn missing_listing_exits_with_file_selection_code() {
    let dir = tempfile::tempdir().unwrap();
    syncfilter()
        .arg("--list")
        .arg(dir.path().join("listing.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::ends_with("(code 3)\n"));
}
