mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, run_gitter_command, stdout_of};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn help_lists_every_command(repository_dir: TempDir) {
    let output = stdout_of(&mut run_gitter_command(repository_dir.path(), &["help"]));

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("These are common Gitter commands:"));
    let names = lines
        .map(|line| line.split_whitespace().next().unwrap_or_default())
        .collect::<Vec<_>>();
    pretty_assertions::assert_eq!(
        names,
        vec!["init", "add", "status", "commit", "log", "diff", "help"]
    );
    assert!(output.contains("  commit     Record changes to the repository\n"));
}

#[rstest]
fn help_for_one_command_shows_its_options(repository_dir: TempDir) {
    run_gitter_command(repository_dir.path(), &["help", "commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("--all"));
}

#[rstest]
fn help_for_an_unknown_command(repository_dir: TempDir) {
    run_gitter_command(repository_dir.path(), &["help", "push"])
        .assert()
        .success()
        .stdout("Unknown command 'push'. Run 'gitter help' for a list of commands.\n");
}

#[rstest]
fn help_does_not_need_a_repository(repository_dir: TempDir) {
    run_gitter_command(repository_dir.path(), &["help"])
        .assert()
        .success();

    assert!(!repository_dir.path().join(".gitter").exists());
}

#[rstest]
fn unknown_subcommand_is_rejected(repository_dir: TempDir) {
    run_gitter_command(repository_dir.path(), &["push"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
