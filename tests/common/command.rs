use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::collections::BTreeMap;
use std::path::Path;

pub const FIXED_DATE: &str = "2023-01-01 12:00:00";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitter_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_gitter_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    gitter_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// A fresh repository holding an unstaged `f.txt` with content `hello`
#[fixture]
pub fn hello_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitter_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));

    repository_dir
}

#[fixture]
pub fn file_a() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    for i in 0..1000000000 {
        println!("{}",  s);
    }

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    tx.join().unwrap();

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn file_b() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    if let Err(e) = tx.join() {
        eprintln!("Thread error: {}", e);
    }

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn diff_hunks_output() -> String {
    "@@ -1,9 +1,6 @@\n fn main() {\n     let s = String::new();\n     std::io::stdin().read_line(&mut s).unwrap();\n-    for i in 0..1000000000 {\n-        println!(\"{}\",  s);\n-    }\n \n     println!(\"Done\");\n \n@@ -13,7 +10,9 @@\n         }\n     });\n \n-    tx.join().unwrap();\n+    if let Err(e) = tx.join() {\n+        eprintln!(\"Thread error: {}\", e);\n+    }\n \n     println!(\"All threads completed\");\n }\n"
        .to_string()
}

pub fn run_gitter_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitter").expect("Failed to find gitter binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("GITTER_AUTHOR_NAME");
    cmd.env_remove("GITTER_AUTHOR_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitter_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_gitter_command(dir, &["commit", "-m", message]);
    cmd.env("GITTER_AUTHOR_DATE", FIXED_DATE);
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not valid UTF-8")
}

pub fn read_index(dir: &Path) -> BTreeMap<String, String> {
    let content = std::fs::read_to_string(dir.join(".gitter").join("index"))
        .expect("Failed to read index");
    serde_json::from_str(&content).expect("Index is not a JSON object")
}

pub fn read_commits(dir: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(dir.join(".gitter").join("commits"))
        .expect("Failed to read commit log");
    serde_json::from_str(&content).expect("Commit log is not a JSON array")
}
