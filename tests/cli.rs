use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A `src/main/java` tree with one class and one importer.
fn project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("src/main/java");
    write(&base, "a/b/Foo.java", "package a.b;\n\npublic class Foo {\n}\n");
    write(&base, "x/User.java", "package x;\n\nimport a.b.Foo;\n\nclass User {}\n");
    (dir, base)
}

fn classmv(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("classmv");
    cmd.env("HOME", home);
    cmd
}

#[test]
fn move_prints_progress_lines() {
    let (dir, base) = project();

    classmv(dir.path())
        .arg("move")
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/c/Bar.java"))
        .assert()
        .success()
        .stdout("moved a/b/Foo.java -> a/b/c/Bar.java\nupdated imports in x/User.java\n");

    assert!(base.join("a/b/c/Bar.java").exists());
    assert!(fs::read_to_string(base.join("x/User.java"))
        .unwrap()
        .contains("import a.b.c.Bar;"));
}

#[test]
fn verbose_names_the_classes() {
    let (dir, base) = project();

    classmv(dir.path())
        .args(["-v", "move"])
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/c/Bar.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "moved a/b/Foo.java -> a/b/c/Bar.java (a.b.Foo -> a.b.c.Bar)",
        ));
}

#[test]
fn dry_run_leaves_tree_unchanged() {
    let (dir, base) = project();

    classmv(dir.path())
        .args(["move", "--dry-run"])
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/c/Bar.java"))
        .assert()
        .success()
        .stdout("moved a/b/Foo.java -> a/b/c/Bar.java\nupdated imports in x/User.java\n");

    assert!(base.join("a/b/Foo.java").exists());
    assert!(!base.join("a/b/c").exists());
    assert_eq!(
        fs::read_to_string(base.join("x/User.java")).unwrap(),
        "package x;\n\nimport a.b.Foo;\n\nclass User {}\n"
    );
}

#[test]
fn existing_destination_exits_with_validation_code() {
    let (dir, base) = project();

    classmv(dir.path())
        .arg("move")
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("x/User.java"))
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: Destination already exists"));
}

#[test]
fn git_mechanism_is_rejected() {
    let (dir, base) = project();

    classmv(dir.path())
        .args(["move", "--git"])
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/c/Bar.java"))
        .assert()
        .code(2);

    assert!(base.join("a/b/Foo.java").exists());
}

#[test]
fn json_mode_prints_envelope() {
    let (dir, base) = project();

    let output = classmv(dir.path())
        .args(["--json", "move"])
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/c/Bar.java"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["command"], "move");
    assert_eq!(json["data"]["to"], "a.b.c.Bar");
    assert_eq!(json["data"]["updated_files"][0]["path"], "x/User.java");
}

#[test]
fn json_mode_reports_errors() {
    let (dir, base) = project();

    let output = classmv(dir.path())
        .args(["--json", "move"])
        .arg(base.join("a/b/Foo.java"))
        .arg(base.join("a/b/Foo.groovy"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "move.dialect_mismatch");
}

#[test]
fn malformed_source_exits_with_code_three() {
    let (dir, base) = project();
    write(&base, "m/Bad.java", "package m;\npackage n;\nclass Bad {}\n");

    classmv(dir.path())
        .arg("move")
        .arg(base.join("m/Bad.java"))
        .arg(base.join("m/Good.java"))
        .assert()
        .code(3);
}

#[test]
fn inspect_shows_both_identities() {
    let (dir, base) = project();
    write(&base, "p/Misplaced.java", "package q;\n\nclass Misplaced {}\n");

    classmv(dir.path())
        .arg("inspect")
        .arg(base.join("p/Misplaced.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("location:   p.Misplaced"))
        .stdout(predicate::str::contains("contents:   q.Misplaced"))
        .stdout(predicate::str::contains("consistent: no"));
}
