use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use classmv::classname::CanonicalClass;
use classmv::defaults::Defaults;
use classmv::refactor::{move_class, MoveRequest};
use classmv::report::Reporter;
use classmv::ErrorCode;
use tempfile::TempDir;

const FOO: &str = "package a.b;\n\nimport x.Util;\n\n/** Does foo things. */\npublic final class Foo extends Base {\n    private int count;\n}\n";
const USER: &str = "package x;\n\nimport a.b.Foo;\nimport java.util.List;\n\npublic class User {\n    Foo foo;\n}\n";
const BROKEN: &str = "package x;\npackage y;\nimport a.b.Foo;\nclass Broken {}\n";
const WILD: &str = "package y;\n\nimport a.b.*;\n\nclass Wild {}\n";

struct Project {
    _dir: TempDir,
    base: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("src/main/java");
        let project = Self { _dir: dir, base };
        project.write("a/b/Foo.java", FOO);
        project.write("x/User.java", USER);
        project.write("x/Broken.java", BROKEN);
        project.write("y/Wild.java", WILD);
        project
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.base.join(rel)
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    fn request(&self, source: &str, destination: &str) -> MoveRequest {
        MoveRequest {
            source: self.path(source),
            destination: self.path(destination),
            ..MoveRequest::default()
        }
    }

    /// Content and mtime of every file under the base, sorted by path.
    fn snapshot(&self) -> Vec<(PathBuf, String, SystemTime)> {
        let mut files = Vec::new();
        collect(&self.base, &mut files);
        files.sort();
        files
            .into_iter()
            .map(|p| {
                let content = fs::read_to_string(&p).unwrap();
                let mtime = fs::metadata(&p).unwrap().modified().unwrap();
                (p, content, mtime)
            })
            .collect()
    }
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap().flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else {
            out.push(path);
        }
    }
}

#[test]
fn canonical_names_round_trip() {
    for name in ["a.b.Foo", "com.acme.util.Strings", "x.Y"] {
        assert_eq!(CanonicalClass::parse(name).unwrap().qualified_name(), name);
    }
}

#[test]
fn move_rewrites_package_and_declaration_only() {
    let project = Project::new();
    let mut reporter = Reporter::silent(false);

    let result = move_class(
        &project.request("a/b/Foo.java", "a/b/c/Bar.java"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(result.from.qualified_name(), "a.b.Foo");
    assert_eq!(result.to.qualified_name(), "a.b.c.Bar");
    assert!(result.applied);
    assert!(!project.path("a/b/Foo.java").exists());
    assert_eq!(
        project.read("a/b/c/Bar.java"),
        FOO.replace("package a.b;", "package a.b.c;")
            .replace("class Foo extends", "class Bar extends")
    );
}

#[test]
fn importers_are_rewritten() {
    let project = Project::new();
    let mut reporter = Reporter::silent(false);

    move_class(
        &project.request("a/b/Foo.java", "a/b/c/Bar.java"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(
        project.read("x/User.java"),
        USER.replace("import a.b.Foo;", "import a.b.c.Bar;")
    );
    assert_eq!(
        reporter.lines(),
        vec![
            "moved a/b/Foo.java -> a/b/c/Bar.java",
            "updated imports in x/User.java",
        ]
    );
}

#[test]
fn malformed_file_is_never_rewritten() {
    let project = Project::new();
    let mut reporter = Reporter::silent(true);

    move_class(
        &project.request("a/b/Foo.java", "a/b/c/Bar.java"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(project.read("x/Broken.java"), BROKEN);
    assert_eq!(reporter.warning_count(), 1);
}

#[test]
fn wildcard_importer_is_never_modified() {
    let project = Project::new();
    let before = fs::metadata(project.path("y/Wild.java")).unwrap().modified().unwrap();
    let mut reporter = Reporter::silent(false);

    move_class(
        &project.request("a/b/Foo.java", "a/b/c/Bar.java"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(project.read("y/Wild.java"), WILD);
    assert_eq!(
        fs::metadata(project.path("y/Wild.java")).unwrap().modified().unwrap(),
        before
    );
}

#[test]
fn preview_reports_the_same_and_changes_nothing() {
    let project = Project::new();
    let before = project.snapshot();

    let mut preview = Reporter::silent(true);
    let mut request = project.request("a/b/Foo.java", "a/b/c/Bar.java");
    request.preview = true;
    let planned = move_class(&request, &Defaults::default(), &mut preview).unwrap();

    assert!(!planned.applied);
    assert_eq!(project.snapshot(), before);
    assert!(!project.path("a/b/c").exists());

    let mut real = Reporter::silent(true);
    request.preview = false;
    move_class(&request, &Defaults::default(), &mut real).unwrap();

    assert_eq!(preview.lines(), real.lines());
    assert_eq!(planned.updated_files, vec![classmv::refactor::UpdatedFile {
        path: "x/User.java".to_string(),
        lines: 1,
    }]);
}

#[test]
fn existing_destination_fails_and_mutates_nothing() {
    let project = Project::new();
    project.write("a/b/c/Foo.java", "package a.b.c;\nclass Foo {}\n");
    let before = project.snapshot();
    let mut reporter = Reporter::silent(false);

    let err = move_class(
        &project.request("a/b/Foo.java", "a/b/c"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::MoveDestinationExists);
    assert_eq!(project.snapshot(), before);
    assert!(reporter.events().is_empty());
}

#[test]
fn dialect_mismatch_fails_before_touching_anything() {
    let project = Project::new();
    let before = project.snapshot();
    let mut reporter = Reporter::silent(false);

    let err = move_class(
        &project.request("a/b/Foo.java", "a/b/c/Bar.groovy"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::MoveDialectMismatch);
    assert_eq!(project.snapshot(), before);
}

#[test]
fn move_into_directory_keeps_file_name() {
    let project = Project::new();
    fs::create_dir_all(project.path("z")).unwrap();
    let mut reporter = Reporter::silent(false);

    let result = move_class(
        &project.request("a/b/Foo.java", "z"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(result.to.qualified_name(), "z.Foo");
    assert_eq!(result.to_path, "z/Foo.java");
    assert!(project.read("z/Foo.java").starts_with("package z;\n"));
    assert!(project.read("x/User.java").contains("import z.Foo;\n"));
}

#[test]
fn groovy_files_follow_the_same_rules() {
    let project = Project::new();
    project.write("g/Script.groovy", "package g\n\nclass Script {\n}\n");
    project.write("g/Caller.groovy", "package g\n\nimport g.Script\n\nclass Caller {}\n");
    let mut reporter = Reporter::silent(false);

    move_class(
        &project.request("g/Script.groovy", "g/h/Job.groovy"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(project.read("g/h/Job.groovy"), "package g.h\n\nclass Job {\n}\n");
    assert_eq!(
        project.read("g/Caller.groovy"),
        "package g\n\nimport g.h.Job\n\nclass Caller {}\n"
    );
}

#[test]
fn latin1_bytes_survive_the_move() {
    let project = Project::new();
    fs::create_dir_all(project.path("l")).unwrap();
    fs::create_dir_all(project.path("m")).unwrap();
    fs::write(project.path("l/Latin.java"), b"package l;\n\npublic class Latin { // \xdcber\n}\n")
        .unwrap();
    fs::write(project.path("m/Uses.java"), b"package m;\nimport l.Latin; // \xe9\nclass Uses {}\n")
        .unwrap();
    let mut reporter = Reporter::silent(true);

    move_class(
        &project.request("l/Latin.java", "l/n/Bar.java"),
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(
        fs::read(project.path("l/n/Bar.java")).unwrap(),
        b"package l.n;\n\npublic class Bar { // \xdcber\n}\n"
    );
    assert_eq!(
        fs::read(project.path("m/Uses.java")).unwrap(),
        b"package m;\nimport l.n.Bar; // \xe9\nclass Uses {}\n"
    );
    assert_eq!(reporter.warning_count(), 1);
}

#[test]
fn missing_base_is_reported() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("src/a/Foo.java");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, "package a;\nclass Foo {}\n").unwrap();
    let mut reporter = Reporter::silent(true);

    let err = move_class(
        &MoveRequest {
            source: source.clone(),
            destination: dir.path().join("src/a/Bar.java"),
            ..MoveRequest::default()
        },
        &Defaults::default(),
        &mut reporter,
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationMissingArgument);
    assert_eq!(reporter.warning_count(), 1);
    assert!(source.exists());
}
