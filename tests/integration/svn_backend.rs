//! Subversion-backed projects, exercised against a local `file://`
//! repository. Every test degrades to a skip when the svn tooling is not
//! installed on the machine running the suite.

use std::path::Path;
use std::process::Command;

use spm_cli::vcs::VcsKind;
use tempfile::TempDir;

use super::common::Sandbox;

fn svn_tooling_available() -> bool {
    VcsKind::Svn.client_available() && which::which("svnadmin").is_ok()
}

/// Run a command in `dir`, panicking on failure (fixture setup only).
fn run(dir: &Path, program: &str, args: &[&str]) {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|err| panic!("spawn {program}: {err}"));
    assert!(
        output.status.success(),
        "{program} {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A local svn repository seeded with the conventional layout, reachable
/// through a `file://` URL.
struct SvnFixture {
    _dir: TempDir,
    url: String,
}

impl SvnFixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("create svn fixture dir");
        let repo = dir.path().join("repo");
        run(dir.path(), "svnadmin", &["create", repo.to_str().unwrap()]);

        let layout = dir.path().join("layout");
        for (path, content) in [
            ("scripts/1.ash", "print('hello');\n"),
            ("data/1.txt", "some data\n"),
            ("unpermissible/1.txt", "must never be installed\n"),
        ] {
            let file = layout.join(path);
            std::fs::create_dir_all(file.parent().unwrap()).unwrap();
            std::fs::write(file, content).unwrap();
        }

        let url = format!("file://{}", repo.display());
        run(
            dir.path(),
            "svn",
            &[
                "import",
                layout.to_str().unwrap(),
                &url,
                "-m",
                "initial import",
                "--non-interactive",
            ],
        );
        Self { _dir: dir, url }
    }
}

#[tokio::test]
async fn svn_checkout_installs_permissible_files() {
    if !svn_tooling_available() {
        eprintln!("svn tooling not installed; skipping");
        return;
    }
    let fixture = SvnFixture::new();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let id = manager.checkout(&fixture.url, None, VcsKind::Svn).await.unwrap();

    assert!(sandbox.file("scripts/1.ash").exists());
    assert!(sandbox.file("data/1.txt").exists());
    assert!(!sandbox.file("unpermissible/1.txt").exists());

    let record = manager.registry().get(&id).unwrap();
    assert_eq!(record.vcs, VcsKind::Svn);
    // The working copy lives under the svn directory, apart from git ones.
    assert!(sandbox.file(&format!("svn/{id}")).is_dir());
}

#[tokio::test]
async fn svn_at_head_follows_the_repository() {
    if !svn_tooling_available() {
        eprintln!("svn tooling not installed; skipping");
        return;
    }
    let fixture = SvnFixture::new();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&fixture.url, None, VcsKind::Svn).await.unwrap();

    assert!(manager.at_head(&id).await.unwrap());

    // Commit straight to the repository and check the copy falls behind.
    let workdir = sandbox.file(&format!("svn/{id}"));
    std::fs::write(workdir.join("scripts/2.ash"), "// second script\n").unwrap();
    run(&workdir, "svn", &["add", "scripts/2.ash"]);
    run(
        &workdir,
        "svn",
        &["commit", "-m", "second commit", "--non-interactive"],
    );
    run(&workdir, "svn", &["update", "-r", "1", "--non-interactive"]);

    assert!(!manager.at_head(&id).await.unwrap());

    let report = manager.update(Some(&id), None).await.unwrap();
    assert!(report.is_clean());
    assert!(manager.at_head(&id).await.unwrap());
}

#[tokio::test]
async fn svn_delete_removes_the_working_copy_and_files() {
    if !svn_tooling_available() {
        eprintln!("svn tooling not installed; skipping");
        return;
    }
    let fixture = SvnFixture::new();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&fixture.url, None, VcsKind::Svn).await.unwrap();

    manager.delete(&id).unwrap();

    assert!(!manager.registry().exists(&id));
    assert!(!sandbox.file(&format!("svn/{id}")).exists());
    assert!(!sandbox.file("scripts/1.ash").exists());
}

#[tokio::test]
async fn missing_svn_client_reports_the_program() {
    if VcsKind::Svn.client_available() {
        eprintln!("svn client installed; skipping the missing-client check");
        return;
    }
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let err = manager
        .checkout("file:///nonexistent/repo", None, VcsKind::Svn)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("svn"));
}
