//! Manifest discovery and the explicit-layout install path.

use spm_cli::vcs::VcsKind;

use super::common::{FixtureRepo, Sandbox, manifest_repo};

#[tokio::test]
async fn manifest_in_a_subdirectory_governs_the_install() {
    let repo = manifest_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    // Declared files resolve against the manifest's directory.
    assert!(sandbox.file("scripts/1-manifest.ash").exists());
    // Files outside the manifest's declarations are ignored, even ones
    // already sitting in a permissible category folder.
    assert!(!sandbox.file("scripts/1-root.ash").exists());
    assert!(!sandbox.file("1-root.ash").exists());

    let record = manager.registry().get(&id).unwrap();
    assert_eq!(record.files, vec![std::path::PathBuf::from("scripts/1-manifest.ash")]);
}

#[tokio::test]
async fn manifest_outside_permissible_categories_is_skipped() {
    let repo = FixtureRepo::with_files(&[
        (
            "manifest.toml",
            "[files]\nscripts = [\"ok.ash\"]\nplanting = [\"sneaky.txt\"]\n",
        ),
        ("ok.ash", "// installable\n"),
        ("sneaky.txt", "never installed\n"),
    ]);
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    assert!(sandbox.file("scripts/ok.ash").exists());
    assert!(!sandbox.file("planting/sneaky.txt").exists());
}

#[tokio::test]
async fn declared_but_missing_files_are_skipped() {
    let repo = FixtureRepo::with_files(&[
        (
            "manifest.toml",
            "[files]\nscripts = [\"present.ash\", \"absent.ash\"]\n",
        ),
        ("present.ash", "// here\n"),
    ]);
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    assert!(sandbox.file("scripts/present.ash").exists());
    let record = manager.registry().get(&id).unwrap();
    assert_eq!(record.files.len(), 1);
}

#[tokio::test]
async fn traversal_in_a_manifest_is_rejected() {
    let repo = FixtureRepo::with_files(&[
        (
            "manifest.toml",
            "[files]\nscripts = [\"../escape.ash\"]\n",
        ),
        ("escape.ash", "// must not escape the root\n"),
    ]);
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let result = manager.checkout(&repo.url(), None, VcsKind::Git).await;
    assert!(result.is_err());
    assert!(!sandbox.file("escape.ash").exists());
    assert!(!sandbox.file("scripts/escape.ash").exists());
}

#[tokio::test]
async fn malformed_manifest_fails_the_checkout() {
    let repo = FixtureRepo::with_files(&[
        ("manifest.toml", "files = not valid toml ["),
        ("scripts/1.ash", "// conventional layout present\n"),
    ]);
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    // A broken manifest is an error, never a silent fall back to the
    // conventional layout.
    let result = manager.checkout(&repo.url(), None, VcsKind::Git).await;
    assert!(result.is_err());
    assert!(!sandbox.file("scripts/1.ash").exists());
}
