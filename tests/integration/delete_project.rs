//! Delete removes the entry, the working copy, and exactly the files the
//! project installed.

use spm_cli::core::SpmError;
use spm_cli::vcs::VcsKind;

use super::common::{Sandbox, basic_repo};

#[tokio::test]
async fn delete_removes_entry_working_copy_and_files() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    manager.delete(&id).unwrap();

    assert!(!manager.registry().exists(&id));
    assert!(!sandbox.file(&format!("git/{id}")).exists());
    assert!(!sandbox.file("scripts/1.ash").exists());
    assert!(!sandbox.file("relay/1.ash").exists());
    assert!(!sandbox.file("data/1.txt").exists());
}

#[tokio::test]
async fn delete_leaves_other_projects_files_alone() {
    let first = basic_repo();
    let second = super::common::FixtureRepo::with_files(&[("scripts/2.ash", "// second\n")]);
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let first_id = manager.checkout(&first.url(), None, VcsKind::Git).await.unwrap();
    manager.checkout(&second.url(), None, VcsKind::Git).await.unwrap();

    manager.delete(&first_id).unwrap();

    assert!(!sandbox.file("scripts/1.ash").exists());
    assert!(sandbox.file("scripts/2.ash").exists());
}

#[tokio::test]
async fn delete_does_not_remove_files_owned_by_an_earlier_project() {
    // Both repositories ship scripts/1.ash; the first to install owns it.
    let first = basic_repo();
    let second = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    manager.checkout(&first.url(), None, VcsKind::Git).await.unwrap();
    let second_id = manager.checkout(&second.url(), None, VcsKind::Git).await.unwrap();

    // The second project never copied the shared file, so deleting it
    // must leave the first project's install intact.
    manager.delete(&second_id).unwrap();
    assert!(sandbox.file("scripts/1.ash").exists());
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let err = manager.delete("absent-script").unwrap_err();
    let spm = err.downcast_ref::<SpmError>().expect("typed error");
    assert!(matches!(spm, SpmError::NotFound { .. }));
}
