//! Checkout behavior: layout, allow-list hygiene, and repeat checkouts.

use spm_cli::core::{Continuation, SpmError};
use spm_cli::vcs::VcsKind;

use super::common::{Sandbox, basic_repo};

#[tokio::test]
async fn checkout_installs_permissible_folders() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let id = manager
        .checkout(&repo.url(), None, VcsKind::Git)
        .await
        .unwrap();

    // Working copy lands under git/<id>/ and the registry knows it.
    assert!(sandbox.file(&format!("git/{id}")).is_dir());
    assert!(manager.registry().exists(&id));

    // Files under the permissible category folders were installed.
    assert!(sandbox.file("scripts/1.ash").exists());
    assert!(sandbox.file("relay/1.ash").exists());
    assert!(sandbox.file("data/1.txt").exists());
}

#[tokio::test]
async fn checkout_never_copies_unpermissible_files() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    assert!(!sandbox.file("uncopied.js").exists());
    assert!(!sandbox.file("unpermissible/1.txt").exists());
    // The junk is also kept out of every destination root.
    assert!(!sandbox.file("scripts/uncopied.js").exists());
    assert!(!sandbox.file("scripts/unpermissible/1.txt").exists());
}

#[tokio::test]
async fn repeat_checkout_is_a_reported_no_op() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();
    let err = manager
        .checkout(&repo.url(), None, VcsKind::Git)
        .await
        .unwrap_err();

    let spm = err.downcast_ref::<SpmError>().expect("typed error");
    assert!(matches!(spm, SpmError::AlreadyInstalled { .. }));
    assert_eq!(Continuation::from_error(&err), Continuation::Continue);
    assert_eq!(manager.registry().len(), 1);
}

#[tokio::test]
async fn checkout_of_missing_remote_is_a_transport_error() {
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();

    let err = manager
        .checkout("/nonexistent/owner/repo", None, VcsKind::Git)
        .await
        .unwrap_err();
    let spm = err.downcast_ref::<SpmError>().expect("typed error");
    assert!(matches!(spm, SpmError::Transport { .. }));
    assert!(manager.registry().is_empty());
}

#[tokio::test]
async fn checkout_with_ref_tracks_that_branch() {
    let repo = basic_repo();
    repo.git.create_branch("side").unwrap();
    repo.git.write_file("scripts/side.ash", "// side branch\n").unwrap();
    repo.git.add_all().unwrap();
    repo.git.commit("side branch commit").unwrap();
    repo.git.checkout("main").unwrap();

    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager
        .checkout(&repo.url(), Some("side"), VcsKind::Git)
        .await
        .unwrap();

    assert!(id.ends_with("-side"));
    assert!(sandbox.file("scripts/side.ash").exists());
    let record = manager.registry().get(&id).unwrap();
    assert_eq!(record.reference.as_deref(), Some("side"));
}

#[tokio::test]
async fn registry_survives_reopening() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let id = {
        let mut manager = sandbox.manager();
        manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap()
    };

    let manager = sandbox.manager();
    assert!(manager.registry().exists(&id));
    let record = manager.registry().get(&id).unwrap();
    assert_eq!(record.url, repo.url());
    assert!(record.files.contains(&std::path::PathBuf::from("scripts/1.ash")));
}
