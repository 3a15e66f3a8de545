//! The read-only query surface exposed to embedded scripts.

use spm_cli::core::SpmError;
use spm_cli::scripting;
use spm_cli::vcs::VcsKind;

use super::common::{Sandbox, basic_repo};

#[tokio::test]
async fn list_reflects_registration_order() {
    let first = basic_repo();
    let second = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let first_id = manager.checkout(&first.url(), None, VcsKind::Git).await.unwrap();
    let second_id = manager.checkout(&second.url(), None, VcsKind::Git).await.unwrap();

    assert_eq!(scripting::git_list(&manager), vec![first_id, second_id]);
}

#[tokio::test]
async fn exists_distinguishes_installed_from_unknown() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    assert!(scripting::git_exists(&manager, &id));
    assert!(!scripting::git_exists(&manager, "no-such-project"));
}

#[tokio::test]
async fn info_exposes_the_project_record() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    let info = scripting::git_info(&manager, &id).unwrap();
    assert_eq!(info["url"], repo.url());
    assert_eq!(info["vcs"], "git");
    assert!(info["ref"].is_null());
    assert!(info["path"].as_str().unwrap().ends_with(&id));
}

#[tokio::test]
async fn info_for_unknown_project_is_not_found() {
    let sandbox = Sandbox::new();
    let manager = sandbox.manager();

    let err = scripting::git_info(&manager, "no-such-project").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SpmError>(),
        Some(SpmError::NotFound { .. })
    ));
}

#[tokio::test]
async fn at_head_queries_the_remote() {
    let repo = basic_repo();
    let sandbox = Sandbox::new();
    let mut manager = sandbox.manager();
    let id = manager.checkout(&repo.url(), None, VcsKind::Git).await.unwrap();

    assert!(scripting::git_at_head(&manager, &id).await.unwrap());

    repo.git.write_file("scripts/2.ash", "// second script\n").unwrap();
    repo.git.add_all().unwrap();
    repo.git.commit("second commit").unwrap();
    assert!(!scripting::git_at_head(&manager, &id).await.unwrap());
}
