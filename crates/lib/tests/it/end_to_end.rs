//! Full sync passes through the real clients and fake servers.

use coder_gerrit_sync::{
    SshPublicKey, SyncConfig, Syncer, check_platforms,
    coder::{CoderClient, CoderConfig, User, UserStatus},
    connect,
    gerrit::AccountInfo,
    sync::{AccountAction, StatusPolicy},
};

use crate::helpers::*;

struct Platforms {
    coder: FakeCoder,
    gerrit: FakeGerrit,
}

impl Platforms {
    fn new() -> Self {
        Self {
            coder: FakeCoder::new(),
            gerrit: FakeGerrit::new(),
        }
    }

    async fn syncer(&self, config: SyncConfig) -> Syncer {
        let coder = coder_client(self.coder.start().await);
        let gerrit = gerrit_client(self.gerrit.start().await);
        connect(&coder, &gerrit, config)
    }
}

fn dev(n: usize) -> User {
    User::new(format!("id-{n}"), format!("dev{n}@example.com"), format!("dev{n}"))
}

#[tokio::test]
async fn test_check_platforms_reports_versions() {
    let platforms = Platforms::new();
    let coder = coder_client(platforms.coder.start().await);
    let gerrit = gerrit_client(platforms.gerrit.start().await);

    let versions = check_platforms(&coder, &gerrit).await.unwrap();
    assert_eq!(versions.coder, "v2.16.0+test");
    assert_eq!(versions.gerrit, "3.9.1");
}

#[tokio::test]
async fn test_check_platforms_fails_on_unreachable_gerrit() {
    let platforms = Platforms::new();
    let coder = coder_client(platforms.coder.start().await);
    let gerrit = gerrit_client(closed_url().await);

    let err = check_platforms(&coder, &gerrit).await.unwrap_err();
    assert_eq!(err.module(), "gerrit");
    assert!(err.is_remote_error());
    // Gerrit is checked first, so Coder was never asked.
    assert!(platforms.coder.requests().is_empty());
}

#[tokio::test]
async fn test_pass_registers_keys_and_is_idempotent() {
    let platforms = Platforms::new();
    let key0 = generate_ssh_key();
    let key1 = generate_ssh_key();
    platforms.coder.add_user(dev(0), &key0);
    platforms.coder.add_user(dev(1), &key1);
    platforms.coder.add_user(dev(2), &generate_ssh_key());
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1000));
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1001));
    platforms.gerrit.add_account("dev1@example.com", AccountInfo::new(1100));
    let syncer = platforms.syncer(SyncConfig::new()).await;

    let summary = syncer.run_pass().await.unwrap();
    assert_eq!(summary.users, 3);
    assert_eq!(summary.synced, 3);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.keys_registered, 3);
    assert!(summary.is_clean());

    let uploads = platforms.gerrit.uploads();
    let targets: Vec<i64> = uploads.iter().map(|u| u.account_id).collect();
    assert_eq!(targets, [1000, 1001, 1100]);
    assert_eq!(uploads[0].body, format!("{key0} coder-sync"));
    assert_eq!(uploads[2].body, format!("{key1} coder-sync"));

    // Unchanged state: the second pass writes nothing.
    let again = syncer.run_pass().await.unwrap();
    assert_eq!(again.keys_registered, 0);
    assert_eq!(again.keys_present, 3);
    assert_eq!(platforms.gerrit.uploads().len(), 3);
}

#[tokio::test]
async fn test_existing_key_with_other_comment_is_kept() {
    let platforms = Platforms::new();
    let key = generate_ssh_key();
    platforms.coder.add_user(dev(0), &key);
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1000));
    platforms.gerrit.add_key(1000, &format!("{key} laptop"));
    let syncer = platforms.syncer(SyncConfig::new()).await;

    let report = syncer.sync_user(&dev(0)).await.unwrap();
    assert_eq!(report.accounts[0].action, AccountAction::AlreadyPresent);
    assert!(platforms.gerrit.uploads().is_empty());
    assert_eq!(platforms.gerrit.keys(1000).len(), 1);
}

#[tokio::test]
async fn test_failed_account_does_not_stop_the_others() {
    let platforms = Platforms::new();
    let key = generate_ssh_key();
    platforms.coder.add_user(dev(0), &key);
    platforms.coder.add_user(dev(1), &generate_ssh_key());
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1000));
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1001));
    platforms.gerrit.add_account("dev1@example.com", AccountInfo::new(1100));
    platforms.gerrit.fail_uploads_for(1000);
    let syncer = platforms.syncer(SyncConfig::new()).await;

    let err = syncer.sync_user(&dev(0)).await.unwrap_err();
    assert!(err.is_partial_failure());
    assert_eq!(err.failed_account_ids(), [1000]);
    let partial = err.report().unwrap();
    assert_eq!(partial.registered(), 1);
    let stored = platforms.gerrit.keys(1001)[0].public_key().unwrap();
    assert!(stored.is_equivalent(&SshPublicKey::normalize(&key).unwrap()));

    // The pass counts the failure and moves on to the next user.
    let summary = syncer.run_pass().await.unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failed_users, ["dev0 (id-0, dev0@example.com)"]);
    assert_eq!(summary.keys_present, 1);
    assert_eq!(summary.keys_registered, 1);
    assert_eq!(platforms.gerrit.keys(1100).len(), 1);
}

#[tokio::test]
async fn test_inactive_and_invalid_accounts_are_skipped() {
    let platforms = Platforms::new();
    platforms.coder.add_user(dev(0), &generate_ssh_key());
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(0));
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1000).inactive());
    let syncer = platforms.syncer(SyncConfig::new()).await;

    let report = syncer.sync_user(&dev(0)).await.unwrap();
    assert!(report.is_unmatched());
    assert_eq!(report.skipped.len(), 2);
    assert!(platforms.gerrit.uploads().is_empty());
    // Nothing eligible, so the key was never fetched.
    assert!(
        !platforms
            .coder
            .requests()
            .iter()
            .any(|r| r.ends_with("/gitsshkey"))
    );

    let including = platforms
        .syncer(SyncConfig::new().with_inactive_accounts(true))
        .await;
    let report = including.sync_user(&dev(0)).await.unwrap();
    assert_eq!(report.registered(), 1);
    assert_eq!(platforms.gerrit.uploads()[0].account_id, 1000);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let platforms = Platforms::new();
    platforms.coder.add_user(dev(0), &generate_ssh_key());
    platforms.gerrit.add_account("dev0@example.com", AccountInfo::new(1000));
    let syncer = platforms.syncer(SyncConfig::new().with_dry_run(true)).await;

    let summary = syncer.run_pass().await.unwrap();
    assert_eq!(summary.keys_would_register, 1);
    assert_eq!(summary.keys_registered, 0);
    assert!(platforms.gerrit.uploads().is_empty());
}

#[tokio::test]
async fn test_status_policy_and_only_filter() {
    let platforms = Platforms::new();
    platforms.coder.add_user(dev(0), &generate_ssh_key());
    platforms
        .coder
        .add_user(dev(1).with_status(UserStatus::Suspended), &generate_ssh_key());
    platforms.coder.add_user(dev(2), &generate_ssh_key());
    for n in 0..3 {
        platforms
            .gerrit
            .add_account(&format!("dev{n}@example.com"), AccountInfo::new(1000 + n as i64));
    }

    let active_only = platforms.syncer(SyncConfig::new()).await;
    let summary = active_only.run_pass().await.unwrap();
    assert_eq!(summary.skipped_status, 1);
    assert_eq!(summary.keys_registered, 2);
    assert!(platforms.gerrit.keys(1001).is_empty());

    let one_user = platforms
        .syncer(
            SyncConfig::new()
                .with_status_policy(StatusPolicy::All)
                .with_only("dev1@example.com"),
        )
        .await;
    let summary = one_user.run_pass().await.unwrap();
    assert_eq!(summary.filtered, 2);
    assert_eq!(summary.keys_registered, 1);
    assert_eq!(platforms.gerrit.keys(1001).len(), 1);
}

#[tokio::test]
async fn test_rejected_token_fails_the_pass() {
    let platforms = Platforms::new();
    platforms.coder.add_user(dev(0), &generate_ssh_key());
    let base = platforms.coder.start().await;
    let coder = CoderClient::new(CoderConfig::new(base, "expired")).unwrap();
    let gerrit = gerrit_client(platforms.gerrit.start().await);
    let syncer = connect(&coder, &gerrit, SyncConfig::new());

    let err = syncer.run_pass().await.unwrap_err();
    assert!(err.is_coder_error());
    assert!(platforms.gerrit.queries().is_empty());
}
