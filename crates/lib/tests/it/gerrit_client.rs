//! Gerrit REST client against the fake server.

use coder_gerrit_sync::{
    SshPublicKey,
    gerrit::{AccountInfo, GerritClient, GerritConfig, ReviewAccounts, email_query},
};

use crate::helpers::*;

#[tokio::test]
async fn test_version_strips_xssi_prefix() {
    let gerrit = FakeGerrit::new();
    let client = gerrit_client(gerrit.start().await);

    assert_eq!(client.version().await.unwrap(), "3.9.1");
}

#[tokio::test]
async fn test_query_accounts_by_email() {
    let gerrit = FakeGerrit::new();
    gerrit.add_account("dev@example.com", AccountInfo::new(1000));
    gerrit.add_account("dev@example.com", AccountInfo::new(1001).inactive());
    gerrit.add_account("other@example.com", AccountInfo::new(2000));
    let client = gerrit_client(gerrit.start().await);

    let accounts = client
        .query_accounts(&email_query("dev@example.com"))
        .await
        .unwrap();
    let ids: Vec<i64> = accounts.iter().map(|a| a.account_id).collect();
    assert_eq!(ids, [1000, 1001]);
    assert!(!accounts[0].inactive);
    assert!(accounts[1].inactive);
    assert_eq!(gerrit.queries(), ["email:\"dev@example.com\""]);
}

#[tokio::test]
async fn test_query_accounts_no_match_is_empty() {
    let gerrit = FakeGerrit::new();
    let client = gerrit_client(gerrit.start().await);

    let accounts = client
        .query_accounts(&email_query("nobody@example.com"))
        .await
        .unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn test_add_key_posts_plain_text() {
    let gerrit = FakeGerrit::new();
    let client = gerrit_client(gerrit.start().await);
    let line = format!("{} coder-sync", generate_ssh_key());

    let added = client.add_ssh_key(1000, &line).await.unwrap();
    assert_eq!(added.seq, 1);
    assert!(added.valid);
    assert_eq!(added.comment.as_deref(), Some("coder-sync"));

    let uploads = gerrit.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].account_id, 1000);
    assert!(uploads[0].content_type.starts_with("text/plain"));
    assert_eq!(uploads[0].body, line);
}

#[tokio::test]
async fn test_list_keys_through_trait() {
    let gerrit = FakeGerrit::new();
    let line = generate_ssh_key();
    gerrit.add_key(1000, &format!("{line} laptop"));
    let client = gerrit_client(gerrit.start().await);
    let accounts: &dyn ReviewAccounts = &client;

    let keys = accounts.list_ssh_keys(1000).await.unwrap();
    assert_eq!(keys.len(), 1);
    let stored = keys[0].public_key().unwrap();
    let ours = SshPublicKey::normalize(&line).unwrap();
    assert!(stored.is_equivalent(&ours));
    assert_eq!(stored.comment(), Some("laptop"));

    assert!(accounts.list_ssh_keys(2000).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_upload_reports_status() {
    let gerrit = FakeGerrit::new();
    gerrit.fail_uploads_for(1000);
    let client = gerrit_client(gerrit.start().await);

    let err = client
        .add_ssh_key(1000, &generate_ssh_key())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_rejected());
    assert!(err.to_string().contains("Internal server error"));
    assert!(gerrit.keys(1000).is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_authentication_error() {
    let gerrit = FakeGerrit::new();
    let base = gerrit.start().await;
    let client =
        GerritClient::new(GerritConfig::new(base).with_basic_auth(GERRIT_USER, "wrong")).unwrap();

    let err = client.version().await.unwrap_err();
    assert!(err.is_authentication_error());
}

#[tokio::test]
async fn test_anonymous_client_skips_auth_prefix() {
    // The fake only serves the authenticated `/a/` tree.
    let gerrit = FakeGerrit::new();
    let base = gerrit.start().await;
    let client = GerritClient::new(GerritConfig::new(base)).unwrap();

    let err = client.version().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = gerrit_client(closed_url().await);

    let err = client.list_ssh_keys(1000).await.unwrap_err();
    assert!(err.is_transport_error());
}
