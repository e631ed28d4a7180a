//! Coder REST client against the fake deployment.

use std::time::Duration;

use coder_gerrit_sync::coder::{CoderClient, CoderConfig, User, UserStatus, WorkspaceDirectory};

use crate::helpers::*;

fn user(n: usize) -> User {
    User::new(format!("id-{n}"), format!("dev{n}@example.com"), format!("dev{n}"))
}

#[tokio::test]
async fn test_build_info() {
    let coder = FakeCoder::new();
    let client = coder_client(coder.start().await);

    let info = client.build_info().await.unwrap();
    assert_eq!(info.version, "v2.16.0+test");
}

#[tokio::test]
async fn test_list_users_follows_pages() {
    let coder = FakeCoder::new();
    for n in 0..5 {
        coder.add_user(user(n), &generate_ssh_key());
    }
    let client = coder_client(coder.start().await);

    let users = client.list_users().await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["id-0", "id-1", "id-2", "id-3", "id-4"]);

    // Page size is 2; the short third page ends paging.
    assert_eq!(
        coder.requests(),
        [
            "/api/v2/users?limit=2&offset=0",
            "/api/v2/users?limit=2&offset=2",
            "/api/v2/users?limit=2&offset=4",
        ]
    );
}

#[tokio::test]
async fn test_list_users_stops_at_count() {
    let coder = FakeCoder::new();
    for n in 0..4 {
        coder.add_user(user(n), &generate_ssh_key());
    }
    let client = coder_client(coder.start().await);

    let users = client.list_users().await.unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(coder.requests().len(), 2);
}

#[tokio::test]
async fn test_list_users_empty_deployment() {
    let coder = FakeCoder::new();
    let client = coder_client(coder.start().await);

    assert!(client.list_users().await.unwrap().is_empty());
    assert_eq!(coder.requests().len(), 1);
}

#[tokio::test]
async fn test_user_status_is_decoded() {
    let coder = FakeCoder::new();
    coder.add_user(user(0).with_status(UserStatus::Suspended), "ssh-ed25519 AAAA");
    let client = coder_client(coder.start().await);

    let users = client.list_users().await.unwrap();
    assert_eq!(users[0].status, UserStatus::Suspended);
    assert!(!users[0].status.is_active());
}

#[tokio::test]
async fn test_git_ssh_key_through_trait() {
    let coder = FakeCoder::new();
    let key = generate_ssh_key();
    coder.add_user(user(7), &key);
    let client = coder_client(coder.start().await);
    let directory: &dyn WorkspaceDirectory = &client;

    assert_eq!(directory.git_ssh_key("id-7").await.unwrap().public_key, key);
    assert_eq!(coder.requests(), ["/api/v2/users/id-7/gitsshkey"]);
}

#[tokio::test]
async fn test_git_ssh_key_unknown_user_is_not_found() {
    let coder = FakeCoder::new();
    let client = coder_client(coder.start().await);

    let err = client.git_ssh_key("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transport_error());
}

#[tokio::test]
async fn test_wrong_token_is_authentication_error() {
    let coder = FakeCoder::new();
    let base = coder.start().await;
    let client = CoderClient::new(CoderConfig::new(base, "wrong-token")).unwrap();

    let err = client.list_users().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.is_authentication_error());
    assert!(coder.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_deployment_is_transport_error() {
    let base = closed_url().await;
    let client = CoderClient::new(
        CoderConfig::new(base, CODER_TOKEN).with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.build_info().await.unwrap_err();
    assert!(err.is_transport_error());
    assert_eq!(err.status(), None);
}
