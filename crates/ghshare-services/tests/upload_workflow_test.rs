//! End-to-end batch upload against a mocked GitHub API and an on-disk state directory.

use std::sync::Arc;

use ghshare_api_client::ApiClient;
use ghshare_core::{LinkResolver, PendingFile, Route, ShareError};
use ghshare_services::{FileOutcome, HistoryLedger, NoopProgress, UploadSession};
use ghshare_storage::{GitHubStorage, LocalStateStore, StateStore};
use mockito::Matcher;

fn upload_path(name: &str) -> Matcher {
    Matcher::Regex(format!(
        r"^/repos/alice/files/contents/uploads/\d+_{}$",
        regex_escape(name)
    ))
}

fn regex_escape(value: &str) -> String {
    value.replace('.', r"\.")
}

async fn open_session(
    server_url: &str,
    state_dir: &std::path::Path,
) -> (UploadSession, Arc<LocalStateStore>) {
    let state = Arc::new(LocalStateStore::new(state_dir).await.unwrap());
    let objects = Arc::new(GitHubStorage::new(ApiClient::new(server_url, None).unwrap()));
    let session = UploadSession::open(
        state.clone(),
        objects,
        LinkResolver::new("https://share.example.com", "/index.html"),
    )
    .await
    .unwrap();
    (session, state)
}

#[tokio::test]
async fn second_of_three_fails_and_ledger_gains_two() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("PUT", upload_path("first.txt"))
        .match_header("authorization", "token ghp_secret")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "message": "Upload first.txt via ghshare",
            "content": "b25l",
        })))
        .with_status(201)
        .with_body(r#"{"content":{"name":"x","path":"uploads/x","sha":"1"},"commit":{"sha":"a"}}"#)
        .create_async()
        .await;
    let second = server
        .mock("PUT", upload_path("second.txt"))
        .with_status(409)
        .with_body(r#"{"message":"Conflict"}"#)
        .create_async()
        .await;
    let third = server
        .mock("PUT", upload_path("third.txt"))
        .with_status(201)
        .with_body(r#"{"content":null,"commit":null}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (mut session, state) = open_session(&server.url(), dir.path()).await;
    session
        .save_configuration("ghp_secret", "alice/files")
        .await
        .unwrap();

    session.add_files([
        PendingFile::from_bytes("first.txt", b"one".to_vec()),
        PendingFile::from_bytes("second.txt", b"two".to_vec()),
        PendingFile::from_bytes("third.txt", b"three".to_vec()),
    ]);
    let report = session.upload_all(&NoopProgress).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    assert_eq!(report.failed_count(), 1);
    match &report.outcomes[1] {
        FileOutcome::Failed { error, .. } => match error {
            ShareError::RemoteWriteFailure { file, message } => {
                assert_eq!(file, "second.txt");
                assert_eq!(message, "Conflict");
            }
            other => panic!("unexpected error: {other}"),
        },
        other => panic!("unexpected outcome: {other:?}"),
    }

    // a fresh ledger over the same directory sees exactly the two successes
    let ledger = HistoryLedger::new(state);
    let history = ledger.list().await.unwrap();
    let names: Vec<_> = history.iter().map(|e| e.original_name.as_str()).collect();
    assert_eq!(names, vec!["third.txt", "first.txt"]);
}

#[tokio::test]
async fn missing_configuration_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (mut session, state) = open_session(&server.url(), dir.path()).await;
    session.add_files([PendingFile::from_bytes("a.txt", b"a".to_vec())]);

    let err = session.upload_all(&NoopProgress).await.unwrap_err();
    assert!(matches!(err, ShareError::MissingConfiguration(_)));

    any.assert_async().await;
    assert_eq!(state.get("upload_history").await.unwrap(), None);
    assert_eq!(state.get("gh_config").await.unwrap(), None);
}

#[tokio::test]
async fn share_url_routes_back_to_the_upload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", upload_path("My_Report.pdf"))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (mut session, _state) = open_session(&server.url(), dir.path()).await;
    session
        .save_configuration("ghp_secret", "alice/files")
        .await
        .unwrap();
    session.add_files([PendingFile::from_bytes("My Report.pdf", b"%PDF".to_vec())]);

    let report = session.upload_all(&NoopProgress).await.unwrap();
    let uploaded = report.uploaded().next().expect("one upload");
    assert!(uploaded
        .share_url
        .starts_with("https://share.example.com/index.html?v="));

    let stored = match Route::from_url(&uploaded.share_url) {
        Route::Download(stored) => stored,
        Route::Upload => panic!("share URL should select the download view"),
    };
    assert_eq!(stored, uploaded.entry.stored_object_name);

    let view = session.download_view(&stored);
    assert_eq!(view.display_name, "My_Report.pdf");
    assert_eq!(
        view.raw_url,
        Some(format!(
            "https://raw.githubusercontent.com/alice/files/main/uploads/{}",
            stored
        ))
    );
}

#[tokio::test]
async fn created_without_body_is_recorded_and_dequeued() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", upload_path("report.pdf"))
        .with_status(201)
        .with_body("")
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (mut session, _state) = open_session(&server.url(), dir.path()).await;
    session
        .save_configuration("ghp_secret", "alice/files")
        .await
        .unwrap();

    session.add_files([PendingFile::from_bytes("report.pdf", b"%PDF".to_vec())]);
    let report = session.upload_all(&NoopProgress).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.failed_count(), 0);
    assert!(session.queued().is_empty());
    assert_eq!(session.history().await.unwrap().len(), 1);
}
