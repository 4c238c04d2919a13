use crate::traits::{ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use ghshare_api_client::{ApiClient, Auth};
use ghshare_core::constants::UPLOADS_DIR;
use ghshare_core::encoding::strip_data_url_prefix;
use ghshare_core::{Configuration, StoredObjectName};

/// Object store backed by the GitHub Contents API.
///
/// Objects land at `{repository}/uploads/{stored_name}` on the repository's
/// default branch, one commit per object. A `data:...;base64,` prefix on the
/// payload is dropped before sending.
#[derive(Clone, Debug)]
pub struct GitHubStorage {
    client: ApiClient,
}

impl GitHubStorage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Remote path of a stored object inside the repository.
    pub fn object_path(stored_name: &StoredObjectName) -> String {
        format!("{}/{}", UPLOADS_DIR, stored_name)
    }
}

#[async_trait]
impl ObjectStore for GitHubStorage {
    async fn put_object(
        &self,
        credentials: &Configuration,
        stored_name: &StoredObjectName,
        payload: &str,
        message: &str,
    ) -> StorageResult<String> {
        if !credentials.is_complete() {
            return Err(StorageError::ConfigError(
                "token and repository are required".to_string(),
            ));
        }

        let path = Self::object_path(stored_name);
        let payload = strip_data_url_prefix(payload);
        let start = std::time::Instant::now();

        let response = self
            .client
            .with_auth(Auth::Token(credentials.token.clone()))
            .put_contents(&credentials.repository, &path, message, payload)
            .await
            .map_err(|e| StorageError::UploadFailed(e.user_message()))?;

        tracing::info!(
            repository = %credentials.repository,
            path = %path,
            payload_bytes = payload.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GitHub upload successful"
        );
        if let Some(commit) = response.and_then(|r| r.commit) {
            tracing::debug!(commit = %commit.sha, path = %path, "Commit created");
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(url: &str) -> GitHubStorage {
        GitHubStorage::new(ApiClient::new(url, None).unwrap())
    }

    #[test]
    fn object_path_is_under_uploads() {
        let name = StoredObjectName::parse("1700000000000_My_Report.pdf");
        assert_eq!(
            GitHubStorage::object_path(&name),
            "uploads/1700000000000_My_Report.pdf"
        );
    }

    #[tokio::test]
    async fn put_object_writes_under_uploads() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/alice/files/contents/uploads/1_a.txt")
            .match_header("authorization", "token ghp_secret")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "message": "Upload a.txt via ghshare",
                "content": "aGk=",
            })))
            .with_status(201)
            .with_body(r#"{"content":null,"commit":{"sha":"c0ffee"}}"#)
            .create_async()
            .await;

        let credentials = Configuration::new("ghp_secret", "alice/files");
        let path = storage(&server.url())
            .put_object(
                &credentials,
                &StoredObjectName::parse("1_a.txt"),
                "aGk=",
                "Upload a.txt via ghshare",
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(path, "uploads/1_a.txt");
    }

    #[tokio::test]
    async fn created_with_empty_body_is_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/alice/files/contents/uploads/1_a.txt")
            .with_status(201)
            .with_body("")
            .create_async()
            .await;

        let credentials = Configuration::new("ghp_secret", "alice/files");
        let path = storage(&server.url())
            .put_object(&credentials, &StoredObjectName::parse("1_a.txt"), "aGk=", "m")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(path, "uploads/1_a.txt");
    }

    #[tokio::test]
    async fn data_url_prefix_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/alice/files/contents/uploads/1_a.txt")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "content": "aGk=",
            })))
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let credentials = Configuration::new("ghp_secret", "alice/files");
        storage(&server.url())
            .put_object(
                &credentials,
                &StoredObjectName::parse("1_a.txt"),
                "data:text/plain;base64,aGk=",
                "m",
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn put_object_failure_carries_api_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/repos/alice/files/contents/uploads/1_a.txt")
            .with_status(422)
            .with_body(r#"{"message":"Invalid request.\n\n\"sha\" wasn't supplied."}"#)
            .create_async()
            .await;

        let credentials = Configuration::new("ghp_secret", "alice/files");
        let err = storage(&server.url())
            .put_object(&credentials, &StoredObjectName::parse("1_a.txt"), "", "m")
            .await
            .unwrap_err();

        match err {
            StorageError::UploadFailed(message) => {
                assert!(message.starts_with("Invalid request."))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn incomplete_credentials_never_reach_the_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = storage(&server.url())
            .put_object(
                &Configuration::new("ghp_secret", ""),
                &StoredObjectName::parse("1_a.txt"),
                "",
                "m",
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ConfigError(_)));
        mock.assert_async().await;
    }
}
