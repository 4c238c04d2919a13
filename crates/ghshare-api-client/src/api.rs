//! Domain methods for the GitHub API client.

use serde::{Deserialize, Serialize};

use crate::{ApiClient, ApiError};

/// Body of a create-or-update contents request.
#[derive(Debug, Serialize)]
pub struct PutContentsRequest<'a> {
    pub message: &'a str,
    /// Base64 file content without any data-URL prefix.
    pub content: &'a str,
}

/// File metadata returned by the contents endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInfo {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Commit created by a contents write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Response of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentsResponse {
    #[serde(default)]
    pub content: Option<ContentInfo>,
    #[serde(default)]
    pub commit: Option<CommitInfo>,
}

/// Subset of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
}

/// Percent-encode each `/`-separated segment, keeping the separators.
fn encode_segments(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// API path of a file in a repository.
pub fn contents_path(repository: &str, file_path: &str) -> String {
    format!(
        "/repos/{}/contents/{}",
        encode_segments(repository),
        encode_segments(file_path)
    )
}

impl ApiClient {
    /// Create a file at `file_path` in `repository` (`owner/name`).
    ///
    /// Returns `None` when the write succeeded but the body was empty or not
    /// a contents response.
    pub async fn put_contents(
        &self,
        repository: &str,
        file_path: &str,
        message: &str,
        content: &str,
    ) -> Result<Option<ContentsResponse>, ApiError> {
        let body = PutContentsRequest { message, content };
        self.put_json(&contents_path(repository, file_path), &body)
            .await
    }

    /// Fetch repository metadata (used to check a saved configuration).
    pub async fn get_repository(&self, repository: &str) -> Result<RepositoryInfo, ApiError> {
        self.get(&format!("/repos/{}", encode_segments(repository)), &[])
            .await
    }
}
