//! Share link resolution.
//!
//! Everything a viewer needs is derived from the stored object name alone:
//! the display name, the raw retrieval URL in the repository, and the
//! same-site share URL carrying the name in `?v=`.

use crate::constants::{DEFAULT_BRANCH, RAW_CONTENT_HOST, SHARE_QUERY_PARAM, UPLOADS_DIR};
use crate::naming::StoredObjectName;

/// Display name encoded in a stored object name.
///
/// Splits on `_`, drops the leading timestamp segment and rejoins the rest.
/// Names without any `_` resolve to an empty string.
pub fn resolve_display_name(stored_name: &str) -> String {
    let mut segments = stored_name.split('_');
    segments.next();
    segments.collect::<Vec<_>>().join("_")
}

/// Raw content URL of an upload on the fixed default branch.
pub fn resolve_retrieval_url(repository: &str, stored_name: &str) -> String {
    format!(
        "https://{}/{}/{}/{}/{}",
        RAW_CONTENT_HOST,
        repository.trim_matches('/'),
        DEFAULT_BRANCH,
        UPLOADS_DIR,
        urlencoding::encode(stored_name)
    )
}

/// Same-site share URL for the download view.
pub fn resolve_share_url(origin: &str, path: &str, stored_name: &str) -> String {
    format!(
        "{}{}?{}={}",
        origin.trim_end_matches('/'),
        path,
        SHARE_QUERY_PARAM,
        urlencoding::encode(stored_name)
    )
}

/// View selected by a page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `?v=<stored name>` is present and non-empty.
    Download(StoredObjectName),
    /// No stored name in the URL.
    Upload,
}

impl Route {
    /// Route a full page URL. Unparseable URLs fall back to the upload view.
    pub fn from_url(page_url: &str) -> Self {
        match url::Url::parse(page_url) {
            Ok(parsed) => parsed
                .query_pairs()
                .find(|(key, _)| key == SHARE_QUERY_PARAM)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
                .map(|value| Route::Download(StoredObjectName::parse(value)))
                .unwrap_or(Route::Upload),
            Err(_) => Route::Upload,
        }
    }
}

/// What the download view shows for a stored object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DownloadView {
    pub stored_name: StoredObjectName,
    pub display_name: String,
    /// Absent when no repository is configured.
    pub raw_url: Option<String>,
}

/// Builds links for the page at `origin` + `path`.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    origin: String,
    path: String,
}

impl LinkResolver {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
        }
    }

    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::new(settings.share_origin.clone(), settings.share_path.clone())
    }

    pub fn share_url(&self, stored_name: &StoredObjectName) -> String {
        resolve_share_url(&self.origin, &self.path, stored_name.as_str())
    }

    pub fn retrieval_url(&self, repository: &str, stored_name: &StoredObjectName) -> String {
        resolve_retrieval_url(repository, stored_name.as_str())
    }

    /// Download view for a stored object; the raw link needs a repository.
    pub fn download_view(
        &self,
        repository: Option<&str>,
        stored_name: &StoredObjectName,
    ) -> DownloadView {
        DownloadView {
            stored_name: stored_name.clone(),
            display_name: stored_name.display_name(),
            raw_url: repository
                .filter(|repo| !repo.is_empty())
                .map(|repo| self.retrieval_url(repo, stored_name)),
        }
    }
}
