/// Key under which the user configuration is persisted.
pub const CONFIG_STATE_KEY: &str = "gh_config";

/// Key under which the upload history is persisted.
pub const HISTORY_STATE_KEY: &str = "upload_history";

/// Remote directory every upload is written to.
pub const UPLOADS_DIR: &str = "uploads";

/// Host serving raw repository contents.
pub const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";

/// Branch used to build raw retrieval URLs. Not discovered from the repository.
pub const DEFAULT_BRANCH: &str = "main";

/// Query parameter carrying the stored object name in share URLs.
pub const SHARE_QUERY_PARAM: &str = "v";

/// Name used in commit messages and the HTTP user agent.
pub const APP_NAME: &str = "ghshare";

/// Progress value reported right before the remote write starts.
pub const PROGRESS_STARTED: u8 = 10;

/// Progress value reported once the remote write succeeded.
pub const PROGRESS_COMPLETE: u8 = 100;
