//! User configuration: the credential and target repository.

use serde::{Deserialize, Serialize};

use crate::error::{ShareError, ShareResult};

/// Credential and repository used for every upload.
///
/// Persisted as `{"token": .., "repo": ..}`. Either field may be empty; an
/// empty field blocks uploads but is a valid persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "repo", default)]
    pub repository: String,
}

impl Configuration {
    /// Build a configuration from user input, trimming surrounding whitespace.
    pub fn new(token: &str, repository: &str) -> Self {
        Self {
            token: token.trim().to_string(),
            repository: repository.trim().to_string(),
        }
    }

    /// Fail with `MissingConfiguration` if the token or repository is absent.
    pub fn ensure_complete(&self) -> ShareResult<()> {
        match (self.token.is_empty(), self.repository.is_empty()) {
            (false, false) => Ok(()),
            (true, true) => Err(ShareError::MissingConfiguration(
                "token and repository are not set".to_string(),
            )),
            (true, false) => Err(ShareError::MissingConfiguration(
                "token is not set".to_string(),
            )),
            (false, true) => Err(ShareError::MissingConfiguration(
                "repository is not set".to_string(),
            )),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ensure_complete().is_ok()
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_input() {
        let config = Configuration::new("  ghp_abc \n", " alice/files ");
        assert_eq!(config.token, "ghp_abc");
        assert_eq!(config.repository, "alice/files");
    }

    #[test]
    fn empty_repository_is_missing() {
        let config = Configuration::new("ghp_abc", "");
        let err = config.ensure_complete().unwrap_err();
        assert!(matches!(err, ShareError::MissingConfiguration(_)));
        assert!(!config.is_complete());
    }

    #[test]
    fn persisted_shape_uses_repo_field() {
        let config = Configuration::new("t", "alice/files");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({"token": "t", "repo": "alice/files"}));

        let decoded: Configuration = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert_eq!(decoded.repository, "");
    }

    #[test]
    fn masked_token_keeps_last_four() {
        assert_eq!(Configuration::new("ghp_123456", "a/b").masked_token(), "******3456");
        assert_eq!(Configuration::new("abc", "a/b").masked_token(), "***");
    }
}
