//! Settings loaded from the environment and env files.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
pub const APP_TOKEN: &str = "SLACK_APP_TOKEN";
pub const ALLOWED_USER: &str = "SLACK_ALLOWED_USER";
pub const SESSION_NAME: &str = "TMUX_SESSION_NAME";

pub const DEFAULT_SESSION_NAME: &str = "claude";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set (environment or env file)")]
    Missing(&'static str),
}

/// Bridge settings
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub app_token: String,
    pub allowed_user: String,
    /// Target of hook controls that name no session
    pub default_session: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("allowed_user", &self.allowed_user)
            .field("default_session", &self.default_session)
            .finish_non_exhaustive()
    }
}

/// Env files in lookup order: `extra`, `./.env`, then the shared profile.
pub fn env_files(extra: Option<&Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = extra.map(Path::to_path_buf).into_iter().collect();
    files.push(PathBuf::from(".env"));
    if let Some(home) = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        files.push(
            PathBuf::from(home)
                .join(".config")
                .join("ai-agents")
                .join("profiles")
                .join("default.env"),
        );
    }
    files
}

/// Merge `files`, earlier files winning. Missing or unreadable files are
/// skipped, as are lines dotenvy cannot parse.
pub fn read_env_files(files: &[PathBuf]) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for path in files {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Skipping env file");
                continue;
            }
        };
        for item in iter {
            match item {
                Ok((key, value)) => {
                    values.entry(key).or_insert(value);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping env file line");
                }
            }
        }
    }
    values
}

impl Config {
    /// Load from the process environment, falling back to the env files.
    pub fn load(extra_env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let files = read_env_files(&env_files(extra_env_file));
        Self::resolve(|key| {
            env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| files.get(key).cloned())
        })
    }

    /// Build from a key lookup; blank values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            bot_token: require(BOT_TOKEN)?,
            app_token: require(APP_TOKEN)?,
            allowed_user: require(ALLOWED_USER)?,
            default_session: get(SESSION_NAME).unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_resolve_with_default_session() {
        let config = Config::resolve(lookup(&[
            (BOT_TOKEN, "xoxb-1"),
            (APP_TOKEN, "xapp-1"),
            (ALLOWED_USER, "U1"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, "xoxb-1");
        assert_eq!(config.app_token, "xapp-1");
        assert_eq!(config.allowed_user, "U1");
        assert_eq!(config.default_session, DEFAULT_SESSION_NAME);
    }

    #[test]
    fn test_resolve_reports_first_missing_key() {
        let err = Config::resolve(lookup(&[(BOT_TOKEN, "xoxb-1")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(APP_TOKEN));

        let err = Config::resolve(lookup(&[
            (BOT_TOKEN, "xoxb-1"),
            (APP_TOKEN, "xapp-1"),
            (ALLOWED_USER, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(ALLOWED_USER));
    }

    #[test]
    fn test_read_env_files_first_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.env");
        let second = dir.path().join("second.env");
        fs::write(
            &first,
            "# bridge settings\nSLACK_BOT_TOKEN=xoxb-first\n\nTMUX_SESSION_NAME=main # primary\n",
        )
        .unwrap();
        fs::write(
            &second,
            "SLACK_BOT_TOKEN=xoxb-second\nSLACK_APP_TOKEN=\"xapp-second\"\n",
        )
        .unwrap();

        let values = read_env_files(&[first, dir.path().join("absent.env"), second]);

        assert_eq!(values.get(BOT_TOKEN).map(String::as_str), Some("xoxb-first"));
        assert_eq!(values.get(APP_TOKEN).map(String::as_str), Some("xapp-second"));
        assert_eq!(values.get(SESSION_NAME).map(String::as_str), Some("main"));
    }

    #[test]
    fn test_env_files_puts_extra_first() {
        let files = env_files(Some(Path::new("/etc/bridge.env")));
        assert_eq!(files[0], PathBuf::from("/etc/bridge.env"));
        assert_eq!(files[1], PathBuf::from(".env"));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = Config::resolve(lookup(&[
            (BOT_TOKEN, "xoxb-secret"),
            (APP_TOKEN, "xapp-secret"),
            (ALLOWED_USER, "U1"),
        ]))
        .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
