//! Runtime configuration read from the environment

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const EMAIL_VAR: &str = "GMUSIC_EMAIL";
pub const PASSWORD_VAR: &str = "GMUSIC_PASSWORD";
pub const LIBRARY_VAR: &str = "GMUSIC_LIBRARY";
pub const LOG_DIR_VAR: &str = "GMUSIC_LOG_DIR";

const DEFAULT_LIBRARY: &str = "library.json";
const DEFAULT_LOG_DIR: &str = ".logs";

#[derive(Clone, Debug)]
pub struct Config {
    pub email: String,
    pub password: String,
    /// Library snapshot served by the offline client
    pub library_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let email = get(EMAIL_VAR).with_context(|| format!("{EMAIL_VAR} is not set"))?;
        let password = get(PASSWORD_VAR).with_context(|| format!("{PASSWORD_VAR} is not set"))?;

        Ok(Self {
            email,
            password,
            library_path: get(LIBRARY_VAR)
                .unwrap_or_else(|| DEFAULT_LIBRARY.to_string())
                .into(),
            log_dir: get(LOG_DIR_VAR)
                .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config =
            Config::from_lookup(lookup(&[(EMAIL_VAR, "me@example.com"), (PASSWORD_VAR, "pw")]))
                .unwrap();
        assert_eq!(config.email, "me@example.com");
        assert_eq!(config.library_path, PathBuf::from("library.json"));
        assert_eq!(config.log_dir, PathBuf::from(".logs"));
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            (EMAIL_VAR, "me@example.com"),
            (PASSWORD_VAR, "pw"),
            (LIBRARY_VAR, "/tmp/lib.json"),
            (LOG_DIR_VAR, "/tmp/logs"),
        ]))
        .unwrap();
        assert_eq!(config.library_path, PathBuf::from("/tmp/lib.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn test_missing_credentials_name_the_variable() {
        let err = Config::from_lookup(lookup(&[(EMAIL_VAR, "me@example.com"), (PASSWORD_VAR, " ")]))
            .unwrap_err();
        assert!(err.to_string().contains(PASSWORD_VAR));

        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(EMAIL_VAR));
    }
}
