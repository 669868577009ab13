use std::env;
use std::path::Path;

use crate::config::constants::{CODACY_API_TOKEN_ENV, ENV_FILE};
use crate::errors::{ImporterError, ImporterResult};

/// Resolves the Codacy API token with the documented precedence:
/// `--api-token` flag, then the environment variable, then a `.env` file in
/// the working directory. First non-empty value wins.
pub fn resolve_api_token(flag: Option<String>) -> ImporterResult<String> {
    resolve_from(
        flag,
        env::var(CODACY_API_TOKEN_ENV).ok(),
        Path::new(ENV_FILE),
    )
}

fn resolve_from(
    flag: Option<String>,
    env_value: Option<String>,
    env_file: &Path,
) -> ImporterResult<String> {
    let resolvers = [
        ("--api-token flag", non_empty(flag)),
        ("environment variable", non_empty(env_value)),
        (".env file", non_empty(read_env_file(env_file))),
    ];

    for (source, token) in resolvers {
        if let Some(token) = token {
            log::debug!("resolved Codacy API token from {}", source);
            return Ok(token);
        }
    }

    Err(ImporterError::auth("no API token configured"))
}

/// Reads the token key from a `.env` file without mutating the process
/// environment, so the flag > env > file precedence stays exact.
fn read_env_file(path: &Path) -> Option<String> {
    let entries = dotenvy::from_path_iter(path).ok()?;
    for entry in entries {
        let Ok((key, value)) = entry else { continue };
        if key == CODACY_API_TOKEN_ENV {
            return Some(value);
        }
    }
    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn missing_file() -> PathBuf {
        PathBuf::from("does-not-exist.env")
    }

    #[test]
    fn flag_wins_over_everything() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "CODACY_API_TOKEN=from-file\n").unwrap();

        let token = resolve_from(
            Some("from-flag".to_string()),
            Some("from-env".to_string()),
            &env_file,
        )
        .unwrap();
        assert_eq!(token, "from-flag");
    }

    #[test]
    fn env_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "CODACY_API_TOKEN=from-file\n").unwrap();

        let token = resolve_from(None, Some("from-env".to_string()), &env_file).unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn file_is_the_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "# comment\nCODACY_API_TOKEN=from-file\n").unwrap();

        let token = resolve_from(None, None, &env_file).unwrap();
        assert_eq!(token, "from-file");
    }

    #[test]
    fn empty_values_do_not_shadow_later_resolvers() {
        let token = resolve_from(
            Some("  ".to_string()),
            Some("from-env".to_string()),
            &missing_file(),
        )
        .unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn missing_everywhere_is_an_auth_error() {
        let err = resolve_from(None, None, &missing_file()).unwrap_err();
        assert!(matches!(err, ImporterError::Auth { .. }));
    }
}
