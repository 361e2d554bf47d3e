// ── Persisted login session ──
//
// `session.json` next to the config file holds the user record and its
// bearer token. Its presence is what makes requests authenticated.
// `LINKDECK_TOKEN` overrides the stored token for scripted use.

use std::io::Write;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use linkdeck_core::{Session, User};

use crate::ConfigError;

/// Environment variable that supplies a bearer token directly.
pub const TOKEN_ENV: &str = "LINKDECK_TOKEN";

/// On-disk shape of `session.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl StoredSession {
    pub fn from_session(session: &Session) -> Self {
        Self {
            token: session.token().expose_secret().to_owned(),
            user: session.user.clone(),
        }
    }

    pub fn into_session(self) -> Session {
        Session::new(SecretString::from(self.token), self.user)
    }
}

/// Read a stored session. A missing file means "logged out".
pub fn load_session_from(path: &Path) -> Result<Option<Session>, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let stored: StoredSession = serde_json::from_str(&raw)?;
    if stored.token.is_empty() {
        return Ok(None);
    }
    Ok(Some(stored.into_session()))
}

/// Write the session with owner-only permissions where supported.
pub fn save_session_to(session: &Session, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&StoredSession::from_session(session))?;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(json.as_bytes())?;
    info!(path = %path.display(), "session saved");
    Ok(())
}

/// Remove the stored session. Returns `true` if there was one.
pub fn clear_session_at(path: &Path) -> Result<bool, ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "session cleared");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Combine the stored session with an environment token. A non-empty
/// env token wins; the stored user record is kept only when its token
/// is the same one.
pub fn resolve_session(stored: Option<Session>, env_token: Option<String>) -> Option<Session> {
    match env_token.filter(|t| !t.trim().is_empty()) {
        Some(token) => {
            debug!("using bearer token from {TOKEN_ENV}");
            let user = stored
                .filter(|s| s.token().expose_secret() == token)
                .and_then(|s| s.user);
            Some(Session::new(SecretString::from(token), user))
        }
        None => stored,
    }
}

// ── Canonical-path wrappers ─────────────────────────────────────────

/// Load the active session: `LINKDECK_TOKEN`, else `session.json`.
pub fn load_session() -> Result<Option<Session>, ConfigError> {
    let stored = load_session_from(&crate::session_path())?;
    Ok(resolve_session(stored, std::env::var(TOKEN_ENV).ok()))
}

pub fn save_session(session: &Session) -> Result<(), ConfigError> {
    save_session_to(session, &crate::session_path())
}

pub fn clear_session() -> Result<bool, ConfigError> {
    clear_session_at(&crate::session_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            created_at: None,
            token: None,
        }
    }

    fn session(token: &str) -> Session {
        Session::new(SecretString::from(token.to_string()), Some(user()))
    }

    #[test]
    fn save_load_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert!(load_session_from(&path).unwrap().is_none());

        save_session_to(&session("tok-1"), &path).unwrap();
        let loaded = load_session_from(&path).unwrap().unwrap();
        assert_eq!(loaded.token().expose_secret(), "tok-1");
        assert_eq!(loaded.user, Some(user()));

        assert!(clear_session_at(&path).unwrap());
        assert!(!clear_session_at(&path).unwrap());
        assert!(load_session_from(&path).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_session_to(&session("tok"), &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_world_readable_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        save_session_to(&session("tok"), &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_session_from(&path),
            Err(ConfigError::Session(_))
        ));
    }

    #[test]
    fn env_token_overrides_stored_session() {
        let resolved = resolve_session(Some(session("stored")), Some("from-env".into())).unwrap();
        assert_eq!(resolved.token().expose_secret(), "from-env");
        assert!(resolved.user.is_none());

        let same = resolve_session(Some(session("tok")), Some("tok".into())).unwrap();
        assert_eq!(same.user, Some(user()));
    }

    #[test]
    fn blank_env_token_is_ignored() {
        assert!(resolve_session(None, Some("  ".into())).is_none());
        let kept = resolve_session(Some(session("stored")), None).unwrap();
        assert_eq!(kept.token().expose_secret(), "stored");
    }
}
