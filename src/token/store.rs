//! Durable key-value storage for the signed-in credential.
//!
//! Each operation opens the file, takes an advisory lock on a sidecar
//! `.lock` file, does its work and releases everything before returning.
//! Writes go to a temp file that is renamed over the original.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use super::credentials::{Credential, SecureString, TokenKey};

type Entries = BTreeMap<String, String>;

/// Errors raised by the token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token store I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token store '{path}' is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize token store: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl TokenStore {
    /// Bind a store to `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self { path, lock_path }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: TokenKey) -> Result<Option<String>, TokenStoreError> {
        self.read_scoped(|entries| entries.get(key.as_str()).cloned())
    }

    pub fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError> {
        self.write_scoped(|entries| {
            entries.insert(key.as_str().to_string(), value.to_string());
        })
    }

    pub fn remove(&self, key: TokenKey) -> Result<(), TokenStoreError> {
        self.write_scoped(|entries| {
            entries.remove(key.as_str());
        })
    }

    /// Access token for request signing, if one is stored.
    pub fn access_token(&self) -> Result<Option<SecureString>, TokenStoreError> {
        Ok(self.get(TokenKey::AccessToken)?.map(SecureString::new))
    }

    /// True when an access token is stored. Read failures count as signed out.
    pub fn is_logged_in(&self) -> bool {
        match self.get(TokenKey::AccessToken) {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Token store unreadable, treating as signed out");
                false
            }
        }
    }

    /// Persist all four credential entries in one write.
    pub fn save_credential(&self, credential: &Credential) -> Result<(), TokenStoreError> {
        self.write_scoped(|entries| {
            entries.insert(
                TokenKey::AccessToken.as_str().to_string(),
                credential.access_token.expose().to_string(),
            );
            entries.insert(
                TokenKey::RefreshToken.as_str().to_string(),
                credential.refresh_token.expose().to_string(),
            );
            entries.insert(
                TokenKey::UserId.as_str().to_string(),
                credential.user_id.clone(),
            );
            entries.insert(
                TokenKey::UserEmail.as_str().to_string(),
                credential.user_email.clone(),
            );
        })
    }

    /// Read back the stored credential. `None` unless all four entries exist.
    pub fn credential(&self) -> Result<Option<Credential>, TokenStoreError> {
        self.read_scoped(|entries| {
            let value = |key: TokenKey| entries.get(key.as_str()).cloned();
            Some(Credential {
                access_token: SecureString::new(value(TokenKey::AccessToken)?),
                refresh_token: SecureString::new(value(TokenKey::RefreshToken)?),
                user_id: value(TokenKey::UserId)?,
                user_email: value(TokenKey::UserEmail)?,
            })
        })
    }

    /// Remove every credential entry in one write.
    pub fn logout(&self) -> Result<(), TokenStoreError> {
        self.write_scoped(|entries| {
            for key in TokenKey::all() {
                entries.remove(key.as_str());
            }
        })
    }

    fn read_scoped<R>(&self, f: impl FnOnce(&Entries) -> R) -> Result<R, TokenStoreError> {
        let _lock = self.acquire(LockMode::Shared)?;
        let entries = self.load()?;
        Ok(f(&entries))
    }

    fn write_scoped(&self, f: impl FnOnce(&mut Entries)) -> Result<(), TokenStoreError> {
        let _lock = self.acquire(LockMode::Exclusive)?;
        let mut entries = self.load()?;
        f(&mut entries);
        self.persist(&entries)
    }

    fn acquire(
        &self,
        mode: LockMode,
    ) -> Result<scopeguard::ScopeGuard<File, fn(File)>, TokenStoreError> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| self.io_error(&self.lock_path, e))?;

        let locked = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|e| self.io_error(&self.lock_path, e))?;

        let release: fn(File) = |file| {
            let _ = FileExt::unlock(&file);
        };
        Ok(scopeguard::guard(file, release))
    }

    fn load(&self) -> Result<Entries, TokenStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        toml::from_str(&content).map_err(|e| TokenStoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn persist(&self, entries: &Entries) -> Result<(), TokenStoreError> {
        let serialized = toml::to_string(entries)?;
        let temp = self.path.with_extension("tmp");

        fs::write(&temp, serialized).map_err(|e| self.io_error(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(&self.path, e))
    }

    fn ensure_parent(&self) -> Result<(), TokenStoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TokenStore) {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::open(dir.path().join("nested").join("tokens.toml"));
        (dir, store)
    }

    fn sample_credential() -> Credential {
        Credential {
            access_token: SecureString::new("access-1"),
            refresh_token: SecureString::new("refresh-1"),
            user_id: "u1".to_string(),
            user_email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn empty_store_reads_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(TokenKey::AccessToken).unwrap(), None);
        assert!(!store.is_logged_in());
        assert!(store.credential().unwrap().is_none());
    }

    #[test]
    fn set_get_remove() {
        let (_dir, store) = temp_store();

        store.set(TokenKey::UserEmail, "a@b.c").unwrap();
        assert_eq!(
            store.get(TokenKey::UserEmail).unwrap().as_deref(),
            Some("a@b.c")
        );

        store.remove(TokenKey::UserEmail).unwrap();
        assert_eq!(store.get(TokenKey::UserEmail).unwrap(), None);
    }

    #[test]
    fn credential_survives_reopen() {
        let (_dir, store) = temp_store();
        store.save_credential(&sample_credential()).unwrap();

        let reopened = TokenStore::open(store.path().to_path_buf());
        assert!(reopened.is_logged_in());
        assert_eq!(reopened.credential().unwrap(), Some(sample_credential()));
        assert_eq!(
            reopened.access_token().unwrap().unwrap().expose(),
            "access-1"
        );
    }

    #[test]
    fn partial_entries_are_not_a_credential() {
        let (_dir, store) = temp_store();
        store.set(TokenKey::AccessToken, "only-access").unwrap();

        assert!(store.is_logged_in());
        assert!(store.credential().unwrap().is_none());
    }

    #[test]
    fn logout_removes_all_keys() {
        let (_dir, store) = temp_store();
        store.save_credential(&sample_credential()).unwrap();

        store.logout().unwrap();

        for key in TokenKey::all() {
            assert_eq!(store.get(*key).unwrap(), None, "{} left behind", key.as_str());
        }
        assert!(!store.is_logged_in());
    }

    #[test]
    fn logout_keeps_unrelated_entries() {
        let (_dir, store) = temp_store();
        store.save_credential(&sample_credential()).unwrap();
        store
            .write_scoped(|entries| {
                entries.insert("theme".to_string(), "dark".to_string());
            })
            .unwrap();

        store.logout().unwrap();

        let theme = store.read_scoped(|entries| entries.get("theme").cloned()).unwrap();
        assert_eq!(theme.as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let (_dir, store) = temp_store();
        store.set(TokenKey::UserId, "u1").unwrap();
        std::fs::write(store.path(), "not = [valid").unwrap();

        assert!(matches!(
            store.get(TokenKey::UserId),
            Err(TokenStoreError::Parse { .. })
        ));
        assert!(!store.is_logged_in());
    }
}
