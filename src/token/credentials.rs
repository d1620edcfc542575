//! Credential types held by the token store.

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs or storage.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Token and identity bundle persisted after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: SecureString,
    pub refresh_token: SecureString,
    pub user_id: String,
    pub user_email: String,
}

/// Keys of the persisted credential entries.
///
/// The `as_str()` value is the on-disk key. Once published, do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
    UserId,
    UserEmail,
}

impl TokenKey {
    /// Stable storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::UserId => "user_id",
            Self::UserEmail => "user_email",
        }
    }

    /// All variants for iteration.
    pub fn all() -> &'static [TokenKey] {
        &[
            Self::AccessToken,
            Self::RefreshToken,
            Self::UserId,
            Self::UserEmail,
        ]
    }
}
