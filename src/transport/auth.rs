//! Authentication header building for API requests.

use crate::token::TokenStore;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the bearer header from the stored access token.
///
/// Returns `None` when no token is stored or the store cannot be read;
/// the request then goes out unauthenticated and the backend answers 401.
pub fn build_auth_header(tokens: &TokenStore) -> Option<AuthHeader> {
    match tokens.access_token() {
        Ok(Some(token)) if !token.expose().is_empty() => Some((
            "Authorization".to_string(),
            format!("Bearer {}", token.expose()),
        )),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read access token, sending request without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKey;
    use tempfile::TempDir;

    #[test]
    fn test_bearer_header() {
        let dir = TempDir::new().unwrap();
        let tokens = TokenStore::open(dir.path().join("tokens.toml"));
        tokens.set(TokenKey::AccessToken, "bearer-token-456").unwrap();

        let (name, value) = build_auth_header(&tokens).unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer bearer-token-456");
    }

    #[test]
    fn test_missing_token() {
        let dir = TempDir::new().unwrap();
        let tokens = TokenStore::open(dir.path().join("tokens.toml"));
        assert!(build_auth_header(&tokens).is_none());
    }

    #[test]
    fn test_empty_token() {
        let dir = TempDir::new().unwrap();
        let tokens = TokenStore::open(dir.path().join("tokens.toml"));
        tokens.set(TokenKey::AccessToken, "").unwrap();
        assert!(build_auth_header(&tokens).is_none());
    }
}
