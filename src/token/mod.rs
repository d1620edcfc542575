//! Local persistence of the signed-in user's tokens and identity.

mod credentials;
mod store;

pub use credentials::{Credential, SecureString, TokenKey};
pub use store::{TokenStore, TokenStoreError};
