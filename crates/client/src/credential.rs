//! Credential handling and persistence.
//!
//! A credential is accepted only when it looks like a signed token: exactly
//! three non-empty dot-separated segments. Structure is all that is checked
//! here — cryptographic validity is the server's verifier's concern.

use std::{fmt, fs, path::PathBuf};

use thiserror::Error;
use tracing::warn;
use zeroize::Zeroize;

#[derive(Debug, Error)]
#[error("credential is not three dot-separated segments")]
pub struct CredentialFormatError;

/// A structurally valid bearer credential. The backing string is wiped on
/// drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accept a raw token, stripping any surrounding quotes left over from
    /// naive storage serialization.
    ///
    /// # Errors
    ///
    /// Fails when the token is not three non-empty dot-separated segments.
    pub fn new(raw: &str) -> Result<Self, CredentialFormatError> {
        let token = raw.trim().trim_matches('"');

        let segments: Vec<&str> = token.split('.').collect();

        if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(CredentialFormatError);
        }

        Ok(Self(token.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(**redacted**)")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Durable storage for the credential (the `localStorage` of this client).
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;

    fn persist(&mut self, token: &str);

    fn clear(&mut self);
}

/// Keeps the credential only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Option<String>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn persist(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

/// Stores the credential in a file. Storage failures are logged and
/// swallowed — losing persistence only costs the user a fresh login.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
            Ok(_) => None,
            Err(_) => None,
        }
    }

    fn persist(&mut self, token: &str) {
        if let Err(error) = fs::write(&self.path, token) {
            warn!("failed to persist credential: {error}");
        }
    }

    fn clear(&mut self) {
        if let Err(error) = fs::remove_file(&self.path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            warn!("failed to clear stored credential: {error}");
        }
    }
}
