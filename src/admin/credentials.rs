//! Admin credential check.
//!
//! The password is compared by SHA-256 digest against the digest of the
//! configured constant. The constant ships with the binary, so this gates a
//! view and nothing more.

use std::sync::{Arc, OnceLock};

use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Anything that can decide whether a username/password pair is an admin.
///
/// A server-backed implementation would slot in here.
pub trait Authenticator {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `input` (64 chars).
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Checks submissions against a fixed username and password.
///
/// The expected digest is computed once, ideally in the background via
/// [`CredentialCheck::spawn_precompute`]. Until that lands, `verify` hashes
/// the constant inline.
#[derive(Clone)]
pub struct CredentialCheck {
    username: String,
    password: Arc<Zeroizing<String>>,
    expected_digest: Arc<OnceLock<String>>,
}

impl CredentialCheck {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Arc::new(Zeroizing::new(password.into())),
            expected_digest: Arc::new(OnceLock::new()),
        }
    }

    /// Compute and cache the expected digest on the calling thread.
    pub fn precompute(&self) -> &str {
        self.expected_digest.get_or_init(|| sha256_hex(&self.password))
    }

    /// Fire-and-forget precomputation on the blocking pool.
    pub fn spawn_precompute(&self) -> JoinHandle<()> {
        let check = self.clone();
        tokio::task::spawn_blocking(move || {
            let digest = check.precompute();
            debug!("Admin digest ready ({} hex chars)", digest.len());
        })
    }

    /// Whether the cached digest is available.
    pub fn is_primed(&self) -> bool {
        self.expected_digest.get().is_some()
    }

    fn expected(&self) -> String {
        match self.expected_digest.get() {
            Some(digest) => digest.clone(),
            None => {
                debug!("Admin digest not cached yet, hashing inline");
                sha256_hex(&self.password)
            }
        }
    }
}

impl Authenticator for CredentialCheck {
    fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            warn!("Admin sign-in rejected: unknown username");
            return false;
        }
        if sha256_hex(password) != self.expected() {
            warn!("Admin sign-in rejected: wrong password");
            return false;
        }
        true
    }
}

impl std::fmt::Debug for CredentialCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCheck")
            .field("username", &self.username)
            .field("primed", &self.is_primed())
            .finish_non_exhaustive()
    }
}
