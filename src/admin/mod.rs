//! Admin access for the confession board.
//!
//! ## Model
//!
//! - A single shared admin account, configured as a username plus a password
//!   whose SHA-256 digest is precomputed at startup
//! - One process-wide session flag, false on every start
//! - Confessions are only exposed while the flag is set
//!
//! None of this is a security boundary: the credentials are shipped with the
//! binary and the slot file is plain JSON.
//!
//! ## Usage
//!
//! ```ignore
//! let check = CredentialCheck::new(&config.admin.username, &config.admin.password);
//! check.spawn_precompute();
//!
//! let mut gate = VisibilityGate::new();
//! gate.admit(check.verify("Rocky", "Rocky123"));
//! let visible = gate.reveal(store.records());
//! ```

pub mod credentials;
pub mod gate;

pub use credentials::{sha256_hex, Authenticator, CredentialCheck};
pub use gate::{SessionState, VisibilityGate};
