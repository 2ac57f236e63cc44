//! Credential generation and secret redaction.
//!
//! - [`generate_credential`] - Random replacement credentials
//! - [`OutputMasker`] - Scrubs secret values out of text before display
//!
//! # Example
//!
//! ```
//! use offboard::secrets::{generate_credential, OutputMasker, MIN_CREDENTIAL_LENGTH};
//! use secrecy::ExposeSecret;
//!
//! let credential = generate_credential(8);
//! assert_eq!(credential.expose_secret().len(), MIN_CREDENTIAL_LENGTH);
//!
//! let mut masker = OutputMasker::new();
//! masker.add_secret(&credential);
//! let line = format!("rejected: {}", credential.expose_secret());
//! assert_eq!(masker.mask(&line), "rejected: [REDACTED]");
//! ```

pub mod generate;
pub mod mask;

pub use generate::{
    generate_credential, CREDENTIAL_POOL, DEFAULT_CREDENTIAL_LENGTH, MIN_CREDENTIAL_LENGTH,
};
pub use mask::OutputMasker;
