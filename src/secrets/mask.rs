//! Redaction of secret values in text headed for the console or logs.

use secrecy::{ExposeSecret, SecretString};

/// Replaces registered secret values in text before it is displayed.
///
/// Remote services occasionally echo request fields back in error messages;
/// anything derived from a remote error passes through a masker before it
/// reaches the UI or a log line.
///
/// # Example
///
/// ```
/// use offboard::secrets::OutputMasker;
/// use secrecy::SecretString;
///
/// let mut masker = OutputMasker::new();
/// masker.add_secret(&SecretString::from("Tr0ub4dor&3-horse-battery".to_string()));
///
/// let output = masker.mask("password 'Tr0ub4dor&3-horse-battery' is too weak");
/// assert_eq!(output, "password '[REDACTED]' is too weak");
/// ```
pub struct OutputMasker {
    secrets: Vec<SecretString>,
    mask: String,
}

impl OutputMasker {
    /// Create a new masker with the default `[REDACTED]` mask.
    pub fn new() -> Self {
        Self::with_mask("[REDACTED]")
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            secrets: Vec::new(),
            mask: mask.into(),
        }
    }

    /// Register a secret value to be masked. Empty secrets are ignored.
    pub fn add_secret(&mut self, secret: &SecretString) {
        if !secret.expose_secret().is_empty() {
            self.secrets
                .push(SecretString::from(secret.expose_secret().to_string()));
        }
    }

    /// Mask any registered secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        let mut result = input.to_string();
        for secret in &self.secrets {
            result = result.replace(secret.expose_secret(), &self.mask);
        }
        result
    }

    /// Get the number of registered secrets.
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}
