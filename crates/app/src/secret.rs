//! Secret strings: API keys and the admin password.

use std::{fmt, str::FromStr};

use zeroize::Zeroize;

/// A string that never shows up in `Debug` output and is wiped on drop.
#[derive(Clone, Default)]
pub struct Secret {
    value: String,
}

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The secret text. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Whether the secret is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Compare with `candidate` without short-circuiting on the first
    /// differing byte.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.value.as_bytes();
        let candidate = candidate.as_bytes();

        let difference = expected
            .iter()
            .zip(candidate)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b));

        difference == 0 && expected.len() == candidate.len()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl FromStr for Secret {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = Secret::new("admin123");

        assert_eq!(format!("{secret:?}"), "Secret(**redacted**)");
    }

    #[test]
    fn matches_requires_exact_value() {
        let secret = Secret::new("admin123");

        assert!(secret.matches("admin123"));
        assert!(!secret.matches("admin12"));
        assert!(!secret.matches("admin1234"));
        assert!(!secret.matches("Admin123"));
    }

    #[test]
    fn blank_detection() {
        assert!(Secret::new("  ").is_blank());
        assert!(!Secret::new("x").is_blank());
    }
}
