//! Shared-secret gate in front of every catalog write.

use tracing::warn;

use crate::{admin::AdminError, secret::Secret};

/// Proof that the caller passed the admin gate.
///
/// Only [`AdminGate::login`] hands these out; catalog writes take one by
/// reference.
#[derive(Debug)]
pub struct AdminSession {
    _private: (),
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    password: Secret,
}

impl AdminGate {
    #[must_use]
    pub fn new(password: Secret) -> Self {
        Self { password }
    }

    /// Whether a password has been configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.password.is_blank()
    }

    /// Exchange the shared admin password for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotConfigured`] when no password is set, and
    /// [`AdminError::InvalidPassword`] when `candidate` does not match.
    pub fn login(&self, candidate: &str) -> Result<AdminSession, AdminError> {
        if !self.is_configured() {
            return Err(AdminError::NotConfigured);
        }

        if !self.password.matches(candidate) {
            warn!("rejected admin login");

            return Err(AdminError::InvalidPassword);
        }

        Ok(AdminSession { _private: () })
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> AdminSession {
    AdminSession { _private: () }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_opens_a_session() {
        let gate = AdminGate::new(Secret::new("admin123"));

        assert!(gate.login("admin123").is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let gate = AdminGate::new(Secret::new("admin123"));

        let result = gate.login("admin124");

        assert!(
            matches!(result, Err(AdminError::InvalidPassword)),
            "expected InvalidPassword, got {result:?}"
        );
    }

    #[test]
    fn blank_password_disables_the_gate() {
        let gate = AdminGate::new(Secret::new("  "));

        assert!(!gate.is_configured());

        let result = gate.login("  ");

        assert!(
            matches!(result, Err(AdminError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );
    }
}
