//! Session context.

use fitpin_commerce::{UserEmail, ValidationError};
use serde::{Deserialize, Serialize};

/// Who is using the app.
///
/// Passed explicitly into every screen. An empty context means signed out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<UserEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Height in centimeters, required by try-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl SessionContext {
    /// Create a signed-in session.
    pub fn signed_in(email: impl Into<UserEmail>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the user's height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Check if a non-blank email is present.
    pub fn is_signed_in(&self) -> bool {
        self.email.as_ref().is_some_and(|email| !email.is_empty())
    }

    /// The signed-in email.
    pub fn require_email(&self) -> Result<&UserEmail, ValidationError> {
        self.email
            .as_ref()
            .filter(|email| !email.is_empty())
            .ok_or(ValidationError::NotSignedIn)
    }

    /// The user's height, when known and positive.
    pub fn require_height(&self) -> Result<f64, ValidationError> {
        self.height
            .filter(|h| h.is_finite() && *h > 0.0)
            .ok_or(ValidationError::HeightMissing)
    }

    /// Forget everything.
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_session() {
        let session = SessionContext::signed_in("me@fitpin.kr")
            .with_name("핏핀")
            .with_height(172.0);
        assert!(session.is_signed_in());
        assert_eq!(session.require_email().unwrap().as_str(), "me@fitpin.kr");
        assert_eq!(session.require_height(), Ok(172.0));
    }

    #[test]
    fn test_blank_email_is_signed_out() {
        let session = SessionContext::signed_in("   ");
        assert!(!session.is_signed_in());
        assert_eq!(session.require_email(), Err(ValidationError::NotSignedIn));
    }

    #[test]
    fn test_height_must_be_positive() {
        let session = SessionContext::signed_in("me@fitpin.kr").with_height(0.0);
        assert_eq!(session.require_height(), Err(ValidationError::HeightMissing));
        assert_eq!(
            SessionContext::default().require_height(),
            Err(ValidationError::HeightMissing)
        );
    }

    #[test]
    fn test_sign_out_clears() {
        let mut session = SessionContext::signed_in("me@fitpin.kr").with_height(170.0);
        session.sign_out();
        assert_eq!(session, SessionContext::default());
    }
}
