//! Customer and staff profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmstand_core::{Email, ProfileId, Role};

/// A profile row, keyed by the identity provider's account ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Whether this profile may use the admin API.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Details submitted when an account first signs in.
///
/// Password signups supply everything; social and phone logins often only
/// know the email, so the other fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub email: Email,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub phone: String,
}

impl NewProfile {
    /// Username to store: the supplied one, or the email's local part.
    #[must_use]
    pub fn username(&self) -> String {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.email.local_part())
            .to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_username_defaults_to_local_part() {
        let profile: NewProfile =
            serde_json::from_str(r#"{"email": "sam.green@farm.example"}"#).unwrap();
        assert_eq!(profile.username(), "sam.green");
    }

    #[test]
    fn test_blank_username_is_ignored() {
        let profile: NewProfile =
            serde_json::from_str(r#"{"email": "sam@farm.example", "username": "  "}"#).unwrap();
        assert_eq!(profile.username(), "sam");
    }

    #[test]
    fn test_explicit_username() {
        let profile: NewProfile =
            serde_json::from_str(r#"{"email": "sam@farm.example", "username": "samg"}"#).unwrap();
        assert_eq!(profile.username(), "samg");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        assert!(serde_json::from_str::<NewProfile>(r#"{"email": "sam"}"#).is_err());
    }
}
