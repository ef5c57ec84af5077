use serde::{Deserialize, Serialize};

/// A stored user record, including the credential field.
///
/// Never serialized to clients directly; convert with [`sanitize`] first.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    pub email: String,
    /// Unique login name
    pub username: String,
    /// Plaintext password, see `utils::auth::verify_password`
    pub password: String,
    /// Inactive users cannot log in
    pub is_active: bool,
}

/// Validated input for creating a user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
    pub is_active: bool,
}

/// Partial update set. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.username.is_none()
            && self.is_active.is_none()
    }

    /// Apply the set fields onto an existing record
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// The outward-facing shape of a user: every field except `password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
}

impl From<User> for SanitizedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

/// Strip the credential field from a user before it leaves the process
pub fn sanitize(user: User) -> SanitizedUser {
    SanitizedUser::from(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            email: "a@b.com".to_string(),
            username: "a".to_string(),
            password: "secret".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_sanitize_drops_password() {
        let json = serde_json::to_value(sanitize(sample_user())).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert_eq!(object.len(), 4);
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["username"], "a");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(UserChanges::default().is_empty());

        let changes = UserChanges {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_apply_changes_only_touches_set_fields() {
        let mut user = sample_user();
        let changes = UserChanges {
            email: Some("new@b.com".to_string()),
            is_active: Some(false),
            ..Default::default()
        };

        changes.apply_to(&mut user);

        assert_eq!(user.email, "new@b.com");
        assert!(!user.is_active);
        assert_eq!(user.username, "a");
        assert_eq!(user.password, "secret");
        assert_eq!(user.id, 7);
    }
}
