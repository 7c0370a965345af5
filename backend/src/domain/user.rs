//! User account entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::validation::{ValidationError, email_shaped, non_empty};

/// Input payload for creating or updating a user.
///
/// The password arrives already hashed; this layer never sees or chooses a
/// hashing algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Pre-hashed password material.
    pub password_hash: String,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    registered_at: DateTime<Utc>,
}

impl User {
    /// Register a new user with a fresh id and the current timestamp.
    pub fn register(draft: UserDraft) -> Result<Self, ValidationError> {
        let mut user = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            registered_at: Utc::now(),
        };
        user.apply(draft)?;
        Ok(user)
    }

    /// Rehydrate a user from stored parts.
    pub(crate) fn from_parts(
        id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            registered_at,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Registration timestamp (UTC).
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Replace the account data, re-validating every field.
    pub fn update(&mut self, draft: UserDraft) -> Result<(), ValidationError> {
        self.apply(draft)
    }

    fn apply(&mut self, draft: UserDraft) -> Result<(), ValidationError> {
        self.name = non_empty(draft.name, "name")?;
        self.email = email_shaped(draft.email)?;
        self.password_hash = non_empty(draft.password_hash, "passwordHash")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> UserDraft {
        UserDraft {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
        }
    }

    #[rstest]
    fn register_accepts_prehashed_password() {
        let user = User::register(draft()).expect("valid draft");
        assert_eq!(user.name(), "Ana");
        assert_eq!(user.password_hash(), "$argon2id$stub");
    }

    #[rstest]
    fn register_rejects_malformed_email() {
        let mut input = draft();
        input.email = "not-an-email".to_owned();
        let err = User::register(input).expect_err("malformed email");
        assert!(matches!(err, ValidationError::InvalidEmail { .. }));
    }

    #[rstest]
    fn update_keeps_identity_and_timestamp() {
        let mut user = User::register(draft()).expect("valid draft");
        let id = user.id();
        let registered_at = user.registered_at();

        let mut changed = draft();
        changed.name = "Beatriz".to_owned();
        user.update(changed).expect("valid update");

        assert_eq!(user.id(), id);
        assert_eq!(user.registered_at(), registered_at);
        assert_eq!(user.name(), "Beatriz");
    }
}
