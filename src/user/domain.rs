use crate::mail::Email;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents the account a verification email is sent for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    /// Any change of the password invalidates the tokens issued so far.
    pub password_hash: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub verified: bool,
}

impl User {
    /// Returns a brand new, never logged in and not yet verified, user.
    pub fn new(email: Email) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: None,
            last_login: None,
            verified: false,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Marks the user as verified, consuming any verification token issued before.
    pub fn verify(&mut self) {
        self.verified = true;
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::mail::Email;

    #[test]
    fn new_user_is_not_verified() {
        let email = Email::try_from("employer@example.com").unwrap();
        let user = User::new(email.clone());

        assert_eq!(user.email, email);
        assert!(user.password_hash.is_none());
        assert!(user.last_login.is_none());
        assert!(!user.is_verified());
    }

    #[test]
    fn verify_user() {
        let mut user = User::new(Email::try_from("employer@example.com").unwrap());
        user.verify();
        assert!(user.is_verified());
    }

    #[test]
    fn new_users_have_distinct_ids() {
        let email = Email::try_from("employer@example.com").unwrap();
        assert_ne!(User::new(email.clone()).id, User::new(email).id);
    }
}
