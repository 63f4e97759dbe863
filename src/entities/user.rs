// 👤 User Entity - local account list and session handling
//
// Mirrors the browser flow: users live in local storage, a session is a
// small record cleared on logout. Passwords are stored as given; this is a
// demo directory, not real authentication security.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Active login. One at a time; logout removes it from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub name: String,
    pub authenticated_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,

    #[error("an account with email {0} already exists")]
    DuplicateEmail(String),

    #[error("no account for email {0}")]
    UnknownUser(String),

    #[error("invalid password")]
    InvalidPassword,
}

// ============================================================================
// USER DIRECTORY
// ============================================================================

/// In-memory user list. Loaded from / saved to `store::LocalStore` under the
/// `users` key by the caller.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        UserDirectory { users: Vec::new() }
    }

    pub fn from_users(users: Vec<User>) -> Self {
        UserDirectory { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn into_users(self) -> Vec<User> {
        self.users
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Register a new account. Validation matches the signup form: password
    /// confirmation, minimum length, unique email.
    pub fn signup(
        &mut self,
        name: &str,
        surname: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if self.find_by_email(email).is_some() {
            return Err(AuthError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: now,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Authenticate. Unknown email and wrong password are distinct failures
    /// so the caller can steer the user to signup vs. retry.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let user = self
            .find_by_email(email)
            .ok_or_else(|| AuthError::UnknownUser(email.to_string()))?;

        if user.password != password {
            return Err(AuthError::InvalidPassword);
        }

        Ok(Session {
            email: user.email.clone(),
            name: user.name.clone(),
            authenticated_at: now,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
