//! User accounts and the password-stripped session form.

use serde::{Deserialize, Serialize};

/// A stored account. Passwords are kept and compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(email: &str, password: &str) -> Self {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Exact, case-sensitive match on both fields.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    pub fn without_password(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// The logged-in user as persisted in the session slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}
