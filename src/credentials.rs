//! Account credentials for the PetFriends service.
//!
//! Credentials are never persisted by the CLI itself; they come from CLI
//! flags, `PETFRIENDS_EMAIL` / `PETFRIENDS_PASSWORD`, or the config file.

use crate::error::CliError;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Build credentials from optional sources; empty strings count as missing.
    pub fn require(email: Option<String>, password: Option<String>) -> Result<Self, CliError> {
        let email = email.filter(|e| !e.trim().is_empty());
        let password = password.filter(|p| !p.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(CliError::MissingCredentials),
        }
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
