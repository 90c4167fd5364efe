use crate::ConfigError;
use std::fmt::{self, Debug, Formatter};

/// The details needed to log in to a ChurchTools instance.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    hostname: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new<H, U, P>(hostname: H, username: U, password: P) -> Self
    where
        H: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        Credentials {
            hostname: hostname.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn hostname(&self) -> &str { &self.hostname }

    pub fn username(&self) -> &str { &self.username }

    pub fn password(&self) -> &str { &self.password }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::MissingHostname);
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        Ok(())
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
