use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub is_admin: bool,
}

/// Payload stored in the session cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub is_admin: bool,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            is_admin: user.is_admin,
        }
    }
}

/// Who is making a request, as resolved from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    User(String),
    Admin(String),
}

impl Identity {
    /// Subject name used by the access policy.
    #[must_use]
    pub const fn subject(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::User(_) => "user",
            Self::Admin(_) => "admin",
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(name) | Self::Admin(name) => Some(name),
        }
    }
}

impl From<Session> for Identity {
    fn from(session: Session) -> Self {
        if session.is_admin {
            Self::Admin(session.username)
        } else {
            Self::User(session.username)
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.username() {
            Some(name) => write!(f, "{}:{name}", self.subject()),
            None => f.write_str(self.subject()),
        }
    }
}
