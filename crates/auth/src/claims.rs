//! Session token claims

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried in a session token.
///
/// The set is closed: a signed token naming any other role fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The user a token is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
    pub display_name: String,
}

/// Signed token payload.
///
/// Field names on the wire follow the compact JWT conventions used by the
/// tokens already in circulation (`iss`, `iat`, `exp`, `user_id`, `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Unix seconds
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Unix seconds; the token is dead from this instant on
    #[serde(rename = "exp")]
    pub expires_at: i64,
    #[serde(rename = "user_id")]
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Claims {
    /// Identity fields, without the timing envelope
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.subject_id,
            email: self.email.clone(),
            role: self.role,
            display_name: self.display_name.clone(),
        }
    }

    /// Seconds of validity left at `now`, zero once expired
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}
