use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Moderation state of an account, set only by administrators.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Active,
    Hold,
    Ban,
}

impl UserStatus {
    pub fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "active" => Some(UserStatus::Active),
            "hold" => Some(UserStatus::Hold),
            "ban" => Some(UserStatus::Ban),
            _ => None,
        }
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let user_status = match self {
            UserStatus::Active => "active",
            UserStatus::Hold => "hold",
            UserStatus::Ban => "ban",
        };
        write!(f, "{}", user_status)
    }
}
