use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Talent,
    InHouse,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Talent => "talent",
            Role::InHouse => "in_house",
            Role::Admin => "admin",
        }
    }

    /// Helper: convert input from CLI (any case, dash or underscore)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().replace('-', "_").as_str() {
            "talent" => Some(Role::Talent),
            "in_house" | "inhouse" => Some(Role::InHouse),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles allowed to edit records past draft and to write admin notes.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::InHouse)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
