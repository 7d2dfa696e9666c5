use chrono::Local;
use serde::Serialize;

use crate::models::role::Role;

/// Classification of an auditable change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    UserEdit,
    AdminEdit,
    StatusChange,
    Recalculation,
}

impl AuditAction {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AuditAction::UserEdit => "user_edit",
            AuditAction::AdminEdit => "admin_edit",
            AuditAction::StatusChange => "status_change",
            AuditAction::Recalculation => "recalculation",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "user_edit" => Some(AuditAction::UserEdit),
            "admin_edit" => Some(AuditAction::AdminEdit),
            "status_change" => Some(AuditAction::StatusChange),
            "recalculation" => Some(AuditAction::Recalculation),
            _ => None,
        }
    }

    /// Manual overrides are attributed by the editor's role.
    pub fn for_edit_by(role: Role) -> Self {
        if role.is_privileged() {
            AuditAction::AdminEdit
        } else {
            AuditAction::UserEdit
        }
    }
}

/// One field-level change, as handed to the audit recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub timecard_id: i64,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub actor: String,
    pub action: AuditAction,
    pub changed_at: String, // ISO8601
}

impl AuditEntry {
    pub fn new(
        timecard_id: i64,
        field: &str,
        old_value: impl ToString,
        new_value: impl ToString,
        actor: &str,
        action: AuditAction,
    ) -> Self {
        Self {
            timecard_id,
            field: field.to_string(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
            actor: actor.to_string(),
            action,
            changed_at: Local::now().to_rfc3339(),
        }
    }
}
