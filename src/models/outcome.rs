use serde::Serialize;
use std::collections::BTreeSet;

/// Result of validating a batch of draft timecards for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub can_submit: bool,
    pub errors: Vec<String>,
    /// Records that need a break decision before the batch can go through.
    pub missing_breaks: BTreeSet<i64>,
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self {
            can_submit: true,
            errors: Vec::new(),
            missing_breaks: BTreeSet::new(),
        }
    }
}

impl ValidationOutcome {
    pub fn reject(&mut self, message: impl Into<String>) {
        self.can_submit = false;
        self.errors.push(message.into());
    }
}
