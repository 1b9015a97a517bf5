/// Synchronous user confirmation asked before a destructive action.
pub trait ConfirmationGate: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers from a flag the caller already collected, e.g. a `confirmed`
/// field in a request body.
pub struct PresetConfirmation(pub bool);

impl ConfirmationGate for PresetConfirmation {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
