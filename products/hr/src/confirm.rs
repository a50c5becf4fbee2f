/// Prompt shown before committing an inline edit.
pub const UPDATE_PROMPT: &str = "Update employee details?";
/// Prompt shown before removing a record.
pub const DELETE_PROMPT: &str = "Delete this employee from database?";

/// Synchronous yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Answers every prompt with yes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(message, "confirmation assumed");
        true
    }
}
