// SPDX-License-Identifier: MIT

//! Journal follow-up state machine.
//!
//! Models the client-visible lifecycle of one prompt, one flow per
//! displayed reading. `Pending` shows the prompt with accept/reject
//! controls; reject is terminal, accept passes through `Generating` and
//! either reaches the terminal `Answered` state or falls back to
//! `Pending` with an inline error so accept can be retried.

/// Client-visible flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalFlow {
    /// Prompt shown, controls visible. Carries the previous attempt's
    /// error message after a failed generation.
    Pending { error: Option<String> },
    /// Accept in flight; controls hidden, loading indicator shown.
    Generating,
    /// Terminal: the user declined the prompt.
    Declined,
    /// Terminal: answer text displayed.
    Answered { answer: String },
}

/// An operation that is not legal in the current state.
#[derive(Debug, thiserror::Error)]
#[error("invalid journal transition: {0}")]
pub struct InvalidTransition(&'static str);

impl JournalFlow {
    pub fn new() -> Self {
        JournalFlow::Pending { error: None }
    }

    /// Reject the prompt. Only valid from `Pending`.
    pub fn reject(self) -> Result<Self, InvalidTransition> {
        match self {
            JournalFlow::Pending { .. } => Ok(JournalFlow::Declined),
            _ => Err(InvalidTransition("reject is only valid while pending")),
        }
    }

    /// Accept the prompt and begin generating. Only valid from `Pending`.
    pub fn accept(self) -> Result<Self, InvalidTransition> {
        match self {
            JournalFlow::Pending { .. } => Ok(JournalFlow::Generating),
            _ => Err(InvalidTransition("accept is only valid while pending")),
        }
    }

    /// Generation succeeded. Only valid from `Generating`.
    pub fn complete(self, answer: String) -> Result<Self, InvalidTransition> {
        match self {
            JournalFlow::Generating => Ok(JournalFlow::Answered { answer }),
            _ => Err(InvalidTransition("complete is only valid while generating")),
        }
    }

    /// Generation failed; back to `Pending` with an inline error.
    /// Only valid from `Generating`.
    pub fn fail(self, message: String) -> Result<Self, InvalidTransition> {
        match self {
            JournalFlow::Generating => Ok(JournalFlow::Pending {
                error: Some(message),
            }),
            _ => Err(InvalidTransition("fail is only valid while generating")),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JournalFlow::Declined | JournalFlow::Answered { .. })
    }
}

impl Default for JournalFlow {
    fn default() -> Self {
        Self::new()
    }
}
