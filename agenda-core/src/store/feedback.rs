//! Outcome reporting for mutating store operations.

use std::fmt;

use serde::Serialize;

use crate::error::AgendaResult;

/// Confirmation returned by a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// What a collaborator shows the user after a mutation: a message and
/// whether the outcome was favorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub success: bool,
    pub message: String,
}

impl From<&AgendaResult<Notice>> for Feedback {
    fn from(result: &AgendaResult<Notice>) -> Self {
        match result {
            Ok(notice) => Feedback {
                success: true,
                message: notice.message.clone(),
            },
            Err(e) => Feedback {
                success: false,
                message: e.to_string(),
            },
        }
    }
}

impl From<AgendaResult<Notice>> for Feedback {
    fn from(result: AgendaResult<Notice>) -> Self {
        Feedback::from(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;

    #[test]
    fn feedback_from_outcomes() {
        let ok: AgendaResult<Notice> = Ok(Notice::new("Task created"));
        assert_eq!(
            Feedback::from(ok),
            Feedback {
                success: true,
                message: "Task created".into()
            }
        );

        let err: AgendaResult<Notice> = Err(AgendaError::DuplicateEvent);
        let feedback = Feedback::from(&err);
        assert!(!feedback.success);
        assert_eq!(feedback.message, "The events already exist in the calendar");
    }
}
