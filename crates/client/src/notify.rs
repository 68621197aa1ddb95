//! User-facing notices.
//!
//! Every failure and noteworthy outcome is surfaced as a transient notice
//! for the UI to render; nothing here throws.

/// What the UI should show the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),

    /// The stored credential was refused; the UI should route to the login
    /// flow.
    LoginRequired,
}

impl Notice {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self::Info(message.into())
    }

    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}
