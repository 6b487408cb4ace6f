use std::fmt;

/// Submission lifecycle of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Events that drive [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Submitted,
    Resolved,
    Failed,
}

impl Status {
    /// Applies an event. Events that don't fit the current state leave it
    /// unchanged.
    pub fn on(
        self,
        event: StatusEvent,
    ) -> Self {
        match (self, event) {
            (_, StatusEvent::Submitted) => Self::Loading,
            (Self::Loading, StatusEvent::Resolved) => Self::Success,
            (Self::Loading, StatusEvent::Failed) => Self::Error,
            (state, _) => state,
        }
    }

    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }
}

impl fmt::Display for Status {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}
