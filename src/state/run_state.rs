/// Run state definitions for tracking a single archive run
///
/// A run moves strictly forward through these states; `Fatal` can be reached
/// from any state that is not already terminal.
use std::fmt;

/// Represents where an archive run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    // ===== Active States =====
    /// Storage root prepared, metadata being loaded
    Init,

    /// Reachability probe in flight
    Probing,

    /// Retrieval command running
    Retrieving,

    /// Metadata being updated and persisted
    Recording,

    /// Indexes being regenerated
    Rendering,

    // ===== Terminal States =====
    /// Run finished and indexes are current
    Done,

    /// Target answered 404; nothing was changed
    Skipped,

    /// Run aborted
    Fatal,
}

impl RunState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Skipped | Self::Fatal)
    }

    /// Returns true if the run ended without an error
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done | Self::Skipped)
    }

    /// Returns true if `next` may follow this state
    pub fn can_transition_to(&self, next: RunState) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Fatal {
            return true;
        }

        matches!(
            (self, next),
            (Self::Init, Self::Probing)
                | (Self::Probing, Self::Skipped)
                | (Self::Probing, Self::Retrieving)
                | (Self::Retrieving, Self::Recording)
                | (Self::Recording, Self::Rendering)
                | (Self::Rendering, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Probing => "probing",
            Self::Retrieving => "retrieving",
            Self::Recording => "recording",
            Self::Rendering => "rendering",
            Self::Done => "done",
            Self::Skipped => "skipped",
            Self::Fatal => "fatal",
        }
    }

    /// Returns all possible run states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Init,
            Self::Probing,
            Self::Retrieving,
            Self::Recording,
            Self::Rendering,
            Self::Done,
            Self::Skipped,
            Self::Fatal,
        ]
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
