/// Pagination driver state definitions
///
/// The driver cycles `Fetching → Emitting → Advancing → Fetching` until a
/// budget, cursor or transport failure sends it to `Done`.
use std::fmt;

/// Represents the current state of the pagination driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// A page request is pending
    Fetching,

    /// Posts of the current page are being yielded
    Emitting,

    /// The current page is exhausted; deciding whether and where to go next
    Advancing,

    /// The sequence has ended; no transition leaves this state
    Done,
}

impl DriverState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: DriverState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Emitting)
                | (Self::Fetching, Self::Done)
                | (Self::Emitting, Self::Advancing)
                | (Self::Advancing, Self::Fetching)
                | (Self::Advancing, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Emitting => "emitting",
            Self::Advancing => "advancing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
