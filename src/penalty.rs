use std::fmt;

/// Progress of a penalty, as stored in the penalty tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenaltyState {
    /// Not yet in effect (code 0)
    NotEffective,
    /// In effect, not started (code 1)
    NotStarted,
    /// Being worked on (code 2)
    InProgress,
    /// Completed with reservations (code 3)
    BarelyPassed,
    /// Completed (code 4)
    Completed,
}

/// Label shown for codes outside the known range.
pub const UNKNOWN_LABEL: &str = "未知";

impl PenaltyState {
    /// Maps a stored state code to a state.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PenaltyState::NotEffective),
            1 => Some(PenaltyState::NotStarted),
            2 => Some(PenaltyState::InProgress),
            3 => Some(PenaltyState::BarelyPassed),
            4 => Some(PenaltyState::Completed),
            _ => None,
        }
    }

    /// Returns the stored code.
    pub fn code(self) -> i64 {
        match self {
            PenaltyState::NotEffective => 0,
            PenaltyState::NotStarted => 1,
            PenaltyState::InProgress => 2,
            PenaltyState::BarelyPassed => 3,
            PenaltyState::Completed => 4,
        }
    }

    /// Returns the label shown on the site.
    pub fn label(self) -> &'static str {
        match self {
            PenaltyState::NotEffective => "未生效",
            PenaltyState::NotStarted => "未開始",
            PenaltyState::InProgress => "進行中",
            PenaltyState::BarelyPassed => "勉強過",
            PenaltyState::Completed => "已完成",
        }
    }

    /// Label for a raw code, falling back to [`UNKNOWN_LABEL`].
    pub fn label_for(code: i64) -> &'static str {
        Self::from_code(code).map_or(UNKNOWN_LABEL, Self::label)
    }
}

impl fmt::Display for PenaltyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
