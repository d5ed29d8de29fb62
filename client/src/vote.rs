/// A signed, togglable per-user vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Wire integers other than 1/-1 mean "no vote".
    pub fn from_raw(raw: Option<i32>) -> Option<Self> {
        match raw {
            Some(1) => Some(Self::Up),
            Some(-1) => Some(Self::Down),
            _ => None,
        }
    }
}

/// Outcome of settling a confirmed vote against the previous local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledVote {
    pub user_vote: Option<VoteValue>,
    pub delta: i64,
}

/// Toggle semantics: re-casting the current value un-votes; otherwise the
/// requested value replaces whatever was there. The count delta is
/// `new_vote_or_zero - old_vote_or_zero`, applied unclamped (a score can go
/// negative).
pub fn settle(current: Option<VoteValue>, requested: VoteValue) -> SettledVote {
    let old = current.map_or(0i64, |v| v.as_i32() as i64);
    if current == Some(requested) {
        SettledVote {
            user_vote: None,
            delta: -old,
        }
    } else {
        SettledVote {
            user_vote: Some(requested),
            delta: requested.as_i32() as i64 - old,
        }
    }
}
