//! Match State Machine
//!
//! A match starts `Running` and ends exactly once. There is no way back out
//! of `Ended`; callers start a fresh match instead.

use crate::Side;

/// Why a match stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Scored(Side),
    HitCutoff,
    Quit,
    TickLimit,
}

/// Match states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Running,
    Ended(EndReason),
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: MatchState,
    pub to_state: MatchState,
}

/// Match Finite State Machine
#[derive(Debug, Clone)]
pub struct MatchFsm {
    state: MatchState,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self {
            state: MatchState::Running,
        }
    }

    /// Get current state
    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MatchState::Running
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.state {
            MatchState::Running => None,
            MatchState::Ended(reason) => Some(reason),
        }
    }

    /// Attempt to end the match
    pub fn end(&mut self, reason: EndReason) -> TransitionResult {
        let from_state = self.state;
        match from_state {
            MatchState::Running => {
                self.state = MatchState::Ended(reason);
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: self.state,
                }
            }
            MatchState::Ended(_) => TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
            },
        }
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}
