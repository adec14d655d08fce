//! Pure poll state machine.

use crate::node::TransportError;

/// One per-attempt observation of the submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Transaction landed; `err` carries the recorded failure when present.
    Landed {
        /// Ledger-recorded error payload, absent on success.
        err: Option<String>,
    },
    /// Transaction is not visible at the queried commitment level yet.
    NotVisible,
    /// Status query failed at the transport layer.
    Transport {
        /// Transport-level failure.
        error: TransportError,
    },
}

/// Confirmation poll state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Awaiting the outcome of attempt `attempt` (1-based).
    Waiting {
        /// Attempt number about to be observed.
        attempt: u32,
    },
    /// Transaction landed without a recorded error.
    Succeeded,
    /// Transaction landed and the ledger rejected its effects.
    Failed {
        /// Ledger-recorded error payload.
        error: String,
    },
    /// Retry budget exhausted without a definitive status.
    TimedOut,
}

impl PollState {
    /// Returns true for states that accept no further observations.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting { .. })
    }

    /// Applies one observation. Terminal states absorb; a waiting state
    /// resolves, retries, or times out when the attempt budget is spent.
    #[must_use]
    pub fn advance(self, observation: Observation, max_attempts: u32) -> Self {
        let Self::Waiting { attempt } = self else {
            return self;
        };
        match observation {
            Observation::Landed { err: None } => Self::Succeeded,
            Observation::Landed { err: Some(error) } => Self::Failed { error },
            Observation::NotVisible | Observation::Transport { .. } => {
                if attempt >= max_attempts {
                    Self::TimedOut
                } else {
                    Self::Waiting {
                        attempt: attempt.saturating_add(1),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error_resolves_to_success() {
        let state = PollState::Waiting { attempt: 1 };
        assert_eq!(
            state.advance(Observation::Landed { err: None }, 20),
            PollState::Succeeded
        );
    }

    #[test]
    fn recorded_error_resolves_to_failure() {
        let state = PollState::Waiting { attempt: 5 };
        assert_eq!(
            state.advance(
                Observation::Landed {
                    err: Some("InstructionError".to_owned()),
                },
                20,
            ),
            PollState::Failed {
                error: "InstructionError".to_owned(),
            }
        );
    }

    #[test]
    fn not_visible_retries_while_attempts_remain() {
        let state = PollState::Waiting { attempt: 1 };
        assert_eq!(
            state.advance(Observation::NotVisible, 20),
            PollState::Waiting { attempt: 2 }
        );
    }

    #[test]
    fn transport_failure_counts_like_not_visible() {
        let state = PollState::Waiting { attempt: 3 };
        assert_eq!(
            state.advance(
                Observation::Transport {
                    error: TransportError::Failure {
                        message: "connection reset".to_owned(),
                    },
                },
                20,
            ),
            PollState::Waiting { attempt: 4 }
        );
    }

    #[test]
    fn final_attempt_without_resolution_times_out() {
        let state = PollState::Waiting { attempt: 20 };
        assert_eq!(
            state.advance(Observation::NotVisible, 20),
            PollState::TimedOut
        );
    }

    #[test]
    fn terminal_states_absorb_observations() {
        assert_eq!(
            PollState::Succeeded.advance(Observation::NotVisible, 20),
            PollState::Succeeded
        );
        assert_eq!(
            PollState::TimedOut.advance(Observation::Landed { err: None }, 20),
            PollState::TimedOut
        );
    }

    #[test]
    fn terminal_classification_matches_variants() {
        assert!(!PollState::Waiting { attempt: 1 }.is_terminal());
        assert!(PollState::Succeeded.is_terminal());
        assert!(
            PollState::Failed {
                error: "err".to_owned(),
            }
            .is_terminal()
        );
        assert!(PollState::TimedOut.is_terminal());
    }
}
