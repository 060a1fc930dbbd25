use snafu::Snafu;

/// Stable identifier for one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

impl SubmissionId {
    /// Creates a typed submission identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Lifecycle phase of one accepted submission.
///
/// `Validated` means the echo happened and the debounce timer is armed.
/// `Superseded`, `Fulfilled` and `Failed` are terminal; `Superseded` is the
/// only terminal phase that produces no bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionPhase {
    Validated,
    Pending,
    Superseded,
    Fulfilled,
    Failed,
}

impl SubmissionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubmissionPhase::Superseded | SubmissionPhase::Fulfilled | SubmissionPhase::Failed
        )
    }

    /// Applies a deterministic phase transition.
    ///
    /// Supersession is only legal while the timer is still armed; once a
    /// request has been dispatched it runs to completion and can only
    /// fulfill or fail.
    pub fn apply(self, transition: SubmissionTransition) -> Result<Self, TransitionError> {
        match (self, transition) {
            (SubmissionPhase::Validated, SubmissionTransition::Supersede) => {
                Ok(SubmissionPhase::Superseded)
            }
            (SubmissionPhase::Validated, SubmissionTransition::Dispatch) => {
                Ok(SubmissionPhase::Pending)
            }
            (SubmissionPhase::Pending, SubmissionTransition::Fulfill) => {
                Ok(SubmissionPhase::Fulfilled)
            }
            (SubmissionPhase::Pending, SubmissionTransition::Fail) => Ok(SubmissionPhase::Failed),
            (from, transition) => InvalidTransitionSnafu { from, transition }.fail(),
        }
    }
}

/// Events that move a submission between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionTransition {
    /// A newer submission arrived while the timer was still armed.
    Supersede,
    /// The debounce timer fired and the request went out.
    Dispatch,
    /// The request resolved with a well-formed answer.
    Fulfill,
    /// The request resolved with a transport, status or parse failure.
    Fail,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransitionError {
    #[snafu(display("transition {transition:?} is not legal from phase {from:?}"))]
    InvalidTransition {
        from: SubmissionPhase,
        transition: SubmissionTransition,
    },
}
