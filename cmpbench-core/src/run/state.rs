use std::fmt;

use tracing::debug;

use crate::domain::Algorithm;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Inside the warm-up window; measurements discarded.
    WarmUp,
    /// The tool reported success but left no archive behind.
    MissingArchive,
    DecompressFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::WarmUp => "warm-up",
            SkipReason::MissingArchive => "archive missing",
            SkipReason::DecompressFailed => "decompression failed",
        })
    }
}

/// Progress of one repetition:
/// `Pending -> Compressing -> Decompressing -> Recorded | Skipped`,
/// with `Aborted` reachable from `Compressing` and `Skipped` from
/// `Compressing` when no archive was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Compressing,
    Decompressing,
    Recorded,
    Aborted,
    Skipped(SkipReason),
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Recorded | RunState::Aborted | RunState::Skipped(_)
        )
    }

    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Pending, Compressing)
                | (Compressing, Decompressing)
                | (Compressing, Aborted)
                | (Compressing, Skipped(SkipReason::MissingArchive))
                | (Decompressing, Recorded)
                | (Decompressing, Skipped(_))
        )
    }
}

/// Tracks one (dataset, algorithm, repetition) through its states.
#[derive(Debug)]
pub struct Run<'a> {
    pub dataset: &'a str,
    pub algorithm: Algorithm,
    pub repetition: u32,
    state: RunState,
}

impl<'a> Run<'a> {
    pub fn new(dataset: &'a str, algorithm: Algorithm, repetition: u32) -> Self {
        Self {
            dataset,
            algorithm,
            repetition,
            state: RunState::Pending,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(
            "{}/{}/rep{}: {:?} -> {:?}",
            self.dataset, self.algorithm, self.repetition, self.state, next
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let mut r = Run::new("D", Algorithm::Zip, 1);
        r.advance(RunState::Compressing);
        r.advance(RunState::Decompressing);
        r.advance(RunState::Recorded);
        assert!(r.state().is_terminal());
    }

    #[test]
    fn abort_only_from_compressing() {
        assert!(RunState::Compressing.can_advance_to(RunState::Aborted));
        assert!(!RunState::Decompressing.can_advance_to(RunState::Aborted));
        assert!(!RunState::Pending.can_advance_to(RunState::Recorded));
        assert!(!RunState::Recorded.can_advance_to(RunState::Compressing));
    }

    #[test]
    fn warm_up_is_skipped_after_decompressing() {
        assert!(RunState::Decompressing.can_advance_to(RunState::Skipped(SkipReason::WarmUp)));
        assert!(!RunState::Compressing.can_advance_to(RunState::Skipped(SkipReason::WarmUp)));
    }
}
