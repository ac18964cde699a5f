//! Pipeline stage tracking

use std::fmt;

use log::debug;

/// Stages of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Nothing started yet
    Idle,
    /// Spawning the inspector
    Launching,
    /// Inspector output is being read
    Streaming,
    /// Output ended; aggregator is emptying the channel
    Draining,
    /// Building the report
    Reporting,
    /// Report produced
    Done,
    /// A fatal error ended the run
    Failed,
}

impl PipelineStage {
    /// Stage that normally follows this one
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Launching),
            Self::Launching => Some(Self::Streaming),
            Self::Streaming => Some(Self::Draining),
            Self::Draining => Some(Self::Reporting),
            Self::Reporting => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// True for `Done` and `Failed`
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether moving from `self` to `to` is allowed
    pub fn can_transition(self, to: Self) -> bool {
        if to == Self::Failed {
            return !self.is_terminal();
        }
        self.next() == Some(to)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Launching => "launching",
            Self::Streaming => "streaming",
            Self::Draining => "draining",
            Self::Reporting => "reporting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Current stage plus logged transitions
#[derive(Debug)]
pub(crate) struct StageTracker {
    current: PipelineStage,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: PipelineStage::Idle,
        }
    }

    pub(crate) fn current(&self) -> PipelineStage {
        self.current
    }

    pub(crate) fn advance(&mut self, to: PipelineStage) {
        debug_assert!(
            self.current.can_transition(to),
            "invalid stage transition {} -> {}",
            self.current,
            to
        );
        debug!("stage: {} -> {}", self.current, to);
        self.current = to;
    }

    /// Start over from `Idle`, whatever the previous run ended in
    pub(crate) fn reset(&mut self) {
        if self.current != PipelineStage::Idle {
            debug!("stage: {} -> {} (new run)", self.current, PipelineStage::Idle);
            self.current = PipelineStage::Idle;
        }
    }

    pub(crate) fn fail(&mut self) {
        if !self.current.is_terminal() {
            self.advance(PipelineStage::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_walks_every_stage() {
        let mut tracker = StageTracker::new();
        let mut seen = vec![tracker.current()];
        while let Some(next) = tracker.current().next() {
            tracker.advance(next);
            seen.push(next);
        }

        assert_eq!(
            seen,
            vec![
                PipelineStage::Idle,
                PipelineStage::Launching,
                PipelineStage::Streaming,
                PipelineStage::Draining,
                PipelineStage::Reporting,
                PipelineStage::Done,
            ]
        );
    }

    #[test]
    fn test_any_live_stage_can_fail() {
        for stage in [
            PipelineStage::Idle,
            PipelineStage::Launching,
            PipelineStage::Streaming,
            PipelineStage::Draining,
            PipelineStage::Reporting,
        ] {
            assert!(stage.can_transition(PipelineStage::Failed));
        }
        assert!(!PipelineStage::Done.can_transition(PipelineStage::Failed));
    }

    #[test]
    fn test_skipping_stages_is_rejected() {
        assert!(!PipelineStage::Idle.can_transition(PipelineStage::Streaming));
        assert!(!PipelineStage::Draining.can_transition(PipelineStage::Done));
    }

    #[test]
    fn test_fail_is_idempotent() {
        let mut tracker = StageTracker::new();
        tracker.fail();
        tracker.fail();
        assert_eq!(tracker.current(), PipelineStage::Failed);
    }

    #[test]
    fn test_reset_allows_a_new_run_after_failure() {
        let mut tracker = StageTracker::new();
        tracker.advance(PipelineStage::Launching);
        tracker.fail();

        tracker.reset();
        assert_eq!(tracker.current(), PipelineStage::Idle);
        tracker.advance(PipelineStage::Launching);
        assert_eq!(tracker.current(), PipelineStage::Launching);
    }

    #[test]
    fn test_display_lowercase_names() {
        assert_eq!(PipelineStage::Draining.to_string(), "draining");
        assert_eq!(PipelineStage::Failed.to_string(), "failed");
    }
}
