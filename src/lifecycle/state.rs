use std::fmt;

/// Milestones of a lifecycle run, in the only order they can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    FileOpened,
    ClientReady,
    BucketChecked,
    BucketEnsured,
    Uploaded,
    Downloaded,
    Deleted,
    BucketDeleted,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::FileOpened => "file opened",
            Stage::ClientReady => "client ready",
            Stage::BucketChecked => "bucket checked",
            Stage::BucketEnsured => "bucket ensured",
            Stage::Uploaded => "uploaded",
            Stage::Downloaded => "downloaded",
            Stage::Deleted => "object deleted",
            Stage::BucketDeleted => "bucket deleted",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running(Stage),
    /// The run stopped with an error while at the given stage.
    Failed(Stage),
    Done,
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Running(Stage::Init)
    }
}

impl LifecycleState {
    /// Move forward to `next`. Going backwards, or moving out of a terminal
    /// state, leaves the state untouched and returns `false`.
    pub fn advance(&mut self, next: Stage) -> bool {
        match *self {
            LifecycleState::Running(current) if next > current => {
                *self = if next == Stage::Done {
                    LifecycleState::Done
                } else {
                    LifecycleState::Running(next)
                };
                true
            }
            _ => false,
        }
    }

    /// Record a failure at the current stage. Terminal states are kept.
    pub fn fail(&mut self) {
        if let LifecycleState::Running(current) = *self {
            *self = LifecycleState::Failed(current);
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match *self {
            LifecycleState::Running(stage) | LifecycleState::Failed(stage) => stage,
            LifecycleState::Done => Stage::Done,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LifecycleState::Running(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_forward_and_skips_are_allowed() {
        let mut state = LifecycleState::default();
        assert!(state.advance(Stage::FileOpened));
        assert!(state.advance(Stage::BucketChecked));
        assert_eq!(state.stage(), Stage::BucketChecked);
    }

    #[test]
    fn refuses_to_go_backwards() {
        let mut state = LifecycleState::Running(Stage::Uploaded);
        assert!(!state.advance(Stage::ClientReady));
        assert_eq!(state, LifecycleState::Running(Stage::Uploaded));
    }

    #[test]
    fn failure_is_terminal() {
        let mut state = LifecycleState::Running(Stage::Downloaded);
        state.fail();
        assert_eq!(state, LifecycleState::Failed(Stage::Downloaded));
        assert!(!state.advance(Stage::Deleted));
        assert!(state.is_terminal());
    }

    #[test]
    fn reaching_done_finishes_the_run() {
        let mut state = LifecycleState::Running(Stage::Deleted);
        assert!(state.advance(Stage::Done));
        assert_eq!(state, LifecycleState::Done);
        state.fail();
        assert_eq!(state, LifecycleState::Done);
    }
}
