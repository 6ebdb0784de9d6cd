//! Switch test modes

pub mod test_helpers;

pub use sequence::{
    describe_outcome, LogObserver, SequenceObserver, Sequencer, SilentObserver, StepRecord,
    Verdict,
};

use std::fmt;

/// How the tool was asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Press every switch in order and report pass/fail
    Sequence,
    /// Wait for one press and report which switch it was
    WaitOnce,
}

impl TestMode {
    pub fn name(&self) -> &'static str {
        match self {
            TestMode::Sequence => "sequence",
            TestMode::WaitOnce => "wait",
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
