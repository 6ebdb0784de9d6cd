//! Shared test utilities for the waiter and sequencer
//!
//! Provides a scripted [`EventSource`] and builders for common event batches.

use crate::switch::event::{InputEvent, KEY_PRESS, KEY_RELEASE};
use crate::switch::EventSource;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// One scripted reaction of a [`ScriptedSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next readiness wait times out
    Idle,
    /// The next readiness wait fails
    WaitError,
    /// The next read fails
    ReadError,
    /// The next read returns these bytes
    Bytes(Vec<u8>),
}

impl Step {
    /// A read returning the given events back to back
    pub fn events(events: &[InputEvent]) -> Self {
        Step::Bytes(events.iter().flat_map(|e| e.to_bytes()).collect())
    }
}

/// An event source that replays a fixed script without blocking.
///
/// Once the script runs out every wait times out.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    waits: usize,
}

impl ScriptedSource {
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            waits: 0,
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Number of readiness waits performed so far
    pub fn waits(&self) -> usize {
        self.waits
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl EventSource for ScriptedSource {
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        self.waits += 1;
        match self.steps.front() {
            None => Ok(false),
            Some(Step::Idle) => {
                self.steps.pop_front();
                Ok(false)
            }
            Some(Step::WaitError) => {
                self.steps.pop_front();
                Err(io::Error::new(io::ErrorKind::Other, "scripted wait failure"))
            }
            Some(_) => Ok(true),
        }
    }

    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.steps.pop_front() {
            Some(Step::Bytes(mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    // Leave the rest for the next read, as a real stream would
                    self.steps.push_front(Step::Bytes(bytes.split_off(n)));
                }
                Ok(n)
            }
            Some(Step::ReadError) => {
                Err(io::Error::new(io::ErrorKind::Other, "scripted read failure"))
            }
            Some(other) => {
                self.steps.push_front(other);
                Err(io::Error::new(io::ErrorKind::WouldBlock, "no scripted data"))
            }
            None => Err(io::Error::new(io::ErrorKind::WouldBlock, "no scripted data")),
        }
    }
}

/// Key-down and key-up of one switch, each followed by a sync marker, as two
/// separate reads
pub fn tap(code: u16) -> Vec<Step> {
    vec![
        Step::events(&[InputEvent::key(code, KEY_PRESS), InputEvent::syn()]),
        Step::events(&[InputEvent::key(code, KEY_RELEASE), InputEvent::syn()]),
    ]
}

/// Raw bytes of a full press: down, sync, up, sync
pub fn tap_bytes(code: u16) -> Vec<u8> {
    [
        InputEvent::key(code, KEY_PRESS),
        InputEvent::syn(),
        InputEvent::key(code, KEY_RELEASE),
        InputEvent::syn(),
    ]
    .iter()
    .flat_map(|e| e.to_bytes())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::event::INPUT_EVENT_SIZE;

    #[test]
    fn empty_script_times_out() {
        let mut source = ScriptedSource::default();
        assert!(!source.wait_readable(Duration::ZERO).unwrap());
        assert_eq!(source.waits(), 1);
    }

    #[test]
    fn bytes_larger_than_buffer_are_split() {
        let mut source = ScriptedSource::from_steps(vec![Step::Bytes(tap_bytes(257))]);
        let mut buf = [0u8; INPUT_EVENT_SIZE * 2];

        assert!(source.wait_readable(Duration::ZERO).unwrap());
        assert_eq!(source.read_batch(&mut buf).unwrap(), INPUT_EVENT_SIZE * 2);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.read_batch(&mut buf).unwrap(), INPUT_EVENT_SIZE * 2);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn tap_produces_two_reads() {
        let steps = tap(258);
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps[0],
            Step::events(&[InputEvent::key(258, KEY_PRESS), InputEvent::syn()])
        );
    }

    #[test]
    fn scripted_errors() {
        let mut source = ScriptedSource::from_steps(vec![Step::WaitError, Step::ReadError]);
        assert!(source.wait_readable(Duration::ZERO).is_err());
        assert!(source.wait_readable(Duration::ZERO).unwrap());
        let mut buf = [0u8; 8];
        assert!(source.read_batch(&mut buf).is_err());
    }
}
