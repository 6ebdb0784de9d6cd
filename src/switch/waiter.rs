//! Event waiter: resolves one switch press from a raw event stream
//!
//! A press is a gesture of two key events for the same switch (down, then up).
//! Synchronisation markers and autorepeats may be interleaved and are skipped.
//! Every call is independent and resolves to exactly one [`Outcome`].
//!
//! # Timeout contract
//!
//! The timeout is a single budget for the whole call, shared by every
//! readiness wait. A call never blocks longer than the timeout plus
//! scheduling slack, however the events are split across reads. A zero
//! timeout checks once for pending data and never blocks.

use super::event::{decode_batch, InputEvent, INPUT_EVENT_SIZE};
use super::keymap::{SwitchId, SwitchTable};
use super::stream::EventSource;
use crate::utils::Deadline;
use log::{debug, trace};
use std::time::Duration;
use thiserror::Error;

/// Number of records fetched per read: the key event and its sync marker
pub const EVENTS_PER_READ: usize = 2;

/// Why a wait resolved to [`Outcome::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// The readiness wait itself failed
    #[error("waiting for input failed: {0}")]
    WaitFailure(String),
    /// Reading from the stream failed
    #[error("reading input failed: {0}")]
    ReadFailure(String),
    /// Fewer bytes than one event record were read
    #[error("short read: got {got} bytes, expected at least {expected}")]
    ShortRead { got: usize, expected: usize },
    /// A key event carried a code that no switch emits
    #[error("unrecognized key code {0}")]
    UnrecognizedCode(u16),
    /// The two events of a gesture came from different switches
    #[error("gesture mixed switch {first} and switch {second}")]
    MismatchedGesture { first: SwitchId, second: SwitchId },
}

/// Result of a single wait for a switch press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A complete press of the given switch was observed
    Pressed(SwitchId),
    /// Nothing arrived before the timeout
    Timeout,
    /// The stream produced something unusable
    Error(FailureKind),
}

impl Outcome {
    /// Exit status used by single-shot mode
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Pressed(id) => i32::from(id.as_u8()),
            Outcome::Timeout => -2,
            Outcome::Error(_) => -1,
        }
    }

    pub fn pressed(&self) -> Option<SwitchId> {
        match self {
            Outcome::Pressed(id) => Some(*id),
            _ => None,
        }
    }
}

/// Assembly state of one press gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    AwaitingFirst,
    AwaitingSecond(SwitchId),
    Complete(SwitchId),
}

impl Gesture {
    fn advance(self, id: SwitchId) -> Result<Self, FailureKind> {
        match self {
            Gesture::AwaitingFirst => Ok(Gesture::AwaitingSecond(id)),
            Gesture::AwaitingSecond(first) if first == id => Ok(Gesture::Complete(id)),
            Gesture::AwaitingSecond(first) => {
                Err(FailureKind::MismatchedGesture { first, second: id })
            }
            done @ Gesture::Complete(_) => Ok(done),
        }
    }
}

/// How a wait stopped short of a full gesture
enum Interrupted {
    Timeout,
    Failed(FailureKind),
}

impl From<FailureKind> for Interrupted {
    fn from(kind: FailureKind) -> Self {
        Interrupted::Failed(kind)
    }
}

/// Waits for switch presses using a fixed switch table
#[derive(Debug, Clone)]
pub struct EventWaiter {
    switches: SwitchTable,
}

impl EventWaiter {
    pub fn new(switches: SwitchTable) -> Self {
        Self { switches }
    }

    /// Block until one switch press is observed, the timeout elapses, or the
    /// stream fails. Never retries; the caller owns retry policy.
    pub fn await_press<S: EventSource + ?Sized>(
        &self,
        source: &mut S,
        timeout: Duration,
    ) -> Outcome {
        match self.collect_gesture(source, Deadline::after(timeout)) {
            Ok(id) => {
                debug!("switch {} pressed", id);
                Outcome::Pressed(id)
            }
            Err(Interrupted::Timeout) => {
                debug!("no switch pressed within {:?}", timeout);
                Outcome::Timeout
            }
            Err(Interrupted::Failed(kind)) => {
                debug!("wait failed: {}", kind);
                Outcome::Error(kind)
            }
        }
    }

    fn collect_gesture<S: EventSource + ?Sized>(
        &self,
        source: &mut S,
        deadline: Deadline,
    ) -> Result<SwitchId, Interrupted> {
        let mut gesture = Gesture::AwaitingFirst;
        let mut buffer = [0u8; INPUT_EVENT_SIZE * EVENTS_PER_READ];

        loop {
            let ready = source
                .wait_readable(deadline.remaining())
                .map_err(|e| FailureKind::WaitFailure(e.to_string()))?;
            if !ready {
                return Err(Interrupted::Timeout);
            }

            let bytes_read = source
                .read_batch(&mut buffer)
                .map_err(|e| FailureKind::ReadFailure(e.to_string()))?;
            if bytes_read < INPUT_EVENT_SIZE {
                return Err(FailureKind::ShortRead {
                    got: bytes_read,
                    expected: INPUT_EVENT_SIZE,
                }
                .into());
            }
            if bytes_read % INPUT_EVENT_SIZE != 0 {
                trace!("dropping {} trailing bytes", bytes_read % INPUT_EVENT_SIZE);
            }

            for event in decode_batch(&buffer[..bytes_read]) {
                gesture = self.apply(gesture, &event)?;
                if let Gesture::Complete(id) = gesture {
                    return Ok(id);
                }
            }
        }
    }

    fn apply(&self, gesture: Gesture, event: &InputEvent) -> Result<Gesture, FailureKind> {
        if !event.is_key() {
            trace!("skipping event type {}", event.event_type);
            return Ok(gesture);
        }
        let switch = self
            .switches
            .lookup(event.code)
            .ok_or(FailureKind::UnrecognizedCode(event.code))?;
        if event.is_repeat() {
            trace!("skipping autorepeat of {}", switch.name);
            return Ok(gesture);
        }
        trace!("{} value {}", switch.name, event.value);
        gesture.advance(switch.id)
    }
}

impl Default for EventWaiter {
    fn default() -> Self {
        Self::new(SwitchTable::default())
    }
}
