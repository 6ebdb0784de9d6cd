//! Switch definitions, raw event decoding, and press detection

pub mod event;
pub mod keymap;
mod stream;
mod waiter;

pub use keymap::{SwitchDescriptor, SwitchId, SwitchTable, SWITCHES};
pub use stream::{DeviceStream, EventSource};
pub use waiter::{EventWaiter, FailureKind, Outcome, EVENTS_PER_READ};
