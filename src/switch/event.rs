//! Raw kernel input event records

use nix::libc;

/// Synchronisation marker separating event packets
pub const EV_SYN: u16 = 0x00;
/// Key and button events
pub const EV_KEY: u16 = 0x01;

/// Key value for a release
pub const KEY_RELEASE: i32 = 0;
/// Key value for a press
pub const KEY_PRESS: i32 = 1;
/// Key value for an autorepeat while held
pub const KEY_REPEAT: i32 = 2;

const TIME_SIZE: usize = std::mem::size_of::<libc::timeval>();

/// Size in bytes of one `struct input_event` on this platform
pub const INPUT_EVENT_SIZE: usize = TIME_SIZE + 8;

/// A decoded input event. The timestamp is not needed and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EV_KEY, code, value)
    }

    pub fn syn() -> Self {
        Self::new(EV_SYN, 0, 0)
    }

    pub fn is_key(&self) -> bool {
        self.event_type == EV_KEY
    }

    pub fn is_repeat(&self) -> bool {
        self.value == KEY_REPEAT
    }

    /// Decode one record. Returns `None` if `bytes` is shorter than a record.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let body = bytes.get(TIME_SIZE..INPUT_EVENT_SIZE)?;
        Some(Self {
            event_type: u16::from_ne_bytes([body[0], body[1]]),
            code: u16::from_ne_bytes([body[2], body[3]]),
            value: i32::from_ne_bytes([body[4], body[5], body[6], body[7]]),
        })
    }

    /// Encode as a record with a zero timestamp
    pub fn to_bytes(&self) -> [u8; INPUT_EVENT_SIZE] {
        let mut bytes = [0u8; INPUT_EVENT_SIZE];
        bytes[TIME_SIZE..TIME_SIZE + 2].copy_from_slice(&self.event_type.to_ne_bytes());
        bytes[TIME_SIZE + 2..TIME_SIZE + 4].copy_from_slice(&self.code.to_ne_bytes());
        bytes[TIME_SIZE + 4..].copy_from_slice(&self.value.to_ne_bytes());
        bytes
    }
}

/// Decode every complete record in `buf`; trailing partial bytes are ignored
pub fn decode_batch(buf: &[u8]) -> impl Iterator<Item = InputEvent> + '_ {
    buf.chunks_exact(INPUT_EVENT_SIZE)
        .filter_map(InputEvent::from_bytes)
}
