//! Readable event streams
//!
//! The waiter only needs two things from a device: a bounded wait for
//! readability, and a read of whatever bytes are available. [`EventSource`]
//! captures that seam; [`DeviceStream`] implements it with `poll(2)` on any
//! readable file descriptor (an evdev node in production, a socket in tests).

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::path::Path;
use std::time::Duration;

/// A stream of raw input event bytes with a readiness wait
pub trait EventSource {
    /// Block until data is readable or `timeout` elapses.
    ///
    /// Returns `Ok(true)` when data is ready and `Ok(false)` on timeout. A zero
    /// timeout checks readiness without blocking.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read available bytes into `buf`
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Event source over a readable file descriptor.
///
/// The descriptor is owned and closed when the stream is dropped.
#[derive(Debug)]
pub struct DeviceStream<R = File> {
    inner: R,
}

impl DeviceStream<File> {
    /// Open an input device node read-only
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        log::debug!("opened input device {}", path.as_ref().display());
        Ok(Self::new(file))
    }
}

impl<R: Read + AsFd> DeviceStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

/// Convert a wait duration to a `poll(2)` timeout in milliseconds, rounding up
/// so that a sub-millisecond remainder does not turn into a busy poll.
fn poll_timeout_ms(timeout: Duration) -> i32 {
    let millis = timeout.as_micros().div_ceil(1000);
    millis.min(i32::MAX as u128) as i32
}

impl<R: Read + AsFd> EventSource for DeviceStream<R> {
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        let poll_timeout = PollTimeout::try_from(poll_timeout_ms(timeout))
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "poll timeout out of range"))?;
        let mut fds = [PollFd::new(self.inner.as_fd(), PollFlags::POLLIN)];

        let ready = poll(&mut fds, poll_timeout)?;
        if ready == 0 {
            return Ok(false);
        }
        let revents = fds[0].revents().unwrap_or(PollFlags::empty());
        if revents.contains(PollFlags::POLLNVAL) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "poll reported an invalid descriptor",
            ));
        }
        // POLLHUP/POLLERR also count as ready: the read reports the problem
        Ok(true)
    }

    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixStream;

    #[test]
    fn poll_timeout_rounds_up() {
        assert_eq!(poll_timeout_ms(Duration::ZERO), 0);
        assert_eq!(poll_timeout_ms(Duration::from_micros(1)), 1);
        assert_eq!(poll_timeout_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(poll_timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
    }

    #[test]
    fn idle_stream_times_out() {
        let (_writer, reader) = UnixStream::pair().unwrap();
        let mut stream = DeviceStream::new(reader);
        assert!(!stream.wait_readable(Duration::ZERO).unwrap());
    }

    #[test]
    fn pending_data_is_ready() {
        let (mut writer, reader) = UnixStream::pair().unwrap();
        writer.write_all(&[1, 2, 3]).unwrap();
        let mut stream = DeviceStream::new(reader);
        assert!(stream.wait_readable(Duration::from_secs(1)).unwrap());

        let mut buf = [0u8; 8];
        assert_eq!(stream.read_batch(&mut buf).unwrap(), 3);
    }

    #[test]
    fn hung_up_stream_is_ready() {
        let (writer, reader) = UnixStream::pair().unwrap();
        drop(writer);
        let mut stream = DeviceStream::new(reader);
        assert!(stream.wait_readable(Duration::from_secs(1)).unwrap());

        let mut buf = [0u8; 8];
        assert_eq!(stream.read_batch(&mut buf).unwrap(), 0);
    }

    #[test]
    fn open_missing_device_fails() {
        let result = DeviceStream::open("/nonexistent/input/event99");
        assert!(result.is_err());
    }
}
