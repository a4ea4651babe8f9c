//! Serial input: the byte source abstraction, the hardware port and the
//! newline-delimited line reader.

use crate::error::SerialError;

pub mod line_reader;
pub mod port;

pub use line_reader::LineReader;
pub use port::SerialPortSource;

/// A pull-based source of raw bytes.
///
/// Implementations never block: when nothing is pending they return
/// `Ok(None)`. Chunks carry no framing guarantees.
#[cfg_attr(test, mockall::automock)]
pub trait ByteSource {
    /// Return the bytes received since the last call, if any
    fn try_read_chunk(&mut self) -> Result<Option<Vec<u8>>, SerialError>;

    /// Human-readable identifier of the source, e.g. the port name
    fn describe(&self) -> String;
}
