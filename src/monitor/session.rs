//! The monitoring session: serial source, line reader and tracker, owned
//! together and driven from a single thread.

use chrono::Local;

use super::{MonitorSink, Reading, TemperatureTracker};
use crate::config::MonitorConfig;
use crate::error::SerialError;
use crate::serial::{ByteSource, LineReader};

pub struct MonitorSession {
    source: Option<Box<dyn ByteSource>>,
    reader: LineReader,
    tracker: TemperatureTracker,
}

impl MonitorSession {
    /// Create a session reading from `source`.
    ///
    /// `None` means the port could not be opened: the session stays inactive.
    pub fn new(source: Option<Box<dyn ByteSource>>, config: MonitorConfig) -> Self {
        Self {
            source,
            reader: LineReader::new(),
            tracker: TemperatureTracker::new(config),
        }
    }

    /// Name of the attached byte source, `None` once the reader is inactive
    pub fn source_name(&self) -> Option<String> {
        self.source.as_ref().map(|s| s.describe())
    }

    /// Pull one chunk from the source and process it.
    ///
    /// A read error detaches the source for the rest of the session.
    pub fn poll(&mut self, sink: &mut dyn MonitorSink) -> Result<usize, SerialError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(0);
        };

        match source.try_read_chunk() {
            Ok(Some(chunk)) => Ok(self.ingest(&chunk, sink)),
            Ok(None) => Ok(0),
            Err(e) => {
                tracing::error!(error = %e, "serial source failed, reader stopped");
                self.source = None;
                Err(e)
            }
        }
    }

    /// Feed raw bytes and process every reading they complete
    pub fn ingest(&mut self, bytes: &[u8], sink: &mut dyn MonitorSink) -> usize {
        let values = self.reader.feed(bytes);
        let count = values.len();
        for value in values {
            self.tracker.record(Reading::new(value, Local::now()), sink);
        }
        count
    }

    pub fn tracker(&self) -> &TemperatureTracker {
        &self.tracker
    }

    pub fn reader(&self) -> &LineReader {
        &self.reader
    }
}
