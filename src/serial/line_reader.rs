//! Newline-delimited decoding of temperature readings.
//!
//! Bytes are accumulated until at least one `\n` arrives; every complete
//! line is then trimmed and parsed as a float, and only the bytes after the
//! last newline are kept for the next pass. Lines that do not parse are
//! dropped with a debug trace.

/// Accumulates raw bytes and yields the readings of every complete line
#[derive(Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8>,
}

impl LineReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the readings of all lines it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<f64> {
        let buffer = std::mem::take(&mut self.buffer);
        let (remainder, readings) = split_readings(buffer, chunk);
        self.buffer = remainder;
        readings
    }

    /// Bytes received after the last newline
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

/// Pure parse step: `(buffer, new bytes) -> (remaining buffer, readings)`.
///
/// The returned buffer never contains a newline.
pub fn split_readings(mut buffer: Vec<u8>, chunk: &[u8]) -> (Vec<u8>, Vec<f64>) {
    buffer.extend_from_slice(chunk);

    let Some(last_newline) = buffer.iter().rposition(|&b| b == b'\n') else {
        return (buffer, Vec::new());
    };

    let remainder = buffer.split_off(last_newline + 1);
    let readings = buffer[..last_newline]
        .split(|&b| b == b'\n')
        .filter_map(decode_line)
        .collect();

    (remainder, readings)
}

/// Decode one line (without its newline) as a finite float
pub fn decode_line(line: &[u8]) -> Option<f64> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();

    if text.is_empty() {
        tracing::trace!("skipping empty line");
        return None;
    }

    tracing::debug!(line = %text, "line received");

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            tracing::debug!(value, "temperature decoded");
            Some(value)
        }
        Ok(value) => {
            tracing::debug!(line = %text, value, "dropping non-finite reading");
            None
        }
        Err(e) => {
            tracing::debug!(line = %text, error = %e, "dropping malformed line");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &[u8] = b"23.5\n99.0\nabc\n48.44\n48.45\n";

    #[test]
    fn test_worked_example() {
        let mut reader = LineReader::new();
        assert_eq!(reader.feed(STREAM), vec![23.5, 99.0, 48.44, 48.45]);
        assert!(reader.pending().is_empty());
    }

    #[test]
    fn test_partial_line_is_kept() {
        let mut reader = LineReader::new();
        assert_eq!(reader.feed(b"21.0\n22."), vec![21.0]);
        assert_eq!(reader.pending(), b"22.");
        assert_eq!(reader.feed(b"5\n"), vec![22.5]);
        assert!(reader.pending().is_empty());
    }

    #[test]
    fn test_no_newline_accumulates() {
        let mut reader = LineReader::new();
        assert!(reader.feed(b"12").is_empty());
        assert!(reader.feed(b"34").is_empty());
        assert_eq!(reader.pending(), b"1234");
    }

    #[test]
    fn test_chunk_boundaries_do_not_matter() {
        let whole = LineReader::new().feed(STREAM);

        for size in 1..STREAM.len() {
            let mut reader = LineReader::new();
            let mut readings = Vec::new();
            for chunk in STREAM.chunks(size) {
                readings.extend(reader.feed(chunk));
                assert!(!reader.pending().contains(&b'\n'));
            }
            assert_eq!(readings, whole, "chunk size {}", size);
        }
    }

    #[test]
    fn test_chunk_boundaries_with_crlf_unicode_and_partial_tail() {
        // NBSP-padded reading, a degree-Celsius sign line and an unterminated tail
        const NOISY: &[u8] =
            b"18.5\r\n\r\n\xc2\xa025.5\xc2\xa0\r\n \t\n\xe2\x84\x83\n 21.25 \r\n-4\n30.0\r\n12.7";
        let expected = vec![18.5, 25.5, 21.25, -4.0, 30.0];

        let mut whole = LineReader::new();
        assert_eq!(whole.feed(NOISY), expected);
        assert_eq!(whole.pending(), b"12.7");

        for size in 1..=NOISY.len() {
            let mut reader = LineReader::new();
            let mut readings = Vec::new();
            for chunk in NOISY.chunks(size) {
                readings.extend(reader.feed(chunk));
            }
            assert_eq!(readings, expected, "chunk size {}", size);
            assert_eq!(reader.pending(), whole.pending(), "chunk size {}", size);
        }
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let mut reader = LineReader::new();
        assert_eq!(reader.feed(b"  20.25 \r\n\t-3.5\r\n"), vec![20.25, -3.5]);
    }

    #[test]
    fn test_malformed_and_empty_lines_are_dropped() {
        let mut reader = LineReader::new();
        let readings = reader.feed(b"\n\nTemp=20\n20,5\n1e1\n\xff\xfe\n+7\n");
        assert_eq!(readings, vec![10.0, 7.0]);
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        assert_eq!(decode_line(b"nan"), None);
        assert_eq!(decode_line(b"inf"), None);
        assert_eq!(decode_line(b"-infinity"), None);
        assert_eq!(decode_line(b"36.6"), Some(36.6));
    }

    #[test]
    fn test_split_readings_is_pure() {
        let (rest, readings) = split_readings(b"19".to_vec(), b".5\n20");
        assert_eq!(readings, vec![19.5]);
        assert_eq!(rest, b"20".to_vec());
    }
}
