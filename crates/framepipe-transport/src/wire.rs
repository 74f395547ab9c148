//! Wire frame serialization.

use tracing::trace;

use crate::{Sink, StreamUnit, TransportError, TransportResult};

/// Serializes stream units into wire frames and writes them to a sink.
///
/// Frame layout, in this exact order:
/// - payload length, 4 bytes little-endian
/// - timestamp in microseconds, 8 bytes little-endian
/// - flags, 1 byte (bit 0 keyframe, bit 1 audio)
/// - payload bytes, verbatim
///
/// The writer is owned by a single transmit loop, so units are never
/// interleaved on the wire. Each of the four segments is length-checked; a
/// short write fails the whole unit immediately and nothing further is
/// written for it. The unit is lost, not retried.
pub struct WireWriter<S: Sink> {
    sink: S,
    frames_written: u64,
    bytes_written: u64,
}

impl<S: Sink> WireWriter<S> {
    /// Wrap a sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    /// Write one unit as a wire frame and flush the sink.
    pub fn send(&mut self, unit: &StreamUnit) -> TransportResult<()> {
        let len = unit.payload.len() as u32;

        self.write_segment(&len.to_le_bytes())?;
        self.write_segment(&unit.timestamp_us.to_le_bytes())?;
        self.write_segment(&[unit.flags()])?;
        self.write_segment(&unit.payload)?;

        self.sink.flush()?;

        self.frames_written += 1;
        trace!(
            len,
            timestamp_us = unit.timestamp_us,
            keyframe = unit.is_keyframe,
            frame = self.frames_written,
            "Wire frame written"
        );
        Ok(())
    }

    fn write_segment(&mut self, buf: &[u8]) -> TransportResult<()> {
        let written = self.sink.write(buf)?;
        if written != buf.len() {
            return Err(TransportError::ShortWrite {
                expected: buf.len(),
                written,
            });
        }
        self.bytes_written += written as u64;
        Ok(())
    }

    /// Total frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Total bytes written so far, headers included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Close the underlying sink.
    pub fn close(&mut self) {
        self.sink.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IoSink, WIRE_HEADER_LEN};
    use bytes::Bytes;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Writer sharing its captured bytes with the test body.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn roundtrip_header(frame: &[u8]) -> (u32, u64, u8) {
        let len = u32::from_le_bytes(frame[0..4].try_into().unwrap());
        let ts = u64::from_le_bytes(frame[4..12].try_into().unwrap());
        (len, ts, frame[12])
    }

    #[test]
    fn test_wire_frame_roundtrip() {
        let buf = SharedBuf::default();
        let mut writer = WireWriter::new(IoSink::new(buf.clone()));
        let payload = Bytes::from_static(&[0x00, 0x00, 0x00, 0x01, 0x65, 0x88]);
        let unit = StreamUnit::video(payload.clone(), 123_456_789, true);

        writer.send(&unit).unwrap();

        let frame = buf.contents();
        assert_eq!(frame.len(), WIRE_HEADER_LEN + payload.len());

        let (len, ts, flags) = roundtrip_header(&frame);
        assert_eq!(len as usize, payload.len());
        assert_eq!(ts, 123_456_789);
        assert_eq!(flags, 0b01);
        assert_eq!(&frame[WIRE_HEADER_LEN..], payload.as_ref());
    }

    #[test]
    fn test_wire_frames_back_to_back() {
        let buf = SharedBuf::default();
        let mut writer = WireWriter::new(IoSink::new(buf.clone()));
        writer
            .send(&StreamUnit::video(Bytes::from_static(&[0xAA]), 1, false))
            .unwrap();
        writer
            .send(&StreamUnit::video(Bytes::from_static(&[0xBB, 0xCC]), 2, false))
            .unwrap();

        assert_eq!(writer.frames_written(), 2);
        let out = buf.contents();
        assert_eq!(out.len(), 2 * WIRE_HEADER_LEN + 3);

        // Second frame starts right where the first ends.
        let second = &out[WIRE_HEADER_LEN + 1..];
        let (len, ts, _) = roundtrip_header(second);
        assert_eq!(len, 2);
        assert_eq!(ts, 2);
    }

    /// Writer that fails once its byte budget is spent, to exercise the
    /// payload-segment failure path.
    struct FailAfter {
        budget: usize,
        out: SharedBuf,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer gone"));
            }
            self.budget -= buf.len();
            self.out.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_payload_write_failure_drops_unit_cleanly() {
        let buf = SharedBuf::default();
        let mut writer = WireWriter::new(IoSink::new(FailAfter {
            budget: WIRE_HEADER_LEN,
            out: buf.clone(),
        }));

        let unit = StreamUnit::video(Bytes::from_static(&[0x65; 32]), 7, true);
        assert!(writer.send(&unit).is_err());
        assert_eq!(writer.frames_written(), 0);
        // Payload bytes never reached the sink.
        assert_eq!(buf.contents().len(), WIRE_HEADER_LEN);
    }

    /// Writer that accepts fewer bytes than asked.
    struct Truncating;

    impl Write for Truncating {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len().saturating_sub(1))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_short_write_is_an_error() {
        let mut writer = WireWriter::new(IoSink::new(Truncating));
        let unit = StreamUnit::video(Bytes::from_static(&[0x65]), 0, false);

        match writer.send(&unit) {
            Err(TransportError::ShortWrite { expected, written }) => {
                assert_eq!(expected, 4);
                assert_eq!(written, 3);
            }
            other => panic!("expected short write, got {:?}", other.err()),
        }
    }
}
