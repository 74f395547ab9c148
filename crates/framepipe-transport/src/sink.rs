//! The sink capability trait.

use std::io::Write;

use tracing::debug;

use crate::{TransportError, TransportResult};

/// Trait for the outbound byte transport.
///
/// A sink is owned exclusively by the transmit loop; implementations need no
/// internal locking. A sink that reports short writes or errors loses the
/// current unit, nothing more; reconnecting a dropped consumer is out of
/// scope for a stream session.
pub trait Sink: Send {
    /// Write bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> TransportResult<usize>;

    /// Flush buffered bytes through to the consumer.
    fn flush(&mut self) -> TransportResult<()>;

    /// Close the transport. Idempotent.
    fn close(&mut self);
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, buf: &[u8]) -> TransportResult<usize> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> TransportResult<()> {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Adapter exposing any [`std::io::Write`] as a [`Sink`].
///
/// Covers the transports a receiver realistically sits behind: named pipes,
/// unix sockets, TCP streams, files.
pub struct IoSink<W: Write + Send> {
    inner: Option<W>,
}

impl<W: Write + Send> IoSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<W: Write + Send> Sink for IoSink<W> {
    fn write(&mut self, buf: &[u8]) -> TransportResult<usize> {
        let inner = self.inner.as_mut().ok_or(TransportError::Closed)?;
        Ok(inner.write(buf)?)
    }

    fn flush(&mut self) -> TransportResult<()> {
        let inner = self.inner.as_mut().ok_or(TransportError::Closed)?;
        Ok(inner.flush()?)
    }

    fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!("Sink closed");
        }
    }
}
